// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Baillie–PSW probable-prime testing and the generators built on it.
//!
//! The test runs trial division, a strong Fermat (Miller–Rabin) test to base 2,
//! a perfect-square check, and a strong Lucas test with Selfridge parameters.
//! No composite is known to pass the combination.

pub mod root;
pub mod safe;

use num_bigint_dig::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use crate::math::jacobi;
use crate::math::lucas::{LucasParams, LucasState};
use crate::math::pow_mod;

/// Primes below 500, used for trial division and candidate sieving.
pub(crate) static SMALL_PRIMES: &[u32] = &[
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293, 307,
    311, 313, 317, 331, 337, 347, 349, 353, 359, 367, 373, 379, 383, 389, 397, 401, 409, 419, 421,
    431, 433, 439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499,
];

/// Outcome of a probable-prime test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primality {
    ProbablePrime,
    Composite,
}

impl Primality {
    #[inline]
    pub fn is_probable_prime(self) -> bool {
        self == Primality::ProbablePrime
    }
}

/// Classifies `n` with the Baillie–PSW test.
///
/// 0 and 1 are [`Primality::Composite`].
///
/// # Example
///
/// ```
/// # use elgamal_bpsw::prime::{baillie_psw, Primality};
/// # use num_bigint_dig::BigUint;
/// assert_eq!(baillie_psw(&BigUint::from(104_729u32)), Primality::ProbablePrime);
/// assert_eq!(baillie_psw(&BigUint::from(561u32)), Primality::Composite);
/// ```
pub fn baillie_psw(n: &BigUint) -> Primality {
    if let Some(outcome) = trial_division(n) {
        return outcome;
    }

    if !miller_rabin_base_2(n) {
        return Primality::Composite;
    }

    if is_perfect_square(n) {
        return Primality::Composite;
    }

    lucas_probable_prime(n)
}

/// Convenience wrapper around [`baillie_psw`].
#[inline]
pub fn is_probable_prime(n: &BigUint) -> bool {
    baillie_psw(n).is_probable_prime()
}

/// Settles `n` if it is below 2, one of the small primes, or divisible by one.
fn trial_division(n: &BigUint) -> Option<Primality> {
    if *n < BigUint::from(2u32) {
        return Some(Primality::Composite);
    }

    let small = n.to_u32();
    for &prime in SMALL_PRIMES {
        if small == Some(prime) {
            return Some(Primality::ProbablePrime);
        }
        if (n % prime).is_zero() {
            return Some(Primality::Composite);
        }
    }

    None
}

/// Writes `m = d·2^s` with `d` odd. `m` must be non-zero.
fn split_twos(m: &BigUint) -> (BigUint, usize) {
    let mut d = m.clone();
    let mut s = 0;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }
    (d, s)
}

/// Strong probable-prime test to base 2. `n` must be odd and greater than 2.
pub(crate) fn miller_rabin_base_2(n: &BigUint) -> bool {
    let n_minus_1 = n - BigUint::one();
    let (d, s) = split_twos(&n_minus_1);

    let mut x = pow_mod(&BigUint::from(2u32), &d, n);
    if x.is_one() || x == n_minus_1 {
        return true;
    }

    for _ in 1..s {
        x = (&x * &x) % n;
        if x == n_minus_1 {
            return true;
        }
        if x.is_one() {
            return false;
        }
    }

    false
}

#[inline]
pub(crate) fn is_perfect_square(n: &BigUint) -> bool {
    let root = n.sqrt();
    &root * &root == *n
}

/// First of 5, −7, 9, −11, … with Jacobi symbol −1 modulo `n`.
///
/// Returns `None` once a candidate shares a proper factor with `n`. `n` must be
/// odd and not a perfect square, otherwise the search does not end.
fn selfridge_discriminant(n: &BigUint) -> Option<BigInt> {
    let modulus = BigInt::from_biguint(Sign::Plus, n.clone());
    let mut magnitude = BigInt::from(5);
    let mut negative = false;

    loop {
        let d = if negative { -&magnitude } else { magnitude.clone() };

        match jacobi(&d, &modulus) {
            -1 => return Some(d),
            0 if magnitude != modulus => return None,
            _ => {}
        }

        magnitude += BigInt::from(2);
        negative = !negative;
    }
}

/// Strong Lucas probable-prime test with Selfridge parameters.
///
/// Requires `U_{n+1} ≡ 0 (mod n)` and, writing `n + 1 = d·2^s`, either
/// `U_d ≡ 0` or `V_{d·2^r} ≡ 0` for some `0 ≤ r < s`. A single walk reaches
/// `d` and then doubles up to `n + 1`. `n` must be odd and not a perfect square.
pub(crate) fn lucas_probable_prime(n: &BigUint) -> Primality {
    let d = match selfridge_discriminant(n) {
        Some(d) => d,
        None => return Primality::Composite,
    };
    let params = LucasParams::selfridge(d);

    let (odd_part, s) = split_twos(&(n + BigUint::one()));

    let mut state = LucasState::new(&params, n, &BigInt::one(), params.p());
    state.walk(&odd_part, |_| {});

    let mut strong = state.u().is_zero();
    for _ in 0..s {
        strong |= state.v().is_zero();
        state.double();
    }

    if strong && state.u().is_zero() {
        Primality::ProbablePrime
    } else {
        Primality::Composite
    }
}
