// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Arbitrary-precision modular arithmetic: exponentiation, the Jacobi symbol,
//! and Lucas sequences.

pub mod lucas;

use num_bigint_dig::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{Error, Result};

/// Computes `base^exponent mod modulus` by square-and-multiply.
///
/// The result always lies in `[0, modulus)`, so a modulus of 1 yields 0.
///
/// # Errors
///
/// Returns [`Error::InvalidDomain`] if `modulus` is zero.
///
/// # Example
///
/// ```
/// # use elgamal_bpsw::math::mod_exp;
/// # use num_bigint_dig::BigUint;
/// let r = mod_exp(&BigUint::from(4u32), &BigUint::from(13u32), &BigUint::from(497u32)).unwrap();
/// assert_eq!(r, BigUint::from(445u32));
/// ```
pub fn mod_exp(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    if modulus.is_zero() {
        return Err(Error::InvalidDomain("modulus must be at least 1".into()));
    }

    Ok(pow_mod(base, exponent, modulus))
}

/// Square-and-multiply without the modulus check. `modulus` must be non-zero.
pub(crate) fn pow_mod(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    let mut result = BigUint::one() % modulus;
    let mut base = base % modulus;

    for bit in bits_le(exponent) {
        if bit {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
    }

    result
}

/// Binary digits of `n`, least significant first, without leading zeros.
pub(crate) fn bits_le(n: &BigUint) -> Vec<bool> {
    let bytes = n.to_bytes_le();
    (0..n.bits())
        .map(|i| (bytes[i / 8] >> (i % 8)) & 1 == 1)
        .collect()
}

/// Evaluates the Jacobi symbol `(a / n)`.
///
/// # Errors
///
/// Returns [`Error::InvalidDomain`] unless `n` is odd and positive.
///
/// # Example
///
/// ```
/// # use elgamal_bpsw::math::jacobi_symbol;
/// # use num_bigint_dig::BigInt;
/// assert_eq!(jacobi_symbol(&BigInt::from(1001), &BigInt::from(9907)).unwrap(), -1);
/// assert_eq!(jacobi_symbol(&BigInt::from(19), &BigInt::from(45)).unwrap(), 1);
/// assert_eq!(jacobi_symbol(&BigInt::from(3), &BigInt::from(9)).unwrap(), 0);
/// ```
pub fn jacobi_symbol(a: &BigInt, n: &BigInt) -> Result<i8> {
    if n.sign() != Sign::Plus || n.is_even() {
        return Err(Error::InvalidDomain(format!(
            "Jacobi symbol needs an odd positive modulus, got {}",
            n
        )));
    }

    Ok(jacobi(a, n))
}

/// Binary Jacobi evaluation. `n` must be odd and positive.
///
/// The numerator is reduced modulo `n` before any factor of 2 is stripped, and
/// reciprocity swaps the pair in place, so the loop runs `O(log n)` rounds
/// whatever the size of `a`.
pub(crate) fn jacobi(a: &BigInt, n: &BigInt) -> i8 {
    let two = BigInt::from(2);
    let mut result = 1i8;

    let mut a = if a.is_negative() {
        // (-1 / n) depends on the integer parity of (n - 1) / 2.
        let half = (n - BigInt::one()) / &two;
        if half.is_odd() {
            result = -result;
        }
        (-a).mod_floor(n)
    } else {
        a.mod_floor(n)
    };
    let mut n = n.clone();

    while !a.is_zero() {
        // (2 / n) = -1 exactly when n ≡ 3, 5 (mod 8)
        while a.is_even() {
            a = a / &two;
            if matches!(residue(&n, 8), 3 | 5) {
                result = -result;
            }
        }

        std::mem::swap(&mut a, &mut n);
        if residue(&a, 4) == 3 && residue(&n, 4) == 3 {
            result = -result;
        }
        a = a.mod_floor(&n);
    }

    if n.is_one() {
        result
    } else {
        0
    }
}

#[inline]
fn residue(value: &BigInt, modulus: u32) -> u32 {
    value
        .mod_floor(&BigInt::from(modulus))
        .to_u32()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use quickcheck_macros::quickcheck;

    fn big(value: u64) -> BigUint {
        BigUint::from(value)
    }

    #[test]
    fn mod_exp_small_vectors() {
        assert_eq!(mod_exp(&big(4), &big(13), &big(497)).unwrap(), big(445));
        assert_eq!(mod_exp(&big(2), &big(10), &big(1_000)).unwrap(), big(24));
        assert_eq!(mod_exp(&big(3), &big(200), &big(13)).unwrap(), big(9));
    }

    #[test]
    fn mod_exp_zero_exponent_is_one() {
        for modulus in [2u64, 3, 97, 1 << 40] {
            for base in [0u64, 1, 5, 96, u64::MAX] {
                assert_eq!(mod_exp(&big(base), &big(0), &big(modulus)).unwrap(), big(1));
            }
        }
    }

    #[test]
    fn mod_exp_zero_base_is_zero() {
        for modulus in [2u64, 7, 1_000_003] {
            for exponent in [1u64, 2, 63, 1_000] {
                assert!(mod_exp(&big(0), &big(exponent), &big(modulus)).unwrap().is_zero());
            }
        }
    }

    #[test]
    fn mod_exp_unit_modulus() {
        assert!(mod_exp(&big(9), &big(0), &big(1)).unwrap().is_zero());
        assert!(mod_exp(&big(9), &big(5), &big(1)).unwrap().is_zero());
    }

    #[test]
    fn mod_exp_rejects_zero_modulus() {
        let result = mod_exp(&big(3), &big(3), &big(0));
        assert!(matches!(result, Err(Error::InvalidDomain(_))));
    }

    #[quickcheck]
    fn mod_exp_agrees_with_modpow(base: u64, exponent: u32, modulus: u64) -> bool {
        let modulus = big(modulus.max(1));
        let expected = big(base).modpow(&BigUint::from(exponent), &modulus);
        mod_exp(&big(base), &BigUint::from(exponent), &modulus).unwrap() == expected
    }

    #[test]
    fn bits_le_skips_leading_zeros() {
        assert_eq!(bits_le(&big(0)), Vec::<bool>::new());
        assert_eq!(bits_le(&big(1)), vec![true]);
        assert_eq!(bits_le(&big(6)), vec![false, true, true]);
        assert_eq!(bits_le(&big(256)).len(), 9);
    }

    #[test]
    fn jacobi_known_values() {
        let cases: &[(i64, i64, i8)] = &[
            (1001, 9907, -1),
            (19, 45, 1),
            (8, 21, -1),
            (5, 21, 1),
            (3, 9, 0),
            (0, 1, 1),
            (0, 7, 0),
            (2, 7, 1),
            (2, 5, -1),
            (-1, 7, -1),
            (-1, 5, 1),
            (-7, 11, 1),
            (30, 7, 1),
        ];

        for &(a, n, expected) in cases {
            let got = jacobi_symbol(&BigInt::from(a), &BigInt::from(n)).unwrap();
            assert_eq!(got, expected, "({} / {})", a, n);
        }
    }

    #[test]
    fn jacobi_rejects_even_or_negative_modulus() {
        for n in [0i64, 2, 10, -3] {
            let result = jacobi_symbol(&BigInt::from(3), &BigInt::from(n));
            assert!(matches!(result, Err(Error::InvalidDomain(_))), "n = {}", n);
        }
    }

    #[test]
    fn jacobi_matches_euler_criterion_for_primes() {
        for p in [3u64, 5, 7, 11, 13, 101, 499, 7919] {
            let modulus = BigInt::from(p);
            for a in 0..p.min(200) {
                let euler = big(a).modpow(&big((p - 1) / 2), &big(p));
                let expected = if euler.is_zero() {
                    0
                } else if euler.is_one() {
                    1
                } else {
                    -1
                };
                assert_eq!(jacobi(&BigInt::from(a), &modulus), expected, "({} / {})", a, p);
            }
        }
    }

    #[test]
    fn jacobi_handles_huge_numerators() {
        // 1_000_003 is a prime ≡ 3 (mod 8), so (2 / n) = -1 and (-1 / n) = -1.
        let n = BigInt::from(1_000_003);

        for shift in [4_096usize, 20_000, 200_000] {
            let a = BigInt::one() << shift;
            let reduced = a.mod_floor(&n);
            assert_eq!(
                jacobi_symbol(&a, &n).unwrap(),
                jacobi_symbol(&reduced, &n).unwrap(),
                "2^{}",
                shift
            );
        }

        assert_eq!(jacobi_symbol(&(BigInt::one() << 4_096usize), &n).unwrap(), 1);
        assert_eq!(jacobi_symbol(&(BigInt::one() << 4_097usize), &n).unwrap(), -1);
        assert_eq!(jacobi_symbol(&(BigInt::from(3) << 20_001usize), &n).unwrap(), 1);
        assert_eq!(jacobi_symbol(&-(BigInt::one() << 200_001usize), &n).unwrap(), 1);
    }

    #[quickcheck]
    fn jacobi_invariant_under_reduction_for_wide_numerators(
        limbs: Vec<u32>,
        shift: u16,
        negative: bool,
        n: u32,
    ) -> bool {
        let n = BigInt::from(u64::from(n) * 2 + 1);
        let magnitude = BigUint::new(limbs) << usize::from(shift);
        let sign = if negative { Sign::Minus } else { Sign::Plus };
        let a = BigInt::from_biguint(sign, magnitude);
        let reduced = a.mod_floor(&n);
        jacobi_symbol(&a, &n).unwrap() == jacobi_symbol(&reduced, &n).unwrap()
    }

    #[quickcheck]
    fn jacobi_invariant_under_reduction(a: i64, n: u32) -> bool {
        let n = BigInt::from(u64::from(n % 50_000) * 2 + 1);
        let a = BigInt::from(a);
        let reduced = a.mod_floor(&n);
        jacobi_symbol(&a, &n).unwrap() == jacobi_symbol(&reduced, &n).unwrap()
    }
}
