// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lucas sequences `U(P, Q)` and `V(P, Q)` reduced modulo an odd `n`.
//!
//! Terms are reached by binary doubling over the digits of the target
//! subscript, so `(U_k, V_k)` costs `O(log k)` multiplications:
//!
//! - doubling: `U_2k = U_k·V_k`, `V_2k = V_k² − 2·Q^k`
//! - stepping: `U_k+1 = (P·U_k + V_k) / 2`, `V_k+1 = (D·U_k + P·V_k) / 2`
//!
//! Halving happens modulo `n`: an odd numerator gets `n` added first.

use num_bigint_dig::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use super::bits_le;
use crate::error::{Error, Result};

/// Parameters `P`, `Q` and the discriminant `D = P² − 4Q`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LucasParams {
    p: BigInt,
    q: BigInt,
    d: BigInt,
}

impl LucasParams {
    /// Sequence parameters with the discriminant derived from `P` and `Q`.
    pub fn new(p: BigInt, q: BigInt) -> Self {
        let d = &p * &p - BigInt::from(4) * &q;
        Self { p, q, d }
    }

    /// Selfridge's choice for a discriminant `D ≡ 1 (mod 4)`: `P = 1`, `Q = (1 − D) / 4`.
    pub fn selfridge(d: BigInt) -> Self {
        let q = (BigInt::one() - &d) / BigInt::from(4);
        Self {
            p: BigInt::one(),
            q,
            d,
        }
    }

    #[inline]
    pub fn p(&self) -> &BigInt {
        &self.p
    }

    #[inline]
    pub fn q(&self) -> &BigInt {
        &self.q
    }

    #[inline]
    pub fn d(&self) -> &BigInt {
        &self.d
    }
}

/// Computes `(U_k mod n, V_k mod n)` starting from the terms `u`, `v` at subscript 1.
///
/// For the standard sequences pass `u = 1` and `v = P`.
///
/// # Errors
///
/// Returns [`Error::InvalidDomain`] if `k` is zero or `n` is not an odd number ≥ 3.
///
/// # Example
///
/// ```
/// # use elgamal_bpsw::math::lucas::{advance, LucasParams};
/// # use num_bigint_dig::{BigInt, BigUint};
/// // P = 1, Q = -1 gives the Fibonacci and Lucas numbers.
/// let params = LucasParams::new(BigInt::from(1), BigInt::from(-1));
/// let (u, v) = advance(
///     &BigUint::from(10u32),
///     &BigUint::from(1_000_003u32),
///     &BigInt::from(1),
///     params.p(),
///     &params,
/// )
/// .unwrap();
/// assert_eq!(u, BigUint::from(55u32));
/// assert_eq!(v, BigUint::from(123u32));
/// ```
pub fn advance(
    k: &BigUint,
    n: &BigUint,
    u: &BigInt,
    v: &BigInt,
    params: &LucasParams,
) -> Result<(BigUint, BigUint)> {
    if k.is_zero() {
        return Err(Error::InvalidDomain("Lucas subscript must be at least 1".into()));
    }
    if n.is_even() || *n < BigUint::from(3u32) {
        return Err(Error::InvalidDomain(format!(
            "Lucas modulus must be odd and at least 3, got {}",
            n
        )));
    }

    let mut state = LucasState::new(params, n, u, v);
    state.walk(k, |_| {});

    Ok(state.into_terms())
}

/// Which numerators of a step update were odd and needed `n` added before halving.
///
/// The first numerator is `P·U + V`, the second `D·U + P·V`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum StepParity {
    BothEven,
    OddV,
    OddU,
    BothOdd,
}

/// Running `(U, V, subscript)` for a single evaluation, with `Q^subscript` carried alongside.
#[derive(Debug, Clone)]
pub(crate) struct LucasState<'a> {
    params: &'a LucasParams,
    modulus: BigInt,
    u: BigInt,
    v: BigInt,
    subscript: BigUint,
    q_power: BigInt,
}

impl<'a> LucasState<'a> {
    /// State at subscript 1. `n` must be odd.
    pub(crate) fn new(params: &'a LucasParams, n: &BigUint, u: &BigInt, v: &BigInt) -> Self {
        let modulus = BigInt::from_biguint(Sign::Plus, n.clone());

        Self {
            params,
            u: u.mod_floor(&modulus),
            v: v.mod_floor(&modulus),
            subscript: BigUint::one(),
            q_power: params.q.mod_floor(&modulus),
            modulus,
        }
    }

    /// `k → 2k`.
    pub(crate) fn double(&mut self) {
        let n = &self.modulus;

        let u = (&self.u * &self.v).mod_floor(n);
        let v = (&self.v * &self.v - BigInt::from(2) * &self.q_power).mod_floor(n);

        self.u = u;
        self.v = v;
        self.q_power = (&self.q_power * &self.q_power).mod_floor(n);
        self.subscript = &self.subscript << 1;
    }

    /// `k → k + 1`, reporting which numerators were odd.
    pub(crate) fn step(&mut self) -> StepParity {
        let n = &self.modulus;
        let params = self.params;
        let two = BigInt::from(2);

        let u_sum = &params.p * &self.u + &self.v;
        let v_sum = &params.d * &self.u + &params.p * &self.v;

        let parity = match (u_sum.is_odd(), v_sum.is_odd()) {
            (false, false) => StepParity::BothEven,
            (false, true) => StepParity::OddV,
            (true, false) => StepParity::OddU,
            (true, true) => StepParity::BothOdd,
        };

        let (u_sum, v_sum) = match parity {
            StepParity::BothEven => (u_sum, v_sum),
            StepParity::OddV => (u_sum, v_sum + n),
            StepParity::OddU => (u_sum + n, v_sum),
            StepParity::BothOdd => (u_sum + n, v_sum + n),
        };

        self.u = (u_sum / &two).mod_floor(n);
        self.v = (v_sum / &two).mod_floor(n);
        self.q_power = (&self.q_power * &params.q).mod_floor(n);
        self.subscript += 1u32;

        parity
    }

    /// Advances from subscript 1 to `k`, calling `on_step` after every step update.
    pub(crate) fn walk<F: FnMut(StepParity)>(&mut self, k: &BigUint, mut on_step: F) {
        for bit in bits_le(k).into_iter().rev().skip(1) {
            self.double();
            if bit {
                on_step(self.step());
            }
        }
    }

    #[inline]
    pub(crate) fn u(&self) -> &BigInt {
        &self.u
    }

    #[inline]
    pub(crate) fn v(&self) -> &BigInt {
        &self.v
    }

    #[cfg(test)]
    pub(crate) fn subscript(&self) -> &BigUint {
        &self.subscript
    }

    pub(crate) fn into_terms(self) -> (BigUint, BigUint) {
        let u = self.u.to_biguint().unwrap_or_else(BigUint::zero);
        let v = self.v.to_biguint().unwrap_or_else(BigUint::zero);
        (u, v)
    }
}
