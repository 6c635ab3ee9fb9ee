// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Primitive roots of a safe-prime field.

use num_bigint_dig::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use rand::{CryptoRng, RngCore};

use crate::error::{Error, Result};
use crate::math::pow_mod;

/// Samples generators of `(Z/pZ)*` for a safe prime `p = 2q + 1`.
///
/// The group has order `2q`, so `g` generates it exactly when
/// `g^q ≠ 1` and `g^2 ≠ 1` modulo `p`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrimitiveRootFinder {
    max_attempts: Option<usize>,
}

impl PrimitiveRootFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives up after `attempts` sampled candidates.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Draws `g` uniformly from `[2, p − 1]` until it is a primitive root.
    ///
    /// `p` must be a safe prime; only its shape is checked here.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDomain`] if `p` is even or below 5, and
    /// [`Error::GenerationExhausted`] if a cap is configured and reached.
    pub fn find<R: RngCore + CryptoRng>(&self, p: &BigUint, rng: &mut R) -> Result<BigUint> {
        if p.is_even() || *p < BigUint::from(5u32) {
            return Err(Error::InvalidDomain(format!(
                "primitive root search needs a safe prime, got {}",
                p
            )));
        }

        let low = BigUint::from(2u32);
        let mut attempts = 0usize;

        loop {
            if self.max_attempts.map_or(false, |cap| attempts >= cap) {
                return Err(Error::GenerationExhausted { attempts });
            }
            attempts += 1;

            let g = rng.gen_biguint_range(&low, p);
            if is_primitive_root(&g, p) {
                log::debug!("found primitive root after {} attempts", attempts);
                return Ok(g);
            }

            log::trace!("candidate generator rejected (attempt {})", attempts);
        }
    }
}

/// True when `g` generates `(Z/pZ)*` for the safe prime `p`.
pub fn is_primitive_root(g: &BigUint, p: &BigUint) -> bool {
    if *g < BigUint::from(2u32) || g >= p {
        return false;
    }

    let p_minus_1 = p - BigUint::one();
    let q: BigUint = &p_minus_1 >> 1;

    // (p - 1) / 2 = q and (p - 1) / q = 2 cover both prime factors of 2q.
    !pow_mod(g, &q, p).is_one() && !pow_mod(g, &BigUint::from(2u32), p).is_one()
}
