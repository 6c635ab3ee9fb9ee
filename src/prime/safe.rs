// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Safe prime generation: `p = 2q + 1` with both `p` and `q` prime.

use num_bigint_dig::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::{CryptoRng, RngCore};

use super::{is_probable_prime, SMALL_PRIMES};
use crate::error::{Error, Result};

/// Smallest bit length with a safe prime of exactly that size (7 = 2·3 + 1).
pub const MIN_BIT_LENGTH: usize = 3;

/// Samples safe primes of an exact bit length.
///
/// Candidates `q` are odd and drawn uniformly from `[2^(b−2), 2^(b−1))`, which
/// puts `p = 2q + 1` in `[2^(b−1), 2^b)`. Both are sieved against the small
/// primes before the Baillie–PSW test. Sampling is unbounded unless a cap is set
/// with [`with_max_attempts`](Self::with_max_attempts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafePrimeGenerator {
    bit_length: usize,
    max_attempts: Option<usize>,
}

impl SafePrimeGenerator {
    /// # Errors
    ///
    /// Returns [`Error::InvalidDomain`] if `bit_length < MIN_BIT_LENGTH`.
    pub fn new(bit_length: usize) -> Result<Self> {
        if bit_length < MIN_BIT_LENGTH {
            return Err(Error::InvalidDomain(format!(
                "safe primes need at least {} bits, got {}",
                MIN_BIT_LENGTH, bit_length
            )));
        }

        Ok(Self {
            bit_length,
            max_attempts: None,
        })
    }

    /// Gives up after `attempts` sampled candidates.
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    #[inline]
    pub fn bit_length(&self) -> usize {
        self.bit_length
    }

    #[inline]
    pub fn max_attempts(&self) -> Option<usize> {
        self.max_attempts
    }

    /// Draws candidates until one yields a safe prime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GenerationExhausted`] if a cap is configured and reached.
    pub fn generate<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<BigUint> {
        let low = BigUint::one() << (self.bit_length - 3);
        let high = BigUint::one() << (self.bit_length - 2);

        let mut attempts = 0usize;
        loop {
            if self.max_attempts.map_or(false, |cap| attempts >= cap) {
                log::debug!(
                    "no {}-bit safe prime within {} attempts",
                    self.bit_length,
                    attempts
                );
                return Err(Error::GenerationExhausted { attempts });
            }
            attempts += 1;

            let q = (rng.gen_biguint_range(&low, &high) << 1) | BigUint::one();
            let p = (&q << 1) | BigUint::one();

            if has_small_factor(&q) || has_small_factor(&p) {
                log::trace!("candidate q rejected by sieve (attempt {})", attempts);
                continue;
            }

            if is_probable_prime(&q) && is_probable_prime(&p) {
                log::debug!(
                    "found {}-bit safe prime after {} attempts",
                    self.bit_length,
                    attempts
                );
                return Ok(p);
            }

            log::trace!("candidate q failed primality (attempt {})", attempts);
        }
    }
}

/// True when `p` is a safe prime.
pub fn is_safe_prime(p: &BigUint) -> bool {
    if p.is_even() || *p < BigUint::from(5u32) {
        return false;
    }

    let q: BigUint = p >> 1;
    is_probable_prime(&q) && is_probable_prime(p)
}

/// Fast rejection for candidates divisible by an odd small prime.
///
/// Values that fit in a `u32` are left to the full test, since they may equal
/// one of the sieve primes.
#[inline]
fn has_small_factor(n: &BigUint) -> bool {
    if n.to_u32().is_some() {
        return false;
    }

    SMALL_PRIMES[1..].iter().any(|&prime| (n % prime).is_zero())
}
