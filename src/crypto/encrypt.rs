// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Encrypt;
use crate::ciphertext::{CipherPair, Ciphertext};
use crate::codec;
use crate::error::{Error, Result};
use crate::keypair::PublicKey;
use crate::math::pow_mod;

use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::One;
use rand::{CryptoRng, RngCore};

impl PublicKey {
    /// Encrypt a single field element `m < p`.
    ///
    /// A fresh ephemeral exponent `y ∈ [1, p − 2]` is drawn for every call.
    pub fn encrypt_block<R: RngCore + CryptoRng>(
        &self,
        m: &BigUint,
        rng: &mut R,
    ) -> Result<CipherPair> {
        let p = self.p();
        if m >= p {
            return Err(Error::PlaintextTooLarge);
        }

        let y = rng.gen_biguint_range(&BigUint::one(), &(p - BigUint::one()));

        // c1 = g^y, c2 = m·h^y
        let c1 = pow_mod(self.g(), &y, p);
        let c2 = (m * pow_mod(self.h(), &y, p)) % p;

        Ok(CipherPair::new(c1, c2))
    }
}

impl Encrypt for PublicKey {
    fn encrypt_with_rng<R: RngCore + CryptoRng>(
        &self,
        plaintext: &str,
        rng: &mut R,
    ) -> Result<Ciphertext> {
        codec::encode(plaintext, self.block_bits())?
            .iter()
            .map(|m| self.encrypt_block(m, rng))
            .collect()
    }
}
