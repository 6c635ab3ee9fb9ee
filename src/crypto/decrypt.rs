// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Decrypt;
use crate::ciphertext::{CipherPair, Ciphertext};
use crate::codec;
use crate::error::{Error, Result};
use crate::keypair::PrivateKey;
use crate::math::pow_mod;

use num_bigint_dig::BigUint;
use num_traits::Zero;

impl PrivateKey {
    /// Recover the field element carried by one pair.
    ///
    /// `c1` must lie in `[1, p)` and `c2` in `[0, p)`.
    pub fn decrypt_block(&self, pair: &CipherPair) -> Result<BigUint> {
        let p = self.public_key.p();
        if pair.c1().is_zero() || pair.c1() >= p || pair.c2() >= p {
            return Err(Error::MalformedCiphertext(
                "ciphertext element outside the key's field".into(),
            ));
        }

        // s = c1^x is the shared secret; s^(p-2) is its inverse since p is prime.
        let s = pow_mod(pair.c1(), &self.x, p);
        let s_inv = pow_mod(&s, &(p - BigUint::from(2u32)), p);

        Ok((pair.c2() * s_inv) % p)
    }
}

impl Decrypt for PrivateKey {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<String> {
        let blocks = ciphertext
            .iter()
            .map(|pair| self.decrypt_block(pair))
            .collect::<Result<Vec<_>>>()?;

        codec::decode(&blocks, self.public_key.block_bits())
    }
}
