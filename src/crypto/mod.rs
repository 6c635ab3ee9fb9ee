// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod decrypt;
mod encrypt;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::ciphertext::Ciphertext;
use crate::error::Result;

/// Encrypts text under an ElGamal public key.
pub trait Encrypt {
    /// Encrypt `plaintext`, drawing a fresh ephemeral exponent per chunk from `rng`.
    fn encrypt_with_rng<R: RngCore + CryptoRng>(
        &self,
        plaintext: &str,
        rng: &mut R,
    ) -> Result<Ciphertext>;

    /// Encrypt `plaintext` with operating-system randomness.
    fn encrypt(&self, plaintext: &str) -> Result<Ciphertext> {
        self.encrypt_with_rng(plaintext, &mut OsRng)
    }
}

/// Recovers text from an ElGamal ciphertext.
pub trait Decrypt {
    /// Recover the plaintext, with padding NULs stripped.
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<String>;

    /// Parse a wire-format ciphertext and decrypt it.
    fn decrypt_str(&self, ciphertext: &str) -> Result<String> {
        let ciphertext: Ciphertext = ciphertext.parse()?;
        self.decrypt(&ciphertext)
    }
}
