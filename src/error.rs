// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Errors that can occur during arithmetic, generation, or cipher operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Numeric input outside the domain of a modular or Jacobi routine.
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    /// Ciphertext string or pair that cannot belong to the key's field.
    #[error("Malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    /// Decrypted byte stream that is not valid UTF-16.
    #[error("Decoding failed: {0}")]
    DecodingFailure(String),

    /// A configured retry cap ran out before a suitable value was sampled.
    #[error("Generation exhausted after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error("Invalid key size: must be at least {min} bits, got {actual}")]
    InvalidKeySize { min: usize, actual: usize },

    #[error("Plaintext exceeds maximum allowed value")]
    PlaintextTooLarge,

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Invalid key record: {0}")]
    InvalidKeyRecord(String),
}

pub type Result<T> = std::result::Result<T, Error>;
