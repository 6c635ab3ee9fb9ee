// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # ElGamal over Safe-Prime Fields
//!
//! Probabilistic public-key encryption of text in the multiplicative group of
//! a prime field `p = 2q + 1`. Keys are generated from safe primes found with
//! the Baillie–PSW probable-prime test and a primitive root of the field.
//!
//! Plaintext is encoded as UTF-16, cut into chunks strictly smaller than `p`,
//! and each chunk is encrypted with a fresh ephemeral exponent:
//! `c1 = g^y mod p`, `c2 = m·h^y mod p`.
//!
//! The number theory is public in [`math`] (modular exponentiation, Jacobi
//! symbol, Lucas sequences) and [`prime`] (Baillie–PSW, safe primes,
//! primitive roots).
//!
//! ## Security
//!
//! The secret exponent is zeroized on drop via the `zeroize` crate. Default
//! 256-bit fields match the reference tool and are far below production
//! strength; a warning is logged for anything under 2048 bits.
//!
//! ## Example
//!
//! ```rust,no_run
//! use elgamal_bpsw::{Decrypt, Encrypt, KeyPair};
//!
//! let keypair = KeyPair::generate().expect("key generation failed");
//! let message = "hello world";
//!
//! let ciphertext = keypair.public_key().encrypt(message).expect("encryption failed");
//! let wire = ciphertext.to_string();
//!
//! let decrypted = keypair.private_key().decrypt_str(&wire).expect("decryption failed");
//! assert_eq!(message, decrypted);
//! ```

pub mod codec;
pub mod math;
pub mod prime;

mod ciphertext;
mod crypto;
mod error;
mod keypair;

pub use ciphertext::*;
pub use crypto::{Decrypt, Encrypt};
pub use error::*;
pub use keypair::*;
