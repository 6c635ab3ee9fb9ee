// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod record;

use crate::ciphertext::Ciphertext;
use crate::error::{Error, Result};
use crate::math::pow_mod;
use crate::prime::root::{is_primitive_root, PrimitiveRootFinder};
use crate::prime::safe::{is_safe_prime, SafePrimeGenerator};
use crate::{Decrypt, Encrypt};

use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::One;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Smallest field size the cipher supports: chunks need at least 16 bits below `p`.
pub const MIN_FIELD_BITS: usize = 17;

/// A safe prime `p = 2q + 1` and a generator `g` of `(Z/pZ)*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrimeField {
    p: BigUint,
    g: BigUint,
}

impl PrimeField {
    /// Validates that `p` is a safe prime and `g` a primitive root modulo `p`.
    pub fn new(p: BigUint, g: BigUint) -> Result<Self> {
        if !is_safe_prime(&p) || !is_primitive_root(&g, &p) {
            return Err(Error::InvalidPublicKey);
        }

        Ok(Self { p, g })
    }

    /// Return the safe prime modulus.
    #[inline]
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Return the generator.
    #[inline]
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Return the Sophie Germain prime `q = (p − 1) / 2`.
    pub fn q(&self) -> BigUint {
        &self.p >> 1
    }
}

/// Public parameters `{p, g, h, bit_length}` with `h = g^x mod p`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    pub(crate) field: PrimeField,
    pub(crate) h: BigUint,
    pub(crate) bit_length: usize,
}

impl PublicKey {
    /// Construct a public key from its components.
    ///
    /// `p` must be a safe prime of exactly `bit_length` bits, `g` a primitive
    /// root, and `h` a non-trivial element of the field.
    pub fn new(p: BigUint, g: BigUint, h: BigUint, bit_length: usize) -> Result<Self> {
        if bit_length < MIN_FIELD_BITS || p.bits() != bit_length {
            return Err(Error::InvalidPublicKey);
        }
        if h <= BigUint::one() || h >= p {
            return Err(Error::InvalidPublicKey);
        }

        let field = PrimeField::new(p, g)?;

        Ok(Self {
            field,
            h,
            bit_length,
        })
    }

    #[inline]
    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    #[inline]
    pub fn p(&self) -> &BigUint {
        &self.field.p
    }

    #[inline]
    pub fn g(&self) -> &BigUint {
        &self.field.g
    }

    #[inline]
    pub fn h(&self) -> &BigUint {
        &self.h
    }

    #[inline]
    pub fn bit_length(&self) -> usize {
        self.bit_length
    }

    /// Width of a plaintext chunk: whole bytes strictly below the top bit of `p`.
    #[inline]
    pub fn block_bits(&self) -> usize {
        8 * ((self.bit_length - 1) / 8)
    }
}

/// Secret key material.
///
/// The exponent `x` is zeroized on drop.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct PrivateKey {
    #[zeroize(skip)]
    pub(crate) public_key: PublicKey,
    pub(crate) x: BigUint,
}

impl PrivateKey {
    /// Construct a private key for `public_key`.
    ///
    /// Validates `1 ≤ x ≤ p − 2` and `g^x ≡ h (mod p)`.
    pub fn new(public_key: PublicKey, x: BigUint) -> Result<Self> {
        let p_minus_2 = public_key.p() - BigUint::from(2u32);
        if x < BigUint::one() || x > p_minus_2 {
            return Err(Error::InvalidPrivateKey);
        }
        if pow_mod(public_key.g(), &x, public_key.p()) != *public_key.h() {
            return Err(Error::InvalidPrivateKey);
        }

        Ok(Self { public_key, x })
    }

    /// Rebuild a private key from `{p, g, x, bit_length}`, deriving `h`.
    pub fn from_exponent(p: BigUint, g: BigUint, x: BigUint, bit_length: usize) -> Result<Self> {
        if p.bits() < 2 {
            return Err(Error::InvalidPublicKey);
        }

        let h = pow_mod(&g, &x, &p);
        let public_key = PublicKey::new(p, g, h, bit_length)?;
        Self::new(public_key, x)
    }

    /// Return a reference to the associated public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Return the secret exponent.
    pub fn exponent(&self) -> &BigUint {
        &self.x
    }
}

/// A complete key pair consisting of public and private components.
///
/// Secret material is zeroized when dropped.
#[allow(missing_debug_implementations)]
#[derive(PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct KeyPair {
    #[zeroize(skip)]
    public: PublicKey,
    secret: PrivateKey,
}

impl KeyPair {
    /// Generate a key pair with default parameters (256-bit field).
    pub fn generate() -> Result<Self> {
        KeyPairBuilder::new().build()
    }

    /// Generate a key pair with a custom field size.
    pub fn generate_with_size(bit_length: usize) -> Result<Self> {
        KeyPairBuilder::new().bit_length(bit_length).build()
    }

    /// Pair a private key with its public projection.
    pub fn from_private_key(secret: PrivateKey) -> Self {
        Self {
            public: secret.public_key.clone(),
            secret,
        }
    }

    /// Return the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Return the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.secret
    }
}

impl Encrypt for KeyPair {
    fn encrypt_with_rng<R: RngCore + CryptoRng>(
        &self,
        plaintext: &str,
        rng: &mut R,
    ) -> Result<Ciphertext> {
        self.public.encrypt_with_rng(plaintext, rng)
    }
}

impl Decrypt for KeyPair {
    fn decrypt(&self, ciphertext: &Ciphertext) -> Result<String> {
        self.secret.decrypt(ciphertext)
    }
}

/// Builder for generating key pairs with configurable parameters.
#[derive(Debug, Clone, Copy)]
pub struct KeyPairBuilder {
    bit_length: usize,
    max_attempts: Option<usize>,
}

impl KeyPairBuilder {
    /// Create a builder with default parameters.
    pub fn new() -> Self {
        Self {
            bit_length: Self::DEFAULT_BIT_LENGTH,
            max_attempts: None,
        }
    }

    /// Field size used when none is configured.
    pub const DEFAULT_BIT_LENGTH: usize = 256;

    /// Minimum recommended for production.
    pub const MIN_SECURE_BITS: usize = 2048;

    /// Absolute minimum enforced in production builds.
    /// Can be bypassed with `allow-weak-keys` feature flag.
    #[cfg(not(any(feature = "allow-weak-keys", test)))]
    const ABSOLUTE_MIN_BITS: usize = 256;

    #[cfg(any(feature = "allow-weak-keys", test))]
    const ABSOLUTE_MIN_BITS: usize = MIN_FIELD_BITS;

    /// Set the desired field bit length.
    pub fn bit_length(mut self, bits: usize) -> Self {
        self.bit_length = bits;
        self
    }

    /// Cap the candidates sampled by each generation stage.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Generate the key pair from operating-system randomness.
    pub fn build(self) -> Result<KeyPair> {
        self.build_with_rng(&mut OsRng)
    }

    /// Generate the key pair from the given randomness source.
    pub fn build_with_rng<R: RngCore + CryptoRng>(self, rng: &mut R) -> Result<KeyPair> {
        if self.bit_length < Self::ABSOLUTE_MIN_BITS {
            return Err(Error::InvalidKeySize {
                min: Self::ABSOLUTE_MIN_BITS,
                actual: self.bit_length,
            });
        }

        if self.bit_length < Self::MIN_SECURE_BITS {
            log::warn!(
                "{}-bit key is cryptographically weak; use {} bits minimum for production",
                self.bit_length,
                Self::MIN_SECURE_BITS
            );
        }

        let mut primes = SafePrimeGenerator::new(self.bit_length)?;
        let mut roots = PrimitiveRootFinder::new();
        if let Some(cap) = self.max_attempts {
            primes = primes.with_max_attempts(cap);
            roots = roots.with_max_attempts(cap);
        }

        let p = primes.generate(rng)?;
        let g = roots.find(&p, rng)?;

        // x in [1, p - 2]
        let x = rng.gen_biguint_range(&BigUint::one(), &(&p - BigUint::one()));
        let h = pow_mod(&g, &x, &p);

        let public = PublicKey {
            field: PrimeField { p, g },
            h,
            bit_length: self.bit_length,
        };
        let secret = PrivateKey {
            public_key: public.clone(),
            x,
        };

        Ok(KeyPair { public, secret })
    }
}

impl Default for KeyPairBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::prime::is_probable_prime;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn test_keypair(bits: usize, seed: u64) -> KeyPair {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        KeyPairBuilder::new()
            .bit_length(bits)
            .build_with_rng(&mut rng)
            .unwrap()
    }

    #[test]
    fn generated_keys_satisfy_field_invariants() {
        for (bits, seed) in [(17usize, 1u64), (32, 2), (64, 3), (96, 4)] {
            let keypair = test_keypair(bits, seed);
            let public = keypair.public_key();
            let p = public.p();
            let q = public.field().q();

            assert_eq!(p.bits(), bits);
            assert!(is_probable_prime(p));
            assert!(is_probable_prime(&q));

            let g = public.g();
            assert!(!g.modpow(&q, p).is_one());
            assert!(!g.modpow(&BigUint::from(2u32), p).is_one());

            let x = keypair.private_key().exponent();
            assert!(*x >= BigUint::one() && *x <= p - 2u32);
            assert_eq!(&g.modpow(x, p), public.h());
        }
    }

    #[test]
    fn block_bits_stay_below_modulus() {
        for (bits, seed) in [(17usize, 5u64), (24, 6), (25, 7), (64, 8)] {
            let keypair = test_keypair(bits, seed);
            let public = keypair.public_key();
            let block_bits = public.block_bits();

            assert!(block_bits >= 16);
            assert_eq!(block_bits % 8, 0);
            assert!(BigUint::one() << block_bits <= *public.p());
        }
    }

    #[test]
    fn same_seed_same_keypair() {
        let a = test_keypair(48, 9);
        let b = test_keypair(48, 9);
        assert!(a == b);
    }

    #[test]
    fn builder_rejects_tiny_keys() {
        let result = KeyPairBuilder::new().bit_length(16).build();
        assert!(matches!(
            result,
            Err(Error::InvalidKeySize {
                min: MIN_FIELD_BITS,
                actual: 16
            })
        ));
    }

    #[test]
    fn builder_attempt_cap_surfaces_exhaustion() {
        let mut rng = ChaCha20Rng::seed_from_u64(10);
        let result = KeyPairBuilder::new()
            .bit_length(64)
            .max_attempts(0)
            .build_with_rng(&mut rng);
        assert!(matches!(result, Err(Error::GenerationExhausted { attempts: 0 })));
    }

    #[test]
    fn default_builder_uses_256_bits() {
        let builder = KeyPairBuilder::default();
        assert_eq!(builder.bit_length, 256);
        assert_eq!(builder.max_attempts, None);
    }

    #[test]
    fn public_key_validation() {
        let keypair = test_keypair(32, 11);
        let public = keypair.public_key();
        let (p, g, h) = (public.p().clone(), public.g().clone(), public.h().clone());

        assert_eq!(
            PublicKey::new(p.clone(), g.clone(), h.clone(), 32).unwrap(),
            *public
        );
        assert_eq!(
            PublicKey::new(p.clone(), g.clone(), h.clone(), 33),
            Err(Error::InvalidPublicKey)
        );
        assert_eq!(
            PublicKey::new(p.clone(), g.clone(), BigUint::one(), 32),
            Err(Error::InvalidPublicKey)
        );
        assert_eq!(
            PublicKey::new(p.clone(), g.clone(), p.clone(), 32),
            Err(Error::InvalidPublicKey)
        );
        // p - 1 has order 2
        assert_eq!(
            PublicKey::new(p.clone(), &p - 1u32, h.clone(), 32),
            Err(Error::InvalidPublicKey)
        );
        assert_eq!(
            PublicKey::new(p + 2u32, g, h, 32),
            Err(Error::InvalidPublicKey)
        );
    }

    #[test]
    fn private_key_validation() {
        let keypair = test_keypair(32, 12);
        let public = keypair.public_key().clone();
        let x = keypair.private_key().exponent().clone();

        assert!(PrivateKey::new(public.clone(), x.clone()).is_ok());
        assert!(matches!(
            PrivateKey::new(public.clone(), &x + 1u32),
            Err(Error::InvalidPrivateKey)
        ));
        assert!(matches!(
            PrivateKey::new(public.clone(), BigUint::from(0u32)),
            Err(Error::InvalidPrivateKey)
        ));
        assert!(matches!(
            PrivateKey::new(public.clone(), public.p() - 1u32),
            Err(Error::InvalidPrivateKey)
        ));
    }

    #[test]
    fn private_key_from_exponent_derives_h() {
        let keypair = test_keypair(40, 13);
        let public = keypair.public_key();
        let secret = PrivateKey::from_exponent(
            public.p().clone(),
            public.g().clone(),
            keypair.private_key().exponent().clone(),
            40,
        )
        .unwrap();

        assert_eq!(secret.public_key(), public);

        let rebuilt = KeyPair::from_private_key(secret);
        assert!(rebuilt == keypair);
    }

    #[test]
    fn key_types_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PublicKey>();
        assert_send_sync::<PrivateKey>();
        assert_send_sync::<KeyPair>();
    }

    #[test]
    #[ignore] // Only run manually - default-size generation takes a few seconds
    fn benchmark_default_size() {
        use std::time::Instant;

        let start = Instant::now();
        let keypair = KeyPair::generate().unwrap();
        println!("256-bit key pair generated in {:?}", start.elapsed());
        assert_eq!(keypair.public_key().p().bits(), 256);
    }
}
