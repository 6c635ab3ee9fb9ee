// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted key records.
//!
//! Big integers are stored as decimal strings so records stay readable and
//! independent of limb size. Loading a record re-runs every key invariant.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

use num_bigint_dig::BigUint;

use super::{PrivateKey, PublicKey};
use crate::error::{Error, Result};

mod decimal {
    use num_bigint_dig::BigUint;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let digits = String::deserialize(deserializer)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(D::Error::custom(format!("not a decimal integer: {:?}", digits)));
        }
        digits.parse().map_err(D::Error::custom)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PublicKeyRecord {
    #[serde(with = "decimal")]
    p: BigUint,
    #[serde(with = "decimal")]
    g: BigUint,
    #[serde(with = "decimal")]
    h: BigUint,
    bit_length: usize,
}

#[derive(Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(deny_unknown_fields)]
struct PrivateKeyRecord {
    #[serde(with = "decimal")]
    p: BigUint,
    #[serde(with = "decimal")]
    g: BigUint,
    #[serde(with = "decimal")]
    x: BigUint,
    bit_length: usize,
}

impl From<&PublicKey> for PublicKeyRecord {
    fn from(key: &PublicKey) -> Self {
        Self {
            p: key.p().clone(),
            g: key.g().clone(),
            h: key.h().clone(),
            bit_length: key.bit_length(),
        }
    }
}

impl From<&PrivateKey> for PrivateKeyRecord {
    fn from(key: &PrivateKey) -> Self {
        let public = key.public_key();
        Self {
            p: public.p().clone(),
            g: public.g().clone(),
            x: key.x.clone(),
            bit_length: public.bit_length(),
        }
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        PublicKeyRecord::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = PublicKeyRecord::deserialize(deserializer)?;
        PublicKey::new(record.p, record.g, record.h, record.bit_length).map_err(D::Error::custom)
    }
}

impl Serialize for PrivateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        PrivateKeyRecord::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PrivateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = PrivateKeyRecord::deserialize(deserializer)?;
        PrivateKey::from_exponent(
            record.p.clone(),
            record.g.clone(),
            record.x.clone(),
            record.bit_length,
        )
        .map_err(D::Error::custom)
    }
}

impl PublicKey {
    /// Serialize to a JSON record `{"p", "g", "h", "bit_length"}`.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| Error::InvalidKeyRecord(err.to_string()))
    }

    /// Load and validate a JSON public key record.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| Error::InvalidKeyRecord(err.to_string()))
    }
}

impl PrivateKey {
    /// Serialize to a JSON record `{"p", "g", "x", "bit_length"}`.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| Error::InvalidKeyRecord(err.to_string()))
    }

    /// Load a JSON private key record, re-deriving `h` and validating the field.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| Error::InvalidKeyRecord(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::keypair::{KeyPair, KeyPairBuilder};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn test_keypair() -> KeyPair {
        let mut rng = ChaCha20Rng::seed_from_u64(77);
        KeyPairBuilder::new()
            .bit_length(40)
            .build_with_rng(&mut rng)
            .unwrap()
    }

    #[test]
    fn public_record_round_trips() {
        let keypair = test_keypair();
        let public = keypair.public_key();

        let json = public.to_json().unwrap();
        let restored = PublicKey::from_json(&json).unwrap();
        assert_eq!(&restored, public);
    }

    #[test]
    fn public_record_uses_decimal_strings() {
        let keypair = test_keypair();
        let public = keypair.public_key();
        let value: serde_json::Value = serde_json::from_str(&public.to_json().unwrap()).unwrap();

        assert_eq!(value["p"], serde_json::Value::String(public.p().to_string()));
        assert_eq!(value["g"], serde_json::Value::String(public.g().to_string()));
        assert_eq!(value["h"], serde_json::Value::String(public.h().to_string()));
        assert_eq!(value["bit_length"], serde_json::json!(40));
    }

    #[test]
    fn private_record_round_trips() {
        let keypair = test_keypair();
        let secret = keypair.private_key();

        let json = secret.to_json().unwrap();
        assert!(!json.contains("\"h\""));

        let restored = PrivateKey::from_json(&json).unwrap();
        assert!(restored == *secret);
        assert_eq!(restored.public_key(), keypair.public_key());
    }

    #[test]
    fn tampered_records_are_rejected() {
        let keypair = test_keypair();
        let public = keypair.public_key();

        let wrong_h = serde_json::json!({
            "p": public.p().to_string(),
            "g": public.g().to_string(),
            "h": public.p().to_string(),
            "bit_length": 40,
        });
        assert!(matches!(
            PublicKey::from_json(&wrong_h.to_string()),
            Err(Error::InvalidKeyRecord(_))
        ));

        let zero_x = serde_json::json!({
            "p": public.p().to_string(),
            "g": public.g().to_string(),
            "x": "0",
            "bit_length": 40,
        });
        assert!(matches!(
            PrivateKey::from_json(&zero_x.to_string()),
            Err(Error::InvalidKeyRecord(_))
        ));

        let composite_p = serde_json::json!({
            "p": (public.p() + 2u32).to_string(),
            "g": public.g().to_string(),
            "x": "5",
            "bit_length": 40,
        });
        assert!(PrivateKey::from_json(&composite_p.to_string()).is_err());
    }

    #[test]
    fn malformed_records_are_rejected() {
        for json in [
            "",
            "{}",
            r#"{"p": 23, "g": "5", "h": "2", "bit_length": 5}"#,
            r#"{"p": "2_3", "g": "5", "h": "2", "bit_length": 5}"#,
            r#"{"p": "23", "g": "5", "h": "2", "bit_length": 5, "x": "1"}"#,
        ] {
            assert!(
                matches!(PublicKey::from_json(json), Err(Error::InvalidKeyRecord(_))),
                "{:?}",
                json
            );
        }
    }
}
