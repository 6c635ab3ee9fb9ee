// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use num_bigint_dig::BigUint;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// One encrypted chunk: `c1 = g^y mod p`, `c2 = m·h^y mod p`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CipherPair {
    c1: BigUint,
    c2: BigUint,
}

impl CipherPair {
    pub fn new(c1: BigUint, c2: BigUint) -> Self {
        Self { c1, c2 }
    }

    #[inline]
    pub fn c1(&self) -> &BigUint {
        &self.c1
    }

    #[inline]
    pub fn c2(&self) -> &BigUint {
        &self.c2
    }
}

/// Pairs in plaintext chunk order.
///
/// The wire form is the decimal integers `c1 c2 c1 c2 …` separated by single
/// spaces. Parsing tolerates any whitespace but needs an even number of tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Ciphertext {
    pairs: Vec<CipherPair>,
}

impl Ciphertext {
    pub fn new(pairs: Vec<CipherPair>) -> Self {
        Self { pairs }
    }

    pub fn pairs(&self) -> &[CipherPair] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<CipherPair> {
        self.pairs
    }
}

impl Deref for Ciphertext {
    type Target = [CipherPair];

    fn deref(&self) -> &Self::Target {
        &self.pairs
    }
}

impl FromIterator<CipherPair> for Ciphertext {
    fn from_iter<I: IntoIterator<Item = CipherPair>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Ciphertext {
    type Item = &'a CipherPair;
    type IntoIter = std::slice::Iter<'a, CipherPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, pair) in self.pairs.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{} {}", pair.c1, pair.c2)?;
        }
        Ok(())
    }
}

impl FromStr for Ciphertext {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let values = s
            .split_whitespace()
            .map(parse_decimal)
            .collect::<Result<Vec<_>>>()?;

        if values.len() % 2 != 0 {
            return Err(Error::MalformedCiphertext(format!(
                "expected an even number of integers, got {}",
                values.len()
            )));
        }

        let mut values = values.into_iter();
        let mut pairs = Vec::with_capacity(values.len() / 2);
        while let (Some(c1), Some(c2)) = (values.next(), values.next()) {
            pairs.push(CipherPair::new(c1, c2));
        }

        Ok(Self { pairs })
    }
}

fn parse_decimal(token: &str) -> Result<BigUint> {
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedCiphertext(format!(
            "not a decimal integer: {:?}",
            token
        )));
    }

    token
        .parse()
        .map_err(|_| Error::MalformedCiphertext(format!("not a decimal integer: {:?}", token)))
}

impl Serialize for Ciphertext {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ciphertext {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let wire = String::deserialize(deserializer)?;
        wire.parse().map_err(D::Error::custom)
    }
}
