//! Content digests of the form `algorithm:encoded`.
//!
//! Digests are stored exactly as given. Parsing only enforces the lexical
//! grammar and, for registered algorithms, the length and alphabet of the
//! encoded part.

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};
use std::fmt;
use std::str::FromStr;

/// Registered algorithms and the hex length of their encoded part.
const REGISTERED_ALGORITHMS: &[(&str, usize)] = &[("sha256", 64), ("sha384", 96), ("sha512", 128)];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DigestError {
    #[error("digest must not be empty")]
    Empty,
    #[error("invalid digest format: {0:?}")]
    InvalidFormat(String),
    #[error("unsupported digest algorithm: {0:?}")]
    Unsupported(String),
    #[error("invalid {algorithm} digest length: got {got} characters, expected {expected}")]
    InvalidLength {
        algorithm: String,
        got: usize,
        expected: usize,
    },
    #[error("invalid {0} digest encoding: expected lowercase hex")]
    InvalidEncoding(String),
}

/// A content digest such as `sha256:4f5e…`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Digest(String);

impl Digest {
    /// Validate `s` and keep it verbatim.
    ///
    /// Stricter than a plain string conversion: unregistered algorithms are
    /// rejected even when they match the lexical grammar.
    pub fn parse(s: &str) -> Result<Self, DigestError> {
        if s.is_empty() {
            return Err(DigestError::Empty);
        }

        let (algorithm, encoded) = s
            .split_once(':')
            .ok_or_else(|| DigestError::InvalidFormat(s.to_string()))?;

        if !is_valid_algorithm(algorithm) || !is_valid_encoded(encoded) {
            return Err(DigestError::InvalidFormat(s.to_string()));
        }

        let expected = REGISTERED_ALGORITHMS
            .iter()
            .find(|(name, _)| *name == algorithm)
            .map(|(_, len)| *len)
            .ok_or_else(|| DigestError::Unsupported(algorithm.to_string()))?;

        if encoded.len() != expected {
            return Err(DigestError::InvalidLength {
                algorithm: algorithm.to_string(),
                got: encoded.len(),
                expected,
            });
        }

        if !encoded
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        {
            return Err(DigestError::InvalidEncoding(algorithm.to_string()));
        }

        Ok(Self(s.to_string()))
    }

    /// Digest `data` with sha256.
    pub fn from_sha256_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("sha256:{}", hex::encode(hash)))
    }

    pub fn algorithm(&self) -> &str {
        self.0.split_once(':').map(|(a, _)| a).unwrap_or_default()
    }

    pub fn encoded(&self) -> &str {
        self.0.split_once(':').map(|(_, e)| e).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// `[a-z0-9]+([+._-][a-z0-9]+)*`
fn is_valid_algorithm(algorithm: &str) -> bool {
    !algorithm.is_empty()
        && algorithm.split(['+', '.', '_', '-']).all(|component| {
            !component.is_empty()
                && component
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

/// `[a-zA-Z0-9=_-]+`
fn is_valid_encoded(encoded: &str) -> bool {
    !encoded.is_empty()
        && encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '=' || c == '_' || c == '-')
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Digest {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Digest {
    type Error = DigestError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Digest> for String {
    fn from(d: Digest) -> Self {
        d.0
    }
}
