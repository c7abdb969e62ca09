use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::fmt;
use std::str::FromStr;

use crate::validation::ConfigurationError;

/// RFC 6920 registered algorithms available out of the box.
///
/// The truncated variants keep the leading bytes of a SHA-256 digest, as the
/// IANA "Named Information Hash Algorithm Registry" defines them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DigestAlg {
    /// SHA-256 (default).
    #[default]
    #[serde(rename = "sha-256")]
    Sha256,
    /// SHA-256 truncated to 128 bits.
    #[serde(rename = "sha-256-128")]
    Sha256_128,
    /// SHA-256 truncated to 120 bits.
    #[serde(rename = "sha-256-120")]
    Sha256_120,
    /// SHA-256 truncated to 96 bits.
    #[serde(rename = "sha-256-96")]
    Sha256_96,
    /// SHA-256 truncated to 64 bits.
    #[serde(rename = "sha-256-64")]
    Sha256_64,
    /// SHA-256 truncated to 32 bits.
    #[serde(rename = "sha-256-32")]
    Sha256_32,
    /// SHA-384.
    #[serde(rename = "sha-384")]
    Sha384,
    /// SHA-512.
    #[serde(rename = "sha-512")]
    Sha512,
}

impl DigestAlg {
    /// All registered algorithms.
    pub const ALL: [DigestAlg; 8] = [
        DigestAlg::Sha256,
        DigestAlg::Sha256_128,
        DigestAlg::Sha256_120,
        DigestAlg::Sha256_96,
        DigestAlg::Sha256_64,
        DigestAlg::Sha256_32,
        DigestAlg::Sha384,
        DigestAlg::Sha512,
    ];

    /// Name used in the hash-name segment of an NI.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha-256",
            Self::Sha256_128 => "sha-256-128",
            Self::Sha256_120 => "sha-256-120",
            Self::Sha256_96 => "sha-256-96",
            Self::Sha256_64 => "sha-256-64",
            Self::Sha256_32 => "sha-256-32",
            Self::Sha384 => "sha-384",
            Self::Sha512 => "sha-512",
        }
    }

    /// Digest length in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha256_128 => 16,
            Self::Sha256_120 => 15,
            Self::Sha256_96 => 12,
            Self::Sha256_64 => 8,
            Self::Sha256_32 => 4,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Hashes raw bytes.
    pub fn hash(&self, bytes: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha384 => Sha384::digest(bytes).to_vec(),
            Self::Sha512 => Sha512::digest(bytes).to_vec(),
            _ => {
                let mut digest = Sha256::digest(bytes).to_vec();
                digest.truncate(self.output_len());
                digest
            }
        }
    }
}

impl fmt::Display for DigestAlg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlg {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.name() == s)
            .ok_or_else(|| ConfigurationError::UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for alg in DigestAlg::ALL {
            assert_eq!(alg.name().parse::<DigestAlg>().unwrap(), alg);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "md5".parse::<DigestAlg>(),
            Err(ConfigurationError::UnknownAlgorithm("md5".into()))
        );
    }

    #[test]
    fn output_len_matches_hash() {
        for alg in DigestAlg::ALL {
            assert_eq!(alg.hash(b"abc").len(), alg.output_len());
        }
    }

    #[test]
    fn truncation_keeps_leading_bytes() {
        let full = DigestAlg::Sha256.hash(b"abc");
        assert_eq!(DigestAlg::Sha256_64.hash(b"abc"), full[..8].to_vec());
    }
}
