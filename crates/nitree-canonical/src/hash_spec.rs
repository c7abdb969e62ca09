use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::digest::DigestAlg;
use crate::ni::Ni;
use crate::validation::ConfigurationError;

/// Function mapping a byte sequence to a fixed-length digest.
pub type HashFunction = Arc<dyn Fn(&[u8]) -> Vec<u8> + Send + Sync>;

/// Characters that would make an NI ambiguous when parsed back.
const RESERVED: &[char] = &['/', ';', '?', '#'];

/// Hash configuration applied to every node of a tree.
///
/// A `HashSpec` is validated on construction and immutable afterwards; clones
/// share the same hash function.
#[derive(Clone)]
pub struct HashSpec {
    hash_function: HashFunction,
    hash_name: String,
    authority: String,
    salt_leaves: bool,
}

impl HashSpec {
    /// Creates a spec from an arbitrary hash function.
    ///
    /// The name ends up in every NI, so it must be non-empty and free of the
    /// characters `/`, `;`, `?` and `#`. The function is probed once and must
    /// return a non-empty digest. Salting starts disabled and the authority
    /// empty.
    pub fn new<F>(hash_name: impl Into<String>, hash_function: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&[u8]) -> Vec<u8> + Send + Sync + 'static,
    {
        let spec = Self {
            hash_function: Arc::new(hash_function),
            hash_name: hash_name.into(),
            authority: String::new(),
            salt_leaves: false,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Creates an unsalted spec for a registered algorithm.
    pub fn from_alg(alg: DigestAlg) -> Self {
        Self {
            hash_function: Arc::new(move |bytes: &[u8]| alg.hash(bytes)),
            hash_name: alg.name().to_string(),
            authority: String::new(),
            salt_leaves: false,
        }
    }

    /// Creates an unsalted spec that reproduces names shaped like `ni`:
    /// same algorithm, same authority.
    ///
    /// Only registered algorithms can be recovered from a name.
    pub fn matching(ni: &Ni) -> Result<Self, ConfigurationError> {
        let alg: DigestAlg = ni.hash_name().parse()?;
        Self::from_alg(alg).with_authority(ni.authority())
    }

    /// Sets the authority component.
    pub fn with_authority(mut self, authority: impl Into<String>) -> Result<Self, ConfigurationError> {
        self.authority = authority.into();
        validate_authority(&self.authority)?;
        Ok(self)
    }

    /// Enables or disables per-leaf salting.
    pub fn with_salt_leaves(mut self, salt_leaves: bool) -> Self {
        self.salt_leaves = salt_leaves;
        self
    }

    /// Name embedded in every NI.
    pub fn hash_name(&self) -> &str {
        &self.hash_name
    }

    /// Authority embedded in every NI (may be empty).
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Whether text leaves receive a random salt.
    pub fn salt_leaves(&self) -> bool {
        self.salt_leaves
    }

    /// Applies the hash function.
    pub fn digest(&self, bytes: &[u8]) -> Vec<u8> {
        (self.hash_function)(bytes)
    }

    /// Checks that the spec can produce parseable identifiers.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.hash_name.is_empty() || self.hash_name.contains(RESERVED) {
            return Err(ConfigurationError::InvalidHashName {
                value: self.hash_name.clone(),
            });
        }
        validate_authority(&self.authority)?;
        if self.digest(b"").is_empty() {
            return Err(ConfigurationError::EmptyDigest {
                hash_name: self.hash_name.clone(),
            });
        }
        Ok(())
    }
}

/// An authority may carry a single trailing `/` but no other reserved character.
fn validate_authority(authority: &str) -> Result<(), ConfigurationError> {
    let body = authority.strip_suffix('/').unwrap_or(authority);
    if body.contains(RESERVED) {
        return Err(ConfigurationError::InvalidAuthority {
            value: authority.to_string(),
        });
    }
    Ok(())
}

impl Default for HashSpec {
    fn default() -> Self {
        Self::from_alg(DigestAlg::default()).with_salt_leaves(true)
    }
}

impl fmt::Debug for HashSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashSpec")
            .field("hash_name", &self.hash_name)
            .field("authority", &self.authority)
            .field("salt_leaves", &self.salt_leaves)
            .finish_non_exhaustive()
    }
}

/// Serializable form of a [`HashSpec`] restricted to registered algorithms.
///
/// ```json
/// {"algorithm": "sha-256", "authority": "example.com", "salt_leaves": true}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HashSpecConfig {
    /// Registered algorithm name.
    pub algorithm: DigestAlg,
    /// Authority component; empty for none.
    pub authority: String,
    /// Whether text leaves receive a random salt.
    pub salt_leaves: bool,
}

impl Default for HashSpecConfig {
    fn default() -> Self {
        Self {
            algorithm: DigestAlg::default(),
            authority: String::new(),
            salt_leaves: true,
        }
    }
}

impl TryFrom<&HashSpecConfig> for HashSpec {
    type Error = ConfigurationError;

    fn try_from(config: &HashSpecConfig) -> Result<Self, Self::Error> {
        Ok(HashSpec::from_alg(config.algorithm)
            .with_authority(config.authority.clone())?
            .with_salt_leaves(config.salt_leaves))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_is_valid_and_salted() {
        let spec = HashSpec::default();
        spec.validate().unwrap();
        assert_eq!(spec.hash_name(), "sha-256");
        assert!(spec.salt_leaves());
    }

    #[test]
    fn empty_hash_name_detected() {
        let err = HashSpec::new("", |b: &[u8]| b.to_vec()).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidHashName { .. }));
    }

    #[test]
    fn reserved_hash_name_detected() {
        let err = HashSpec::new("sha;256", |b: &[u8]| b.to_vec()).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidHashName { .. }));
    }

    #[test]
    fn empty_digest_detected() {
        let err = HashSpec::new("nothing", |_: &[u8]| Vec::new()).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::EmptyDigest {
                hash_name: "nothing".into()
            }
        );
    }

    #[test]
    fn trailing_slash_authority_accepted() {
        let spec = HashSpec::from_alg(DigestAlg::Sha256)
            .with_authority("example.com/")
            .unwrap();
        assert_eq!(spec.authority(), "example.com/");
    }

    #[test]
    fn authority_with_path_rejected() {
        let err = HashSpec::from_alg(DigestAlg::Sha256)
            .with_authority("example.com/a/")
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidAuthority { .. }));
    }

    #[test]
    fn matching_recovers_alg_and_authority() {
        let ni = Ni::parse("ni://example.com/sha-512;abcd?salt=x").unwrap();
        let spec = HashSpec::matching(&ni).unwrap();
        assert_eq!(spec.hash_name(), "sha-512");
        assert_eq!(spec.authority(), "example.com");
        assert!(!spec.salt_leaves());

        let foreign = Ni::parse("ni:///blake3;abcd").unwrap();
        assert!(matches!(
            HashSpec::matching(&foreign),
            Err(ConfigurationError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn config_builds_spec() {
        let config = HashSpecConfig {
            algorithm: DigestAlg::Sha512,
            authority: "example.com".into(),
            salt_leaves: false,
        };
        let spec = HashSpec::try_from(&config).unwrap();
        assert_eq!(spec.hash_name(), "sha-512");
        assert_eq!(spec.authority(), "example.com");
        assert!(!spec.salt_leaves());
    }
}
