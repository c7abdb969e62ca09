use thiserror::Error;

/// A string presented to the NI decoder does not match the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a named information URI")]
pub struct ParseError {
    /// Offending string.
    pub value: String,
}

impl ParseError {
    /// Creates a parse error for the given input.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A hash configuration cannot produce valid identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// The hash name is empty or contains reserved URI characters.
    #[error("hash name ('{value}') is not allowed")]
    InvalidHashName {
        /// Offending name.
        value: String,
    },
    /// The authority would break the NI grammar.
    #[error("authority ('{value}') is not allowed")]
    InvalidAuthority {
        /// Offending authority.
        value: String,
    },
    /// The hash function returned no digest bytes.
    #[error("hash function for '{hash_name}' produced an empty digest")]
    EmptyDigest {
        /// Name the function was registered under.
        hash_name: String,
    },
    /// The algorithm name is not one of the registered algorithms.
    #[error("unsupported hash algorithm: {0}")]
    UnknownAlgorithm(String),
}
