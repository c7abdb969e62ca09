//! Named Information primitives for NITree.
//!
//! This crate owns everything that turns bytes into an identifier:
//! - The NI URI codec (`ni://<authority>/<hash-name>;<hex-digest>[?<query>]`)
//! - The hash configuration (`HashSpec`) shared by every node of a tree
//! - The RFC 6920 SHA-2 algorithms offered as ready-made configurations
//!
//! Every identifier that participates in a tree root is produced here.
//!
#![deny(missing_docs)]

/// Registered digest algorithms.
pub mod digest;
/// Hash configuration and its serializable form.
pub mod hash_spec;
/// NI URI encoding and decoding.
pub mod ni;
/// Parse and configuration errors.
pub mod validation;

pub use digest::DigestAlg;
pub use hash_spec::{HashFunction, HashSpec, HashSpecConfig};
pub use ni::{digest_of, encode, encode_with_query, hash_text, Ni, SALT_QUERY_KEY};
pub use validation::{ConfigurationError, ParseError};
