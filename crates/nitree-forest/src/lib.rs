//! Named information trees over nested data.
//!
//! This crate provides:
//! - The [`Value`] model (text, ordered and unordered sequences, mappings)
//! - [`TreeGrower`], which names a value and produces its revealed tree
//! - Root recomputation and verification of revealed trees
//! - Selective disclosure by concealing subtrees
//!
//! Core invariants:
//! - Internal node names are computed only from child names
//! - Unordered sequences and mappings are sorted by child name before hashing
//! - Without salting, the root is a pure function of the value and the `HashSpec`
//! - Concealing a subtree never changes the recomputed root
//!
//! ```rust
//! use nitree_canonical::{DigestAlg, HashSpec};
//! use nitree_forest::{grow, verify, Value, VerificationVerdict};
//!
//! let spec = HashSpec::from_alg(DigestAlg::Sha256);
//! let value = Value::Unordered(vec!["Hello".into(), "World".into()]);
//! let tree = grow(&value, &spec)?;
//! assert_eq!(
//!     tree.root.as_str(),
//!     "ni:///sha-256;3e11ba5abe0b6cede3b05e94baa6974b0f1ebb0f9cb8fbf7702ff8858ba20604"
//! );
//! assert_eq!(verify(&tree.root, &tree.revealed, &spec)?, VerificationVerdict::Ok);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
#![deny(missing_docs)]

/// Concealment and subtree selection.
pub mod disclosure;
/// Error types for tree operations.
pub mod errors;
/// The tree-growing algorithm.
pub mod grower;
/// Node locations used in diagnostics.
pub mod path;
/// Revealed tree types.
pub mod revealed;
/// Random salt token sources.
pub mod salt;
/// Input value model and JSON ingestion.
pub mod value;
/// Root recomputation and verification.
pub mod verify;

pub use disclosure::{conceal, disclose, parse_index_path, select};
pub use errors::ForestError;
pub use grower::{grow, grow_json, TreeGrower};
pub use path::NodePath;
pub use revealed::{GrowResult, Revealed, RevealedNode};
pub use salt::{CountingSaltSource, OsSaltSource, SaltSource};
pub use value::{ArrayMode, Value};
pub use verify::{recompute_root, verify, VerificationVerdict};
