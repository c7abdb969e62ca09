use nitree_canonical::{ConfigurationError, Ni, ParseError};
use thiserror::Error;

/// Tree operation errors.
#[derive(Error, Debug)]
pub enum ForestError {
    /// Input data of a kind that cannot be named.
    #[error("unsupported value kind '{kind}' at {path}")]
    InvalidInput {
        /// Kind of the offending value (e.g. `number`).
        kind: String,
        /// Location of the offending value.
        path: String,
    },
    /// Hash configuration rejected before growing.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    /// A string that should be an NI is not one.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    /// A node path does not address a node of the tree.
    #[error("invalid path {path}: {reason}")]
    InvalidPath {
        /// Offending path.
        path: String,
        /// Why it does not resolve.
        reason: String,
    },
    /// A recorded name disagrees with the name recomputed from content.
    #[error("recorded {recorded} at {path} does not match computed {computed}")]
    Mismatch {
        /// Location of the node.
        path: String,
        /// Name stored in the revealed tree.
        recorded: Ni,
        /// Name recomputed from the node's content.
        computed: Ni,
    },
    /// The root content is concealed, so nothing can be recomputed.
    #[error("content at {path} is concealed")]
    Concealed {
        /// Location of the concealed content.
        path: String,
    },
    /// Canonical form of revealed content could not be produced.
    #[error("canonicalization failed: {0}")]
    Canonicalization(String),
}
