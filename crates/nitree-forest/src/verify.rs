//! Root recomputation from revealed trees.
//!
//! Every revealed node is re-hashed bottom-up and compared against its
//! recorded name. Concealed nodes contribute their recorded name unchecked,
//! so a partially disclosed tree still recomputes the full root.

use nitree_canonical::{hash_text, HashSpec, Ni, ParseError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ForestError;
use crate::path::NodePath;
use crate::revealed::{Revealed, RevealedNode};

/// Outcome of checking a revealed tree against a published root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationVerdict {
    /// Every revealed name matches and the tree hashes to the root.
    Ok,
    /// A recorded name (or the root) disagrees with the recomputed one.
    Mismatch {
        /// Location of the first disagreeing node.
        path: String,
        /// Name that was claimed.
        recorded: Ni,
        /// Name recomputed from content.
        computed: Ni,
    },
}

/// Recomputes the root name of a revealed tree.
///
/// # Errors
///
/// - [`ForestError::Mismatch`] if a recorded child name disagrees with its content
/// - [`ForestError::Parse`] if a salted leaf name carries no salt
/// - [`ForestError::Concealed`] if the root content itself is concealed
pub fn recompute_root(revealed: &Revealed, spec: &HashSpec) -> Result<Ni, ForestError> {
    let path = NodePath::root();
    content_ni(revealed, &path, spec)?.ok_or_else(|| ForestError::Concealed {
        path: path.to_string(),
    })
}

/// Checks a revealed tree against a previously published root.
pub fn verify(root: &Ni, revealed: &Revealed, spec: &HashSpec) -> Result<VerificationVerdict, ForestError> {
    let verdict = match recompute_root(revealed, spec) {
        Ok(computed) if &computed == root => VerificationVerdict::Ok,
        Ok(computed) => VerificationVerdict::Mismatch {
            path: NodePath::root().to_string(),
            recorded: root.clone(),
            computed,
        },
        Err(ForestError::Mismatch {
            path,
            recorded,
            computed,
        }) => VerificationVerdict::Mismatch {
            path,
            recorded,
            computed,
        },
        Err(e) => return Err(e),
    };
    debug!(root = %root, ok = (verdict == VerificationVerdict::Ok), "verified tree");
    Ok(verdict)
}

/// Name the content hashes to; `None` when concealed.
fn content_ni(content: &Revealed, path: &NodePath, spec: &HashSpec) -> Result<Option<Ni>, ForestError> {
    let ni = match content {
        Revealed::Text(text) => hash_text(text, spec),
        Revealed::Salted { name, text } => {
            let query = name
                .query()
                .filter(|_| name.salt().is_some())
                .ok_or_else(|| ParseError::new(name.as_str()))?;
            let expected = hash_text(text, spec).with_query(query)?;
            if &expected != name {
                return Err(ForestError::Mismatch {
                    path: path.to_string(),
                    recorded: name.clone(),
                    computed: expected,
                });
            }
            hash_text(name.as_str(), spec)
        }
        Revealed::Ordered(children) => combine(children, false, path, spec)?,
        Revealed::Unordered(children) => combine(children, true, path, spec)?,
        Revealed::Concealed => return Ok(None),
    };
    Ok(Some(ni))
}

fn combine(
    children: &[RevealedNode],
    sort: bool,
    path: &NodePath,
    spec: &HashSpec,
) -> Result<Ni, ForestError> {
    if children.is_empty() {
        return Ok(hash_text("", spec));
    }
    let mut names = Vec::with_capacity(children.len());
    for (idx, child) in children.iter().enumerate() {
        let child_path = path.push_index(idx);
        if let Some(computed) = content_ni(&child.content, &child_path, spec)? {
            if computed != child.ni {
                return Err(ForestError::Mismatch {
                    path: child_path.to_string(),
                    recorded: child.ni.clone(),
                    computed,
                });
            }
        }
        names.push(child.ni.as_str());
    }
    if sort {
        names.sort_unstable();
    }
    Ok(hash_text(&names.concat(), spec))
}
