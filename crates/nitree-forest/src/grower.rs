//! Tree growing.
//!
//! Naming rules per value kind:
//! - text: `hash_text(text)`; when salting, `hash_text(hash_text(text) + "?salt=" + token)`
//! - empty sequence: the unsalted name of the empty text
//! - ordered sequence: `hash_text(concat(child names))` in input order
//! - unordered sequence: as ordered, after sorting children by name, then by
//!   canonical content
//! - mapping: the unordered sequence of `(key, value)` ordered pairs

use nitree_canonical::{hash_text, HashSpec, SALT_QUERY_KEY};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::errors::ForestError;
use crate::revealed::{GrowResult, Revealed, RevealedNode};
use crate::salt::{OsSaltSource, SaltSource};
use crate::value::{ArrayMode, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SequenceKind {
    Ordered,
    Unordered,
}

impl SequenceKind {
    fn wrap(self, children: Vec<RevealedNode>) -> Revealed {
        match self {
            SequenceKind::Ordered => Revealed::Ordered(children),
            SequenceKind::Unordered => Revealed::Unordered(children),
        }
    }
}

/// Names values under a fixed [`HashSpec`].
pub struct TreeGrower {
    spec: HashSpec,
    salt: Arc<dyn SaltSource>,
}

impl TreeGrower {
    /// Creates a grower drawing salt tokens from the operating system.
    pub fn new(spec: HashSpec) -> Result<Self, ForestError> {
        Self::with_salt_source(spec, Arc::new(OsSaltSource))
    }

    /// Creates a grower with an explicit salt token source.
    ///
    /// # Errors
    ///
    /// Returns [`ForestError::Configuration`] if `spec` fails validation.
    pub fn with_salt_source(spec: HashSpec, salt: Arc<dyn SaltSource>) -> Result<Self, ForestError> {
        spec.validate()?;
        Ok(Self { spec, salt })
    }

    /// Hash configuration in use.
    pub fn spec(&self) -> &HashSpec {
        &self.spec
    }

    /// Names `value` and builds its revealed tree.
    pub fn grow(&self, value: &Value) -> Result<GrowResult, ForestError> {
        debug!(
            kind = value.kind(),
            hash_name = self.spec.hash_name(),
            salted = self.spec.salt_leaves(),
            "growing tree"
        );
        let node = self.grow_node(value)?;
        debug!(root = %node.ni, "grown");
        Ok(node.into())
    }

    fn grow_node(&self, value: &Value) -> Result<RevealedNode, ForestError> {
        let node = match value {
            Value::Text(text) => self.grow_leaf(text)?,
            Value::Ordered(children) => {
                let nodes = self.grow_each(children, |child| self.grow_node(child))?;
                self.combine(nodes, SequenceKind::Ordered)?
            }
            Value::Unordered(children) => {
                let nodes = self.grow_each(children, |child| self.grow_node(child))?;
                self.combine(nodes, SequenceKind::Unordered)?
            }
            Value::Mapping(entries) => {
                let pairs = self.grow_each(entries, |(key, val)| {
                    let pair = vec![self.grow_node(key)?, self.grow_node(val)?];
                    self.combine(pair, SequenceKind::Ordered)
                })?;
                self.combine(pairs, SequenceKind::Unordered)?
            }
        };
        trace!(kind = value.kind(), ni = %node.ni, "named node");
        Ok(node)
    }

    fn grow_leaf(&self, text: &str) -> Result<RevealedNode, ForestError> {
        let base = hash_text(text, &self.spec);
        if !self.spec.salt_leaves() {
            return Ok(RevealedNode::new(base, Revealed::Text(text.to_string())));
        }
        let salted = base.with_query(&format!("{}={}", SALT_QUERY_KEY, self.salt.token()))?;
        Ok(RevealedNode::new(
            hash_text(salted.as_str(), &self.spec),
            Revealed::Salted {
                name: salted,
                text: text.to_string(),
            },
        ))
    }

    fn combine(
        &self,
        nodes: Vec<RevealedNode>,
        kind: SequenceKind,
    ) -> Result<RevealedNode, ForestError> {
        if nodes.is_empty() {
            return Ok(RevealedNode::new(
                hash_text("", &self.spec),
                kind.wrap(nodes),
            ));
        }
        let nodes = match kind {
            SequenceKind::Ordered => nodes,
            SequenceKind::Unordered => sort_canonically(nodes)?,
        };
        let concatenated: String = nodes.iter().map(|node| node.ni.as_str()).collect();
        Ok(RevealedNode::new(
            hash_text(&concatenated, &self.spec),
            kind.wrap(nodes),
        ))
    }

    #[cfg(not(feature = "parallel"))]
    fn grow_each<T, F>(&self, items: &[T], f: F) -> Result<Vec<RevealedNode>, ForestError>
    where
        T: Sync,
        F: Fn(&T) -> Result<RevealedNode, ForestError> + Send + Sync,
    {
        items.iter().map(f).collect()
    }

    #[cfg(feature = "parallel")]
    fn grow_each<T, F>(&self, items: &[T], f: F) -> Result<Vec<RevealedNode>, ForestError>
    where
        T: Sync,
        F: Fn(&T) -> Result<RevealedNode, ForestError> + Send + Sync,
    {
        use rayon::prelude::*;
        // collect keeps input order
        items.par_iter().map(f).collect()
    }
}

/// Sorts by name; content only decides between equal names.
fn sort_canonically(mut nodes: Vec<RevealedNode>) -> Result<Vec<RevealedNode>, ForestError> {
    nodes.sort_by(|a, b| a.ni.cmp(&b.ni));
    if !nodes.windows(2).any(|w| w[0].ni == w[1].ni) {
        return Ok(nodes);
    }
    let mut keyed = nodes
        .into_iter()
        .map(|node| Ok((node.content.canonical_form()?, node)))
        .collect::<Result<Vec<_>, ForestError>>()?;
    keyed.sort_by(|(ka, a), (kb, b)| a.ni.cmp(&b.ni).then_with(|| ka.cmp(kb)));
    Ok(keyed.into_iter().map(|(_, node)| node).collect())
}

/// Names `value` with a grower drawing salt from the operating system.
pub fn grow(value: &Value, spec: &HashSpec) -> Result<GrowResult, ForestError> {
    TreeGrower::new(spec.clone())?.grow(value)
}

/// Ingests JSON and names it.
pub fn grow_json(
    json: &JsonValue,
    mode: ArrayMode,
    spec: &HashSpec,
) -> Result<GrowResult, ForestError> {
    grow(&Value::from_json(json, mode)?, spec)
}
