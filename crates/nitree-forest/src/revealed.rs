use nitree_canonical::Ni;
use serde::{Deserialize, Serialize};

use crate::errors::ForestError;

/// Content of a revealed node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Revealed {
    /// Unsalted text leaf.
    Text(String),
    /// Salted text leaf: the salted name that was hashed, and the text.
    Salted {
        /// `<name of text>?salt=<token>`.
        name: Ni,
        /// Original text.
        text: String,
    },
    /// Children in input order.
    Ordered(Vec<RevealedNode>),
    /// Children in canonical order.
    Unordered(Vec<RevealedNode>),
    /// Withheld content; only the node's name is known.
    Concealed,
}

/// A name paired with the content it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedNode {
    /// Name of this node.
    pub ni: Ni,
    /// Content behind the name.
    pub content: Revealed,
}

/// Root name and revealed tree of a grown value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowResult {
    /// Name of the whole value.
    pub root: Ni,
    /// Content behind the root.
    pub revealed: Revealed,
}

impl Revealed {
    /// Child nodes of a sequence; `None` for leaves and concealed content.
    pub fn children(&self) -> Option<&[RevealedNode]> {
        match self {
            Revealed::Ordered(children) | Revealed::Unordered(children) => {
                Some(children.as_slice())
            }
            _ => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<RevealedNode>> {
        match self {
            Revealed::Ordered(children) | Revealed::Unordered(children) => Some(children),
            _ => None,
        }
    }

    /// Leaf text, salted or not.
    pub fn text(&self) -> Option<&str> {
        match self {
            Revealed::Text(text) | Revealed::Salted { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Whether the content is withheld.
    pub fn is_concealed(&self) -> bool {
        matches!(self, Revealed::Concealed)
    }

    /// Canonical JSON string of this content, used to order children that
    /// share a name.
    pub fn canonical_form(&self) -> Result<String, ForestError> {
        let value = serde_json::to_value(self)
            .map_err(|e| ForestError::Canonicalization(e.to_string()))?;
        canonical_json::to_string(&value).map_err(|e| ForestError::Canonicalization(e.to_string()))
    }
}

impl RevealedNode {
    /// Pairs a name with its content.
    pub fn new(ni: Ni, content: Revealed) -> Self {
        Self { ni, content }
    }
}

impl From<RevealedNode> for GrowResult {
    fn from(node: RevealedNode) -> Self {
        Self {
            root: node.ni,
            revealed: node.content,
        }
    }
}
