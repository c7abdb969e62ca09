use std::fmt;

/// Location of a node, rendered as `root` or `a.0.b`.
///
/// Index-only locations use the dotted form `parse_index_path` accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    /// The root location.
    pub fn root() -> Self {
        Self::default()
    }

    /// Location of a named field below this one.
    pub fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    /// Location of a positional child below this one.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(index.to_string());
        Self { segments }
    }

    /// Location addressed by a list of child positions.
    pub fn from_indices(indices: &[usize]) -> Self {
        indices
            .iter()
            .fold(Self::root(), |path, index| path.push_index(*index))
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}
