//! Selective disclosure.
//!
//! Nodes are addressed by index paths: the child positions taken from the
//! root, as they appear in the revealed tree (so unordered children are
//! addressed in canonical order). The empty path is the root itself.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::errors::ForestError;
use crate::path::NodePath;
use crate::revealed::{Revealed, RevealedNode};

/// Parses a dotted index path such as `0.2.1`; the empty string is the root.
pub fn parse_index_path(s: &str) -> Result<Vec<usize>, ForestError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split('.')
        .map(|segment| {
            segment.parse::<usize>().map_err(|_| ForestError::InvalidPath {
                path: s.to_string(),
                reason: format!("'{}' is not a child index", segment),
            })
        })
        .collect()
}

/// Returns the node at a non-empty index path.
pub fn select<'a>(revealed: &'a Revealed, path: &[usize]) -> Result<&'a RevealedNode, ForestError> {
    let (last, parents) = path.split_last().ok_or_else(root_has_no_name)?;
    let mut content = revealed;
    for (depth, idx) in parents.iter().enumerate() {
        content = &child(content, *idx, &path[..=depth])?.content;
    }
    child(content, *last, path)
}

fn select_mut<'a>(
    revealed: &'a mut Revealed,
    path: &[usize],
) -> Result<&'a mut RevealedNode, ForestError> {
    let (last, parents) = path.split_last().ok_or_else(root_has_no_name)?;
    let mut content = revealed;
    for (depth, idx) in parents.iter().enumerate() {
        content = &mut child_mut(content, *idx, &path[..=depth])?.content;
    }
    child_mut(content, *last, path)
}

/// Replaces the content of every addressed node with [`Revealed::Concealed`].
///
/// The recomputed root is unchanged. Paths may overlap in any order.
pub fn conceal(revealed: &Revealed, paths: &[Vec<usize>]) -> Result<Revealed, ForestError> {
    let mut tree = revealed.clone();
    // deepest first, so ancestors are still sequences when descendants resolve
    let mut ordered: Vec<&Vec<usize>> = paths.iter().collect();
    ordered.sort_by_key(|path| Reverse(path.len()));
    for path in ordered {
        select_mut(&mut tree, path)?.content = Revealed::Concealed;
    }
    Ok(tree)
}

/// Keeps only the addressed subtrees (and the sequence structure leading to
/// them); every other node is concealed.
///
/// Keeping the empty path discloses the whole tree.
pub fn disclose(revealed: &Revealed, keep: &[Vec<usize>]) -> Result<Revealed, ForestError> {
    for path in keep.iter().filter(|p| !p.is_empty()) {
        select(revealed, path)?;
    }
    let keep: BTreeSet<&[usize]> = keep.iter().map(Vec::as_slice).collect();
    let mut prefix = Vec::new();
    Ok(prune(revealed, &keep, &mut prefix))
}

fn prune(content: &Revealed, keep: &BTreeSet<&[usize]>, prefix: &mut Vec<usize>) -> Revealed {
    if keep.contains(prefix.as_slice()) {
        return content.clone();
    }
    let Some(children) = content.children() else {
        return Revealed::Concealed;
    };
    let pruned = children
        .iter()
        .enumerate()
        .map(|(idx, node)| {
            prefix.push(idx);
            let content = if keep.iter().any(|p| p.starts_with(prefix.as_slice())) {
                prune(&node.content, keep, prefix)
            } else {
                Revealed::Concealed
            };
            prefix.pop();
            RevealedNode::new(node.ni.clone(), content)
        })
        .collect();
    match content {
        Revealed::Ordered(_) => Revealed::Ordered(pruned),
        _ => Revealed::Unordered(pruned),
    }
}

fn child<'a>(content: &'a Revealed, idx: usize, at: &[usize]) -> Result<&'a RevealedNode, ForestError> {
    let children = content.children().ok_or_else(|| ForestError::InvalidPath {
        path: NodePath::from_indices(at).to_string(),
        reason: "parent is not a revealed sequence".to_string(),
    })?;
    children.get(idx).ok_or_else(|| ForestError::InvalidPath {
        path: NodePath::from_indices(at).to_string(),
        reason: format!("index {} out of range for {} children", idx, children.len()),
    })
}

fn child_mut<'a>(
    content: &'a mut Revealed,
    idx: usize,
    at: &[usize],
) -> Result<&'a mut RevealedNode, ForestError> {
    let children = content.children_mut().ok_or_else(|| ForestError::InvalidPath {
        path: NodePath::from_indices(at).to_string(),
        reason: "parent is not a revealed sequence".to_string(),
    })?;
    let len = children.len();
    children.get_mut(idx).ok_or_else(|| ForestError::InvalidPath {
        path: NodePath::from_indices(at).to_string(),
        reason: format!("index {} out of range for {} children", idx, len),
    })
}

fn root_has_no_name() -> ForestError {
    ForestError::InvalidPath {
        path: NodePath::root().to_string(),
        reason: "the root has no recorded name".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_paths() {
        assert_eq!(parse_index_path("").unwrap(), Vec::<usize>::new());
        assert_eq!(parse_index_path("0.2.1").unwrap(), vec![0, 2, 1]);
        assert!(matches!(
            parse_index_path("0.x"),
            Err(ForestError::InvalidPath { .. })
        ));
    }
}
