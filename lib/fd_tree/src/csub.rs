use super::{Node, TreeError};

use tracing::trace;

fn ensure_dir<'a>(node: &'a Node, side: &'static str) -> Result<&'a [Node], TreeError> {
    node.children().ok_or_else(|| TreeError::TypeMismatch {
        side,
        name: node.name().to_string(),
    })
}

/// Children subtraction: the part of `left` that is not equivalently present in
/// `right`, as a new directory named after `left`.
///
/// Children are matched by name and type. Matching files are dropped when their
/// sizes agree, matching directories are subtracted recursively and dropped when
/// nothing is left of them. The survivors keep the order they have in `left`.
/// The name of `right` is never looked at.
pub fn csub(left: &Node, right: &Node) -> Result<Node, TreeError> {
    let left_children = ensure_dir(left, "left")?;
    ensure_dir(right, "right")?;

    let mut rest: Vec<Node> = Vec::new();
    for child in left_children {
        match right.find_child(child.name(), child.is_dir()) {
            None => rest.push(child.clone()),
            Some(other) if child.is_dir() => {
                let diff = csub(child, other)?;
                if !diff.is_empty_dir() {
                    rest.push(diff);
                }
            }
            Some(other) => {
                if child.size() != other.size() {
                    rest.push(child.clone());
                }
            }
        }
    }
    trace!(
        name = left.name(),
        kept = rest.len(),
        of = left_children.len(),
        "subtracted directory"
    );

    // A subsequence of sorted children is still sorted
    Ok(Node::from_sorted(left.name().to_string(), rest))
}

/// Subtract every tree in `rest` from `first`, left to right
pub fn csub_fold<'a>(
    first: Node,
    rest: impl IntoIterator<Item = &'a Node>,
) -> Result<Node, TreeError> {
    rest.into_iter()
        .try_fold(first, |acc, other| csub(&acc, other))
}
