use super::aggregate::Rollup;
use super::codec::PersistedNode;
use super::TreeError;

use serde::{Deserialize, Serialize};
use unicode_normalization::{is_nfc_quick, IsNormalized, UnicodeNormalization};

use std::borrow::Cow;
use std::cmp::Ordering;
use std::sync::OnceLock;

/// Content of a node. The presence of children is what makes a directory,
/// even when there are none
#[derive(Debug, Clone)]
enum Content {
    File {
        size: u64,
    },
    Dir {
        children: Vec<Node>,
        rollup: OnceLock<Rollup>,
    },
}
impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Content::File { size: size_l }, Content::File { size: size_r }) => size_l == size_r,
            // The cached rollup is derived from the children, so it's not part of
            //	the identity of the node
            (Content::Dir { children: ch_l, .. }, Content::Dir { children: ch_r, .. }) => {
                ch_l == ch_r
            }
            _ => false,
        }
    }
}

/// A file or a directory of an immutable in-memory tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PersistedNode", into = "PersistedNode")]
pub struct Node {
    name: String,
    content: Content,
}
impl Eq for Node {}

fn normalize(name: impl AsRef<str>) -> String {
    name.as_ref().nfc().collect()
}
fn normalized(name: &str) -> Cow<'_, str> {
    match is_nfc_quick(name.chars()) {
        IsNormalized::Yes => Cow::Borrowed(name),
        _ => Cow::Owned(normalize(name)),
    }
}

/// Total order on nodes: directories before files, then by name (ordinal
/// comparison of the unicode scalar values, independent of the locale)
pub fn compare(a: &Node, b: &Node) -> Ordering {
    cmp_key(a.is_dir(), &a.name, b)
}
fn cmp_key(is_dir: bool, name: &str, node: &Node) -> Ordering {
    node.is_dir()
        .cmp(&is_dir)
        .then_with(|| name.cmp(node.name.as_str()))
}

impl Node {
    pub fn file(name: impl AsRef<str>, size: u64) -> Node {
        Node {
            name: normalize(name),
            content: Content::File { size },
        }
    }
    /// Build a directory, sorting the children. Fails if two children have the
    /// same name and the same type
    pub fn dir(name: impl AsRef<str>, mut children: Vec<Node>) -> Result<Node, TreeError> {
        children.sort_by(compare);
        if let Some(pair) = children
            .windows(2)
            .find(|pair| compare(&pair[0], &pair[1]) == Ordering::Equal)
        {
            return Err(TreeError::DuplicateEntry {
                name: pair[0].name.clone(),
            });
        }
        Ok(Node::from_sorted(normalize(name), children))
    }
    pub fn empty_dir(name: impl AsRef<str>) -> Node {
        Node::from_sorted(normalize(name), Vec::new())
    }
    /// Build a directory whose children are already sorted and unique, with an
    /// already normalized name
    pub(crate) fn from_sorted(name: String, children: Vec<Node>) -> Node {
        debug_assert!(children
            .windows(2)
            .all(|pair| compare(&pair[0], &pair[1]) == Ordering::Less));
        Node {
            name,
            content: Content::Dir {
                children,
                rollup: OnceLock::new(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    /// Size in bytes, only for files
    pub fn size(&self) -> Option<u64> {
        match &self.content {
            Content::File { size } => Some(*size),
            Content::Dir { .. } => None,
        }
    }
    /// Children, only for directories
    pub fn children(&self) -> Option<&[Node]> {
        match &self.content {
            Content::File { .. } => None,
            Content::Dir { children, .. } => Some(children),
        }
    }
    pub fn is_dir(&self) -> bool {
        matches!(self.content, Content::Dir { .. })
    }
    /// True for directories without children
    pub fn is_empty_dir(&self) -> bool {
        matches!(self.children(), Some(children) if children.is_empty())
    }

    pub(crate) fn dir_parts(&self) -> Option<(&[Node], &OnceLock<Rollup>)> {
        match &self.content {
            Content::File { .. } => None,
            Content::Dir { children, rollup } => Some((children, rollup)),
        }
    }

    /// Child with the given name and type, found by binary search on the sorted
    /// children
    pub fn find_child(&self, name: &str, is_dir: bool) -> Option<&Node> {
        let children = self.children()?;
        let name = normalized(name);
        children
            .binary_search_by(|child| cmp_key(is_dir, &name, child).reverse())
            .ok()
            .map(|pos| &children[pos])
    }

    /// Follow a `/` separated path of directory names down from this node
    pub fn subtree(&self, path: &str) -> Result<&Node, TreeError> {
        let not_found = || TreeError::SubtreeNotFound {
            path: path.to_string(),
        };
        if !self.is_dir() {
            return Err(not_found());
        }
        path.split('/')
            .filter(|component| !component.is_empty())
            .try_fold(self, |node, component| {
                node.find_child(component, true).ok_or_else(not_found)
            })
    }
}
