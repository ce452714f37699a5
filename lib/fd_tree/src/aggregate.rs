use super::Node;

/// Totals of a subtree, the node itself included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rollup {
    pub files: u64,
    pub size: u64,
    pub dirs: u64,
}
// Saturates instead of wrapping, a total past u64::MAX stays at u64::MAX
impl std::ops::Add for Rollup {
    type Output = Rollup;
    fn add(self, other: Rollup) -> Rollup {
        Rollup {
            files: self.files.saturating_add(other.files),
            size: self.size.saturating_add(other.size),
            dirs: self.dirs.saturating_add(other.dirs),
        }
    }
}

impl Node {
    /// Totals of the subtree rooted at this node. Directories compute them once
    /// and keep them for the lifetime of the node: the tree never changes after
    /// construction
    pub fn rollup(&self) -> Rollup {
        let Some((children, cache)) = self.dir_parts() else {
            return Rollup {
                files: 1,
                size: self.size().unwrap_or_default(),
                dirs: 0,
            };
        };
        *cache.get_or_init(|| {
            children.iter().map(Node::rollup).fold(
                Rollup {
                    files: 0,
                    size: 0,
                    dirs: 1,
                },
                |acc, child| acc + child,
            )
        })
    }

    pub fn file_count(&self) -> u64 {
        self.rollup().files
    }
    pub fn total_size(&self) -> u64 {
        self.rollup().size
    }
    pub fn dir_count(&self) -> u64 {
        self.rollup().dirs
    }
}
