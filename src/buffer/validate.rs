//! Structural self-check.

use super::TextBuffer;
use super::node::NodeId;

/// A broken tree invariant, as found by [`TextBuffer::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantError {
    #[error("node {node}: count_left is {found}, left subtree holds {expected}")]
    CountLeft {
        node: usize,
        found: usize,
        expected: usize,
    },

    #[error("node {node}: newlines_left is {found}, left subtree holds {expected}")]
    NewlinesLeft {
        node: usize,
        found: usize,
        expected: usize,
    },

    #[error("node {node}: parent link does not point back at it")]
    ParentLink { node: usize },

    #[error("buffer size is {found}, tree holds {expected} nodes")]
    Size { found: usize, expected: usize },

    #[error("buffer reports {found} lines, tree holds {expected}")]
    Lines { found: usize, expected: usize },

    #[error("arena holds {live} live nodes, only {reachable} are reachable")]
    Leak { live: usize, reachable: usize },
}

/// Node count and newline count of a checked subtree.
#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    nodes: usize,
    newlines: usize,
}

impl TextBuffer {
    /// Check every counter and link in the tree, and that no erased node
    /// is still holding an arena slot.
    ///
    /// Runs in O(n) with an explicit post-order stack.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantError`] found.
    pub fn validate(&self) -> Result<(), InvariantError> {
        let totals = match self.root {
            Some(root) => {
                if self.arena.get(root).parent.is_some() {
                    return Err(InvariantError::ParentLink { node: root.index() });
                }
                self.validate_subtree(root)?
            }
            None => Totals::default(),
        };

        if totals.nodes != self.len {
            return Err(InvariantError::Size {
                found: self.len,
                expected: totals.nodes,
            });
        }
        if totals.newlines + 1 != self.lines {
            return Err(InvariantError::Lines {
                found: self.lines,
                expected: totals.newlines + 1,
            });
        }
        if self.arena.live() != totals.nodes {
            return Err(InvariantError::Leak {
                live: self.arena.live(),
                reachable: totals.nodes,
            });
        }
        Ok(())
    }

    fn validate_subtree(&self, root: NodeId) -> Result<Totals, InvariantError> {
        // (node, children already visited)
        let mut stack = vec![(root, false)];
        let mut done: Vec<Totals> = Vec::new();

        while let Some((id, expanded)) = stack.pop() {
            let node = self.arena.get(id);
            if !expanded {
                stack.push((id, true));
                for child in [node.right, node.left].into_iter().flatten() {
                    if self.arena.get(child).parent != Some(id) {
                        return Err(InvariantError::ParentLink {
                            node: child.index(),
                        });
                    }
                    stack.push((child, false));
                }
                continue;
            }

            // Children finished in left-then-right order, so the right
            // subtree's totals sit on top.
            let right = node.right.and_then(|_| done.pop()).unwrap_or_default();
            let left = node.left.and_then(|_| done.pop()).unwrap_or_default();

            if node.count_left != left.nodes + 1 {
                return Err(InvariantError::CountLeft {
                    node: id.index(),
                    found: node.count_left,
                    expected: left.nodes + 1,
                });
            }
            if node.newlines_left != left.newlines {
                return Err(InvariantError::NewlinesLeft {
                    node: id.index(),
                    found: node.newlines_left,
                    expected: left.newlines,
                });
            }
            done.push(Totals {
                nodes: left.nodes + right.nodes + 1,
                newlines: left.newlines + right.newlines + usize::from(node.is_newline()),
            });
        }

        Ok(done.pop().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_buffer_is_valid() {
        assert_eq!(TextBuffer::new("123\n456\n789\n").validate(), Ok(()));
        assert_eq!(TextBuffer::default().validate(), Ok(()));
    }

    #[test]
    fn test_detects_bad_count_left() {
        let mut buf = TextBuffer::new("abc");
        let root = buf.root.unwrap();
        buf.arena.get_mut(root).count_left = 5;
        assert_eq!(
            buf.validate(),
            Err(InvariantError::CountLeft {
                node: root.index(),
                found: 5,
                expected: 2
            })
        );
    }

    #[test]
    fn test_detects_bad_newlines_left() {
        let mut buf = TextBuffer::new("\nbc");
        let root = buf.root.unwrap();
        buf.arena.get_mut(root).newlines_left = 0;
        assert!(matches!(
            buf.validate(),
            Err(InvariantError::NewlinesLeft { expected: 1, .. })
        ));
    }

    #[test]
    fn test_detects_broken_parent_link() {
        let mut buf = TextBuffer::new("abc");
        let left = buf.find(1).unwrap();
        buf.arena.get_mut(left).parent = None;
        assert_eq!(
            buf.validate(),
            Err(InvariantError::ParentLink { node: left.index() })
        );
    }

    #[test]
    fn test_detects_line_count_drift() {
        let mut buf = TextBuffer::new("a\nb");
        buf.lines = 5;
        assert_eq!(
            buf.validate(),
            Err(InvariantError::Lines {
                found: 5,
                expected: 2
            })
        );
    }
}
