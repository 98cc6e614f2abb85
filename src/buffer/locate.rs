//! Order-statistic descents.
//!
//! Positions here are 1-based ranks: the node holding external index `i`
//! has rank `i + 1`. A node's own rank within its subtree is `count_left`.
//! All descents are loops bounded by the tree height.

use std::cmp::Ordering;

use super::TextBuffer;
use super::node::NodeId;

/// Counter adjustment applied to every node the descent leaves to the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Adjust {
    /// A character is about to be inserted at the located rank.
    Grow { newline: bool },
    /// The located node is about to be removed.
    Shrink,
}

impl TextBuffer {
    /// Node holding `rank`.
    pub(super) fn find(&self, mut rank: usize) -> Option<NodeId> {
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = self.arena.get(id);
            match rank.cmp(&node.count_left) {
                Ordering::Equal => return Some(id),
                Ordering::Less => cur = node.left,
                Ordering::Greater => {
                    rank -= node.count_left;
                    cur = node.right;
                }
            }
        }
        None
    }

    /// Node holding `rank`, pre-adjusting the counters of every ancestor
    /// whose left subtree contains it.
    ///
    /// Callers must have bounds-checked `rank`; a miss would leave the
    /// counters on the walked path adjusted.
    pub(super) fn find_adjusting(&mut self, mut rank: usize, adjust: Adjust) -> Option<NodeId> {
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = self.arena.get_mut(id);
            match rank.cmp(&node.count_left) {
                Ordering::Equal => return Some(id),
                Ordering::Less => {
                    match adjust {
                        Adjust::Grow { newline } => {
                            node.count_left += 1;
                            node.newlines_left += usize::from(newline);
                        }
                        Adjust::Shrink => node.count_left -= 1,
                    }
                    cur = node.left;
                }
                Ordering::Greater => {
                    rank -= node.count_left;
                    cur = node.right;
                }
            }
        }
        None
    }

    /// Absolute index of the first character of `line` (1-based newline
    /// ordinal), i.e. the index just past the `line`-th newline.
    pub(super) fn find_line_boundary(&self, mut line: usize) -> Option<usize> {
        let mut offset = 0;
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = self.arena.get(id);
            let own = usize::from(node.is_newline());
            if own == 1 && line == node.newlines_left + 1 {
                return Some(offset + node.count_left);
            }
            if line <= node.newlines_left {
                cur = node.left;
            } else {
                line -= node.newlines_left + own;
                offset += node.count_left;
                cur = node.right;
            }
        }
        None
    }

    /// Number of newlines strictly before `rank`.
    pub(super) fn newlines_before(&self, mut rank: usize) -> Option<usize> {
        let mut total = 0;
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = self.arena.get(id);
            match rank.cmp(&node.count_left) {
                Ordering::Equal => return Some(total + node.newlines_left),
                Ordering::Less => cur = node.left,
                Ordering::Greater => {
                    total += node.newlines_left + usize::from(node.is_newline());
                    rank -= node.count_left;
                    cur = node.right;
                }
            }
        }
        None
    }

    /// Walk from `id` toward the root, stopping before `stop`, and bump
    /// `newlines_left` on every ancestor whose left subtree holds `id`.
    pub(super) fn shift_newlines_above(&mut self, id: NodeId, stop: Option<NodeId>, grow: bool) {
        let mut child = id;
        while let Some(parent) = self.arena.get(child).parent {
            if Some(parent) == stop {
                break;
            }
            if self.arena.is_left_child(parent, child) {
                let node = self.arena.get_mut(parent);
                if grow {
                    node.newlines_left += 1;
                } else {
                    node.newlines_left -= 1;
                }
            }
            child = parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_every_rank() {
        let buf = TextBuffer::new("abcdefg");
        for (i, expected) in "abcdefg".chars().enumerate() {
            let id = buf.find(i + 1).unwrap();
            assert_eq!(buf.arena.get(id).ch, expected);
        }
        assert!(buf.find(8).is_none());
    }

    #[test]
    fn test_find_line_boundary() {
        let buf = TextBuffer::new("123\n456\n789\n");
        assert_eq!(buf.find_line_boundary(1), Some(4));
        assert_eq!(buf.find_line_boundary(2), Some(8));
        assert_eq!(buf.find_line_boundary(3), Some(12));
        assert_eq!(buf.find_line_boundary(4), None);
    }

    #[test]
    fn test_find_line_boundary_adjacent_newlines() {
        let buf = TextBuffer::new("\n\n\nx");
        assert_eq!(buf.find_line_boundary(1), Some(1));
        assert_eq!(buf.find_line_boundary(2), Some(2));
        assert_eq!(buf.find_line_boundary(3), Some(3));
    }

    #[test]
    fn test_newlines_before() {
        let buf = TextBuffer::new("a\nb\nc");
        let counts: Vec<_> = (1..=5).map(|rank| buf.newlines_before(rank)).collect();
        assert_eq!(counts, vec![Some(0), Some(0), Some(1), Some(1), Some(2)]);
    }

    #[test]
    fn test_find_adjusting_grow_bumps_left_ancestors() {
        let mut buf = TextBuffer::new("abcde");
        let root = buf.root.unwrap();
        let id = buf.find_adjusting(1, Adjust::Grow { newline: true }).unwrap();
        assert_eq!(buf.arena.get(id).ch, 'a');
        assert_eq!(buf.arena.get(root).count_left, 4);
        assert_eq!(buf.arena.get(root).newlines_left, 1);
    }

    #[test]
    fn test_find_adjusting_shrink_skips_right_turns() {
        let mut buf = TextBuffer::new("abcde");
        let root = buf.root.unwrap();
        let id = buf.find_adjusting(5, Adjust::Shrink).unwrap();
        assert_eq!(buf.arena.get(id).ch, 'e');
        assert_eq!(buf.arena.get(root).count_left, 3);
    }

    #[test]
    fn test_shift_newlines_above_updates_left_ancestors_only() {
        let mut buf = TextBuffer::new("abcde");
        let root = buf.root.unwrap();
        let a = buf.find(1).unwrap();
        let e = buf.find(5).unwrap();

        buf.shift_newlines_above(a, None, true);
        assert_eq!(buf.arena.get(root).newlines_left, 1);

        buf.shift_newlines_above(e, None, true);
        assert_eq!(buf.arena.get(root).newlines_left, 1);

        buf.shift_newlines_above(a, Some(root), false);
        assert_eq!(buf.arena.get(root).newlines_left, 1);
    }
}
