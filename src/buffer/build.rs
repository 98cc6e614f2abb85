//! Bulk construction by recursive bisection.

use tracing::debug;

use super::TextBuffer;
use super::node::{Arena, NodeId};

/// Aggregates of a freshly built subtree.
#[derive(Debug, Clone, Copy, Default)]
struct Subtree {
    root: Option<NodeId>,
    size: usize,
    newlines: usize,
    height: usize,
}

impl TextBuffer {
    /// Build a height-balanced tree over `chars` in O(n).
    ///
    /// Recursion depth is bounded by the height of the tree being built,
    /// which is O(log n) here.
    pub(super) fn from_chars(chars: &[char]) -> Self {
        let mut arena = Arena::with_capacity(chars.len());
        let built = build_range(&mut arena, chars, None);
        debug!(
            len = built.size,
            lines = built.newlines + 1,
            height = built.height,
            "built text buffer"
        );
        Self {
            arena,
            root: built.root,
            len: built.size,
            lines: built.newlines + 1,
        }
    }

    /// Rebuild the tree into a height-balanced shape.
    ///
    /// Edits keep the counters exact but never rotate, so a long run of
    /// inserts at one spot degrades lookups toward O(n). This restores
    /// O(log n) height in O(n) time; contents and line count are unchanged.
    pub fn rebalance(&mut self) {
        let before = self.height();
        let chars: Vec<char> = self.chars().collect();
        *self = Self::from_chars(&chars);
        let after = self.root.map_or(0, |root| self.arena.get(root).height);
        debug!(before, after, "rebalanced text buffer");
    }
}

/// Build the subtree for `chars`, picking the midpoint as its root.
fn build_range(arena: &mut Arena, chars: &[char], parent: Option<NodeId>) -> Subtree {
    if chars.is_empty() {
        return Subtree::default();
    }

    let mid = chars.len() / 2;
    let id = arena.alloc(chars[mid], parent);
    let left = build_range(arena, &chars[..mid], Some(id));
    let right = build_range(arena, &chars[mid + 1..], Some(id));

    let height = left.height.max(right.height) + 1;
    let node = arena.get_mut(id);
    node.left = left.root;
    node.right = right.root;
    node.count_left = left.size + 1;
    node.newlines_left = left.newlines;
    node.height = height;

    Subtree {
        root: Some(id),
        size: chars.len(),
        newlines: left.newlines + right.newlines + usize::from(node.is_newline()),
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::node::Node;

    fn root_node(buf: &TextBuffer) -> &Node {
        buf.arena.get(buf.root.unwrap())
    }

    #[test]
    fn test_build_empty_has_no_root() {
        let buf = TextBuffer::from_chars(&[]);
        assert!(buf.root.is_none());
        assert_eq!(buf.lines(), 1);
    }

    #[test]
    fn test_build_picks_midpoint_as_root() {
        let buf = TextBuffer::new("abcde");
        let root = root_node(&buf);
        assert_eq!(root.ch, 'c');
        assert_eq!(root.count_left, 3);
        assert!(root.parent.is_none());
    }

    #[test]
    fn test_build_counts_left_newlines() {
        let buf = TextBuffer::new("a\nb\nc");
        let root = root_node(&buf);
        assert_eq!(root.ch, 'b');
        assert_eq!(root.newlines_left, 1);
        assert_eq!(buf.lines(), 3);
    }

    #[test]
    fn test_build_is_height_balanced() {
        let text = "x".repeat(1023);
        let buf = TextBuffer::new(&text);
        assert_eq!(buf.height(), 10);
        assert_eq!(root_node(&buf).height, 10);
    }

    #[test]
    fn test_build_records_leaf_height_one() {
        let buf = TextBuffer::new("a");
        assert_eq!(root_node(&buf).height, 1);
    }

    #[test]
    fn test_rebalance_restores_log_height() {
        let mut buf = TextBuffer::default();
        for i in 0..256 {
            buf.insert(i, 'a').unwrap();
        }
        assert_eq!(buf.height(), 256);

        buf.rebalance();
        assert_eq!(buf.height(), 9);
        assert_eq!(buf.size(), 256);
        assert_eq!(buf.validate(), Ok(()));
    }

    #[test]
    fn test_rebalance_keeps_lines() {
        let mut buf = TextBuffer::new("ab");
        buf.insert(2, '\n').unwrap();
        buf.insert(3, 'c').unwrap();
        buf.rebalance();
        assert_eq!(buf.text(), "ab\nc");
        assert_eq!(buf.lines(), 2);
        assert_eq!(buf.line_start(1), Ok(3));
    }
}
