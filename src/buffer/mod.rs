//! Order-statistic tree text buffer.
//!
//! Every character is one node of a binary search tree keyed implicitly by
//! position. Each node carries two augmentation counters:
//!
//! - `count_left`: 1 + size of its left subtree, used to find the node at an
//!   absolute index in a single root-to-leaf descent.
//! - `newlines_left`: newlines in its left subtree, used to answer line
//!   queries with the same kind of descent.
//!
//! The tree is built height-balanced from the seed text. Edits keep both
//! counters exact but do not restore balance; call
//! [`TextBuffer::rebalance`] to rebuild when the shape has degraded.

mod build;
mod edit;
mod lines;
mod locate;
mod node;
mod validate;

use std::fmt;

use node::{Arena, NodeId};
pub use validate::InvariantError;

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    #[error("{op}: index {index} is out of range for buffer of length {len}")]
    IndexOutOfRange {
        op: &'static str,
        index: usize,
        len: usize,
    },

    #[error("{op}: line {line} is out of range, buffer has {lines} lines")]
    LineOutOfRange {
        op: &'static str,
        line: usize,
        lines: usize,
    },
}

/// A character sequence with sublinear index, edit and line lookups.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    arena: Arena,
    root: Option<NodeId>,
    len: usize,
    lines: usize,
}

impl TextBuffer {
    /// Build a buffer holding `text`.
    pub fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        Self::from_chars(&chars)
    }

    /// Total number of characters.
    pub const fn size(&self) -> usize {
        self.len
    }

    /// Total number of lines; always at least one.
    pub const fn lines(&self) -> usize {
        self.lines
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Character at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::IndexOutOfRange`] if `index >= size()`.
    pub fn at(&self, index: usize) -> BufferResult<char> {
        self.check_index("at", index)?;
        let id = self.find(index + 1).ok_or_else(|| self.index_error("at", index))?;
        Ok(self.arena.get(id).ch)
    }

    /// Iterate over the characters in order.
    pub fn chars(&self) -> Chars<'_> {
        Chars::new(self)
    }

    /// The full contents as a `String`.
    pub fn text(&self) -> String {
        self.chars().collect()
    }

    /// Current height of the tree (0 when empty).
    ///
    /// Unlike the per-node height recorded at build time, this walks the
    /// tree and so reflects the shape after edits.
    pub fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = self.arena.get(id);
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }
        deepest
    }

    fn check_index(&self, op: &'static str, index: usize) -> BufferResult<()> {
        if index >= self.len {
            return Err(self.index_error(op, index));
        }
        Ok(())
    }

    fn check_line(&self, op: &'static str, line: usize) -> BufferResult<()> {
        if line >= self.lines {
            return Err(BufferError::LineOutOfRange {
                op,
                line,
                lines: self.lines,
            });
        }
        Ok(())
    }

    const fn index_error(&self, op: &'static str, index: usize) -> BufferError {
        BufferError::IndexOutOfRange {
            op,
            index,
            len: self.len,
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new("")
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for ch in self.chars() {
            f.write_char(ch)?;
        }
        Ok(())
    }
}

/// In-order iterator over a buffer's characters.
///
/// Uses an explicit stack, so degenerate (list-shaped) trees do not
/// risk deep recursion.
#[derive(Debug)]
pub struct Chars<'a> {
    buffer: &'a TextBuffer,
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a> Chars<'a> {
    fn new(buffer: &'a TextBuffer) -> Self {
        let mut chars = Self {
            buffer,
            stack: Vec::new(),
            remaining: buffer.len,
        };
        chars.push_left_spine(buffer.root);
        chars
    }

    fn push_left_spine(&mut self, mut cur: Option<NodeId>) {
        while let Some(id) = cur {
            self.stack.push(id);
            cur = self.buffer.arena.get(id).left;
        }
    }
}

impl Iterator for Chars<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let id = self.stack.pop()?;
        let node = self.buffer.arena.get(id);
        self.push_left_spine(node.right);
        self.remaining = self.remaining.saturating_sub(1);
        Some(node.ch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Chars<'_> {}
