//! Insert, edit and erase.
//!
//! Every mutation bounds-checks first, so a failed call leaves the buffer
//! untouched. Counters are adjusted on the way down and the structural change
//! happens last.

use tracing::trace;

use super::locate::Adjust;
use super::node::NodeId;
use super::{BufferResult, TextBuffer};

impl TextBuffer {
    /// Insert `ch` so that it becomes the character at `index`.
    ///
    /// Characters previously at `index..` shift right by one. `index` may
    /// equal [`size`](Self::size) to append.
    ///
    /// # Errors
    ///
    /// Returns [`IndexOutOfRange`](super::BufferError::IndexOutOfRange) if `index > size()`.
    pub fn insert(&mut self, index: usize, ch: char) -> BufferResult<()> {
        if index > self.len {
            return Err(self.index_error("insert", index));
        }
        trace!(index, ?ch, "insert");

        match self.root {
            None => self.root = Some(self.arena.alloc(ch, None)),
            Some(_) if index == self.len => {
                let last = self
                    .find(self.len)
                    .ok_or_else(|| self.index_error("insert", index))?;
                let id = self.arena.alloc(ch, Some(last));
                self.arena.get_mut(last).right = Some(id);
            }
            Some(_) => {
                // The node at `index` keeps its place and takes `ch`; its old
                // character moves into a new node threaded in as its successor.
                let target = self
                    .find_adjusting(index + 1, Adjust::Grow { newline: ch == '\n' })
                    .ok_or_else(|| self.index_error("insert", index))?;
                let displaced = self.arena.get(target).ch;
                self.thread_successor(target, displaced);
                self.arena.get_mut(target).ch = ch;
            }
        }

        self.len += 1;
        if ch == '\n' {
            self.lines += 1;
        }
        Ok(())
    }

    /// Replace the character at `index` with `ch`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexOutOfRange`](super::BufferError::IndexOutOfRange) if `index >= size()`.
    pub fn edit(&mut self, index: usize, ch: char) -> BufferResult<()> {
        self.check_index("edit", index)?;
        let id = self
            .find(index + 1)
            .ok_or_else(|| self.index_error("edit", index))?;
        let old = self.arena.get(id).ch;
        if old == ch {
            return Ok(());
        }
        trace!(index, ?old, ?ch, "edit");

        if old == '\n' {
            self.shift_newlines_above(id, None, false);
            self.lines -= 1;
        }
        if ch == '\n' {
            self.shift_newlines_above(id, None, true);
            self.lines += 1;
        }
        self.arena.get_mut(id).ch = ch;
        Ok(())
    }

    /// Remove the character at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexOutOfRange`](super::BufferError::IndexOutOfRange) if `index >= size()`.
    pub fn erase(&mut self, index: usize) -> BufferResult<()> {
        self.check_index("erase", index)?;
        let id = self
            .find_adjusting(index + 1, Adjust::Shrink)
            .ok_or_else(|| self.index_error("erase", index))?;
        trace!(index, ch = ?self.arena.get(id).ch, "erase");

        if self.arena.get(id).is_newline() {
            self.shift_newlines_above(id, None, false);
            self.lines -= 1;
        }
        self.len -= 1;

        let node = self.arena.get(id);
        if let (Some(_), Some(right)) = (node.left, node.right) {
            // The successor vacates its slot and its character slides into
            // the erased node, which keeps its place in the tree.
            let mut succ = right;
            while let Some(left) = self.arena.get(succ).left {
                self.arena.get_mut(succ).count_left -= 1;
                succ = left;
            }
            let moved = self.arena.get(succ).ch;
            if moved == '\n' {
                self.shift_newlines_above(succ, Some(id), false);
            }
            self.arena.get_mut(id).ch = moved;
            self.splice(succ);
        } else {
            self.splice(id);
        }
        Ok(())
    }

    /// Attach a new node holding `ch` as the in-order successor of `id`.
    fn thread_successor(&mut self, id: NodeId, ch: char) {
        let Some(mut cur) = self.arena.get(id).right else {
            let new = self.arena.alloc(ch, Some(id));
            self.arena.get_mut(id).right = Some(new);
            return;
        };

        // Leftmost slot of the right subtree; every node passed gains the
        // new node in its left subtree.
        loop {
            let node = self.arena.get_mut(cur);
            node.count_left += 1;
            node.newlines_left += usize::from(ch == '\n');
            match node.left {
                Some(left) => cur = left,
                None => break,
            }
        }
        let new = self.arena.alloc(ch, Some(cur));
        self.arena.get_mut(cur).left = Some(new);
    }

    /// Unlink a node with at most one child, promoting that child into its
    /// slot, and release it.
    fn splice(&mut self, id: NodeId) {
        let node = self.arena.get(id);
        debug_assert!(node.left.is_none() || node.right.is_none());
        let child = node.left.or(node.right);
        let parent = node.parent;

        if let Some(child) = child {
            self.arena.get_mut(child).parent = parent;
        }
        match parent {
            None => self.root = child,
            Some(parent) if self.arena.is_left_child(parent, id) => {
                self.arena.get_mut(parent).left = child;
            }
            Some(parent) => self.arena.get_mut(parent).right = child,
        }
        self.arena.release(id);
    }
}
