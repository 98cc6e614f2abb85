//! Tree nodes and the arena that owns them.
//!
//! Nodes live in a `Vec` slab and refer to each other through [`NodeId`]
//! indices. Parent links are plain indices, so there is no ownership cycle to
//! break when the buffer is dropped; erased slots are detached and recycled
//! through a free list.

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Id of arena slot `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` does not fit in a `u32`. The arena addresses at most
    /// 2^32 slots, so that is also the longest buffer it can hold.
    fn from_slot(slot: usize) -> Self {
        Self(u32::try_from(slot).expect("text buffer exceeds 2^32 characters"))
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One character slot in the sequence.
#[derive(Debug, Clone)]
pub struct Node {
    pub ch: char,
    /// 1 + number of nodes in the left subtree.
    pub count_left: usize,
    /// Newlines in the left subtree (the node's own character excluded).
    pub newlines_left: usize,
    /// Height at the time the node was built. Informational only.
    pub height: usize,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
}

impl Node {
    const fn leaf(ch: char, parent: Option<NodeId>) -> Self {
        Self {
            ch,
            count_left: 1,
            newlines_left: 0,
            height: 1,
            left: None,
            right: None,
            parent,
        }
    }

    pub const fn is_newline(&self) -> bool {
        self.ch == '\n'
    }

    /// Clear every structural link.
    const fn detach(&mut self) {
        self.left = None;
        self.right = None;
        self.parent = None;
    }
}

/// Slab of nodes with slot recycling.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    nodes: Vec<Node>,
    free_list: Vec<u32>,
}

impl Arena {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free_list: Vec::new(),
        }
    }

    /// Allocate a leaf holding `ch` under `parent`.
    ///
    /// # Panics
    ///
    /// Panics when every one of the 2^32 addressable slots is live.
    pub fn alloc(&mut self, ch: char, parent: Option<NodeId>) -> NodeId {
        let node = Node::leaf(ch, parent);
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx as usize] = node;
            NodeId(idx)
        } else {
            let id = NodeId::from_slot(self.nodes.len());
            self.nodes.push(node);
            id
        }
    }

    /// Detach a node and return its slot to the free list.
    pub fn release(&mut self, id: NodeId) {
        self.nodes[id.index()].detach();
        self.free_list.push(id.0);
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Whether `child` hangs off `parent`'s left link.
    #[inline]
    pub fn is_left_child(&self, parent: NodeId, child: NodeId) -> bool {
        self.get(parent).left == Some(child)
    }

    /// Number of slots currently holding live nodes.
    pub fn live(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_creates_detached_leaf() {
        let mut arena = Arena::default();
        let id = arena.alloc('a', None);
        let node = arena.get(id);
        assert_eq!(node.ch, 'a');
        assert_eq!(node.count_left, 1);
        assert_eq!(node.newlines_left, 0);
        assert_eq!(node.height, 1);
        assert!(node.left.is_none() && node.right.is_none() && node.parent.is_none());
    }

    #[test]
    fn test_release_recycles_slot_and_clears_links() {
        let mut arena = Arena::default();
        let parent = arena.alloc('p', None);
        let child = arena.alloc('c', Some(parent));
        arena.get_mut(parent).left = Some(child);
        assert!(arena.is_left_child(parent, child));

        arena.release(child);
        assert!(arena.get(child).parent.is_none());
        assert_eq!(arena.live(), 1);

        let reused = arena.alloc('n', None);
        assert_eq!(reused, child);
        assert_eq!(arena.get(reused).ch, 'n');
        assert_eq!(arena.live(), 2);
    }

    #[test]
    fn test_slot_ids_are_distinct_up_to_the_limit() {
        let last = u32::MAX as usize;
        assert_eq!(NodeId::from_slot(last).index(), last);
        assert_ne!(NodeId::from_slot(last - 1), NodeId::from_slot(last));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    #[should_panic(expected = "exceeds 2^32 characters")]
    fn test_slot_past_limit_panics() {
        let _ = NodeId::from_slot(u32::MAX as usize + 1);
    }

    #[test]
    fn test_fresh_slots_get_sequential_ids() {
        let mut arena = Arena::default();
        let ids: Vec<usize> = "abc".chars().map(|c| arena.alloc(c, None).index()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
