use crate::tree::node::{AVLTreeNode, NodeId};
use std::ops::{Index, IndexMut};

/// Flat store for the nodes of one `AVLTree`. Vacated slots are recycled through `free`.
#[derive(Debug, Default)]
pub struct NodeArena {
    /// The slots, `None` once the node living there has been released.
    slots: Vec<Option<AVLTreeNode>>,
    /// Indices of vacated slots, reused before the arena grows.
    free: Vec<usize>,
}

// Implementation of `NodeArena`.
impl NodeArena {
    pub fn new() -> Self {
        NodeArena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Store `node` and return the id it can be reached under.
    /// # Arguments
    /// * `self` - A mutable ref to the `NodeArena`.
    /// * `node` - The node to store.
    pub fn alloc(&mut self, node: AVLTreeNode) -> NodeId {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                NodeId(idx)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Remove the node at `id` and hand it back. Panics if the slot is already vacant.
    /// # Arguments
    /// * `self` - A mutable ref to the `NodeArena`.
    /// * `id` - The id of the node to release.
    pub fn release(&mut self, id: NodeId) -> AVLTreeNode {
        let node = self.slots[id.0]
            .take()
            .unwrap_or_else(|| panic!("NodeArena::release: slot {} already vacant", id.0));
        self.free.push(id.0);
        node
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl Index<NodeId> for NodeArena {
    type Output = AVLTreeNode;

    fn index(&self, id: NodeId) -> &AVLTreeNode {
        self.slots[id.0]
            .as_ref()
            .unwrap_or_else(|| panic!("NodeArena: dangling node id {}", id.0))
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut AVLTreeNode {
        self.slots[id.0]
            .as_mut()
            .unwrap_or_else(|| panic!("NodeArena: dangling node id {}", id.0))
    }
}
