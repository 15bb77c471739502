use crate::tree::arena::NodeArena;
use crate::tree::node::{AVLTreeNode, NodeId, Side};
use anyhow::ensure;
use itertools::Itertools;
use log::{debug, trace};
use std::cmp::Ordering;

/// Struct to represent the `AVLTree`.
#[derive(Debug, Default)]
pub struct AVLTree {
    /// Storage for every live node of the tree.
    nodes: NodeArena,
    /// The main root of the AVL tree.
    root: Option<NodeId>,
    /// The current number of keys in the AVL tree.
    size: usize,
}

/*
    The following functions are helper functions for the main ones further below.
*/

impl AVLTree {
    /// Height of an optional subtree, -1 when absent.
    fn height_of(&self, id: Option<NodeId>) -> i32 {
        id.map_or(-1, |id| self.nodes[id].height)
    }

    /// Helper function to refresh the cached height and balance factor at `id` from its children.
    /// # Arguments
    /// * `id` - The node to refresh. Its children must already be up to date.
    fn update_height(&mut self, id: NodeId) {
        let left_height = self.height_of(self.nodes[id].left);
        let right_height = self.height_of(self.nodes[id].right);
        self.nodes[id].update_height(left_height, right_height);
    }

    /// Helper function to find the node holding `key`.
    fn locate(&self, key: i64) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match key.cmp(&node.key) {
                Ordering::Equal => return Some(id),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    fn subtree_min(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    fn subtree_max(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.nodes[id].right {
            id = right;
        }
        id
    }

    /// Helper function to unlink `child` from `parent`. Panics if `parent` does not hold `child`.
    /// # Arguments
    /// * `parent` - The node losing a child.
    /// * `child` - The child being detached.
    fn delete_child(&mut self, parent: NodeId, child: NodeId) {
        match self.nodes[parent].side_of(child) {
            Some(side) => self.nodes[parent].set_child(side, None),
            None => panic!(
                "AVLTree::delete_child: {} is not a child of {}",
                self.nodes[child].key, self.nodes[parent].key
            ),
        }
    }

    /// Helper function to put `new` in the slot of `parent` currently held by `old`, and point `new`
    /// back at `parent`. Panics if `old` is not a child of `parent` or `new` already is one.
    /// # Arguments
    /// * `parent` - The node whose child slot changes.
    /// * `old` - The child being replaced.
    /// * `new` - The replacement.
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if self.nodes[parent].side_of(new).is_some() {
            panic!(
                "AVLTree::replace_child: {} is already a child of {}",
                self.nodes[new].key, self.nodes[parent].key
            );
        }
        let side = self.nodes[parent].side_of(old).unwrap_or_else(|| {
            panic!(
                "AVLTree::replace_child: {} is not a child of {}",
                self.nodes[old].key, self.nodes[parent].key
            )
        });
        self.nodes[parent].set_child(side, Some(new));
        self.nodes[new].parent = Some(parent);
    }

    /// Helper function to hang `new` where `old` used to hang: under `old`'s parent, or as the root.
    fn take_position(&mut self, old: NodeId, new: NodeId) {
        match self.nodes[old].parent {
            Some(parent) => self.replace_child(parent, old, new),
            None => {
                self.root = Some(new);
                self.nodes[new].parent = None;
            }
        }
    }

    /// Helper function to left rotate the AVL tree at `root`. Returns the node now in `root`'s position.
    /// # Arguments
    /// * `root` - The node where to rotate. Must have a right child.
    fn left_rotate(&mut self, root: NodeId) -> NodeId {
        let pivot = self.nodes[root].right.expect("invalid AVL tree");
        debug!(
            "left rotation at {} (promoting {})",
            self.nodes[root].key, self.nodes[pivot].key
        );

        let inner = self.nodes[pivot].left;
        self.nodes[root].right = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(root);
        }

        self.take_position(root, pivot);
        self.nodes[pivot].left = Some(root);
        self.nodes[root].parent = Some(pivot);

        self.update_height(root);
        self.update_height(pivot);
        pivot
    }

    /// Helper function to right rotate the AVL tree at `root`. Returns the node now in `root`'s position.
    /// # Arguments
    /// * `root` - The node where to rotate. Must have a left child.
    fn right_rotate(&mut self, root: NodeId) -> NodeId {
        let pivot = self.nodes[root].left.expect("invalid AVL tree");
        debug!(
            "right rotation at {} (promoting {})",
            self.nodes[root].key, self.nodes[pivot].key
        );

        let inner = self.nodes[pivot].right;
        self.nodes[root].left = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(root);
        }

        self.take_position(root, pivot);
        self.nodes[pivot].right = Some(root);
        self.nodes[root].parent = Some(pivot);

        self.update_height(root);
        self.update_height(pivot);
        pivot
    }

    /// Helper function to left-right rotate the AVL tree at `root`.
    /// # Arguments
    /// * `root` - The node where to rotate.
    fn left_right_rotate(&mut self, root: NodeId) -> NodeId {
        let left = self.nodes[root].left.expect("invalid AVL tree");
        self.left_rotate(left);
        self.right_rotate(root)
    }

    /// Helper function to right-left rotate the AVL tree at `root`.
    /// # Arguments
    /// * `root` - The node where to rotate.
    fn right_left_rotate(&mut self, root: NodeId) -> NodeId {
        let right = self.nodes[root].right.expect("invalid AVL tree");
        self.right_rotate(right);
        self.left_rotate(root)
    }

    /// Helper function to balance out the AVL tree at `root`, whose cached balance factor is already
    /// known to be out of range. A heavy child with balance factor 0 takes the single rotation.
    /// # Arguments
    /// * `root` - The node where to balance.
    fn balance_avl_tree(&mut self, root: NodeId) -> NodeId {
        let balance_factor = self.nodes[root].balance_factor;
        if balance_factor < 0 {
            let left = self.nodes[root].left.expect("invalid AVL tree");
            if self.nodes[left].balance_factor <= 0 {
                self.right_rotate(root)
            } else {
                self.left_right_rotate(root)
            }
        } else if balance_factor > 0 {
            let right = self.nodes[root].right.expect("invalid AVL tree");
            if self.nodes[right].balance_factor >= 0 {
                self.left_rotate(root)
            } else {
                self.right_left_rotate(root)
            }
        } else {
            root
        }
    }

    /// Helper function to walk from `start` up to the root, refreshing heights and rebalancing.
    /// Only the ancestors of a structural change can have stale heights.
    /// # Arguments
    /// * `start` - The lowest node whose subtree changed shape.
    fn retrace(&mut self, start: Option<NodeId>) {
        let mut current = start;
        while let Some(id) = current {
            self.update_height(id);
            let top = if self.nodes[id].is_balanced() {
                id
            } else {
                self.balance_avl_tree(id)
            };
            current = self.nodes[top].parent;
        }
    }

    /// Helper function to physically remove `id`, which has at most one child, by linking that child
    /// to `id`'s parent. Rebalances from the parent upward.
    /// # Arguments
    /// * `id` - The node to remove.
    fn splice(&mut self, id: NodeId) {
        let node = &self.nodes[id];
        assert!(
            !(node.has_left_child() && node.has_right_child()),
            "AVLTree::splice: {} has two children",
            node.key
        );
        let parent = node.parent;
        let child = node.left.or(node.right);

        match (parent, child) {
            (None, child) => {
                self.root = child;
                if let Some(child) = child {
                    self.nodes[child].parent = None;
                }
            }
            (Some(parent), Some(child)) => self.replace_child(parent, id, child),
            (Some(parent), None) => self.delete_child(parent, id),
        }

        let removed = self.nodes.release(id);
        debug!("spliced out {}", removed.key);
        self.size -= 1;
        self.retrace(parent);
    }

    fn check_subtree(&self, id: NodeId) -> anyhow::Result<i32> {
        let node = &self.nodes[id];
        let mut heights = [-1; 2];
        for (slot, child) in [node.left, node.right].into_iter().enumerate() {
            if let Some(child) = child {
                ensure!(
                    self.nodes[child].parent == Some(id),
                    "child {} of {} does not point back at it",
                    self.nodes[child].key,
                    node.key
                );
                heights[slot] = self.check_subtree(child)?;
            }
        }
        let [left_height, right_height] = heights;

        let height = 1 + left_height.max(right_height);
        let balance_factor = right_height - left_height;
        ensure!(
            node.height == height,
            "node {} caches height {} but has height {}",
            node.key,
            node.height,
            height
        );
        ensure!(
            i32::from(node.balance_factor) == balance_factor,
            "node {} caches balance factor {} but has {}",
            node.key,
            node.balance_factor,
            balance_factor
        );
        ensure!(
            balance_factor.abs() <= 1,
            "node {} is out of balance ({})",
            node.key,
            balance_factor
        );
        Ok(height)
    }
}

/*
    The following functions are the main functions of the `AVLTree` implementation.
*/

// Implementation of the `AVLTree`.
impl AVLTree {
    /// Creating a new `AVLTree`, initialized to being empty.
    pub fn new() -> Self {
        AVLTree {
            nodes: NodeArena::new(),
            root: None,
            size: 0,
        }
    }

    /// Insert `key` into the tree. A key already present is left alone.
    /// Returns `true` if the key was new.
    /// # Arguments
    /// * `self` - A mutable ref to the `AVLTree` struct to update it with the new node.
    /// * `key` - The new key to insert.
    pub fn insert(&mut self, key: i64) -> bool {
        let Some(mut current) = self.root else {
            self.root = Some(self.nodes.alloc(AVLTreeNode::new(key, None)));
            self.size = 1;
            return true;
        };

        loop {
            let node = &self.nodes[current];
            let side = match key.cmp(&node.key) {
                Ordering::Equal => {
                    trace!("duplicate insert of {} ignored", key);
                    return false;
                }
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            match node.child(side) {
                Some(next) => current = next,
                None => {
                    let leaf = self.nodes.alloc(AVLTreeNode::new(key, Some(current)));
                    self.nodes[current].set_child(side, Some(leaf));
                    self.size += 1;
                    self.retrace(Some(current));
                    return true;
                }
            }
        }
    }

    /// Remove `key` from the tree. Returns `false` if it was not there.
    ///
    /// A node with two children stays in place and takes over the key of its in-order
    /// predecessor (the largest key of its left subtree); the predecessor node is removed instead.
    /// # Arguments
    /// * `self` - A mutable ref to the `AVLTree` struct.
    /// * `key` - The key to remove.
    pub fn delete(&mut self, key: i64) -> bool {
        let Some(target) = self.locate(key) else {
            return false;
        };

        let doomed = match (self.nodes[target].left, self.nodes[target].right) {
            (Some(left), Some(_)) => {
                let predecessor = self.subtree_max(left);
                let promoted = self.nodes[predecessor].key;
                debug!("promoting {} into the slot of {}", promoted, key);
                self.nodes[target].key = promoted;
                predecessor
            }
            _ => target,
        };
        self.splice(doomed);
        true
    }

    /// Remove and return the smallest key, `None` when the tree is empty.
    pub fn delete_min(&mut self) -> Option<i64> {
        let min = self.subtree_min(self.root?);
        let key = self.nodes[min].key;
        self.splice(min);
        Some(key)
    }

    pub fn find(&self, key: i64) -> bool {
        self.locate(key).is_some()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Height of the whole tree, -1 when empty.
    pub fn height(&self) -> i32 {
        self.height_of(self.root)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root_key(&self) -> Option<i64> {
        self.root.map(|id| self.nodes[id].key)
    }

    /// Read access to a node reached through `root()` or another node's links.
    pub fn node(&self, id: NodeId) -> &AVLTreeNode {
        &self.nodes[id]
    }

    pub fn min(&self) -> Option<i64> {
        self.root.map(|id| self.nodes[self.subtree_min(id)].key)
    }

    pub fn max(&self) -> Option<i64> {
        self.root.map(|id| self.nodes[self.subtree_max(id)].key)
    }

    /// All keys in ascending order.
    pub fn keys(&self) -> Vec<i64> {
        let mut keys = Vec::with_capacity(self.size);
        let mut stack: Vec<NodeId> = Vec::new();
        let mut current = self.root;
        while current.is_some() || !stack.is_empty() {
            while let Some(id) = current {
                stack.push(id);
                current = self.nodes[id].left;
            }
            if let Some(id) = stack.pop() {
                keys.push(self.nodes[id].key);
                current = self.nodes[id].right;
            }
        }
        keys
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.size = 0;
    }

    /// Recompute every structural fact from scratch and compare it against the cached state:
    /// key order, heights, balance factors, parent links and size.
    pub fn check_invariants(&self) -> anyhow::Result<()> {
        let keys = self.keys();
        ensure!(
            keys.iter().tuple_windows().all(|(a, b)| a < b),
            "keys are not in strictly ascending order: {:?}",
            keys
        );
        ensure!(
            keys.len() == self.size,
            "size is {} but {} nodes are reachable",
            self.size,
            keys.len()
        );
        ensure!(
            self.nodes.len() == self.size,
            "size is {} but the arena holds {} nodes",
            self.size,
            self.nodes.len()
        );

        if let Some(root) = self.root {
            ensure!(
                self.nodes[root].parent.is_none(),
                "root {} has a parent",
                self.nodes[root].key
            );
            self.check_subtree(root)?;
        }
        Ok(())
    }
}

impl FromIterator<i64> for AVLTree {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut tree = AVLTree::new();
        for key in iter {
            tree.insert(key);
        }
        tree
    }
}
