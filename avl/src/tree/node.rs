/// Index of an `AVLTreeNode` inside the `NodeArena` of its tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Which child slot of its parent a node occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Struct for an `AVLTreeNode`.
#[derive(Debug)]
pub struct AVLTreeNode {
    /// The key of the node.
    pub key: i64,
    /// The cached height of the subtree rooted here. 0 for a leaf.
    pub height: i32,
    /// The cached `height(right) - height(left)`.
    pub balance_factor: i8,
    /// The left child of the node.
    pub left: Option<NodeId>,
    /// The right child of the node.
    pub right: Option<NodeId>,
    /// The parent of the node, `None` for the root. Not an owning link.
    pub parent: Option<NodeId>,
}

// Implementation of `AVLTreeNode`.
impl AVLTreeNode {
    /// Creating a new leaf `AVLTreeNode` given the `key` and its `parent`.
    /// # Arguments
    /// * `key` - The key for the node.
    /// * `parent` - The node this leaf hangs from, `None` for a root.
    pub fn new(key: i64, parent: Option<NodeId>) -> Self {
        AVLTreeNode {
            key,
            height: 0,
            balance_factor: 0,
            left: None,
            right: None,
            parent,
        }
    }

    pub fn has_left_child(&self) -> bool {
        self.left.is_some()
    }

    pub fn has_right_child(&self) -> bool {
        self.right.is_some()
    }

    /// Function to return which side `child` hangs on, if it is a child of this node at all.
    /// # Arguments
    /// * `self` - A ref to the candidate parent.
    /// * `child` - The id to look for among the children.
    pub fn side_of(&self, child: NodeId) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Function to refresh the cached `height` and `balance_factor` from the heights of the children.
    /// An absent child counts as height -1.
    /// # Arguments
    /// * `self` - A mutable ref to the `AVLTreeNode` whose cached fields are being updated.
    /// * `left_height` - The height of the left subtree.
    /// * `right_height` - The height of the right subtree.
    pub fn update_height(&mut self, left_height: i32, right_height: i32) {
        self.height = 1 + left_height.max(right_height);
        self.balance_factor = (right_height - left_height) as i8;
    }

    pub fn is_balanced(&self) -> bool {
        (-1..=1).contains(&self.balance_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::{AVLTreeNode, NodeId, Side};

    #[test]
    fn test_new_node_is_leaf() {
        let test_node = AVLTreeNode::new(1, None);
        assert!(!test_node.has_left_child() && !test_node.has_right_child());
        assert_eq!(test_node.height, 0);
        assert_eq!(test_node.balance_factor, 0);
    }

    #[test]
    fn test_update_height_leaf() {
        let mut test_node = AVLTreeNode::new(1, None);
        test_node.update_height(-1, -1);

        assert_eq!(test_node.height, 0);
        assert_eq!(test_node.balance_factor, 0);
    }

    #[test]
    fn test_update_height_left_child() {
        let mut test_node = AVLTreeNode::new(1, None);
        test_node.left = Some(NodeId(1));
        test_node.update_height(0, -1);

        assert_eq!(test_node.height, 1);
        assert_eq!(test_node.balance_factor, -1);
    }

    #[test]
    fn test_update_height_right_heavy() {
        let mut test_node = AVLTreeNode::new(1, None);
        test_node.update_height(-1, 1);

        assert_eq!(test_node.height, 2);
        assert_eq!(test_node.balance_factor, 2);
        assert!(!test_node.is_balanced());
    }

    #[test]
    fn test_side_of() {
        let mut test_node = AVLTreeNode::new(1, None);
        test_node.left = Some(NodeId(3));
        test_node.right = Some(NodeId(4));

        assert_eq!(test_node.side_of(NodeId(3)), Some(Side::Left));
        assert_eq!(test_node.side_of(NodeId(4)), Some(Side::Right));
        assert_eq!(test_node.side_of(NodeId(5)), None);
    }

    #[test]
    fn test_set_child() {
        let mut test_node = AVLTreeNode::new(1, None);
        test_node.set_child(Side::Right, Some(NodeId(7)));

        assert!(test_node.has_right_child());
        assert!(!test_node.has_left_child());
        assert_eq!(test_node.child(Side::Right), Some(NodeId(7)));
    }
}
