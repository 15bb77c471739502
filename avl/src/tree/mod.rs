mod arena;
mod avl_tree;
mod node;

pub use avl_tree::AVLTree;
pub use node::{AVLTreeNode, NodeId, Side};
