//! A self-balancing (AVL) binary search tree over `i64` keys, with the adapters around it:
//! an operation-file reader, a replay driver, and a structural JSON report.

mod ops;
mod replay;
mod report;
mod tree;

pub use crate::ops::{load_operations, parse_operations, Operation};
pub use crate::replay::{replay, ReplayConfig};
pub use crate::report::{NodeReport, TreeReport};
pub use crate::tree::{AVLTree, AVLTreeNode, NodeId, Side};
