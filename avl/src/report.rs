use crate::tree::AVLTree;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-node facts of the structural dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeReport {
    #[serde(rename = "balance factor")]
    pub balance_factor: i8,
    pub height: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<i64>,
    /// Set only on the root, which has no `parent`.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub root: bool,
}

/// Structural dump of an `AVLTree`. Serializes to a flat JSON object:
/// `"root"` and `"height"` for a non-empty tree, one entry per node keyed by its key, and `"size"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(flatten)]
    pub nodes: BTreeMap<i64, NodeReport>,
    pub size: usize,
}

// Implementation of `TreeReport`.
impl TreeReport {
    /// Collect the facts of every node of `tree`.
    /// # Arguments
    /// * `tree` - The tree to report on.
    pub fn from_tree(tree: &AVLTree) -> Self {
        let mut nodes = BTreeMap::new();
        let mut stack: Vec<_> = tree.root().into_iter().collect();

        while let Some(id) = stack.pop() {
            let node = tree.node(id);
            let key_of = |child| tree.node(child).key;
            stack.extend(node.left);
            stack.extend(node.right);
            nodes.insert(
                node.key,
                NodeReport {
                    balance_factor: node.balance_factor,
                    height: node.height,
                    left: node.left.map(key_of),
                    right: node.right.map(key_of),
                    parent: node.parent.map(key_of),
                    root: node.parent.is_none(),
                },
            );
        }

        TreeReport {
            root: tree.root_key(),
            height: tree.root().map(|_| tree.height()),
            nodes,
            size: tree.size(),
        }
    }

    /// Render the report as JSON, indented by two spaces when `pretty`.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TreeReport;
    use crate::tree::AVLTree;
    use serde_json::{json, Value};

    #[test]
    fn test_empty_tree_report() {
        let report = TreeReport::from_tree(&AVLTree::new());
        assert!(report.nodes.is_empty());

        let value: Value = serde_json::from_str(&report.to_json(false).unwrap()).unwrap();
        assert_eq!(value, json!({ "size": 0 }));
    }

    #[test]
    fn test_rotated_tree_report() {
        let tree: AVLTree = [30, 20, 10].into_iter().collect();
        let report = TreeReport::from_tree(&tree);

        let value: Value = serde_json::from_str(&report.to_json(true).unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "root": 20,
                "height": 1,
                "10": { "balance factor": 0, "height": 0, "parent": 20 },
                "20": { "balance factor": 0, "height": 1, "left": 10, "right": 30, "root": true },
                "30": { "balance factor": 0, "height": 0, "parent": 20 },
                "size": 3
            })
        );
    }

    #[test]
    fn test_report_covers_every_node() {
        let tree: AVLTree = (1..=50).collect();
        let report = TreeReport::from_tree(&tree);

        assert_eq!(report.nodes.len(), 50);
        assert_eq!(report.size, 50);
        assert_eq!(report.nodes.values().filter(|node| node.root).count(), 1);
        assert_eq!(report.root, tree.root_key());
        assert_eq!(report.height, Some(tree.height()));
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let tree: AVLTree = [1].into_iter().collect();
        let text = TreeReport::from_tree(&tree).to_json(true).unwrap();
        assert!(text.contains("\n  \"root\": 1"));
    }
}
