use avl::{AVLTree, NodeReport, TreeReport};

fn node(report: &TreeReport, key: i64) -> &NodeReport {
    report.nodes.get(&key).expect("key should be in the report")
}

fn assert_balanced_triple(keys: [i64; 3]) {
    let tree: AVLTree = keys.into_iter().collect();
    let report = TreeReport::from_tree(&tree);

    assert_eq!(report.root, Some(20));
    assert_eq!(report.height, Some(1));
    assert_eq!(report.size, 3);

    let root = node(&report, 20);
    assert_eq!((root.left, root.right), (Some(10), Some(30)));
    assert_eq!(root.balance_factor, 0);
    assert!(root.root);
    for leaf in [10, 30] {
        let leaf = node(&report, leaf);
        assert_eq!(leaf.height, 0);
        assert_eq!(leaf.balance_factor, 0);
        assert_eq!(leaf.parent, Some(20));
        assert!(!leaf.root);
    }
    tree.check_invariants().unwrap();
}

#[test]
fn ll_single_right_rotation() {
    assert_balanced_triple([30, 20, 10]);
}

#[test]
fn rr_single_left_rotation() {
    assert_balanced_triple([10, 20, 30]);
}

#[test]
fn lr_double_rotation() {
    assert_balanced_triple([30, 10, 20]);
}

#[test]
fn rl_double_rotation() {
    assert_balanced_triple([10, 30, 20]);
}

// Two-child deletion keeps the node in place and promotes the largest key of its left subtree
// (15 here). Copying the literal minimum of the left subtree (5) into the root would leave 10 and
// 15 on its left and break BST order, so the in-order predecessor is promoted instead.
#[test]
fn two_child_deletion_promotes_from_left_subtree() {
    let mut tree: AVLTree = [20, 10, 30, 5, 15].into_iter().collect();
    assert!(tree.delete(20));
    tree.check_invariants().unwrap();

    let report = TreeReport::from_tree(&tree);
    assert_eq!(report.root, Some(15));
    assert_eq!(report.size, 4);
    assert!(!report.nodes.contains_key(&20));

    let root = node(&report, 15);
    assert_eq!((root.left, root.right), (Some(10), Some(30)));
    assert_eq!(node(&report, 10).left, Some(5));
    assert_eq!(node(&report, 5).parent, Some(10));

    for key in [5, 10, 15, 30] {
        assert!(tree.find(key));
    }
}

#[test]
fn duplicate_insert_is_idempotent() {
    let once: AVLTree = [8, 4, 12, 2, 6].into_iter().collect();
    let twice: AVLTree = [8, 4, 12, 2, 6, 4, 8].into_iter().collect();

    assert_eq!(once.size(), twice.size());
    assert_eq!(TreeReport::from_tree(&once), TreeReport::from_tree(&twice));
}

#[test]
fn sequential_inserts_then_drain() {
    let mut tree: AVLTree = (0..1000).collect();
    assert_eq!(tree.size(), 1000);
    // 1000 sequential keys fill a tree of height 9 (at most 1023 nodes).
    assert_eq!(tree.height(), 9);
    tree.check_invariants().unwrap();

    for expected in 0..1000 {
        assert_eq!(tree.delete_min(), Some(expected));
    }
    assert!(tree.is_empty());
    assert_eq!(tree.delete_min(), None);
}

#[test]
fn delete_every_other_key() {
    let mut tree: AVLTree = (0..500).rev().collect();
    for key in (0..500).step_by(2) {
        assert!(tree.delete(key));
        assert!(!tree.find(key));
    }
    tree.check_invariants().unwrap();

    assert_eq!(tree.size(), 250);
    assert_eq!(tree.keys(), (1..500).step_by(2).collect::<Vec<i64>>());
}
