use crate::ops::Operation;
use crate::tree::AVLTree;
use anyhow::Context;
use log::{debug, trace};

/// Struct for the `ReplayConfig`.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// If `Delete` and `DeleteMin` records should be applied, not just `Insert`.
    apply_deletes: bool,
    /// If the tree should be fully re-verified after every applied record.
    check_invariants: bool,
    /// If the report should be indented.
    pretty: bool,
}

// Implementation for the `ReplayConfig`.
impl ReplayConfig {
    /// Setting if deletions are applied.
    /// # Arguments
    /// * `apply` - `true` to apply `Delete` and `DeleteMin` records as well as inserts.
    pub fn apply_deletes(mut self, apply: bool) -> Self {
        self.apply_deletes = apply;
        self
    }
    /// Setting if invariants are checked after every record.
    /// # Arguments
    /// * `check` - `true` to run `AVLTree::check_invariants` after each applied record.
    pub fn check_invariants(mut self, check: bool) -> Self {
        self.check_invariants = check;
        self
    }
    /// Setting if the report is pretty printed.
    /// # Arguments
    /// * `pretty` - `true` for two-space indented JSON.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

// Special default implementation of the `ReplayConfig`.
impl Default for ReplayConfig {
    /// Default implementation of the `ReplayConfig`.
    /// Only inserts are applied, invariants are not re-checked, and output is pretty printed.
    fn default() -> Self {
        Self {
            apply_deletes: false,
            check_invariants: false,
            pretty: true,
        }
    }
}

/// Build a tree by applying `operations` in order.
/// # Arguments
/// * `operations` - The records to apply.
/// * `config` - Which records to apply and whether to verify the tree along the way.
pub fn replay(operations: &[Operation], config: &ReplayConfig) -> anyhow::Result<AVLTree> {
    let mut tree = AVLTree::new();

    for (index, operation) in operations.iter().enumerate() {
        let applied = match operation {
            Operation::Insert(key) => {
                tree.insert(*key);
                true
            }
            Operation::Delete(key) if config.apply_deletes => {
                if !tree.delete(*key) {
                    debug!("record {}: key {} not found", index + 1, key);
                }
                true
            }
            Operation::DeleteMin if config.apply_deletes => {
                if tree.delete_min().is_none() {
                    debug!("record {}: delete min on an empty tree", index + 1);
                }
                true
            }
            skipped => {
                trace!("record {}: skipping {:?}", index + 1, skipped);
                false
            }
        };

        if applied && config.check_invariants {
            tree.check_invariants()
                .with_context(|| format!("after record {} ({:?})", index + 1, operation))?;
        }
    }

    debug!(
        "replayed {} records into a tree of {} keys",
        operations.len(),
        tree.size()
    );
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::{replay, ReplayConfig};
    use crate::ops::Operation;

    fn records() -> Vec<Operation> {
        vec![
            Operation::Insert(20),
            Operation::Insert(10),
            Operation::Insert(30),
            Operation::Delete(10),
            Operation::Other("Find".to_string()),
            Operation::Insert(20),
            Operation::DeleteMin,
            Operation::Insert(5),
        ]
    }

    #[test]
    fn test_default_replays_inserts_only() {
        let tree = replay(&records(), &ReplayConfig::default()).unwrap();

        assert_eq!(tree.keys(), vec![5, 10, 20, 30]);
        assert_eq!(tree.size(), 4);
    }

    #[test]
    fn test_apply_deletes() {
        let config = ReplayConfig::default()
            .apply_deletes(true)
            .check_invariants(true);
        let tree = replay(&records(), &config).unwrap();

        // 10 deleted, then 20 removed as the minimum.
        assert_eq!(tree.keys(), vec![5, 30]);
    }

    #[test]
    fn test_deletes_on_empty_tree_are_harmless() {
        let config = ReplayConfig::default().apply_deletes(true);
        let operations = vec![Operation::DeleteMin, Operation::Delete(4)];

        let tree = replay(&operations, &config).unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_config_builder() {
        let config = ReplayConfig::default();
        assert!(config.is_pretty());
        assert!(!config.pretty(false).is_pretty());
    }
}
