use anyhow::{bail, Context};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// One record of an operation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Insert(i64),
    Delete(i64),
    DeleteMin,
    /// Any kind the tree has no counterpart for; carried through so it can be reported.
    Other(String),
}

#[derive(Deserialize)]
struct Metadata {
    #[serde(rename = "numOps")]
    num_ops: usize,
}

#[derive(Deserialize)]
struct Record {
    operation: String,
    key: Option<i64>,
}

impl Record {
    fn into_operation(self, index: usize) -> anyhow::Result<Operation> {
        let Record { operation, key } = self;
        let require_key =
            |kind: &str| key.with_context(|| format!("record {}: {} without a key", index, kind));
        Ok(match operation.as_str() {
            "Insert" => Operation::Insert(require_key("Insert")?),
            "Delete" => Operation::Delete(require_key("Delete")?),
            "DeleteMin" => Operation::DeleteMin,
            other => Operation::Other(other.to_string()),
        })
    }
}

/// Parse an operation file: a JSON object holding `"metadata": {"numOps": N}` and the records
/// `"1"` through `"N"`, each `{"operation": <kind>, "key": <int>}`.
/// # Arguments
/// * `text` - The file contents.
pub fn parse_operations(text: &str) -> anyhow::Result<Vec<Operation>> {
    let mut file: Map<String, Value> =
        serde_json::from_str(text).context("operation file is not a JSON object")?;

    let metadata: Metadata = match file.remove("metadata") {
        Some(metadata) => serde_json::from_value(metadata).context("malformed metadata")?,
        None => bail!("operation file has no metadata"),
    };

    (1..=metadata.num_ops)
        .map(|index| {
            let record = file
                .remove(&index.to_string())
                .with_context(|| format!("record {} of {} is missing", index, metadata.num_ops))?;
            let record: Record = serde_json::from_value(record)
                .with_context(|| format!("record {} is malformed", index))?;
            record.into_operation(index)
        })
        .collect()
}

/// Read and parse the operation file at `path`.
pub fn load_operations(path: impl AsRef<Path>) -> anyhow::Result<Vec<Operation>> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    parse_operations(&text).with_context(|| format!("cannot parse {}", path.display()))
}
