use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::graph::Graph;

/// Errors are kept `Clone` so a cached resolution can be reported more than
/// once.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("snapshot {index} is out of range ({count} snapshots available)")]
    OutOfRange { index: usize, count: usize },

    #[error("failed to read snapshot {index}: {message}")]
    Read { index: usize, message: String },

    #[error("failed to parse snapshot {index}: {message}")]
    Parse { index: usize, message: String },
}

/// Resolves the network state at a discrete time step from a
/// pre-partitioned collection of per-index snapshot assets.
///
/// Implementations are one-shot local reads; there is no retry and no
/// timeout. Callers treat a failed resolution as a recoverable, reportable
/// error.
pub trait SnapshotSource: Send + Sync {
    /// Number of snapshot assets available.
    fn count(&self) -> usize;

    /// The `{nodes, edges}` graph for `index`.
    fn fetch(&self, index: usize) -> Result<Graph, SnapshotError>;
}

/// Snapshot assets laid out one file per index: `snapshot-<i>.json`.
pub struct DirectorySource {
    root: PathBuf,
    count: usize,
}

impl DirectorySource {
    /// Opens a snapshot directory, probing `snapshot-0.json`,
    /// `snapshot-1.json`, ... until the first gap to establish the count.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mut count = 0;
        while Self::file_for(&root, count).is_file() {
            count += 1;
        }
        debug!(root = %root.display(), count, "opened snapshot directory");
        DirectorySource { root, count }
    }

    fn file_for(root: &std::path::Path, index: usize) -> PathBuf {
        root.join(format!("snapshot-{index}.json"))
    }
}

impl SnapshotSource for DirectorySource {
    fn count(&self) -> usize {
        self.count
    }

    fn fetch(&self, index: usize) -> Result<Graph, SnapshotError> {
        if index >= self.count {
            return Err(SnapshotError::OutOfRange {
                index,
                count: self.count,
            });
        }
        let path = Self::file_for(&self.root, index);
        let contents = std::fs::read_to_string(&path).map_err(|err| SnapshotError::Read {
            index,
            message: err.to_string(),
        })?;
        serde_json::from_str(&contents).map_err(|err| SnapshotError::Parse {
            index,
            message: err.to_string(),
        })
    }
}

/// Snapshots held in memory; backs the bundled demo dataset and tests.
#[derive(Clone, Debug, Default)]
pub struct MemorySource(Vec<Graph>);

impl From<Vec<Graph>> for MemorySource {
    fn from(snapshots: Vec<Graph>) -> Self {
        MemorySource(snapshots)
    }
}

impl SnapshotSource for MemorySource {
    fn count(&self) -> usize {
        self.0.len()
    }

    fn fetch(&self, index: usize) -> Result<Graph, SnapshotError> {
        self.0
            .get(index)
            .cloned()
            .ok_or(SnapshotError::OutOfRange {
                index,
                count: self.0.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySource, SnapshotError, SnapshotSource};
    use crate::graph::{Edge, Graph, Node, NodeId};

    #[test]
    fn memory_source_resolves_in_range_indices() {
        let source = MemorySource::from(vec![
            Graph::from_parts([Node::new(1, "a")], vec![]),
            Graph::from_parts([Node::new(1, "a"), Node::new(2, "b")], vec![Edge::new(1, 2)]),
        ]);

        assert_eq!(source.count(), 2);
        let snapshot = source.fetch(1).unwrap();
        assert!(snapshot.contains(NodeId(2)));
        assert_eq!(snapshot.edges().len(), 1);
    }

    #[test]
    fn out_of_range_index_is_an_error_value() {
        let source = MemorySource::from(vec![Graph::default()]);
        assert_eq!(
            source.fetch(5).unwrap_err(),
            SnapshotError::OutOfRange { index: 5, count: 1 }
        );
    }
}
