use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::DateTime;
use itertools::Itertools;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::{
    centrality::{CentralityScores, Metric},
    graph::{Graph, NodeId},
};

const GRAPH_FILE: &str = "graph.json";
const SCORES_FILE: &str = "scores.json";
const RANGES_FILE: &str = "ranges.json";

/// The real-world date interval one snapshot index covers, in Unix seconds.
/// Display-only.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

impl TimeRange {
    pub fn new(start: i64, end: i64) -> Self {
        TimeRange { start, end }
    }

    /// Human-readable date span, e.g. `03 Feb 2020 - 09 Feb 2020`.
    pub fn span_label(&self) -> String {
        format!("{} - {}", format_day(self.start), format_day(self.end))
    }
}

fn format_day(unix_seconds: i64) -> String {
    DateTime::from_timestamp(unix_seconds, 0).map_or_else(
        || unix_seconds.to_string(),
        |dt| dt.format("%d %b %Y").to_string(),
    )
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{metric} sequence for node {node} has {len} scores, expected {expected}")]
    SequenceLength {
        metric: Metric,
        node: NodeId,
        len: usize,
        expected: usize,
    },

    #[error("node {node} has no {metric} sequence")]
    MissingSeries { metric: Metric, node: NodeId },

    #[error("dataset has {ranges} time ranges for {expected} time steps")]
    RangeCount { ranges: usize, expected: usize },
}

/// A fully loaded and validated dataset: the base graph, the per-node
/// centrality sequences, and the per-snapshot time ranges. Snapshot graphs
/// stay on disk and are resolved lazily through a
/// [`SnapshotSource`](crate::snapshot::SnapshotSource).
#[derive(Clone, Debug)]
pub struct Dataset {
    pub name: String,
    pub graph: Graph,
    pub scores: CentralityScores,
    pub ranges: Vec<TimeRange>,
}

impl Dataset {
    /// Reads `graph.json`, `scores.json` and `ranges.json` from a dataset
    /// directory and validates them, failing fast before first render.
    pub fn load(dir: &Path) -> Result<Self, DatasetError> {
        let name = dir
            .file_name()
            .map_or_else(|| "dataset".to_owned(), |n| n.to_string_lossy().into_owned());
        debug!(dataset = %name, "loading dataset");

        let graph = read_json(&dir.join(GRAPH_FILE))?;
        let scores = read_json(&dir.join(SCORES_FILE))?;
        let ranges = read_json(&dir.join(RANGES_FILE))?;

        Dataset::from_parts(name, graph, scores, ranges)
    }

    /// Assembles a dataset from already-parsed assets, validating the
    /// structural invariants: every scored node carries all three metrics,
    /// all sequences share one length, and each time step has a range.
    pub fn from_parts(
        name: impl Into<String>,
        graph: Graph,
        scores: CentralityScores,
        ranges: Vec<TimeRange>,
    ) -> Result<Self, DatasetError> {
        let name = name.into();
        let expected = scores.sequence_len();

        let scored_nodes: Vec<NodeId> = Metric::ALL
            .iter()
            .flat_map(|&metric| scores.metric(metric).keys().copied())
            .unique()
            .collect();

        for metric in Metric::ALL {
            for &id in &scored_nodes {
                let series = scores
                    .node_series(metric, id)
                    .ok_or(DatasetError::MissingSeries { metric, node: id })?;
                if series.len() != expected {
                    return Err(DatasetError::SequenceLength {
                        metric,
                        node: id,
                        len: series.len(),
                        expected,
                    });
                }
            }
        }

        if ranges.len() != expected {
            return Err(DatasetError::RangeCount {
                ranges: ranges.len(),
                expected,
            });
        }

        debug!(
            dataset = %name,
            nodes = graph.len(),
            time_steps = expected,
            "dataset validated"
        );

        Ok(Dataset {
            name,
            graph,
            scores,
            ranges,
        })
    }

    /// Number of time steps shared by every centrality sequence.
    pub fn sequence_len(&self) -> usize {
        self.scores.sequence_len()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let contents = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| DatasetError::Json {
        path: path.to_owned(),
        source,
    })
}
