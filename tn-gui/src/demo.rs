//! A small bundled dataset so the binary runs without arguments.

use std::sync::Arc;

use tn_core::{
    centrality::CentralityScores,
    dataset::{Dataset, TimeRange},
    graph::Graph,
    snapshot::{MemorySource, SnapshotSource},
};

const GRAPH: &str = include_str!("../assets/demo/graph.json");
const SCORES: &str = include_str!("../assets/demo/scores.json");
const RANGES: &str = include_str!("../assets/demo/ranges.json");

const SNAPSHOTS: [&str; 6] = [
    include_str!("../assets/demo/snapshots/snapshot-0.json"),
    include_str!("../assets/demo/snapshots/snapshot-1.json"),
    include_str!("../assets/demo/snapshots/snapshot-2.json"),
    include_str!("../assets/demo/snapshots/snapshot-3.json"),
    include_str!("../assets/demo/snapshots/snapshot-4.json"),
    include_str!("../assets/demo/snapshots/snapshot-5.json"),
];

pub fn load() -> anyhow::Result<(Dataset, Arc<dyn SnapshotSource>)> {
    let graph: Graph = serde_json::from_str(GRAPH)?;
    let scores: CentralityScores = serde_json::from_str(SCORES)?;
    let ranges: Vec<TimeRange> = serde_json::from_str(RANGES)?;
    let dataset = Dataset::from_parts("demo", graph, scores, ranges)?;

    let snapshots = SNAPSHOTS
        .iter()
        .map(|contents| serde_json::from_str(contents))
        .collect::<Result<Vec<Graph>, _>>()?;

    Ok((dataset, Arc::new(MemorySource::from(snapshots))))
}
