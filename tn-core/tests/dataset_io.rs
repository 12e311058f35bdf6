use std::path::PathBuf;

use tn_core::{
    centrality::Metric,
    dataset::Dataset,
    graph::NodeId,
    snapshot::{DirectorySource, SnapshotError, SnapshotSource},
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn loads_and_validates_a_dataset_directory() {
    let dataset = Dataset::load(&fixture("demo")).unwrap();

    assert_eq!(dataset.name, "demo");
    assert_eq!(dataset.graph.len(), 3);
    assert_eq!(dataset.sequence_len(), 5);
    assert_eq!(dataset.ranges.len(), 5);

    // Every node carries an equal-length sequence for every metric.
    for metric in Metric::ALL {
        for id in [1, 2, 3] {
            let series = dataset.scores.node_series(metric, NodeId(id)).unwrap();
            assert_eq!(series.len(), 5);
        }
    }
}

#[test]
fn load_fails_fast_on_a_missing_directory() {
    let err = Dataset::load(&fixture("no-such-dataset")).unwrap_err();
    assert!(err.to_string().contains("graph.json"));
}

#[test]
fn directory_source_probes_the_snapshot_count() {
    let source = DirectorySource::open(fixture("demo").join("snapshots"));
    assert_eq!(source.count(), 5);

    let snapshot = source.fetch(2).unwrap();
    assert_eq!(snapshot.len(), 3);
    assert!(snapshot.contains(NodeId(3)));
}

#[test]
fn directory_source_rejects_out_of_range_indices() {
    let source = DirectorySource::open(fixture("demo").join("snapshots"));
    assert_eq!(
        source.fetch(5).unwrap_err(),
        SnapshotError::OutOfRange { index: 5, count: 5 }
    );
}

#[test]
fn corrupt_snapshot_surfaces_a_parse_error() {
    let source = DirectorySource::open(fixture("corrupt").join("snapshots"));
    assert_eq!(source.count(), 1);
    assert!(matches!(
        source.fetch(0).unwrap_err(),
        SnapshotError::Parse { index: 0, .. }
    ));
}
