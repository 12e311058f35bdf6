use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::graph::NodeId;

/// The three node-centrality measures computed by the offline pipeline.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Metric {
    Betweenness,
    Closeness,
    Eigenvector,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Betweenness, Metric::Closeness, Metric::Eigenvector];

    pub const fn index(self) -> usize {
        match self {
            Metric::Betweenness => 0,
            Metric::Closeness => 1,
            Metric::Eigenvector => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Metric::Betweenness => "Betweenness centrality",
            Metric::Closeness => "Closeness centrality",
            Metric::Eigenvector => "Eigenvector centrality",
        }
    }

    pub const fn short_label(self) -> &'static str {
        match self {
            Metric::Betweenness => "B.C",
            Metric::Closeness => "C.C",
            Metric::Eigenvector => "Ev.C",
        }
    }
}

impl Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub type ScoreMap = IndexMap<NodeId, Vec<f64>>;

/// Per-node centrality score sequences, one score per time step.
///
/// Matches the asset emitted by the scoring pipeline: a map per metric,
/// keyed by node id, each value an equal-length array of scores.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CentralityScores {
    #[serde(rename = "betweenness_centrality", default)]
    betweenness: ScoreMap,
    #[serde(rename = "closeness_centrality", default)]
    closeness: ScoreMap,
    #[serde(rename = "eigenvector_centrality", default)]
    eigenvector: ScoreMap,
}

impl CentralityScores {
    pub fn from_parts(betweenness: ScoreMap, closeness: ScoreMap, eigenvector: ScoreMap) -> Self {
        CentralityScores {
            betweenness,
            closeness,
            eigenvector,
        }
    }

    pub fn metric(&self, metric: Metric) -> &ScoreMap {
        match metric {
            Metric::Betweenness => &self.betweenness,
            Metric::Closeness => &self.closeness,
            Metric::Eigenvector => &self.eigenvector,
        }
    }

    /// The score sequence of one node under one metric.
    pub fn node_series(&self, metric: Metric, id: NodeId) -> Option<&[f64]> {
        self.metric(metric).get(&id).map(Vec::as_slice)
    }

    /// Number of time steps, taken from the first sequence present.
    pub fn sequence_len(&self) -> usize {
        Metric::ALL
            .iter()
            .flat_map(|&metric| self.metric(metric).values())
            .map(Vec::len)
            .next()
            .unwrap_or(0)
    }

    /// Ids of the scored nodes, in score-map order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.betweenness.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{CentralityScores, Metric, NodeId};

    #[test]
    fn parses_pipeline_keys() {
        let scores: CentralityScores = serde_json::from_str(
            r#"{
                "betweenness_centrality": {"1": [0.0, 0.5], "2": [0.1, 0.2]},
                "closeness_centrality": {"1": [0.3, 0.4], "2": [0.5, 0.6]},
                "eigenvector_centrality": {"1": [0.7, 0.8], "2": [0.9, 1.0]}
            }"#,
        )
        .unwrap();

        assert_eq!(scores.sequence_len(), 2);
        assert_eq!(
            scores.node_series(Metric::Closeness, NodeId(2)),
            Some([0.5, 0.6].as_slice())
        );
        assert_eq!(scores.node_series(Metric::Betweenness, NodeId(3)), None);
    }

    #[test]
    fn sequence_len_of_empty_scores_is_zero() {
        assert_eq!(CentralityScores::default().sequence_len(), 0);
    }
}
