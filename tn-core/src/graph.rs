use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identifier of a node, unique within a graph.
///
/// The offline pipeline emits integer node ids, both as node fields and as
/// keys of the score maps.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id)
    }
}

/// Visual override applied to a node on top of its default style.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Emphasis {
    /// The node is part of the current selection in the primary graph.
    Highlighted,
    /// The node is the focus of the currently displayed snapshot.
    Focused,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default)]
    pub label: String,
    #[serde(skip)]
    pub emphasis: Option<Emphasis>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Node {
            id: id.into(),
            label: label.into(),
            emphasis: None,
        }
    }

    /// Label to show in the UI, falling back to the id for unlabelled nodes.
    pub fn display_label(&self) -> String {
        if self.label.is_empty() {
            self.id.to_string()
        } else {
            self.label.clone()
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

impl Edge {
    pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        Edge {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A node store plus an ordered edge list.
///
/// Deserializes from the asset shape `{"nodes": [...], "edges": [...]}`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(from = "RawGraph")]
pub struct Graph {
    nodes: IndexMap<NodeId, Node>,
    edges: Vec<Edge>,
}

#[derive(Deserialize)]
struct RawGraph {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl From<RawGraph> for Graph {
    fn from(raw: RawGraph) -> Self {
        Graph::from_parts(raw.nodes, raw.edges)
    }
}

impl Graph {
    pub fn from_parts(nodes: impl IntoIterator<Item = Node>, edges: Vec<Edge>) -> Self {
        Graph {
            nodes: nodes.into_iter().map(|node| (node.id, node)).collect(),
            edges,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Label to show for `id`, falling back to the raw id for unknown nodes.
    pub fn display_label(&self, id: NodeId) -> String {
        self.node(id)
            .map_or_else(|| id.to_string(), Node::display_label)
    }

    /// Sets or clears a node's visual override. Returns false when the id
    /// does not resolve to a node in this store.
    pub fn set_emphasis(&mut self, id: NodeId, emphasis: Option<Emphasis>) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.emphasis = emphasis;
                true
            }
            None => false,
        }
    }

    /// Replaces this graph's contents wholesale: clear, then add.
    pub fn replace_with(&mut self, source: Graph) {
        self.nodes.clear();
        self.edges.clear();
        self.nodes.extend(source.nodes);
        self.edges.extend(source.edges);
    }
}

#[cfg(test)]
mod tests {
    use super::{Edge, Emphasis, Graph, Node, NodeId};

    fn triangle() -> Graph {
        Graph::from_parts(
            [
                Node::new(1, "a"),
                Node::new(2, "b"),
                Node::new(3, "c"),
            ],
            vec![Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 1)],
        )
    }

    #[test]
    fn parses_asset_shape() {
        let graph: Graph = serde_json::from_str(
            r#"{"nodes": [{"id": 1, "label": "a"}, {"id": 2}], "edges": [{"from": 1, "to": 2}]}"#,
        )
        .unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edges(), &[Edge::new(1, 2)]);
        assert_eq!(graph.display_label(NodeId(1)), "a");
        // Unlabelled nodes fall back to their id.
        assert_eq!(graph.display_label(NodeId(2)), "2");
    }

    #[test]
    fn emphasis_select_then_deselect_restores_default() {
        let mut graph = triangle();
        for id in [NodeId(1), NodeId(2), NodeId(3)] {
            assert!(graph.set_emphasis(id, Some(Emphasis::Highlighted)));
            assert_eq!(graph.node(id).unwrap().emphasis, Some(Emphasis::Highlighted));
            assert!(graph.set_emphasis(id, None));
            assert_eq!(graph.node(id).unwrap().emphasis, None);
        }
    }

    #[test]
    fn emphasis_on_unknown_node_is_reported() {
        let mut graph = triangle();
        assert!(!graph.set_emphasis(NodeId(99), Some(Emphasis::Focused)));
    }

    #[test]
    fn replace_with_is_clear_then_add() {
        let mut graph = triangle();
        graph.set_emphasis(NodeId(1), Some(Emphasis::Highlighted));

        let replacement = Graph::from_parts([Node::new(7, "g")], vec![Edge::new(7, 7)]);
        graph.replace_with(replacement);

        assert_eq!(graph.len(), 1);
        assert!(!graph.contains(NodeId(1)));
        assert!(graph.contains(NodeId(7)));
        assert_eq!(graph.edges(), &[Edge::new(7, 7)]);
    }
}
