use std::f32::consts::TAU;

use egui::{Pos2, Rect, Vec2};
use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use indexmap::IndexMap;
use tn_core::graph::{Graph, NodeId};

use crate::render::NODE_RADIUS;

/// Radius within which a pointer position grabs a node.
pub const HIT_RADIUS: f32 = NODE_RADIUS + 6.0;

/// Radius of the circle nodes are seeded on before the simulation runs.
const SEED_RADIUS: f32 = 120.0;

/// Margin around the node bounding box when framing the layout.
const FRAME_MARGIN: f32 = 40.0;

/// Mean per-node displacement below which a tick counts as calm.
const SETTLE_EPSILON: f32 = 0.05;

/// Consecutive calm ticks required before the layout settles.
const SETTLE_TICKS: u32 = 30;

/// Hard cap on simulation ticks; slow-converging layouts settle here.
const MAX_TICKS: u32 = 3_000;

/// Lifecycle of one layout instance: the simulation runs until the node
/// positions stop moving, then freezes for good. The transition is one-way;
/// a new layout instance is the only way to run physics again.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Phase {
    #[default]
    Simulating,
    Settled,
}

/// Force-directed node placement for one graph instance.
pub struct ForceLayout {
    sim: ForceGraph<NodeId, ()>,
    indices: IndexMap<NodeId, DefaultNodeIdx>,
    positions: IndexMap<NodeId, Pos2>,
    phase: Phase,
    calm_ticks: u32,
    total_ticks: u32,
}

impl ForceLayout {
    pub fn new(graph: &Graph) -> Self {
        let mut sim = ForceGraph::new(SimulationParameters {
            force_charge: 150.0,
            force_spring: 0.05,
            force_max: 100.0,
            node_speed: 700.0,
            damping_factor: 0.92,
        });

        let mut indices = IndexMap::new();
        for (i, node) in graph.nodes().enumerate() {
            let angle = i as f32 * TAU / graph.len().max(1) as f32;
            let idx = sim.add_node(NodeData {
                x: SEED_RADIUS * angle.cos(),
                y: SEED_RADIUS * angle.sin(),
                mass: 10.0,
                is_anchor: false,
                user_data: node.id,
            });
            indices.insert(node.id, idx);
        }

        for edge in graph.edges() {
            if let (Some(&from), Some(&to)) = (indices.get(&edge.from), indices.get(&edge.to)) {
                sim.add_edge(from, to, EdgeData::default());
            }
        }

        let mut layout = ForceLayout {
            sim,
            indices,
            positions: IndexMap::new(),
            phase: Phase::Simulating,
            calm_ticks: 0,
            total_ticks: 0,
        };
        layout.sync_positions();
        layout
    }

    /// Copies positions out of the simulation, returning the mean node
    /// displacement since the previous sync.
    fn sync_positions(&mut self) -> f32 {
        let positions = &mut self.positions;
        let mut moved = 0.0;
        let mut count = 0usize;
        self.sim.visit_nodes(|node| {
            let pos = Pos2::new(node.x(), node.y());
            if let Some(previous) = positions.insert(node.data.user_data, pos) {
                moved += previous.distance(pos);
            }
            count += 1;
        });
        if count == 0 { 0.0 } else { moved / count as f32 }
    }

    /// Advances the simulation by `dt` seconds. Once settled this is a
    /// no-op: physics is never re-enabled.
    pub fn tick(&mut self, dt: f32) {
        if self.phase == Phase::Settled {
            return;
        }

        self.sim.update(dt);
        self.total_ticks += 1;
        let displacement = self.sync_positions();

        if displacement < SETTLE_EPSILON {
            self.calm_ticks += 1;
        } else {
            self.calm_ticks = 0;
        }

        if self.calm_ticks >= SETTLE_TICKS || self.total_ticks >= MAX_TICKS {
            tracing::debug!(ticks = self.total_ticks, "layout settled");
            self.phase = Phase::Settled;
        }
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn is_settled(&self) -> bool {
        matches!(self.phase, Phase::Settled)
    }

    pub fn position(&self, id: NodeId) -> Option<Pos2> {
        self.positions.get(&id).copied()
    }

    pub fn positions(&self) -> impl Iterator<Item = (NodeId, Pos2)> + '_ {
        self.positions.iter().map(|(&id, &pos)| (id, pos))
    }

    /// The topmost node under `pos`, if any. Later nodes draw on top, so
    /// the scan keeps the last hit.
    pub fn node_at(&self, pos: Pos2) -> Option<NodeId> {
        let mut found = None;
        for (&id, &node_pos) in &self.positions {
            if node_pos.distance(pos) <= HIT_RADIUS {
                found = Some(id);
            }
        }
        found
    }

    /// Bounding box of all node positions plus a margin; frames the whole
    /// layout in a viewport.
    pub fn bounds(&self) -> Rect {
        let mut bounds = Rect::NOTHING;
        for &pos in self.positions.values() {
            bounds.extend_with(pos);
        }
        if bounds.is_negative() {
            Rect::from_center_size(Pos2::ZERO, Vec2::splat(2.0 * SEED_RADIUS))
        } else {
            bounds.expand(FRAME_MARGIN)
        }
    }
}

#[cfg(test)]
mod tests {
    use egui::Pos2;
    use tn_core::graph::{Edge, Graph, Node, NodeId};

    use super::{ForceLayout, HIT_RADIUS, Phase, SEED_RADIUS, SETTLE_TICKS};

    fn single_node() -> Graph {
        Graph::from_parts([Node::new(1, "only")], vec![])
    }

    #[test]
    fn settle_is_a_one_way_latch() {
        // A single node feels no force, so every tick is calm.
        let mut layout = ForceLayout::new(&single_node());
        assert_eq!(layout.phase(), Phase::Simulating);

        for _ in 0..SETTLE_TICKS {
            layout.tick(1.0 / 60.0);
        }
        assert_eq!(layout.phase(), Phase::Settled);

        let frozen = layout.position(NodeId(1)).unwrap();
        for _ in 0..10 {
            layout.tick(1.0 / 60.0);
        }
        assert_eq!(layout.phase(), Phase::Settled);
        assert_eq!(layout.position(NodeId(1)).unwrap(), frozen);
    }

    #[test]
    fn empty_graph_settles_without_panicking() {
        let mut layout = ForceLayout::new(&Graph::default());
        for _ in 0..SETTLE_TICKS {
            layout.tick(1.0 / 60.0);
        }
        assert!(layout.is_settled());
        assert_eq!(layout.positions().count(), 0);
    }

    #[test]
    fn hit_testing_resolves_the_seeded_node() {
        let layout = ForceLayout::new(&single_node());
        // One node seeds at angle zero on the seeding circle.
        let seed = Pos2::new(SEED_RADIUS, 0.0);
        assert_eq!(layout.position(NodeId(1)), Some(seed));
        assert_eq!(layout.node_at(seed), Some(NodeId(1)));
        assert_eq!(
            layout.node_at(seed + egui::Vec2::splat(2.0 * HIT_RADIUS)),
            None
        );
    }

    #[test]
    fn edges_between_known_nodes_are_wired() {
        let graph = Graph::from_parts(
            [Node::new(1, "a"), Node::new(2, "b")],
            vec![Edge::new(1, 2), Edge::new(1, 99)],
        );
        // The dangling edge is skipped; building must not panic.
        let layout = ForceLayout::new(&graph);
        assert_eq!(layout.positions().count(), 2);
    }
}
