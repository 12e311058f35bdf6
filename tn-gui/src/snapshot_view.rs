use egui::{Rect, Scene, Ui};
use tn_core::{
    dataset::TimeRange,
    graph::{Emphasis, Graph, NodeId},
};
use tn_graphics::{layout::ForceLayout, render};

use crate::errors::ErrorSink;

const MAX_DT: f32 = 0.05;

/// The historical state of the network at one selected time step, with a
/// date-span heading. Owns its own node/edge stores and its own layout
/// instance, which settles independently of the primary view's.
pub struct SnapshotView {
    graph: Graph,
    layout: Option<ForceLayout>,
    time_range: Option<TimeRange>,
    scene_rect: Rect,
    reset_requested: bool,
}

impl Default for SnapshotView {
    fn default() -> Self {
        SnapshotView {
            graph: Graph::default(),
            layout: None,
            time_range: None,
            scene_rect: Rect::ZERO,
            reset_requested: false,
        }
    }
}

impl SnapshotView {
    /// Replaces the displayed snapshot wholesale: clear, then add — never
    /// merge. A `focused` id that does not resolve in the new snapshot is
    /// reported to `errors`; everything else still applies.
    pub fn update(
        &mut self,
        snapshot: Graph,
        focused: Option<NodeId>,
        time_range: TimeRange,
        errors: &mut ErrorSink,
    ) {
        self.graph.replace_with(snapshot);

        if let Some(id) = focused {
            if !self.graph.set_emphasis(id, Some(Emphasis::Focused)) {
                errors.report(format!("node {id} is not part of this snapshot"));
            }
        }

        // A fresh layout instance: the snapshot re-simulates from scratch
        // and freezes on its own stabilization.
        self.layout = Some(ForceLayout::new(&self.graph));
        self.time_range = Some(time_range);
        self.reset_requested = true;
    }

    pub fn heading(&self) -> String {
        self.time_range
            .as_ref()
            .map_or_else(|| "Snapshot Graph".to_owned(), TimeRange::span_label)
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        ui.heading(self.heading());

        let Some(layout) = &mut self.layout else {
            ui.weak("Click a chart point to load a snapshot.");
            return;
        };

        if !layout.is_settled() {
            let dt = ui.input(|i| i.stable_dt).min(MAX_DT);
            layout.tick(dt);
            ui.ctx().request_repaint();
        }

        let graph = &self.graph;
        let layout = &*layout;
        let _ = Scene::new().show(ui, &mut self.scene_rect, |ui| {
            let hovered = ui.response().hover_pos().and_then(|pos| layout.node_at(pos));
            render::paint(ui, graph, layout, hovered);
        });

        if self.reset_requested {
            self.scene_rect = layout.bounds();
            self.reset_requested = false;
        }
    }

    #[cfg(test)]
    fn graph(&self) -> &Graph {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use tn_core::{
        dataset::TimeRange,
        graph::{Edge, Emphasis, Graph, Node, NodeId},
    };

    use super::SnapshotView;
    use crate::errors::ErrorSink;

    fn snapshot(ids: &[u64]) -> Graph {
        Graph::from_parts(
            ids.iter().map(|&id| Node::new(id, format!("n{id}"))),
            vec![],
        )
    }

    #[test]
    fn update_replaces_the_previous_snapshot_wholesale() {
        let mut view = SnapshotView::default();
        let mut errors = ErrorSink::default();

        view.update(
            Graph::from_parts(
                [Node::new(1, "a"), Node::new(2, "b")],
                vec![Edge::new(1, 2)],
            ),
            None,
            TimeRange::new(0, 86_400),
            &mut errors,
        );
        view.update(snapshot(&[3]), None, TimeRange::new(86_400, 172_800), &mut errors);

        assert_eq!(view.graph().len(), 1);
        assert!(!view.graph().contains(NodeId(1)));
        assert!(view.graph().edges().is_empty());
        assert!(errors.messages().is_empty());
    }

    #[test]
    fn focused_node_gets_the_focus_style() {
        let mut view = SnapshotView::default();
        let mut errors = ErrorSink::default();

        view.update(
            snapshot(&[1, 2]),
            Some(NodeId(2)),
            TimeRange::new(0, 86_400),
            &mut errors,
        );

        assert_eq!(
            view.graph().node(NodeId(2)).unwrap().emphasis,
            Some(Emphasis::Focused)
        );
        assert!(errors.messages().is_empty());
    }

    #[test]
    fn unresolved_focus_is_reported_not_swallowed() {
        let mut view = SnapshotView::default();
        let mut errors = ErrorSink::default();

        view.update(
            snapshot(&[1]),
            Some(NodeId(42)),
            TimeRange::new(0, 86_400),
            &mut errors,
        );

        // The snapshot still replaced; only the focus styling failed.
        assert_eq!(view.graph().len(), 1);
        assert_eq!(errors.messages().len(), 1);
        assert!(errors.messages()[0].contains("42"));
    }

    #[test]
    fn heading_falls_back_until_a_range_is_set() {
        let mut view = SnapshotView::default();
        assert_eq!(view.heading(), "Snapshot Graph");

        let mut errors = ErrorSink::default();
        view.update(
            snapshot(&[1]),
            None,
            TimeRange::new(1_577_836_800, 1_578_441_600),
            &mut errors,
        );
        assert_eq!(view.heading(), "01 Jan 2020 - 08 Jan 2020");

        view.update(
            snapshot(&[1]),
            None,
            TimeRange::new(1_578_441_600, 1_579_046_400),
            &mut errors,
        );
        assert_eq!(view.heading(), "08 Jan 2020 - 15 Jan 2020");
    }
}
