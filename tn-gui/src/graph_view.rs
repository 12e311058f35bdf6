use egui::{Rect, Scene, Ui};
use tn_core::graph::{Graph, NodeId};
use tn_graphics::{layout::ForceLayout, render};

const ZOOM_FACTOR: f32 = 1.25;

/// Simulation time step cap; keeps the layout stable across frame hitches.
const MAX_DT: f32 = 0.05;

/// The primary graph: a pannable, zoomable force-directed view of the base
/// network. Reports clicks upward and never mutates selection state.
pub struct GraphView {
    layout: ForceLayout,
    scene_rect: Rect,
    reset_requested: bool,
}

impl GraphView {
    pub fn new(graph: &Graph) -> Self {
        GraphView {
            layout: ForceLayout::new(graph),
            scene_rect: Rect::ZERO,
            reset_requested: true,
        }
    }

    pub fn reset(&mut self) {
        self.reset_requested = true;
    }

    pub fn zoom_in(&mut self) {
        self.scene_rect = self.scene_rect.scale_from_center(ZOOM_FACTOR.recip());
    }

    pub fn zoom_out(&mut self) {
        self.scene_rect = self.scene_rect.scale_from_center(ZOOM_FACTOR);
    }

    /// Renders the graph. Returns `Some(ids)` when the user clicked: the
    /// clicked node as a one-element list, or an empty list for a
    /// background click (deselect).
    pub fn ui(&mut self, ui: &mut Ui, graph: &Graph) -> Option<Vec<NodeId>> {
        if !self.layout.is_settled() {
            let dt = ui.input(|i| i.stable_dt).min(MAX_DT);
            self.layout.tick(dt);
            ui.ctx().request_repaint();
        }

        let layout = &self.layout;
        let mut clicked = None;
        let _ = Scene::new().show(ui, &mut self.scene_rect, |ui| {
            let response = ui.response();
            let hovered = response.hover_pos().and_then(|pos| layout.node_at(pos));
            render::paint(ui, graph, layout, hovered);
            if response.clicked() {
                clicked = Some(hovered.into_iter().collect());
            }
        });

        if self.reset_requested {
            self.scene_rect = self.layout.bounds();
            self.reset_requested = false;
        }

        clicked
    }
}
