use egui::{Align2, Color32, FontId, Stroke, Ui};
use tn_core::graph::{Emphasis, Graph, Node, NodeId};

use crate::layout::ForceLayout;

pub const NODE_RADIUS: f32 = 8.0;

/// Default node fill.
pub const DEFAULT_FILL: Color32 = Color32::from_rgb(0x97, 0xc2, 0xfc);
/// Fill for nodes in the current selection.
pub const HIGHLIGHT_FILL: Color32 = Color32::from_rgb(0x84, 0x84, 0x84);
/// Fill for the hovered node.
pub const HOVER_FILL: Color32 = Color32::from_rgb(0xd3, 0xd2, 0xcd);
/// Fill for the focused node of a snapshot.
pub const FOCUS_FILL: Color32 = Color32::from_rgb(0xdd, 0xdd, 0x33);

const EDGE_COLOR: Color32 = Color32::from_gray(0x9a);
const STROKE_WIDTH: f32 = 1.0;
const LABEL_SIZE: f32 = 11.0;

/// Fill colour for a node given its override and hover state. Hover wins
/// over the stored override.
pub fn node_fill(node: &Node, hovered: bool) -> Color32 {
    if hovered {
        return HOVER_FILL;
    }
    match node.emphasis {
        Some(Emphasis::Highlighted) => HIGHLIGHT_FILL,
        Some(Emphasis::Focused) => FOCUS_FILL,
        None => DEFAULT_FILL,
    }
}

/// Paints edges, nodes and labels at the layout's current positions into
/// `ui`'s painter, in layout coordinates.
pub fn paint(ui: &Ui, graph: &Graph, layout: &ForceLayout, hovered: Option<NodeId>) {
    let painter = ui.painter();
    let stroke = Stroke::new(STROKE_WIDTH, EDGE_COLOR);

    for edge in graph.edges() {
        if let (Some(from), Some(to)) = (layout.position(edge.from), layout.position(edge.to)) {
            painter.line_segment([from, to], stroke);
        }
    }

    let outline = Stroke::new(STROKE_WIDTH, ui.visuals().text_color());
    let label_color = ui.visuals().text_color();
    for node in graph.nodes() {
        let Some(pos) = layout.position(node.id) else {
            continue;
        };
        painter.circle(
            pos,
            NODE_RADIUS,
            node_fill(node, hovered == Some(node.id)),
            outline,
        );
        painter.text(
            pos + egui::vec2(0.0, NODE_RADIUS + 2.0),
            Align2::CENTER_TOP,
            node.display_label(),
            FontId::proportional(LABEL_SIZE),
            label_color,
        );
    }
}

#[cfg(test)]
mod tests {
    use tn_core::graph::{Emphasis, Node};

    use super::{DEFAULT_FILL, FOCUS_FILL, HIGHLIGHT_FILL, HOVER_FILL, node_fill};

    #[test]
    fn fill_follows_emphasis() {
        let mut node = Node::new(1, "a");
        assert_eq!(node_fill(&node, false), DEFAULT_FILL);

        node.emphasis = Some(Emphasis::Highlighted);
        assert_eq!(node_fill(&node, false), HIGHLIGHT_FILL);

        node.emphasis = Some(Emphasis::Focused);
        assert_eq!(node_fill(&node, false), FOCUS_FILL);

        node.emphasis = None;
        assert_eq!(node_fill(&node, false), DEFAULT_FILL);
    }

    #[test]
    fn hover_wins_over_emphasis() {
        let mut node = Node::new(1, "a");
        node.emphasis = Some(Emphasis::Highlighted);
        assert_eq!(node_fill(&node, true), HOVER_FILL);
    }
}
