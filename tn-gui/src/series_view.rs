use egui::{Color32, Pos2, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use indexmap::IndexMap;
use tn_core::{centrality::Metric, graph::NodeId};

/// Pointer distance (in screen points) within which a marker is hit.
const SNAP_DISTANCE: f32 = 12.0;

const LINE_WIDTH: f32 = 2.0;
const MARKER_RADIUS: f32 = 3.0;

/// A clicked chart point in plot coordinates. `x.floor()` is the
/// authoritative snapshot index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointClick {
    pub x: f64,
    pub y: f64,
}

/// One selected node's plotted data: a label and one score sequence per
/// metric, indexed by [`Metric::index`].
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesEntry {
    pub label: String,
    pub scores: [Vec<f64>; 3],
}

/// The series currently plotted, shaped by the controller from the
/// selection. Views receive it by reference and never mutate it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesSet {
    entries: IndexMap<NodeId, SeriesEntry>,
}

impl SeriesSet {
    pub fn insert(&mut self, id: NodeId, label: impl Into<String>, scores: [Vec<f64>; 3]) {
        self.entries.insert(
            id,
            SeriesEntry {
                label: label.into(),
                scores,
            },
        );
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SeriesEntry)> {
        self.entries.iter().map(|(&id, entry)| (id, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of line series a chart of this set renders: one per
    /// (metric, node) pair.
    pub fn series_count(&self) -> usize {
        Metric::ALL.len() * self.entries.len()
    }
}

const fn metric_color(metric: Metric) -> Color32 {
    match metric {
        Metric::Betweenness => Color32::BLUE,
        Metric::Closeness => Color32::RED,
        Metric::Eigenvector => Color32::YELLOW,
    }
}

struct MarkerHit {
    label: String,
    index: usize,
    score: f64,
}

/// Multi-series centrality chart with per-metric visibility toggles.
///
/// Toggling a metric only flips a view flag; the underlying [`SeriesSet`]
/// is untouched, so re-enabling reproduces the identical series.
pub struct SeriesView {
    visible: [bool; 3],
    hovered: Option<String>,
}

impl Default for SeriesView {
    fn default() -> Self {
        SeriesView {
            visible: [true; 3],
            hovered: None,
        }
    }
}

impl SeriesView {
    /// Renders the chart; returns the clicked point, if any.
    pub fn ui(&mut self, ui: &mut Ui, series: &SeriesSet) -> Option<PointClick> {
        ui.horizontal(|ui| {
            ui.heading("Centrality scores");
            ui.separator();
            for metric in Metric::ALL {
                ui.checkbox(&mut self.visible[metric.index()], metric.short_label());
            }
            if let Some(label) = &self.hovered {
                ui.separator();
                ui.label(label.clone());
            }
        });

        let visible = self.visible;
        let height = ui.available_height().max(120.0);
        let inner = Plot::new("centrality")
            .legend(Legend::default())
            .allow_scroll(false)
            .height(height)
            .show(ui, |plot_ui| {
                for (_, entry) in series.iter() {
                    for metric in Metric::ALL {
                        if !visible[metric.index()] {
                            continue;
                        }
                        let points: Vec<[f64; 2]> = entry.scores[metric.index()]
                            .iter()
                            .enumerate()
                            .map(|(i, &score)| [i as f64, score])
                            .collect();
                        let name = format!("{} ({})", metric.label(), entry.label);
                        plot_ui.line(
                            Line::new(name.clone(), PlotPoints::from(points.clone()))
                                .color(metric_color(metric))
                                .width(LINE_WIDTH),
                        );
                        plot_ui.points(
                            Points::new(name, PlotPoints::from(points))
                                .color(metric_color(metric))
                                .radius(MARKER_RADIUS),
                        );
                    }
                }

                let pointer = plot_ui.response().hover_pos();
                let hit = pointer.and_then(|pos| {
                    nearest_marker(series, &visible, pos, |x, y| {
                        plot_ui.screen_from_plot(egui_plot::PlotPoint::new(x, y))
                    })
                });
                let hovered = hit.as_ref().map(|hit| hit.label.clone());

                let clicked = if plot_ui.response().clicked() {
                    match (&hit, plot_ui.pointer_coordinate()) {
                        (Some(hit), _) => Some(PointClick {
                            x: hit.index as f64,
                            y: hit.score,
                        }),
                        (None, Some(coord)) => Some(PointClick {
                            x: coord.x,
                            y: coord.y,
                        }),
                        (None, None) => None,
                    }
                } else {
                    None
                };

                (hovered, clicked)
            })
            .inner;

        self.hovered = inner.0;
        inner.1
    }
}

/// The marker closest to `pointer` (screen coordinates) within the snap
/// distance, across all visible series. `screen_of` maps plot coordinates
/// to screen coordinates.
fn nearest_marker(
    series: &SeriesSet,
    visible: &[bool; 3],
    pointer: Pos2,
    screen_of: impl Fn(f64, f64) -> Pos2,
) -> Option<MarkerHit> {
    let mut best: Option<(f32, MarkerHit)> = None;
    for (_, entry) in series.iter() {
        for metric in Metric::ALL {
            if !visible[metric.index()] {
                continue;
            }
            for (index, &score) in entry.scores[metric.index()].iter().enumerate() {
                let screen = screen_of(index as f64, score);
                let distance = screen.distance(pointer);
                if distance <= SNAP_DISTANCE
                    && best.as_ref().is_none_or(|(nearest, _)| distance < *nearest)
                {
                    best = Some((
                        distance,
                        MarkerHit {
                            label: entry.label.clone(),
                            index,
                            score,
                        },
                    ));
                }
            }
        }
    }
    best.map(|(_, hit)| hit)
}
