use std::sync::Arc;

use eframe::egui;
use egui_notify::Toasts;
use tn_core::{
    centrality::{CentralityScores, Metric},
    dataset::{Dataset, TimeRange},
    graph::{Emphasis, Graph, NodeId},
    selection::Selection,
    snapshot::SnapshotSource,
};
use tracing::debug;

use crate::{
    errors::ErrorSink,
    graph_view::GraphView,
    series_view::{PointClick, SeriesSet, SeriesView},
    snapshot_loader::{SnapshotLoader, SnapshotPromise},
    snapshot_view::SnapshotView,
};

/// One in-flight snapshot request. A newer click replaces the slot, so a
/// stale resolution can never reach the snapshot view.
struct PendingSnapshot {
    seq: u64,
    index: usize,
    promise: SnapshotPromise,
}

/// Root controller: the single source of truth for selection and for the
/// data each view renders. Views report intent back through return values
/// and are driven through explicit update calls, never by reaching into
/// each other.
pub struct App {
    name: String,
    graph: Graph,
    scores: CentralityScores,
    ranges: Vec<TimeRange>,
    selection: Selection,
    series: SeriesSet,
    graph_view: GraphView,
    series_view: SeriesView,
    snapshot_view: SnapshotView,
    loader: SnapshotLoader,
    pending: Option<PendingSnapshot>,
    next_seq: u64,
    errors: ErrorSink,
    toasts: Toasts,
}

impl App {
    #[must_use]
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        dataset: Dataset,
        source: Arc<dyn SnapshotSource>,
    ) -> Self {
        let Dataset {
            name,
            graph,
            scores,
            ranges,
        } = dataset;
        let graph_view = GraphView::new(&graph);

        App {
            name,
            graph,
            scores,
            ranges,
            selection: Selection::default(),
            series: SeriesSet::default(),
            graph_view,
            series_view: SeriesView::default(),
            snapshot_view: SnapshotView::default(),
            loader: SnapshotLoader::new(source),
            pending: None,
            next_seq: 0,
            errors: ErrorSink::default(),
            toasts: Toasts::default(),
        }
    }

    /// Applies a selection report from the primary graph: emphasis moves to
    /// the nodes entering the selection, leaves the ones going out, and the
    /// plotted series are reshaped from scratch.
    fn select_nodes(&mut self, ids: Vec<NodeId>) {
        debug!(?ids, "selection changed");
        let diff = self.selection.replace(ids);
        for id in diff.removed {
            self.graph.set_emphasis(id, None);
        }
        for id in diff.added {
            if !self.graph.set_emphasis(id, Some(Emphasis::Highlighted)) {
                self.errors.report(format!("node {id} is not part of the graph"));
            }
        }
        self.series = shape_series(&self.selection, &self.graph, &self.scores, &mut self.errors);
    }

    fn point_clicked(&mut self, click: PointClick) {
        let Some(index) = snapshot_index(click.x) else {
            return;
        };
        let seq = self.next_seq;
        self.next_seq += 1;
        debug!(x = click.x, index, seq, "series point clicked");
        let promise = self.loader.fetch(index);
        self.pending = Some(PendingSnapshot { seq, index, promise });
    }

    /// Checks the in-flight snapshot request; on success forwards the
    /// snapshot to its view, on failure reports and leaves the previously
    /// displayed snapshot untouched.
    fn poll_pending(&mut self) {
        let Some(pending) = &self.pending else {
            return;
        };
        let result = {
            let guard = pending.promise.lock().unwrap();
            match guard.ready() {
                Some(result) => result.clone(),
                None => return,
            }
        };
        let Some(pending) = self.pending.take() else {
            return;
        };

        match result {
            Ok(snapshot) => {
                debug!(seq = pending.seq, index = pending.index, "applying snapshot");
                match self.ranges.get(pending.index).copied() {
                    Some(range) => self.snapshot_view.update(
                        snapshot,
                        self.selection.focused(),
                        range,
                        &mut self.errors,
                    ),
                    None => self
                        .errors
                        .report(format!("no time range for snapshot {}", pending.index)),
                }
            }
            Err(err) => self.errors.report(err.to_string()),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_pending();
        if self.pending.is_some() {
            // Keep polling until the in-flight snapshot resolves.
            ctx.request_repaint();
        }

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.visuals_mut().button_frame = false;
                egui::widgets::global_theme_preference_buttons(ui);

                ui.separator();

                if ui.button("Reset").clicked() {
                    self.graph_view.reset();
                }
                if ui.button("Zoom In").clicked() {
                    self.graph_view.zoom_in();
                }
                if ui.button("Zoom Out").clicked() {
                    self.graph_view.zoom_out();
                }

                ui.separator();

                ui.label(format!("Graph: {}", self.name));
            });
        });

        egui::TopBottomPanel::bottom("analysis")
            .resizable(true)
            .default_height(300.0)
            .show(ctx, |ui| {
                ui.columns(2, |columns| {
                    if self.selection.is_empty() {
                        columns[0].weak("Click a node to plot its centrality scores.");
                    } else if let Some(click) = self.series_view.ui(&mut columns[0], &self.series)
                    {
                        self.point_clicked(click);
                    }
                    self.snapshot_view.ui(&mut columns[1]);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(ids) = self.graph_view.ui(ui, &self.graph) {
                self.select_nodes(ids);
            }
        });

        for message in self.errors.drain() {
            self.toasts.error(message);
        }
        self.toasts.show(ctx);
    }
}

/// Maps a clicked chart x-coordinate to the snapshot directory index:
/// rounded down, with clicks left of the axis ignored.
pub(crate) fn snapshot_index(x: f64) -> Option<usize> {
    if x < 0.0 { None } else { Some(x.floor() as usize) }
}

/// Shapes the plotted series from the current selection: three equal-length
/// sequences per selected node. Nodes without scores are reported and
/// skipped.
pub(crate) fn shape_series(
    selection: &Selection,
    graph: &Graph,
    scores: &CentralityScores,
    errors: &mut ErrorSink,
) -> SeriesSet {
    let mut series = SeriesSet::default();
    for id in selection.iter() {
        let mut per_metric: [Vec<f64>; 3] = Default::default();
        let mut complete = true;
        for metric in Metric::ALL {
            match scores.node_series(metric, id) {
                Some(sequence) => per_metric[metric.index()] = sequence.to_vec(),
                None => {
                    errors.report(format!(
                        "no {metric} scores for node {}",
                        graph.display_label(id)
                    ));
                    complete = false;
                    break;
                }
            }
        }
        if complete {
            series.insert(id, graph.display_label(id), per_metric);
        }
    }
    series
}
