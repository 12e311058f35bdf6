#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
struct Args {
    /// Print version of the tool
    #[arg(short, long)]
    version: bool,

    /// Load a dataset directory instead of the bundled demo
    #[arg(long, value_name = "DIR")]
    dataset: Option<PathBuf>,
}

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    // Log to stdout (if you run with `RUST_LOG=debug`).

    use std::sync::Arc;

    use anyhow::{Context, anyhow};
    use tn_core::{dataset::Dataset, snapshot::{DirectorySource, SnapshotSource}};

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    if args.version {
        println!("tn visualiser: {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let (dataset, source) = match &args.dataset {
        Some(dir) => {
            let dataset = Dataset::load(dir)
                .with_context(|| format!("loading dataset from {}", dir.display()))?;
            let source: Arc<dyn SnapshotSource> =
                Arc::new(DirectorySource::open(dir.join("snapshots")));
            (dataset, source)
        }
        None => tn_gui::demo::load()?,
    };

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Temporal Network Visualiser",
        native_options,
        Box::new(move |cc| Ok(Box::new(tn_gui::App::new(cc, dataset, source)))),
    )
    .map_err(|err| anyhow!("{err}"))?;

    Ok(())
}

// When compiling to web:
#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast;

    // Redirect tracing to console.log and friends:
    tracing_wasm::set_as_global_default();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("no global window exists")
            .document()
            .expect("should have a document on window");
        let canvas = document
            .get_element_by_id("the_canvas_id")
            .expect("no canvas element with id 'the_canvas_id'")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("element with id 'the_canvas_id' is not a canvas");

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| {
                    let (dataset, source) =
                        tn_gui::demo::load().expect("bundled demo dataset is valid");
                    Ok(Box::new(tn_gui::App::new(cc, dataset, source)))
                }),
            )
            .await
            .expect("failed to start eframe");
    });
}
