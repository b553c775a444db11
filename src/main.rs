#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

/// Interactive portfolio page with animated particle backgrounds
#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Content document to show instead of the built-in one
    #[arg(short, long)]
    content: Option<PathBuf>,
    /// Render the hero background to this PNG file and exit
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// Frames to simulate before taking the snapshot
    #[arg(long, default_value_t = 120)]
    frames: u32,
    /// Snapshot width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,
    /// Snapshot height in pixels
    #[arg(long, default_value_t = 720)]
    height: u32,
    /// Seed for reproducible particle fields
    #[arg(long)]
    seed: Option<u64>,
}

#[cfg(not(target_arch = "wasm32"))]
fn write_snapshot(args: &Args, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    use portfolio_showcase::particles::{FieldConfig, ParticleField};

    let size = egui::vec2(args.width as f32, args.height as f32);
    let mut field = ParticleField::new(FieldConfig::hero(), size, args.seed);
    for _ in 0..args.frames {
        field.step(None);
    }
    let png = portfolio_showcase::snapshot::render_png(&field, egui::Color32::from_rgb(10, 10, 18))?;
    std::fs::write(path, png)?;
    log::info!("Wrote {} after {} frames", path.display(), args.frames);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up logging for development
    env_logger::init();

    let args = Args::parse();

    if let Some(path) = &args.snapshot {
        return write_snapshot(&args, path);
    }

    let content = match &args.content {
        Some(path) => portfolio_showcase::content::load_from_path(path)?,
        None => portfolio_showcase::content::builtin(),
    };

    // File dialogs and form submissions are spawned on this runtime
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    portfolio_showcase::run_app(content, args.seed)?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast;
    use portfolio_showcase::PortfolioApp;

    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("the_canvas_id")
            .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            log::error!("Canvas element 'the_canvas_id' not found");
            return;
        };

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| {
                    Ok(Box::new(PortfolioApp::new(
                        cc,
                        portfolio_showcase::content::builtin(),
                        None,
                    )))
                }),
            )
            .await;

        if let Err(e) = start_result {
            log::error!("Failed to start eframe: {e:?}");
        }
    });
}
