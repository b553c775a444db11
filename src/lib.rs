//! # Portfolio Showcase
//!
//! An interactive single-page portfolio for a creative studio. The page is a
//! vertical sequence of sections rendered from one content document:
//! - **Hero**: rotating roles over a pointer-reactive particle field
//! - **About**: skill labels floating as text particles, count-up counters
//! - **Services**: category filter and animated figures over drifting particles
//! - **Case Studies**: searchable, sortable project gallery with a detail window
//! - **Contact** and **Footer**: validated contact form and newsletter signup
//!
//! The particle engine ([`particles`]) and the gallery logic ([`catalog`]) are
//! independent of the UI and can be used headlessly, e.g. to render PNG
//! snapshots on native targets.

#![deny(unsafe_code)]

pub mod animation;
pub mod catalog;
pub mod constants;
pub mod content;
pub mod forms;
pub mod motion;
pub mod particles;
#[cfg(not(target_arch = "wasm32"))]
pub mod snapshot;
pub mod types;
mod ui;

pub use types::*;
pub use ui::{PortfolioApp, Preferences, SectionId};

/// Window title and persistence key of the application.
pub const APP_NAME: &str = "Portfolio Showcase";

/// Runs the portfolio application natively.
///
/// Initializes the egui window and blocks in the main event loop until it is closed.
///
/// # Arguments
///
/// * `content` - The content document to display
/// * `seed` - Fixed seed for the particle fields, `None` for random fields
///
/// # Returns
///
/// `Ok(())` once the window closed, or an `eframe::Error` if initialization fails.
///
/// # Example
///
/// ```no_run
/// fn main() -> Result<(), eframe::Error> {
///     portfolio_showcase::run_app(portfolio_showcase::content::builtin(), None)
/// }
/// ```
#[cfg(not(target_arch = "wasm32"))]
pub fn run_app(content: SiteContent, seed: Option<u64>) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(PortfolioApp::new(cc, content, seed)))),
    )
}
