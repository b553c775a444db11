//! Shared application-wide constants.
//! Centralizes tweakable values used across the particle presets, the page sections and the forms.

use std::time::Duration;

// Particle presets
/// Number of particles in the hero background field.
pub const HERO_PARTICLE_COUNT: usize = 100;
/// Number of particles in the services background field.
pub const SERVICES_PARTICLE_COUNT: usize = 80;
/// Number of particles in the case-study gallery background field.
pub const CASE_STUDIES_PARTICLE_COUNT: usize = 50;
/// Pointer distance (in surface pixels) inside which particles are pushed away.
pub const REPULSION_RADIUS: f32 = 150.0;
/// Per-frame impulse applied by the hero field's constant repulsion.
pub const HERO_REPULSION_STRENGTH: f32 = 0.1;
/// Peak per-frame impulse of the about field's linear repulsion.
pub const ABOUT_REPULSION_STRENGTH: f32 = 0.5;
/// Pairwise distance below which two particles are joined by a line.
pub const CONNECTION_THRESHOLD: f32 = 100.0;
/// Line opacity of a pair at distance zero; falls off linearly to the threshold.
pub const CONNECTION_MAX_ALPHA: f32 = 0.05;
/// Stroke width of connective lines (in screen pixels).
pub const CONNECTION_WIDTH: f32 = 0.5;
/// Advance of one glyph of a floating label, relative to its font size.
pub const LABEL_CHAR_WIDTH: f32 = 0.6;

// Page layout
/// Height of the hero section (in points).
pub const HERO_HEIGHT: f32 = 520.0;
/// Minimum height of every other section that carries a particle background.
pub const SECTION_MIN_HEIGHT: f32 = 420.0;
/// Width of a single project card in the gallery grid.
pub const PROJECT_CARD_WIDTH: f32 = 300.0;

// Motion
/// How long the hero waits before showing the next role.
pub const ROLE_ROTATION_PERIOD: Duration = Duration::from_secs(3);
/// Duration of the scroll-triggered reveal fade.
pub const REVEAL_DURATION_SECS: f64 = 0.8;
/// Duration of count-up counters.
pub const COUNTER_DURATION_SECS: f64 = 2.0;

// Forms
/// Simulated latency of the default submission handler.
pub const SUBMISSION_DELAY: Duration = Duration::from_millis(1500);
/// Message shown after a contact form was accepted.
pub const CONTACT_SUCCESS_FALLBACK: &str = "Thanks for your message! I'll get back to you soon.";

// Content fallbacks
/// Used in the project modal when a record carries no description.
pub const PROJECT_DESCRIPTION_FALLBACK: &str = "A comprehensive project showcasing our expertise in delivering high-quality solutions tailored to the client's specific needs. This project demonstrates our ability to balance aesthetics, functionality, and technical excellence.";
/// Empty-state headline of the project gallery.
pub const NO_PROJECTS_TITLE: &str = "No projects found";
/// Empty-state hint of the project gallery.
pub const NO_PROJECTS_HINT: &str = "Try changing your search or category filter";
/// Shown on a service card without a description.
pub const SERVICE_DESCRIPTION_FALLBACK: &str = "Tailored to your project. Get in touch for details.";
