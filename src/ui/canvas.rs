//! Particle backgrounds of the page sections.
//!
//! This module mounts one animation task per visible section, regenerates it when
//! the section's surface changes width and paints the current frame behind the
//! section's content.

use super::state::{PortfolioApp, SectionId};
use crate::particles::{FieldConfig, ParticleField, Surface};
use eframe::egui;

/// Size changes smaller than this (in points) keep the running field.
const RESIZE_TOLERANCE: f32 = 0.5;

/// A [`Surface`] drawing into an egui painter at a screen offset.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Vec2,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a egui::Painter, origin: egui::Pos2) -> Self {
        Self {
            painter,
            origin: origin.to_vec2(),
        }
    }
}

impl Surface for PainterSurface<'_> {
    // egui repaints from scratch every frame.
    fn clear(&mut self) {}

    fn fill_circle(&mut self, center: egui::Pos2, radius: f32, color: egui::Color32) {
        self.painter.circle_filled(center + self.origin, radius, color);
    }

    fn line(&mut self, from: egui::Pos2, to: egui::Pos2, width: f32, color: egui::Color32) {
        self.painter
            .line_segment([from + self.origin, to + self.origin], egui::Stroke::new(width, color));
    }

    fn text(&mut self, anchor: egui::Pos2, size: f32, text: &str, color: egui::Color32) {
        self.painter.text(
            anchor + self.origin,
            egui::Align2::LEFT_BOTTOM,
            text,
            egui::FontId::monospace(size),
            color,
        );
    }
}

fn differs(old: f32, new: f32) -> bool {
    (old - new).abs() > RESIZE_TOLERANCE
}

impl PortfolioApp {
    /// Builds the field a section starts with, `None` for sections without particles.
    fn create_field(&self, section: SectionId, size: egui::Vec2) -> Option<ParticleField> {
        let seed = self.seed;
        match section {
            SectionId::Hero => Some(ParticleField::new(FieldConfig::hero(), size, seed)),
            SectionId::About => Some(ParticleField::with_labels(
                FieldConfig::about(),
                size,
                &self.content.about.skills,
                seed,
            )),
            SectionId::Services => Some(ParticleField::new(FieldConfig::services(), size, seed)),
            SectionId::CaseStudies => Some(ParticleField::new(FieldConfig::case_studies(), size, seed)),
            SectionId::Contact | SectionId::Footer => None,
        }
    }

    /// Keeps the section's background animation mounted on `rect` and paints its current frame.
    ///
    /// Starts the task on first call and restarts it under a new handle when the width
    /// of `rect` changed. A height change (the section's content grew or shrank) only
    /// resizes the running field, so filtering the gallery does not reshuffle it.
    ///
    /// # Arguments
    ///
    /// * `ui` - The ui whose painter receives the frame
    /// * `section` - The section owning the background
    /// * `rect` - Screen rectangle of the section
    pub fn paint_section_background(&mut self, ui: &egui::Ui, section: SectionId, rect: egui::Rect) {
        let size = rect.size();
        let state = self.sections.entry(section).or_default();
        let current = state.handle.zip(state.surface_size);

        let handle = match current {
            Some((handle, old_size)) if !differs(old_size.x, size.x) => {
                if differs(old_size.y, size.y) {
                    self.scheduler.resize_in_place(handle, size);
                }
                self.scheduler.set_origin(handle, rect.min);
                Some(handle)
            }
            Some((handle, _)) => self.scheduler.restart_resized(handle, size),
            None => {
                let field = self.create_field(section, size);
                field.map(|field| self.scheduler.start(field, self.pointer.clone(), rect.min))
            }
        };

        let state = self.sections.entry(section).or_default();
        state.handle = handle;
        state.surface_size = handle.map(|_| size);

        if let Some(field) = handle.and_then(|h| self.scheduler.field(h)) {
            let painter = ui.painter_at(rect);
            field.render(&mut PainterSurface::new(&painter, rect.min));
        }
    }

    /// Stops the animations of hidden sections.
    pub fn teardown_hidden_sections(&mut self) {
        let hidden: Vec<SectionId> = SectionId::ALL
            .into_iter()
            .filter(|section| !self.is_visible(*section))
            .collect();
        for section in hidden {
            self.teardown_section(section);
        }
    }
}
