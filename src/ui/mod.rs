//! User interface of the portfolio page.
//!
//! The page is one vertical scroll area with a section per content block. Four
//! sections carry an animated particle background driven by the
//! [`AnimationScheduler`](crate::animation::AnimationScheduler).
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main PortfolioApp
//! - `canvas` - Particle background lifecycle and the painter-backed surface
//! - `sections` - Hero, about, services, contact and footer sections
//! - `gallery` - Filterable case-study gallery and the project modal
//! - `file_ops` - Content loading and snapshot saving for native and WASM

mod canvas;
mod file_ops;
mod gallery;
mod sections;
mod state;

#[cfg(test)]
mod tests;

pub use canvas::PainterSurface;
pub use state::{FileOperationResult, PortfolioApp, Preferences, SectionId};

use eframe::egui;

impl eframe::App for PortfolioApp {
    /// Persist the viewing preferences between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match serde_json::to_string(&self.preferences) {
            Ok(json) => storage.set_string(eframe::APP_KEY, json),
            Err(err) => log::error!("Failed to serialize preferences: {err}"),
        }
    }

    /// Main update function called by egui for each frame.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context
    /// * `_frame` - The eframe frame
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

impl PortfolioApp {
    /// Runs one frame of the page: input, animation step, layout and painting.
    pub fn show(&mut self, ctx: &egui::Context) {
        // Apply theme visuals
        let visuals = if self.preferences.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        // Handle pending file operations and form replies
        self.handle_pending_operations(ctx);
        self.newsletter.poll();
        self.contact.poll();

        // Advance every mounted background with the latest pointer position
        self.pointer.set(ctx.input(|i| i.pointer.hover_pos()));
        self.teardown_hidden_sections();
        self.scheduler.tick();

        egui::TopBottomPanel::top("top_navigation").show(ctx, |ui| {
            self.draw_navigation(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.draw_page(ui);
                });
        });

        self.draw_project_modal(ctx);

        // Backgrounds, rotating roles and counters are time driven
        ctx.request_repaint();
    }

    fn draw_navigation(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let company = &self.content.footer.company;
            let brand = if company.short_name.is_empty() {
                &company.name
            } else {
                &company.short_name
            };
            ui.label(egui::RichText::new(brand).strong());

            ui.separator();

            // Section anchors
            for section in SectionId::ALL {
                if section == SectionId::Footer || !self.is_visible(section) {
                    continue;
                }
                if ui.button(section.title()).clicked() {
                    self.scroll_target = Some(section);
                }
            }

            ui.separator();

            ui.menu_button("Sections", |ui| {
                for section in SectionId::ALL {
                    let mut visible = self.is_visible(section);
                    if ui.checkbox(&mut visible, section.title()).changed() {
                        self.set_section_visible(section, visible);
                    }
                }
            });

            // Content operations
            if ui.button("Load Content").clicked() {
                self.load_content();
            }
            if self.file.content_source.is_some() && ui.button("Built-in Content").clicked() {
                self.restore_builtin_content();
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                if ui.button("Snapshot").clicked() {
                    self.save_snapshot();
                }
            }

            ui.separator();

            ui.checkbox(&mut self.preferences.dark_mode, "Dark mode");

            if let Some(status) = &self.status {
                ui.separator();
                ui.label(egui::RichText::new(status).small().weak());
            }
        });
    }

    /// Draws every visible section in order.
    pub fn draw_page(&mut self, ui: &mut egui::Ui) {
        let now = ui.input(|i| i.time);
        self.started_at.get_or_insert(now);

        for section in SectionId::ALL {
            if self.is_visible(section) {
                self.draw_section(ui, section, now);
            }
        }
    }
}
