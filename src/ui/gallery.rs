//! Case-study gallery: category tabs with counts, search, sorting, the project
//! grid and the project detail window.

use super::state::PortfolioApp;
use crate::catalog::{apply_filters, category_counts, SortOrder, ALL_CATEGORIES};
use crate::constants;
use crate::types::ProjectRecord;
use eframe::egui;

impl PortfolioApp {
    /// Projects currently shown in the gallery, in display order.
    pub fn visible_projects(&self) -> Vec<&ProjectRecord> {
        apply_filters(&self.content.case_studies.projects, &self.gallery.filter)
    }

    /// Opens the detail window for `id`.
    pub fn open_project(&mut self, id: &str) {
        self.gallery.selected_project = Some(id.to_string());
    }

    pub fn close_project(&mut self) {
        self.gallery.selected_project = None;
    }

    pub(super) fn draw_case_studies(&mut self, ui: &mut egui::Ui) {
        let case_studies = &self.content.case_studies;
        let counts = category_counts(&case_studies.projects, &case_studies.categories);
        let filter = &mut self.gallery.filter;

        ui.label(egui::RichText::new(&case_studies.title).size(32.0).strong());
        ui.add_space(12.0);

        // Category tabs with record counts
        ui.horizontal_wrapped(|ui| {
            let total = counts.get(ALL_CATEGORIES).copied().unwrap_or(0);
            if ui
                .selectable_label(filter.active_category == ALL_CATEGORIES, format!("All ({total})"))
                .clicked()
            {
                filter.active_category = ALL_CATEGORIES.to_string();
            }
            for category in &case_studies.categories {
                let count = counts.get(&category.to_lowercase()).copied().unwrap_or(0);
                let active = filter.active_category.eq_ignore_ascii_case(category);
                if ui
                    .selectable_label(active, format!("{category} ({count})"))
                    .clicked()
                {
                    filter.active_category = category.clone();
                }
            }
        });

        // Search and sort
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut filter.search_query)
                    .hint_text("Search by title, client or location")
                    .desired_width(280.0),
            );
            egui::ComboBox::from_id_salt("gallery_sort_order")
                .selected_text(filter.sort_order.label())
                .show_ui(ui, |ui| {
                    for order in SortOrder::ALL {
                        ui.selectable_value(&mut filter.sort_order, order, order.label());
                    }
                });
        });
        ui.add_space(12.0);

        let view = apply_filters(&case_studies.projects, filter);
        if view.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.label(egui::RichText::new(constants::NO_PROJECTS_TITLE).size(20.0).strong());
                ui.label(egui::RichText::new(constants::NO_PROJECTS_HINT).weak());
                if ui.button("Reset Filters").clicked() {
                    filter.reset();
                }
            });
            return;
        }

        let mut clicked = None;
        ui.horizontal_wrapped(|ui| {
            for project in view {
                if project_card(ui, project).clicked() {
                    clicked = Some(project.id.clone());
                }
            }
        });
        if clicked.is_some() {
            self.gallery.selected_project = clicked;
        }
    }

    /// Shows the detail window of the selected project, if any.
    ///
    /// A selection that no longer matches a record is dropped.
    pub(super) fn draw_project_modal(&mut self, ctx: &egui::Context) {
        let Some(selected) = self.gallery.selected_project.as_deref() else {
            return;
        };
        let Some(project) = self
            .content
            .case_studies
            .projects
            .iter()
            .find(|p| p.id == selected)
        else {
            self.gallery.selected_project = None;
            return;
        };

        let mut open = true;
        let mut close_clicked = false;
        egui::Window::new(project.title.as_str())
            .id(egui::Id::new("project_modal"))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.set_max_width(480.0);
                ui.label(egui::RichText::new(&project.category).small().weak());

                egui::Grid::new("project_facts").num_columns(2).show(ui, |ui| {
                    for (label, value) in [
                        ("Client", &project.client),
                        ("Location", &project.location),
                        ("Budget", &project.budget),
                        ("Duration", &project.duration),
                    ] {
                        ui.label(egui::RichText::new(label).weak());
                        ui.label(value.as_str());
                        ui.end_row();
                    }
                });

                ui.separator();
                ui.strong("Project Overview");
                ui.add(egui::Label::new(project.description_or_fallback()).wrap());

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if let Some(url) = &project.detail_url {
                        ui.hyperlink_to("See Full Case Study", url.as_str());
                    }
                    if ui.button("Close").clicked() {
                        close_clicked = true;
                    }
                });
            });

        if !open || close_clicked {
            self.gallery.selected_project = None;
        }
    }
}

fn project_card(ui: &mut egui::Ui, project: &ProjectRecord) -> egui::Response {
    egui::Frame::group(ui.style())
        .show(ui, |ui| {
            ui.set_width(constants::PROJECT_CARD_WIDTH);
            ui.label(egui::RichText::new(&project.category).small().weak());
            ui.strong(project.title.as_str());
            ui.label(format!("{} · {}", project.client, project.location));
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&project.budget).monospace());
                ui.label(egui::RichText::new(&project.duration).monospace());
            });
        })
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
}
