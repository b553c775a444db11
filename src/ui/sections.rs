//! Page sections other than the gallery.
//!
//! Every section is laid out inside a rect that keeps last frame's content height,
//! so the particle background can be painted first and the content on top of it.

use super::state::{PortfolioApp, SectionId};
use crate::catalog::{filter_services, ALL_CATEGORIES};
use crate::constants;
use crate::motion::{count_up, role_index};
use crate::types::FieldKind;
use eframe::egui;
use egui::text::LayoutJob;

const SUCCESS_COLOR: egui::Color32 = egui::Color32::from_rgb(80, 200, 120);

/// Builds a paragraph in which every occurrence of an emphasis phrase is highlighted.
///
/// Earlier matches win; overlapping phrases are not highlighted twice.
pub(super) fn emphasized(text: &str, phrases: &[String], visuals: &egui::Visuals) -> LayoutJob {
    let base = egui::TextFormat {
        color: visuals.text_color(),
        ..Default::default()
    };
    let strong = egui::TextFormat {
        color: visuals.strong_text_color(),
        italics: true,
        ..Default::default()
    };

    let mut job = LayoutJob::default();
    let mut rest = text;
    loop {
        let next = phrases
            .iter()
            .filter(|phrase| !phrase.is_empty())
            .filter_map(|phrase| rest.find(phrase.as_str()).map(|start| (start, phrase.len())))
            .min_by_key(|(start, _)| *start);
        match next {
            Some((start, len)) => {
                if start > 0 {
                    job.append(&rest[..start], 0.0, base.clone());
                }
                job.append(&rest[start..start + len], 0.0, strong.clone());
                rest = &rest[start + len..];
            }
            None => {
                if !rest.is_empty() {
                    job.append(rest, 0.0, base);
                }
                break;
            }
        }
    }
    job
}

fn counter(ui: &mut egui::Ui, value: u32, label: &str) {
    ui.vertical(|ui| {
        ui.label(egui::RichText::new(value.to_string()).size(36.0).strong());
        ui.label(egui::RichText::new(label).small().weak());
    });
}

fn section_heading(ui: &mut egui::Ui, title: &str) {
    ui.label(egui::RichText::new(title).size(32.0).strong());
    ui.add_space(12.0);
}

impl PortfolioApp {
    /// Seconds since the section was revealed, 0 while it has not been seen.
    pub(super) fn reveal_elapsed(&self, section: SectionId, now: f64) -> f64 {
        self.sections
            .get(&section)
            .map_or(0.0, |state| state.reveal.elapsed(now))
    }

    /// Lays out one section: background, reveal fade and content.
    ///
    /// # Arguments
    ///
    /// * `ui` - The scroll area's ui
    /// * `section` - Which section to draw
    /// * `now` - Current UI time in seconds
    pub(super) fn draw_section(&mut self, ui: &mut egui::Ui, section: SectionId, now: f64) {
        let min_height = match section {
            SectionId::Hero => constants::HERO_HEIGHT,
            s if s.has_particles() => constants::SECTION_MIN_HEIGHT,
            _ => 0.0,
        };
        let previous_height = self
            .sections
            .get(&section)
            .map_or(0.0, |state| state.content_height);
        let rect = egui::Rect::from_min_size(
            ui.cursor().min,
            egui::vec2(ui.available_width(), previous_height.max(min_height)),
        );

        if section.has_particles() {
            self.paint_section_background(ui, section, rect);
        }

        if self.scroll_target == Some(section) {
            ui.scroll_to_rect(rect, Some(egui::Align::TOP));
            self.scroll_target = None;
        }

        // Reveal once the section first enters the viewport
        let in_view = ui.is_rect_visible(rect);
        let state = self.sections.entry(section).or_default();
        if in_view {
            state.reveal.trigger(now);
        }
        let opacity = state.reveal.progress(now, constants::REVEAL_DURATION_SECS);

        let response = ui
            .scope_builder(egui::UiBuilder::new().max_rect(rect), |ui| {
                ui.set_min_height(min_height);
                ui.multiply_opacity(opacity);
                egui::Frame::new()
                    .inner_margin(egui::Margin::symmetric(32, 24))
                    .show(ui, |ui| match section {
                        SectionId::Hero => self.draw_hero(ui, now),
                        SectionId::About => self.draw_about(ui, now),
                        SectionId::Services => self.draw_services(ui, now),
                        SectionId::CaseStudies => self.draw_case_studies(ui),
                        SectionId::Contact => self.draw_contact(ui),
                        SectionId::Footer => self.draw_footer(ui),
                    });
            })
            .response;

        self.sections.entry(section).or_default().content_height = response.rect.height();
    }

    fn draw_hero(&mut self, ui: &mut egui::Ui, now: f64) {
        let elapsed = self.page_time(now);
        let hero = &self.content.hero;
        let accent = ui.visuals().hyperlink_color;

        ui.add_space(48.0);
        ui.label(egui::RichText::new(&hero.subtitle).monospace().weak());
        ui.label(egui::RichText::new(&hero.title).size(48.0).strong());

        // Rotating role line
        if let Some(index) = role_index(elapsed, constants::ROLE_ROTATION_PERIOD, hero.roles.len()) {
            ui.label(egui::RichText::new(&hero.roles[index]).size(24.0).color(accent));
        }

        ui.add_space(12.0);
        ui.add(egui::Label::new(hero.introduction.as_str()).wrap());
        ui.add_space(24.0);

        if !hero.cta_text.is_empty()
            && ui
                .button(egui::RichText::new(&hero.cta_text).size(18.0))
                .clicked()
        {
            self.scroll_target = Some(SectionId::Contact);
        }
    }

    fn draw_about(&mut self, ui: &mut egui::Ui, now: f64) {
        let elapsed = self.reveal_elapsed(SectionId::About, now);
        let about = &self.content.about;
        let accent = ui.visuals().hyperlink_color;

        section_heading(ui, &about.title);
        for paragraph in &about.paragraphs {
            let mut job = emphasized(paragraph, &about.emphasis_phrases, ui.visuals());
            job.wrap.max_width = ui.available_width();
            ui.label(job);
        }

        ui.add_space(16.0);
        ui.horizontal(|ui| {
            counter(
                ui,
                count_up(about.experience.years, elapsed, constants::COUNTER_DURATION_SECS),
                "Years Experience",
            );
            ui.add_space(32.0);
            counter(
                ui,
                count_up(about.experience.projects, elapsed, constants::COUNTER_DURATION_SECS),
                "Projects Completed",
            );
        });

        // Skill tabs
        if !about.skills_by_category.is_empty() {
            ui.add_space(16.0);
            ui.horizontal_wrapped(|ui| {
                for category in &about.skills_by_category {
                    let active = self.skill_category.as_deref() == Some(category.name.as_str());
                    if ui.selectable_label(active, category.name.as_str()).clicked() {
                        self.skill_category = Some(category.name.clone());
                    }
                }
            });
            let skills = self
                .skill_category
                .as_ref()
                .and_then(|category| about.skills_in(category));
            for skill in skills.into_iter().flatten() {
                ui.horizontal(|ui| {
                    ui.label(skill.name.as_str());
                    if let Some(level) = skill.level {
                        ui.add(
                            egui::ProgressBar::new(f32::from(level.min(100)) / 100.0)
                                .desired_width(200.0)
                                .show_percentage(),
                        );
                    }
                });
            }
        }

        // Journey timeline
        if !about.journey.is_empty() {
            ui.add_space(16.0);
            for item in &about.journey {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&item.year).monospace().color(accent));
                    ui.vertical(|ui| {
                        ui.strong(item.title.as_str());
                        ui.label(item.description.as_str());
                    });
                });
            }
        }
    }

    fn draw_services(&mut self, ui: &mut egui::Ui, now: f64) {
        let elapsed = self.reveal_elapsed(SectionId::Services, now);
        let services = &self.content.services;

        section_heading(ui, &services.title);
        ui.label(services.description.as_str());
        ui.add_space(12.0);

        ui.horizontal_wrapped(|ui| {
            if ui
                .selectable_label(self.services_category == ALL_CATEGORIES, "All")
                .clicked()
            {
                self.services_category = ALL_CATEGORIES.to_string();
            }
            for category in &services.categories {
                let active = self.services_category.eq_ignore_ascii_case(category);
                if ui.selectable_label(active, category.as_str()).clicked() {
                    self.services_category = category.clone();
                }
            }
        });
        ui.add_space(12.0);

        let visible = filter_services(&services.services, &self.services_category);
        ui.horizontal_wrapped(|ui| {
            for service in visible {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(constants::PROJECT_CARD_WIDTH);
                    ui.strong(service.title.as_str());
                    ui.label(egui::RichText::new(&service.category).small().weak());
                    ui.label(
                        service
                            .description
                            .as_deref()
                            .unwrap_or(constants::SERVICE_DESCRIPTION_FALLBACK),
                    );
                    for feature in &service.features {
                        ui.label(format!("• {feature}"));
                    }
                });
            }
        });

        ui.add_space(24.0);
        ui.horizontal(|ui| {
            for item in &services.counters {
                counter(
                    ui,
                    count_up(item.target, elapsed, constants::COUNTER_DURATION_SECS),
                    &item.label,
                );
                ui.add_space(32.0);
            }
        });
    }

    fn draw_contact(&mut self, ui: &mut egui::Ui) {
        let contact = &self.content.contact;
        let error_color = ui.visuals().error_fg_color;

        section_heading(ui, &contact.title);
        ui.label(contact.subtitle.as_str());
        ui.add_space(8.0);
        if !contact.email.is_empty() {
            ui.hyperlink_to(contact.email.as_str(), format!("mailto:{}", contact.email));
        }
        ui.horizontal_wrapped(|ui| {
            for social in &contact.socials {
                ui.hyperlink_to(social.name.as_str(), social.url.as_str());
            }
        });
        ui.add_space(16.0);

        // Form fields come from content
        let fields = self.contact.fields().to_vec();
        for field in &fields {
            let label = if field.required {
                format!("{} *", field.label)
            } else {
                field.label.clone()
            };
            ui.label(label);

            let buffer = self.contact.value_mut(&field.id);
            let edit = match field.kind {
                FieldKind::Textarea => egui::TextEdit::multiline(buffer).desired_rows(4),
                FieldKind::Text | FieldKind::Email => egui::TextEdit::singleline(buffer),
            };
            let response = ui.add(
                edit.hint_text(field.placeholder.as_str())
                    .desired_width(420.0),
            );
            if response.changed() {
                self.contact.edited(&field.id);
            }
            if let Some(error) = self.contact.field_error(&field.id) {
                ui.colored_label(error_color, error.to_string());
            }
            ui.add_space(4.0);
        }

        let submitting = self.contact.is_submitting();
        ui.horizontal(|ui| {
            let text = if submitting {
                "Sending..."
            } else if contact.submit_text.is_empty() {
                "Send Message"
            } else {
                contact.submit_text.as_str()
            };
            if ui.add_enabled(!submitting, egui::Button::new(text)).clicked() {
                if let Err(e) = self.contact.submit(self.submission_handler.as_ref()) {
                    log::debug!("Contact form not sent: {}", e);
                }
            }
            if submitting {
                ui.spinner();
            }
        });

        if let Some(error) = self.contact.submit_error() {
            ui.colored_label(error_color, error.to_string());
        }
        if self.contact.succeeded() {
            let message = contact
                .success_message
                .as_deref()
                .unwrap_or(constants::CONTACT_SUCCESS_FALLBACK);
            ui.colored_label(SUCCESS_COLOR, message);
        }
    }

    fn draw_footer(&mut self, ui: &mut egui::Ui) {
        let footer = &self.content.footer;
        let company = &footer.company;
        let error_color = ui.visuals().error_fg_color;

        ui.separator();
        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_max_width(280.0);
                ui.label(egui::RichText::new(&company.name).size(20.0).strong());
                ui.label(company.description.as_str());
                if !company.address.is_empty() {
                    ui.label(company.address.as_str());
                }
                if !company.email.is_empty() {
                    ui.hyperlink_to(company.email.as_str(), format!("mailto:{}", company.email));
                }
                if !company.phone.is_empty() {
                    ui.label(company.phone.as_str());
                }
            });

            for group in &footer.navigation_groups {
                ui.add_space(24.0);
                ui.vertical(|ui| {
                    ui.strong(group.title.as_str());
                    for link in &group.links {
                        ui.hyperlink_to(link.label.as_str(), link.href.as_str());
                    }
                });
            }

            // Newsletter signup
            ui.add_space(24.0);
            ui.vertical(|ui| {
                let copy = &footer.newsletter;
                ui.strong(copy.title.as_str());
                ui.label(copy.description.as_str());
                if self.newsletter.is_subscribed() {
                    ui.colored_label(SUCCESS_COLOR, copy.success_message.as_str());
                    ui.label(copy.success_description.as_str());
                    return;
                }
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.newsletter.email)
                            .hint_text("you@example.com")
                            .desired_width(180.0),
                    );
                    if response.changed() {
                        self.newsletter.edited();
                    }
                    let submitting = self.newsletter.is_submitting();
                    let pressed_enter =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    let button_text = if copy.button_text.is_empty() {
                        "Subscribe"
                    } else {
                        copy.button_text.as_str()
                    };
                    let clicked = ui
                        .add_enabled(!submitting, egui::Button::new(button_text))
                        .clicked();
                    if (clicked || pressed_enter) && !submitting {
                        if let Err(e) = self.newsletter.submit(self.submission_handler.as_ref()) {
                            log::debug!("Newsletter signup not sent: {}", e);
                        }
                    }
                });
                if let Some(error) = self.newsletter.error() {
                    ui.colored_label(error_color, error.to_string());
                }
            });
        });

        ui.add_space(16.0);
        ui.horizontal_wrapped(|ui| {
            for stat in &footer.stats {
                ui.label(egui::RichText::new(&stat.value).strong());
                ui.label(egui::RichText::new(&stat.label).weak());
                ui.add_space(16.0);
            }
        });
        ui.horizontal_wrapped(|ui| {
            for social in &footer.social {
                ui.hyperlink_to(social.name.as_str(), social.url.as_str());
            }
        });

        ui.separator();
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new(format!("© {}. All rights reserved.", company.name)).small());
            for link in &footer.legal_links {
                ui.hyperlink_to(egui::RichText::new(&link.label).small(), link.href.as_str());
            }
        });
    }
}
