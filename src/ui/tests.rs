use super::*;
use crate::catalog::{SortOrder, ALL_CATEGORIES};
use crate::content;
use crate::forms::{Submission, SubmissionHandler, SubmissionOutcome};
use eframe::egui;
use std::sync::mpsc::Sender;

/// Accepts every submission synchronously.
struct ImmediateHandler;

impl SubmissionHandler for ImmediateHandler {
    fn submit(&self, submission: Submission, reply: Sender<SubmissionOutcome>) {
        let _ = reply.send(SubmissionOutcome::Accepted { id: submission.id });
    }
}

fn test_app() -> PortfolioApp {
    let mut app = PortfolioApp::default();
    app.seed = Some(7);
    app.submission_handler = Box::new(ImmediateHandler);
    app
}

/// Run a single headless frame of the whole page on `ctx`.
fn run_frame(
    ctx: &egui::Context,
    app: &mut PortfolioApp,
    size: egui::Vec2,
    events: Vec<egui::Event>,
) -> egui::FullOutput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(egui::Pos2::ZERO, size));
    raw.events = events;
    ctx.run(raw, |ctx| app.show(ctx))
}

const SCREEN: egui::Vec2 = egui::vec2(1200.0, 800.0);

fn handle_of(app: &PortfolioApp, section: SectionId) -> Option<crate::animation::AnimationHandle> {
    app.sections.get(&section).and_then(|state| state.handle)
}

#[test]
fn first_frame_mounts_one_task_per_particle_section() {
    let ctx = egui::Context::default();
    let mut app = test_app();

    run_frame(&ctx, &mut app, SCREEN, vec![]);

    assert_eq!(app.scheduler.active_count(), 4);
    for section in SectionId::ALL {
        assert_eq!(handle_of(&app, section).is_some(), section.has_particles());
    }

    let hero = app.scheduler.field(handle_of(&app, SectionId::Hero).unwrap()).unwrap();
    assert_eq!(hero.particles().len(), crate::constants::HERO_PARTICLE_COUNT);
    let about = app.scheduler.field(handle_of(&app, SectionId::About).unwrap()).unwrap();
    assert_eq!(about.particles().len(), app.content.about.skills.len());
}

#[test]
fn stable_layout_keeps_animation_handles() {
    let ctx = egui::Context::default();
    let mut app = test_app();

    run_frame(&ctx, &mut app, SCREEN, vec![]);
    run_frame(&ctx, &mut app, SCREEN, vec![]);
    let before: Vec<_> = SectionId::ALL.iter().map(|s| handle_of(&app, *s)).collect();
    let frames_before = app
        .scheduler
        .field(handle_of(&app, SectionId::Hero).unwrap())
        .unwrap()
        .frames();

    run_frame(&ctx, &mut app, SCREEN, vec![]);
    let after: Vec<_> = SectionId::ALL.iter().map(|s| handle_of(&app, *s)).collect();

    assert_eq!(before, after);
    assert_eq!(app.scheduler.active_count(), 4);
    let frames_after = app
        .scheduler
        .field(handle_of(&app, SectionId::Hero).unwrap())
        .unwrap()
        .frames();
    assert!(frames_after > frames_before);
}

#[test]
fn resizing_window_restarts_background_under_new_handle() {
    let ctx = egui::Context::default();
    let mut app = test_app();
    run_frame(&ctx, &mut app, SCREEN, vec![]);
    let old = handle_of(&app, SectionId::Hero).unwrap();

    run_frame(&ctx, &mut app, egui::vec2(900.0, 800.0), vec![]);
    let new = handle_of(&app, SectionId::Hero).unwrap();

    assert_ne!(old, new);
    assert!(!app.scheduler.is_running(old));
    assert_eq!(app.scheduler.active_count(), 4);
    let field = app.scheduler.field(new).unwrap();
    assert!(field.size().x < 900.0);
}

#[test]
fn gallery_filtering_keeps_background_running() {
    let ctx = egui::Context::default();
    let mut app = test_app();
    run_frame(&ctx, &mut app, SCREEN, vec![]);
    run_frame(&ctx, &mut app, SCREEN, vec![]);
    let before = handle_of(&app, SectionId::CaseStudies).unwrap();

    // The empty state is much shorter than the project grid
    app.gallery.filter.search_query = "no such project".into();
    run_frame(&ctx, &mut app, SCREEN, vec![]);
    run_frame(&ctx, &mut app, SCREEN, vec![]);
    app.gallery.filter.reset();
    run_frame(&ctx, &mut app, SCREEN, vec![]);
    run_frame(&ctx, &mut app, SCREEN, vec![]);

    assert_eq!(handle_of(&app, SectionId::CaseStudies), Some(before));
    assert_eq!(app.scheduler.active_count(), 4);
    let surface = app.sections[&SectionId::CaseStudies].surface_size.unwrap();
    assert_eq!(app.scheduler.field(before).unwrap().size(), surface);
}

#[test]
fn hiding_section_stops_its_animation() {
    let ctx = egui::Context::default();
    let mut app = test_app();
    run_frame(&ctx, &mut app, SCREEN, vec![]);
    let about = handle_of(&app, SectionId::About).unwrap();

    app.set_section_visible(SectionId::About, false);
    assert!(!app.scheduler.is_running(about));

    run_frame(&ctx, &mut app, SCREEN, vec![]);
    assert_eq!(app.scheduler.active_count(), 3);
    assert!(handle_of(&app, SectionId::About).is_none());

    app.set_section_visible(SectionId::About, true);
    run_frame(&ctx, &mut app, SCREEN, vec![]);
    assert_eq!(app.scheduler.active_count(), 4);
    assert_ne!(handle_of(&app, SectionId::About), Some(about));
}

#[test]
fn hidden_preference_from_storage_never_mounts() {
    let ctx = egui::Context::default();
    let mut app = test_app();
    app.preferences.hidden_sections = vec![SectionId::Services, SectionId::CaseStudies];

    run_frame(&ctx, &mut app, SCREEN, vec![]);

    assert_eq!(app.scheduler.active_count(), 2);
    assert!(handle_of(&app, SectionId::Services).is_none());
}

#[test]
fn replacing_content_stops_and_remounts_everything() {
    let ctx = egui::Context::default();
    let mut app = test_app();
    run_frame(&ctx, &mut app, SCREEN, vec![]);
    let old_hero = handle_of(&app, SectionId::Hero).unwrap();
    app.gallery.filter.search_query = "aurora".into();

    let mut content = content::builtin();
    content.about.skills = vec!["Only".to_string()];
    app.replace_content(content);

    assert_eq!(app.scheduler.active_count(), 0);
    assert!(!app.scheduler.is_running(old_hero));
    assert!(app.gallery.filter.search_query.is_empty());

    run_frame(&ctx, &mut app, SCREEN, vec![]);
    assert_eq!(app.scheduler.active_count(), 4);
    let about = app.scheduler.field(handle_of(&app, SectionId::About).unwrap()).unwrap();
    assert_eq!(about.particles().len(), 1);
}

#[test]
fn pointer_position_reaches_tracker() {
    let ctx = egui::Context::default();
    let mut app = test_app();
    let pos = egui::pos2(300.0, 200.0);

    run_frame(&ctx, &mut app, SCREEN, vec![egui::Event::PointerMoved(pos)]);

    assert_eq!(app.pointer.get(), Some(pos));
}

#[test]
fn only_sections_in_view_are_revealed() {
    let ctx = egui::Context::default();
    let mut app = test_app();

    run_frame(&ctx, &mut app, SCREEN, vec![]);

    assert!(app.sections[&SectionId::Hero].reveal.is_triggered());
    assert!(!app.sections[&SectionId::Footer].reveal.is_triggered());
}

#[test]
fn scroll_target_is_consumed_when_section_is_drawn() {
    let ctx = egui::Context::default();
    let mut app = test_app();
    app.scroll_target = Some(SectionId::Contact);

    run_frame(&ctx, &mut app, SCREEN, vec![]);

    assert!(app.scroll_target.is_none());
}

#[test]
fn gallery_filters_drive_visible_projects() {
    let ctx = egui::Context::default();
    let mut app = test_app();
    let total = app.content.case_studies.projects.len();
    assert_eq!(app.visible_projects().len(), total);

    app.gallery.filter.active_category = "web".into();
    app.gallery.filter.sort_order = SortOrder::Budget;
    let web: Vec<String> = app.visible_projects().iter().map(|p| p.id.clone()).collect();
    assert_eq!(web, vec!["aurora-commerce", "atlas-dashboard"]);

    // Empty state renders without a panic and reset restores everything
    app.gallery.filter.search_query = "no such project".into();
    assert!(app.visible_projects().is_empty());
    run_frame(&ctx, &mut app, SCREEN, vec![]);
    app.gallery.filter.reset();
    assert_eq!(app.gallery.filter.active_category, ALL_CATEGORIES);
    assert_eq!(app.visible_projects().len(), total);
}

#[test]
fn project_modal_opens_and_drops_unknown_selection() {
    let ctx = egui::Context::default();
    let mut app = test_app();

    app.open_project("pulse-health");
    run_frame(&ctx, &mut app, SCREEN, vec![]);
    assert_eq!(app.gallery.selected_project.as_deref(), Some("pulse-health"));

    app.close_project();
    assert!(app.gallery.selected_project.is_none());

    app.open_project("missing-project");
    run_frame(&ctx, &mut app, SCREEN, vec![]);
    assert!(app.gallery.selected_project.is_none());
}

#[test]
fn newsletter_subscription_completes_on_next_frame() {
    let ctx = egui::Context::default();
    let mut app = test_app();
    app.newsletter.email = "a@b.co".into();

    app.newsletter
        .submit(app.submission_handler.as_ref())
        .expect("valid address");
    run_frame(&ctx, &mut app, SCREEN, vec![]);

    assert!(app.newsletter.is_subscribed());
    assert!(app.newsletter.email.is_empty());
}

#[test]
fn contact_form_is_built_from_content_fields() {
    let app = test_app();
    let ids: Vec<&str> = app.contact.fields().iter().map(|f| f.id.as_str()).collect();

    assert_eq!(ids, vec!["name", "email", "company", "message"]);
}

#[test]
fn loaded_content_replaces_page_and_bad_content_is_rejected() {
    let mut app = test_app();
    let original_title = app.content.hero.title.clone();

    app.apply_file_result(FileOperationResult::ContentLoaded(
        "broken.json".into(),
        "{ not json".into(),
    ));
    assert_eq!(app.content.hero.title, original_title);
    assert!(app.file.content_source.is_none());
    assert!(app.status.is_some());

    let mut content = content::builtin();
    content.hero.title = "Replaced".into();
    app.apply_file_result(FileOperationResult::ContentLoaded(
        "site.json".into(),
        content.to_json().unwrap(),
    ));
    assert_eq!(app.content.hero.title, "Replaced");
    assert_eq!(app.file.content_source.as_deref(), Some("site.json"));

    app.restore_builtin_content();
    assert_eq!(app.content.hero.title, original_title);
    assert!(app.file.content_source.is_none());
}

#[test]
fn skill_tabs_follow_document_order() {
    let json = r#"{
        "about": {
            "skillsByCategory": {
                "Zeta": [{ "name": "Rust" }],
                "Alpha": [{ "name": "Figma" }]
            }
        }
    }"#;
    let content = content::load_from_str(json).unwrap();

    let mut app = PortfolioApp::with_content(content.clone());
    assert_eq!(app.skill_category.as_deref(), Some("Zeta"));

    app.skill_category = Some("Alpha".into());
    app.replace_content(content);
    assert_eq!(app.skill_category.as_deref(), Some("Zeta"));

    let tabs: Vec<&str> = app
        .content
        .about
        .skills_by_category
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(tabs, vec!["Zeta", "Alpha"]);
}

#[test]
fn builtin_category_counts_match_category_tabs() {
    let mut app = test_app();
    let counts = crate::catalog::category_counts(
        &app.content.case_studies.projects,
        &app.content.case_studies.categories,
    );

    for category in app.content.case_studies.categories.clone() {
        app.gallery.filter.active_category = category.clone();
        assert_eq!(app.visible_projects().len(), counts[&category.to_lowercase()]);
    }
    app.gallery.filter.reset();
    assert_eq!(app.visible_projects().len(), counts[ALL_CATEGORIES]);
}

#[test]
fn preferences_default_when_fields_missing() {
    let preferences: Preferences = serde_json::from_str("{}").unwrap();

    assert!(preferences.dark_mode);
    assert!(preferences.hidden_sections.is_empty());
}

#[test]
fn emphasis_phrases_are_split_into_sections() {
    let visuals = egui::Visuals::dark();
    let phrases = vec!["care about detail".to_string(), "".to_string()];

    let job = super::sections::emphasized("We care about detail, always.", &phrases, &visuals);

    assert_eq!(job.text, "We care about detail, always.");
    assert_eq!(job.sections.len(), 3);
    assert!(job.sections[1].format.italics);
    assert!(!job.sections[0].format.italics);
}
