//! Application state management structures.
//!
//! This module contains the state the page keeps between frames: the loaded
//! content, one animation slot per section, gallery filters, form state,
//! persisted preferences and the channel for asynchronous file operations.

use crate::animation::{AnimationHandle, AnimationScheduler, PointerTracker};
use crate::catalog::{FilterState, ALL_CATEGORIES};
use crate::content;
use crate::forms::{ContactForm, LoggingSubmissionHandler, NewsletterForm, SubmissionHandler};
use crate::motion::Reveal;
use crate::types::{ProjectId, SiteContent};
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::mpsc::{channel, Receiver, Sender};

/// The page sections in display order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionId {
    Hero,
    About,
    Services,
    CaseStudies,
    Contact,
    Footer,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Hero,
        SectionId::About,
        SectionId::Services,
        SectionId::CaseStudies,
        SectionId::Contact,
        SectionId::Footer,
    ];

    /// Label used in the navigation bar.
    pub fn title(&self) -> &'static str {
        match self {
            SectionId::Hero => "Home",
            SectionId::About => "About",
            SectionId::Services => "Services",
            SectionId::CaseStudies => "Case Studies",
            SectionId::Contact => "Contact",
            SectionId::Footer => "Footer",
        }
    }

    /// Whether the section draws a particle background.
    pub fn has_particles(&self) -> bool {
        matches!(
            self,
            SectionId::Hero | SectionId::About | SectionId::Services | SectionId::CaseStudies
        )
    }
}

/// Per-section runtime state.
#[derive(Debug, Default)]
pub struct SectionState {
    /// Running background animation, if mounted
    pub handle: Option<AnimationHandle>,
    /// Surface size the running field was generated for
    pub surface_size: Option<egui::Vec2>,
    /// Height the section's content needed last frame
    pub content_height: f32,
    pub reveal: Reveal,
}

/// State of the case-study gallery.
#[derive(Debug, Default)]
pub struct GalleryState {
    pub filter: FilterState,
    /// Project shown in the detail modal
    pub selected_project: Option<ProjectId>,
}

/// Preferences persisted between runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Preferences {
    pub dark_mode: bool,
    /// Sections the user switched off
    pub hidden_sections: Vec<SectionId>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            hidden_sections: Vec::new(),
        }
    }
}

/// Results of asynchronous file operations.
#[derive(Debug)]
pub enum FileOperationResult {
    /// Content document read from the given source
    ContentLoaded(String, String),
    /// Snapshot written to the given path
    SnapshotSaved(String),
    OperationFailed(String),
}

/// Pending work and the channel completed file operations report on.
pub struct FileState {
    /// A content load was requested and not started yet
    pub pending_load: bool,
    /// PNG bytes waiting for a save dialog
    pub pending_snapshot: Option<Vec<u8>>,
    /// Source of the currently loaded content, `None` for the built-in document
    pub content_source: Option<String>,
    pub sender: Sender<FileOperationResult>,
    pub receiver: Receiver<FileOperationResult>,
}

impl Default for FileState {
    fn default() -> Self {
        let (sender, receiver) = channel();
        Self {
            pending_load: false,
            pending_snapshot: None,
            content_source: None,
            sender,
            receiver,
        }
    }
}

/// The main application state for the portfolio page.
pub struct PortfolioApp {
    pub content: SiteContent,
    pub scheduler: AnimationScheduler,
    pub pointer: PointerTracker,
    pub sections: BTreeMap<SectionId, SectionState>,
    pub gallery: GalleryState,
    /// Selected services category, or [`ALL_CATEGORIES`]
    pub services_category: String,
    /// Selected skill tab of the about section
    pub skill_category: Option<String>,
    pub newsletter: NewsletterForm,
    pub contact: ContactForm,
    pub submission_handler: Box<dyn SubmissionHandler>,
    pub preferences: Preferences,
    pub file: FileState,
    /// Seed for newly created particle fields; `None` for random fields
    pub seed: Option<u64>,
    /// UI time at which the page was first drawn
    pub started_at: Option<f64>,
    /// Section to scroll to on the next frame
    pub scroll_target: Option<SectionId>,
    /// Last status or error line shown in the top bar
    pub status: Option<String>,
}

impl Default for PortfolioApp {
    fn default() -> Self {
        Self::with_content(content::builtin())
    }
}

impl PortfolioApp {
    /// Creates the app from persisted preferences, if any.
    pub fn new(cc: &eframe::CreationContext<'_>, content: SiteContent, seed: Option<u64>) -> Self {
        let mut app = Self::with_content(content);
        app.seed = seed;
        if let Some(storage) = cc.storage {
            if let Some(json) = storage.get_string(eframe::APP_KEY) {
                match serde_json::from_str::<Preferences>(&json) {
                    Ok(preferences) => app.preferences = preferences,
                    Err(e) => log::warn!("Ignoring stored preferences: {}", e),
                }
            }
        }
        app
    }

    pub fn with_content(content: SiteContent) -> Self {
        let contact = ContactForm::new(content.contact.form_fields.clone());
        let skill_category = content.about.first_skill_category().map(str::to_string);
        Self {
            content,
            scheduler: AnimationScheduler::new(),
            pointer: PointerTracker::new(),
            sections: BTreeMap::new(),
            gallery: GalleryState::default(),
            services_category: ALL_CATEGORIES.to_string(),
            skill_category,
            newsletter: NewsletterForm::new(),
            contact,
            submission_handler: Box::new(LoggingSubmissionHandler::default()),
            preferences: Preferences::default(),
            file: FileState::default(),
            seed: None,
            started_at: None,
            scroll_target: None,
            status: None,
        }
    }

    /// Swaps in a new content document.
    ///
    /// Every running animation is stopped and all derived state is reset, so the next
    /// frame starts fresh fields and reveals for the new content.
    pub fn replace_content(&mut self, content: SiteContent) {
        let stopped = self.scheduler.stop_all();
        log::info!("Replacing content, stopped {} animations", stopped);
        self.sections.clear();
        self.gallery = GalleryState::default();
        self.services_category = ALL_CATEGORIES.to_string();
        self.skill_category = content.about.first_skill_category().map(str::to_string);
        self.contact = ContactForm::new(content.contact.form_fields.clone());
        self.newsletter = NewsletterForm::new();
        self.started_at = None;
        self.content = content;
    }

    pub fn is_visible(&self, section: SectionId) -> bool {
        !self.preferences.hidden_sections.contains(&section)
    }

    /// Shows or hides a section. Hiding stops its background animation.
    pub fn set_section_visible(&mut self, section: SectionId, visible: bool) {
        if visible {
            self.preferences.hidden_sections.retain(|s| *s != section);
        } else {
            if !self.preferences.hidden_sections.contains(&section) {
                self.preferences.hidden_sections.push(section);
            }
            self.teardown_section(section);
        }
    }

    /// Stops the section's animation and forgets its surface.
    pub fn teardown_section(&mut self, section: SectionId) {
        if let Some(state) = self.sections.get_mut(&section) {
            if let Some(handle) = state.handle.take() {
                self.scheduler.stop(handle);
            }
            state.surface_size = None;
        }
    }

    /// Seconds since the page was first drawn.
    pub fn page_time(&self, now: f64) -> f64 {
        self.started_at.map_or(0.0, |start| (now - start).max(0.0))
    }
}
