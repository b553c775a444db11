//! Loading and validating the page content document.
//!
//! A default document is compiled into the binary; alternatives can be loaded
//! from JSON at startup or at runtime.

use crate::types::SiteContent;
use std::collections::HashSet;

const BUILTIN_CONTENT: &str = include_str!("../assets/site_content.json");

/// Why a content document could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to parse content: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read content: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid content: {0}")]
    Invalid(String),
}

/// The content document shipped with the application.
///
/// Falls back to an empty document if the embedded JSON is broken.
pub fn builtin() -> SiteContent {
    match load_from_str(BUILTIN_CONTENT) {
        Ok(content) => content,
        Err(e) => {
            log::error!("Embedded content is unusable: {}", e);
            SiteContent::default()
        }
    }
}

/// Parses and validates a content document.
pub fn load_from_str(json: &str) -> Result<SiteContent, ContentError> {
    let content = SiteContent::from_json(json)?;
    validate(&content)?;
    Ok(content)
}

/// Reads, parses and validates a content document from disk.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_from_path(path: &std::path::Path) -> Result<SiteContent, ContentError> {
    let json = std::fs::read_to_string(path)?;
    let content = load_from_str(&json)?;
    log::info!(
        "Loaded content from {} ({} projects)",
        path.display(),
        content.case_studies.projects.len()
    );
    Ok(content)
}

/// Checks cross-references the type system cannot express.
///
/// * project and service ids are unique
/// * every project category is one of the gallery categories (case-insensitive)
/// * contact form field ids are unique
pub fn validate(content: &SiteContent) -> Result<(), ContentError> {
    let mut project_ids = HashSet::new();
    for project in &content.case_studies.projects {
        if !project_ids.insert(project.id.as_str()) {
            return Err(ContentError::Invalid(format!("duplicate project id '{}'", project.id)));
        }
    }

    let categories: HashSet<String> = content
        .case_studies
        .categories
        .iter()
        .map(|c| c.to_lowercase())
        .collect();
    if let Some(project) = content
        .case_studies
        .projects
        .iter()
        .find(|p| !categories.contains(&p.category.to_lowercase()))
    {
        return Err(ContentError::Invalid(format!(
            "project '{}' has unknown category '{}'",
            project.id, project.category
        )));
    }

    let mut service_ids = HashSet::new();
    for service in &content.services.services {
        if !service_ids.insert(service.id.as_str()) {
            return Err(ContentError::Invalid(format!("duplicate service id '{}'", service.id)));
        }
    }

    let mut field_ids = HashSet::new();
    for field in &content.contact.form_fields {
        if !field_ids.insert(field.id.as_str()) {
            return Err(ContentError::Invalid(format!("duplicate form field id '{}'", field.id)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project(id: &str, category: &str) -> serde_json::Value {
        json!({
            "id": id,
            "category": category,
            "title": "T",
            "client": "C",
            "location": "L",
            "budget": "$1k",
            "duration": "1 week"
        })
    }

    #[test]
    fn test_builtin_content_is_complete() {
        let content = load_from_str(BUILTIN_CONTENT).expect("embedded content must validate");

        assert!(!content.hero.roles.is_empty());
        assert!(!content.about.skills.is_empty());
        assert!(!content.services.counters.is_empty());
        assert!(!content.case_studies.projects.is_empty());
        assert!(!content.contact.form_fields.is_empty());
        assert!(!content.footer.newsletter.button_text.is_empty());
    }

    #[test]
    fn test_duplicate_project_ids_are_rejected() {
        let doc = json!({
            "caseStudies": {
                "categories": ["Web"],
                "projects": [project("a", "Web"), project("a", "Web")]
            }
        });

        let err = load_from_str(&doc.to_string()).unwrap_err();

        assert!(matches!(err, ContentError::Invalid(msg) if msg.contains("duplicate project id 'a'")));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let doc = json!({
            "caseStudies": {
                "categories": ["Web"],
                "projects": [project("a", "WEB"), project("b", "Print")]
            }
        });

        let err = load_from_str(&doc.to_string()).unwrap_err();

        assert!(matches!(err, ContentError::Invalid(msg) if msg.contains("'Print'")));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(load_from_str("{ nope"), Err(ContentError::Parse(_))));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_is_an_io_error() {
        let path = std::path::Path::new("/definitely/not/here/content.json");

        assert!(matches!(load_from_path(path), Err(ContentError::Io(_))));
    }
}
