//! Core content types for the portfolio page.
//!
//! This module defines the structured documents each page section consumes,
//! including the project records the case-study gallery filters and sorts.
//! Field names follow the camelCase keys of the content JSON.

use serde::{Deserialize, Serialize};

/// Stable identifier of a project record.
pub type ProjectId = String;

/// A single case-study entry shown in the gallery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Unique identifier of this record
    pub id: ProjectId,
    /// Category name, one of [`CaseStudiesContent::categories`]
    pub category: String,
    /// Display title
    pub title: String,
    /// Client the project was delivered for
    pub client: String,
    /// Where the project took place
    pub location: String,
    /// Human-formatted budget such as "$120k"
    pub budget: String,
    /// Human-formatted duration such as "6 weeks"
    pub duration: String,
    /// Long description shown in the project modal
    #[serde(default)]
    pub description: Option<String>,
    /// Cover image location
    #[serde(default)]
    pub image_url: Option<String>,
    /// Link to the full case study
    #[serde(default)]
    pub detail_url: Option<String>,
}

impl ProjectRecord {
    /// Returns the record's description, or the generic fallback paragraph when
    /// the record has none (or only whitespace).
    pub fn description_or_fallback(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => crate::constants::PROJECT_DESCRIPTION_FALLBACK,
        }
    }
}

/// Content of the hero section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroContent {
    pub title: String,
    pub subtitle: String,
    /// Roles cycled under the title
    pub roles: Vec<String>,
    pub introduction: String,
    pub cta_text: String,
}

/// A skill entry inside a skill category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Skill {
    pub name: String,
    /// Optional proficiency in percent
    #[serde(default)]
    pub level: Option<u8>,
}

/// The skills of one tab in the about section.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<Skill>,
}

/// Years of experience and delivered projects, shown as counters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Experience {
    pub years: u32,
    pub projects: u32,
}

/// One milestone of the career timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JourneyItem {
    pub year: String,
    pub title: String,
    pub description: String,
}

/// Content of the about section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutContent {
    pub title: String,
    pub paragraphs: Vec<String>,
    pub emphasis_phrases: Vec<String>,
    /// Skill labels that float in the background field
    pub skills: Vec<String>,
    /// Skill tabs in document order; stored in JSON as an object keyed by category name
    #[serde(with = "ordered_categories")]
    pub skills_by_category: Vec<SkillCategory>,
    pub experience: Experience,
    pub journey: Vec<JourneyItem>,
}

impl AboutContent {
    /// Name of the tab selected when the section is first shown.
    pub fn first_skill_category(&self) -> Option<&str> {
        self.skills_by_category.first().map(|c| c.name.as_str())
    }

    /// Skills listed under `category`, if such a tab exists.
    pub fn skills_in(&self, category: &str) -> Option<&[Skill]> {
        self.skills_by_category
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.skills.as_slice())
    }
}

/// Reads and writes skill categories as a JSON object without losing key order.
mod ordered_categories {
    use super::{Skill, SkillCategory};
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(categories: &[SkillCategory], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(categories.len()))?;
        for category in categories {
            map.serialize_entry(&category.name, &category.skills)?;
        }
        map.end()
    }

    struct CategoriesVisitor;

    impl<'de> Visitor<'de> for CategoriesVisitor {
        type Value = Vec<SkillCategory>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map from category names to skill lists")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut categories = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, skills)) = access.next_entry::<String, Vec<Skill>>()? {
                categories.push(SkillCategory { name, skills });
            }
            Ok(categories)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<SkillCategory>, D::Error> {
        deserializer.deserialize_map(CategoriesVisitor)
    }
}

/// A single offered service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub features: Vec<String>,
}

/// An animated count-up figure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Counter {
    pub label: String,
    pub target: u32,
}

/// Content of the services showcase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ServicesContent {
    pub title: String,
    pub description: String,
    pub categories: Vec<String>,
    pub services: Vec<ServiceItem>,
    pub counters: Vec<Counter>,
}

/// Content of the case-study gallery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseStudiesContent {
    pub title: String,
    /// Known categories in display order
    pub categories: Vec<String>,
    pub projects: Vec<ProjectRecord>,
}

/// A named external link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    pub label: String,
    pub href: String,
}

/// A social network profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Input kind of a contact form field.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Textarea,
}

/// Definition of one contact form field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormFieldDef {
    /// Key under which the value is submitted
    pub id: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: FieldKind,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub required: bool,
}

/// Content of the contact section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactContent {
    pub title: String,
    pub subtitle: String,
    pub email: String,
    pub socials: Vec<SocialLink>,
    pub form_fields: Vec<FormFieldDef>,
    pub submit_text: String,
    pub success_message: Option<String>,
}

/// Company block of the footer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyInfo {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub address: String,
    pub email: String,
    pub phone: String,
}

/// A titled group of footer navigation links.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavigationGroup {
    pub title: String,
    pub links: Vec<Link>,
}

/// Copy of the newsletter signup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsletterCopy {
    pub title: String,
    pub description: String,
    pub button_text: String,
    pub success_message: String,
    pub success_description: String,
}

/// A static figure shown in the footer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

/// Content of the footer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterContent {
    pub company: CompanyInfo,
    pub navigation_groups: Vec<NavigationGroup>,
    pub newsletter: NewsletterCopy,
    pub social: Vec<SocialLink>,
    pub stats: Vec<Stat>,
    pub legal_links: Vec<Link>,
}

/// The complete content document of the page, one entry per section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteContent {
    pub hero: HeroContent,
    pub about: AboutContent,
    pub services: ServicesContent,
    pub case_studies: CaseStudiesContent,
    pub contact: ContactContent,
    pub footer: FooterContent,
}

impl SiteContent {
    /// Serialize the content document to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a content document from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(description: Option<&str>) -> ProjectRecord {
        ProjectRecord {
            id: "p1".into(),
            category: "Web".into(),
            title: "Title".into(),
            client: "Client".into(),
            location: "Berlin".into(),
            budget: "$10k".into(),
            duration: "2 weeks".into(),
            description: description.map(str::to_string),
            image_url: None,
            detail_url: None,
        }
    }

    #[test]
    fn test_description_fallback_when_missing() {
        assert_eq!(
            record(None).description_or_fallback(),
            crate::constants::PROJECT_DESCRIPTION_FALLBACK
        );
        assert_eq!(
            record(Some("   ")).description_or_fallback(),
            crate::constants::PROJECT_DESCRIPTION_FALLBACK
        );
        assert_eq!(record(Some("Custom")).description_or_fallback(), "Custom");
    }

    #[test]
    fn test_project_record_reads_camel_case_keys() {
        let value = json!({
            "id": "nova",
            "category": "Branding",
            "title": "Nova",
            "client": "Nova GmbH",
            "location": "Vienna",
            "budget": "$40k",
            "duration": "8 weeks",
            "imageUrl": "https://example.com/nova.jpg",
            "detailUrl": "/projects/nova"
        });

        let parsed: ProjectRecord = serde_json::from_value(value).unwrap();

        assert_eq!(parsed.image_url.as_deref(), Some("https://example.com/nova.jpg"));
        assert_eq!(parsed.detail_url.as_deref(), Some("/projects/nova"));
        assert!(parsed.description.is_none());
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let content = SiteContent::from_json(r#"{"hero": {"title": "Hi"}}"#).unwrap();

        assert_eq!(content.hero.title, "Hi");
        assert!(content.hero.roles.is_empty());
        assert!(content.case_studies.projects.is_empty());
        assert!(content.contact.form_fields.is_empty());
    }

    #[test]
    fn test_skill_categories_keep_document_order() {
        let json = r#"{
            "skillsByCategory": {
                "Zeta": [{ "name": "Rust", "level": 90 }],
                "Alpha": [{ "name": "Figma" }],
                "Mid": []
            }
        }"#;

        let about: AboutContent = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = about.skills_by_category.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(about.first_skill_category(), Some("Zeta"));
        assert_eq!(about.skills_in("Alpha").map(|s| s[0].level), Some(None));
        assert!(about.skills_in("Beta").is_none());

        // Writing the document back keeps the same key order
        let written = serde_json::to_string(&about).unwrap();
        let zeta = written.find("\"Zeta\"").unwrap();
        let alpha = written.find("\"Alpha\"").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_form_field_kind_uses_type_key() {
        let field: FormFieldDef = serde_json::from_value(json!({
            "id": "email",
            "label": "Email",
            "type": "email",
            "required": true
        }))
        .unwrap();

        assert_eq!(field.kind, FieldKind::Email);
        assert!(field.required);
        assert!(field.placeholder.is_empty());
    }
}
