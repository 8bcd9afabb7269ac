//! Static, ordered registry of the page's anchor-addressable sections.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SectionConfig;
use crate::host::{Document, ElementRect};
use crate::{Error, Result};

/// Pseudo-section standing for the page header / top of the document
pub const HOME: &str = "home";

/// Stable key of a section, also its DOM id and hash fragment
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn home() -> Self {
        Self(HOME.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_home(&self) -> bool {
        self.0 == HOME
    }

    /// Undetermined section, the state before anything was resolved
    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SectionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for SectionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SectionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub id: SectionId,
    pub display_label: String,
}

/// Fixed list of sections in document order
#[derive(Debug, Clone)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    /// Build a registry; `home` must come first and ids must be unique
    pub fn new(sections: Vec<Section>) -> Result<Self> {
        match sections.first() {
            Some(first) if first.id.is_home() => {}
            _ => {
                return Err(Error::Registry(format!(
                    "the first section must be \"{}\"",
                    HOME
                )))
            }
        }

        let mut seen = HashSet::new();
        for section in &sections {
            let id = section.id.as_str();
            if id.is_empty() || id.contains(['#', '/']) || id.chars().any(char::is_whitespace) {
                return Err(Error::Registry(format!("invalid section id \"{}\"", id)));
            }
            if !seen.insert(id) {
                return Err(Error::Registry(format!("duplicate section id \"{}\"", id)));
            }
        }

        Ok(Self { sections })
    }

    pub fn from_config(config: &[SectionConfig]) -> Result<Self> {
        Self::new(
            config
                .iter()
                .map(|s| Section {
                    id: SectionId::new(s.id.clone()),
                    display_label: s.label.clone(),
                })
                .collect(),
        )
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_ids(&self) -> impl Iterator<Item = &SectionId> {
        self.sections.iter().map(|s| &s.id)
    }

    pub fn get(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    pub fn contains(&self, id: &SectionId) -> bool {
        self.get(id).is_some()
    }

    pub fn position(&self, id: &SectionId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    pub fn label<'a>(&'a self, id: &'a SectionId) -> &'a str {
        self.get(id)
            .map(|s| s.display_label.as_str())
            .unwrap_or_else(|| id.as_str())
    }

    pub fn next_after(&self, id: &SectionId) -> Option<&SectionId> {
        let idx = self.position(id)?;
        self.sections.get(idx + 1).map(|s| &s.id)
    }

    pub fn previous_before(&self, id: &SectionId) -> Option<&SectionId> {
        let idx = self.position(id)?;
        idx.checked_sub(1)
            .and_then(|i| self.sections.get(i))
            .map(|s| &s.id)
    }

    pub fn last(&self) -> &SectionId {
        // new() guarantees at least `home`
        &self.sections[self.sections.len() - 1].id
    }

    /// Look the section's element up in the document.
    ///
    /// `None` means "not mounted yet" and callers skip it; lazily rendered
    /// sections routinely miss on the first frames.
    pub fn resolve_element<D: Document + ?Sized>(
        &self,
        id: &SectionId,
        document: &D,
    ) -> Option<ElementRect> {
        document.element_rect(id.as_str())
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self {
            sections: crate::AppConfig::default()
                .sections
                .into_iter()
                .map(|s| Section {
                    id: SectionId::new(s.id),
                    display_label: s.label,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str) -> Section {
        Section {
            id: SectionId::from(id),
            display_label: id.to_uppercase(),
        }
    }

    #[test]
    fn test_default_registry_order() {
        let registry = SectionRegistry::default();
        let ids: Vec<&str> = registry.section_ids().map(|s| s.as_str()).collect();
        assert_eq!(
            ids,
            [
                "home",
                "about",
                "experience",
                "skills",
                "certifications",
                "testimonials",
                "articles",
                "contact"
            ]
        );
        assert_eq!(registry.last(), &SectionId::from("contact"));
    }

    #[test]
    fn test_home_must_be_first() {
        let err = SectionRegistry::new(vec![section("about"), section("home")]).unwrap_err();
        assert!(matches!(err, Error::Registry(_)));
        assert!(SectionRegistry::new(Vec::new()).is_err());
    }

    #[test]
    fn test_rejects_duplicates_and_bad_ids() {
        assert!(SectionRegistry::new(vec![section("home"), section("a"), section("a")]).is_err());
        assert!(SectionRegistry::new(vec![section("home"), section("a/b")]).is_err());
        assert!(SectionRegistry::new(vec![section("home"), section("")]).is_err());
    }

    #[test]
    fn test_neighbours() {
        let registry = SectionRegistry::default();
        let home = SectionId::home();
        assert_eq!(registry.previous_before(&home), None);
        assert_eq!(registry.next_after(&home), Some(&SectionId::from("about")));
        assert_eq!(registry.next_after(registry.last()), None);
        assert_eq!(registry.next_after(&SectionId::from("missing")), None);
    }

    #[test]
    fn test_label_falls_back_to_id() {
        let registry = SectionRegistry::default();
        assert_eq!(registry.label(&SectionId::from("skills")), "Skills");
        let unknown = SectionId::from("blog");
        assert_eq!(registry.label(&unknown), "blog");
    }
}
