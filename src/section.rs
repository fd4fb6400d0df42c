//! Static section list: the named, anchored regions of the page.
//!
//! The list is fixed-order and duplicate-free. Order matters: the tracker
//! scans it top to bottom and the first section containing the reference
//! line wins.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Icon shown for a navigation entry or link.
///
/// Names follow the lucide icon set the rendered page references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Github,
    Linkedin,
    Mail,
    Download,
    ExternalLink,
    Code2,
    Briefcase,
    User,
    Home,
    GraduationCap,
}

impl Icon {
    /// Icon name as understood by the front-end icon loader
    pub fn name(self) -> &'static str {
        match self {
            Icon::Github => "github",
            Icon::Linkedin => "linkedin",
            Icon::Mail => "mail",
            Icon::Download => "download",
            Icon::ExternalLink => "external-link",
            Icon::Code2 => "code-2",
            Icon::Briefcase => "briefcase",
            Icon::User => "user",
            Icon::Home => "home",
            Icon::GraduationCap => "graduation-cap",
        }
    }
}

/// A named region of the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Anchor id, used both for element lookup and navigation highlighting
    pub id: String,
    /// Human label (navigation tooltip)
    pub label: String,
    /// Navigation icon
    pub icon: Icon,
    /// Whether the section gets an entry in the navigation rail
    #[serde(default = "default_in_nav")]
    pub in_nav: bool,
}

fn default_in_nav() -> bool {
    true
}

impl Section {
    pub fn new(id: &str, label: &str, icon: Icon) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            icon,
            in_nav: true,
        }
    }

    /// Tracked by the scroll tracker but left out of the navigation rail
    pub fn hidden(mut self) -> Self {
        self.in_nav = false;
        self
    }
}

/// Ordered, duplicate-free list of sections.
///
/// Construct through [`SectionList::new`], which rejects empty lists, empty
/// ids and duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SectionList {
    sections: Vec<Section>,
}

impl SectionList {
    pub fn new(sections: Vec<Section>) -> Result<Self> {
        if sections.is_empty() {
            return Err(Error::ConfigError("section list is empty".into()));
        }
        for (i, s) in sections.iter().enumerate() {
            if s.id.trim().is_empty() {
                return Err(Error::ConfigError(format!("section #{} has an empty id", i)));
            }
            if sections[..i].iter().any(|prev| prev.id == s.id) {
                return Err(Error::ConfigError(format!("duplicate section id '{}'", s.id)));
            }
        }
        Ok(Self { sections })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    /// Section ids in declared order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.id.as_str())
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Sections shown in the navigation rail, in declared order
    pub fn nav_entries(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.in_nav)
    }

    pub fn first(&self) -> &Section {
        // non-empty by construction
        &self.sections[0]
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Default for SectionList {
    fn default() -> Self {
        Self {
            sections: vec![
                Section::new("home", "Home", Icon::Home),
                Section::new("about", "About", Icon::User),
                Section::new("education", "Education", Icon::GraduationCap),
                Section::new("skills", "Skills", Icon::Code2),
                Section::new("projects", "Projects", Icon::Briefcase),
                Section::new("contact", "Contact", Icon::Mail).hidden(),
            ],
        }
    }
}

impl<'de> Deserialize<'de> for SectionList {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let sections = Vec::<Section>::deserialize(deserializer)?;
        SectionList::new(sections).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a SectionList {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}
