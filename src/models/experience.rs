//! Work experience model.

use serde::{Deserialize, Serialize};

use super::{clearable, is_blank, ContentKind};

/// A position held, shown in the experience timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_subtitle: Option<String>,
    /// Free-form date range, e.g. "Jan 2020 - Present"
    pub dates: String,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub description: String,
    pub skills: Vec<String>,
    pub order: u32,
    pub is_active: bool,
}

impl Default for ExperienceEntry {
    fn default() -> Self {
        Self {
            role: String::new(),
            company: String::new(),
            company_subtitle: None,
            dates: String::new(),
            duration: String::new(),
            location: None,
            description: String::new(),
            skills: Vec::new(),
            order: 0,
            is_active: true,
        }
    }
}

/// Partial update for an experience entry.
///
/// The optional fields take `Some(None)` (`null` on the wire) to clear the stored value.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub company_subtitle: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "clearable", skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ContentKind for ExperienceEntry {
    const COLLECTION: &'static str = "experience";
    const LABEL: &'static str = "Experience entry";

    type Patch = ExperiencePatch;

    fn sort_order(&self) -> u32 {
        self.order
    }

    fn set_sort_order(&mut self, order: u32) {
        self.order = order;
    }

    fn missing_field(&self) -> Option<&'static str> {
        if is_blank(&self.role) {
            Some("Role")
        } else if is_blank(&self.company) {
            Some("Company")
        } else {
            None
        }
    }

    fn to_patch(&self) -> ExperiencePatch {
        ExperiencePatch {
            role: Some(self.role.clone()),
            company: Some(self.company.clone()),
            company_subtitle: Some(self.company_subtitle.clone()),
            dates: Some(self.dates.clone()),
            duration: Some(self.duration.clone()),
            location: Some(self.location.clone()),
            description: Some(self.description.clone()),
            skills: Some(self.skills.clone()),
            order: Some(self.order),
            is_active: Some(self.is_active),
        }
    }
}
