//! Education model.

use serde::{Deserialize, Serialize};

use super::{is_blank, ContentKind};

/// A degree or qualification.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub degree: String,
    pub field: String,
    pub institution: String,
    pub dates: String,
    pub order: u32,
}

/// Partial update for an education entry.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EducationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl ContentKind for EducationEntry {
    const COLLECTION: &'static str = "education";
    const LABEL: &'static str = "Education entry";

    type Patch = EducationPatch;

    fn sort_order(&self) -> u32 {
        self.order
    }

    fn set_sort_order(&mut self, order: u32) {
        self.order = order;
    }

    fn missing_field(&self) -> Option<&'static str> {
        if is_blank(&self.degree) {
            Some("Degree")
        } else if is_blank(&self.institution) {
            Some("Institution")
        } else {
            None
        }
    }

    fn to_patch(&self) -> EducationPatch {
        EducationPatch {
            degree: Some(self.degree.clone()),
            field: Some(self.field.clone()),
            institution: Some(self.institution.clone()),
            dates: Some(self.dates.clone()),
            order: Some(self.order),
        }
    }
}
