//! Service offering model.

use serde::{Deserialize, Serialize};

use super::{is_blank, ContentKind};

/// A service offered on the site.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    pub title: String,
    pub description: String,
    /// Icon identifier understood by the frontend icon set
    pub icon: String,
    pub features: Vec<String>,
    pub order: u32,
}

/// Partial update for a service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServicePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl ContentKind for Service {
    const COLLECTION: &'static str = "services";
    const LABEL: &'static str = "Service";

    type Patch = ServicePatch;

    fn sort_order(&self) -> u32 {
        self.order
    }

    fn set_sort_order(&mut self, order: u32) {
        self.order = order;
    }

    fn missing_field(&self) -> Option<&'static str> {
        is_blank(&self.title).then_some("Title")
    }

    fn to_patch(&self) -> ServicePatch {
        ServicePatch {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            icon: Some(self.icon.clone()),
            features: Some(self.features.clone()),
            order: Some(self.order),
        }
    }
}
