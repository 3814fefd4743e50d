//! Skill category model.

use serde::{Deserialize, Serialize};

use super::{is_blank, ContentKind};

/// A named group of skills.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
    pub order: u32,
}

/// Partial update for a skill category.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SkillCategoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

impl ContentKind for SkillCategory {
    const COLLECTION: &'static str = "skillCategories";
    const LABEL: &'static str = "Skill category";

    type Patch = SkillCategoryPatch;

    fn sort_order(&self) -> u32 {
        self.order
    }

    fn set_sort_order(&mut self, order: u32) {
        self.order = order;
    }

    fn missing_field(&self) -> Option<&'static str> {
        is_blank(&self.name).then_some("Name")
    }

    fn to_patch(&self) -> SkillCategoryPatch {
        SkillCategoryPatch {
            name: Some(self.name.clone()),
            skills: Some(self.skills.clone()),
            order: Some(self.order),
        }
    }
}
