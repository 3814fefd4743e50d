//! Site metadata singleton model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ServerTimestamp;

/// Collection holding the singleton.
pub const SITE_COLLECTION: &str = "site";
/// Fixed key of the metadata document.
pub const METADATA_KEY: &str = "metadata";

/// Owner details and page copy shared by several sections.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteDetails {
    pub name: String,
    pub title: String,
    pub initials: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    /// Path of the downloadable CV
    pub cv_path: String,
    pub profile: String,
    pub about_me: String,
    pub about_quote: String,
    /// Network name to profile URL
    pub social: BTreeMap<String, String>,
    pub certifications: Vec<String>,
}

/// The stored metadata singleton.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteMetadata {
    #[serde(flatten)]
    pub details: SiteDetails,
    pub updated_at: ServerTimestamp,
}

/// Partial update for the metadata singleton.
///
/// Merging is shallow: a supplied `social` map replaces the stored map whole.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SiteMetadataPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_me: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_quote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<String>>,
}

impl From<&SiteDetails> for SiteMetadataPatch {
    fn from(details: &SiteDetails) -> Self {
        Self {
            name: Some(details.name.clone()),
            title: Some(details.title.clone()),
            initials: Some(details.initials.clone()),
            email: Some(details.email.clone()),
            phone: Some(details.phone.clone()),
            location: Some(details.location.clone()),
            cv_path: Some(details.cv_path.clone()),
            profile: Some(details.profile.clone()),
            about_me: Some(details.about_me.clone()),
            about_quote: Some(details.about_quote.clone()),
            social: Some(details.social.clone()),
            certifications: Some(details.certifications.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_names() {
        let details = SiteDetails {
            cv_path: "/cv.pdf".into(),
            about_me: "Hello".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&details).unwrap();

        assert_eq!(value["cvPath"], "/cv.pdf");
        assert_eq!(value["aboutMe"], "Hello");
        assert_eq!(value["social"], json!({}));
    }

    #[test]
    fn test_full_patch_from_details() {
        let details = SiteDetails {
            phone: "123".into(),
            ..Default::default()
        };
        let patch = SiteMetadataPatch::from(&details);

        assert_eq!(patch.phone.as_deref(), Some("123"));
        assert_eq!(patch.certifications, Some(Vec::new()));
    }
}
