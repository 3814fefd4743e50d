//! Editor for the site metadata singleton.

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{SiteDetails, SiteMetadata, SiteMetadataPatch};

/// Form state for the metadata page.
///
/// The whole draft is written on save, so the social map is replaced rather than merged.
pub struct MetadataEditor {
    repo: Repository,
    draft: SiteDetails,
    loaded: bool,
}

impl MetadataEditor {
    /// Open the editor; absent or unreadable metadata leaves a blank draft.
    pub async fn open(repo: Repository) -> Self {
        let mut editor = Self {
            repo,
            draft: SiteDetails::default(),
            loaded: false,
        };
        if let Err(e) = editor.reload().await {
            tracing::error!("Error loading metadata: {}", e);
        }
        editor
    }

    /// Replace the draft with the stored metadata, if any.
    pub async fn reload(&mut self) -> Result<(), AppError> {
        if let Some(metadata) = self.repo.get_site_metadata().await? {
            self.draft = metadata.details;
            self.loaded = true;
        }
        Ok(())
    }

    /// Whether stored metadata was found.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn draft(&self) -> &SiteDetails {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut SiteDetails {
        &mut self.draft
    }

    pub fn set_social(&mut self, network: impl Into<String>, url: impl Into<String>) {
        self.draft.social.insert(network.into(), url.into());
    }

    pub fn remove_social(&mut self, network: &str) -> Option<String> {
        self.draft.social.remove(network)
    }

    /// Write the draft. On failure the draft is kept for a retry.
    pub async fn save(&mut self) -> Result<SiteMetadata, AppError> {
        match self
            .repo
            .update_site_metadata(&SiteMetadataPatch::from(&self.draft))
            .await
        {
            Ok(metadata) => {
                tracing::info!("Metadata updated successfully");
                Ok(metadata)
            }
            Err(e) => {
                tracing::error!("Error saving metadata: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::ListField;
    use crate::db::test_repository;

    #[tokio::test]
    async fn test_unseeded_editor_cannot_save() {
        let (repo, _dir) = test_repository().await;

        let mut editor = MetadataEditor::open(repo).await;
        assert!(!editor.is_loaded());

        editor.draft_mut().name = "Someone".into();
        assert!(editor.save().await.unwrap_err().is_not_found());
        assert_eq!(editor.draft().name, "Someone");
    }

    #[tokio::test]
    async fn test_edit_certifications_and_social() {
        let (repo, _dir) = test_repository().await;
        let mut details = SiteDetails::default();
        details.social.insert("github".into(), "https://github.com/a".into());
        details.social.insert("twitter".into(), "https://x.com/a".into());
        repo.put_site_metadata(&details).await.unwrap();

        let mut editor = MetadataEditor::open(repo.clone()).await;
        assert!(editor.is_loaded());

        let certs = &mut editor.draft_mut().certifications;
        certs.push_item();
        certs.set_item(0, "CIMA");
        editor.remove_social("twitter");
        editor.set_social("linkedin", "https://linkedin.com/in/a");
        editor.save().await.unwrap();

        let stored = repo.get_site_metadata().await.unwrap().unwrap();
        assert_eq!(stored.details.certifications, vec!["CIMA"]);
        let networks: Vec<&String> = stored.details.social.keys().collect();
        assert_eq!(networks, vec!["github", "linkedin"]);
    }
}
