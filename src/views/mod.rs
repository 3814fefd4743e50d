//! Public page sections.
//!
//! Each section loads its own content and degrades on its own: a failed fetch is logged
//! and marks that section unavailable while the rest of the page still renders.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::db::Repository;
use crate::errors::AppError;
use crate::models::{
    EducationEntry, Entry, ExperienceEntry, Service, SiteDetails, SiteMetadata, SkillCategory,
};

/// Display state of a section.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    Loading,
    Empty,
    Ready,
    Unavailable,
}

/// A section and whatever content it has.
#[derive(Debug, Clone, Serialize)]
pub struct SectionView<T> {
    pub status: SectionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<T>,
}

impl<T> SectionView<T> {
    pub fn loading() -> Self {
        Self::without_content(SectionStatus::Loading)
    }

    pub fn empty() -> Self {
        Self::without_content(SectionStatus::Empty)
    }

    pub fn unavailable() -> Self {
        Self::without_content(SectionStatus::Unavailable)
    }

    pub fn ready(content: T) -> Self {
        Self {
            status: SectionStatus::Ready,
            content: Some(content),
        }
    }

    fn without_content(status: SectionStatus) -> Self {
        Self {
            status,
            content: None,
        }
    }

    /// Resolve a finished fetch into a section.
    pub fn resolve(section: &'static str, result: Result<Option<T>, AppError>) -> Self {
        match result {
            Ok(Some(content)) => Self::ready(content),
            Ok(None) => Self::empty(),
            Err(e) => {
                tracing::error!(section, "Failed to load section: {}", e);
                Self::unavailable()
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == SectionStatus::Ready
    }
}

impl<E> SectionView<Vec<E>> {
    /// Resolve a list fetch; an empty list is an empty section.
    pub fn resolve_list(section: &'static str, result: Result<Vec<E>, AppError>) -> Self {
        Self::resolve(
            section,
            result.map(|items| (!items.is_empty()).then_some(items)),
        )
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroContent {
    pub name: String,
    pub title: String,
    pub initials: String,
    pub profile: String,
    pub cv_path: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    pub about_me: String,
    pub about_quote: String,
    pub profile: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationContent {
    pub education: Vec<Entry<EducationEntry>>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactContent {
    pub email: String,
    pub phone: String,
    pub location: String,
    pub social: BTreeMap<String, String>,
}

/// The whole public page, top to bottom.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPage {
    pub hero: SectionView<HeroContent>,
    pub about: SectionView<AboutContent>,
    pub services: SectionView<Vec<Entry<Service>>>,
    pub skills: SectionView<Vec<Entry<SkillCategory>>>,
    pub experience: SectionView<Vec<Entry<ExperienceEntry>>>,
    pub education_and_certifications: SectionView<EducationContent>,
    pub contact: SectionView<ContactContent>,
}

impl PortfolioPage {
    /// Fetch every section concurrently. Never fails as a whole.
    pub async fn load(repo: &Repository) -> Self {
        let (metadata, services, skills, experience, education) = tokio::join!(
            repo.get_site_metadata(),
            repo.list::<Service>(),
            repo.list::<SkillCategory>(),
            repo.list::<ExperienceEntry>(),
            repo.list::<EducationEntry>(),
        );

        let education_and_certifications = match education {
            Ok(education) => {
                let certifications = match &metadata {
                    Ok(Some(m)) => m.details.certifications.clone(),
                    Ok(None) => Vec::new(),
                    Err(e) => {
                        tracing::warn!("Certifications unavailable: {}", e);
                        Vec::new()
                    }
                };
                let content = (!education.is_empty() || !certifications.is_empty()).then(|| {
                    EducationContent {
                        education,
                        certifications,
                    }
                });
                SectionView::resolve("educationAndCertifications", Ok(content))
            }
            Err(e) => SectionView::resolve("educationAndCertifications", Err(e)),
        };

        Self {
            hero: from_metadata("hero", &metadata, |d| HeroContent {
                name: d.name.clone(),
                title: d.title.clone(),
                initials: d.initials.clone(),
                profile: d.profile.clone(),
                cv_path: d.cv_path.clone(),
            }),
            about: from_metadata("about", &metadata, |d| AboutContent {
                about_me: d.about_me.clone(),
                about_quote: d.about_quote.clone(),
                profile: d.profile.clone(),
            }),
            services: SectionView::resolve_list("services", services),
            skills: SectionView::resolve_list("skills", skills),
            experience: SectionView::resolve_list("experience", experience),
            education_and_certifications,
            contact: from_metadata("contact", &metadata, |d| ContactContent {
                email: d.email.clone(),
                phone: d.phone.clone(),
                location: d.location.clone(),
                social: d.social.clone(),
            }),
        }
    }
}

fn from_metadata<T>(
    section: &'static str,
    metadata: &Result<Option<SiteMetadata>, AppError>,
    project: impl FnOnce(&SiteDetails) -> T,
) -> SectionView<T> {
    match metadata {
        Ok(Some(m)) => SectionView::ready(project(&m.details)),
        Ok(None) => SectionView::empty(),
        Err(e) => {
            tracing::error!(section, "Failed to load section: {}", e);
            SectionView::unavailable()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{seed::seed_database, test_repository};

    #[test]
    fn test_list_resolution() {
        let empty: SectionView<Vec<u8>> = SectionView::resolve_list("x", Ok(Vec::new()));
        assert_eq!(empty.status, SectionStatus::Empty);

        let ready = SectionView::resolve_list("x", Ok(vec![1u8]));
        assert!(ready.is_ready());

        let failed: SectionView<Vec<u8>> =
            SectionView::resolve_list("x", Err(AppError::StoreUnavailable("down".into())));
        assert_eq!(failed.status, SectionStatus::Unavailable);
        assert!(failed.content.is_none());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let view: SectionView<()> = SectionView::loading();
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value, serde_json::json!({ "status": "loading" }));
    }

    #[tokio::test]
    async fn test_empty_store_page() {
        let (repo, _dir) = test_repository().await;

        let page = PortfolioPage::load(&repo).await;

        assert_eq!(page.hero.status, SectionStatus::Empty);
        assert_eq!(page.services.status, SectionStatus::Empty);
        assert_eq!(page.education_and_certifications.status, SectionStatus::Empty);
        assert_eq!(page.contact.status, SectionStatus::Empty);
    }

    #[tokio::test]
    async fn test_seeded_page() {
        let (repo, _dir) = test_repository().await;
        seed_database(&repo).await.unwrap();

        let page = PortfolioPage::load(&repo).await;

        assert!(page.hero.is_ready());
        assert_eq!(page.hero.content.as_ref().unwrap().initials, "AM");
        assert!(page.skills.is_ready());
        let education = page.education_and_certifications.content.unwrap();
        assert_eq!(education.education.len(), 1);
        assert_eq!(education.certifications.len(), 2);
        assert!(page.contact.content.unwrap().social.contains_key("github"));
    }
}
