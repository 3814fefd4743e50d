//! Bundled starter dataset for an empty store.
//!
//! Seeding always inserts: running it twice duplicates every list record.

use std::collections::BTreeMap;

use serde::Serialize;

use super::Repository;
use crate::errors::AppError;
use crate::models::{EducationEntry, ExperienceEntry, Service, SiteDetails, SkillCategory};

/// Number of records written per collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub services: usize,
    pub experience: usize,
    pub education: usize,
    pub skill_categories: usize,
    pub metadata: bool,
}

/// Insert the bundled dataset.
pub async fn seed_database(repo: &Repository) -> Result<SeedReport, AppError> {
    tracing::info!("Database seeding started");
    let mut report = SeedReport::default();

    for service in services() {
        repo.create(&service).await?;
        report.services += 1;
    }
    tracing::info!("Seeded {} services", report.services);

    for entry in experience() {
        repo.create(&entry).await?;
        report.experience += 1;
    }
    tracing::info!("Seeded {} experience entries", report.experience);

    for entry in education() {
        repo.create(&entry).await?;
        report.education += 1;
    }
    tracing::info!("Seeded {} education entries", report.education);

    for category in skill_categories() {
        repo.create(&category).await?;
        report.skill_categories += 1;
    }
    tracing::info!("Seeded {} skill categories", report.skill_categories);

    repo.put_site_metadata(&site_details()).await?;
    report.metadata = true;
    tracing::info!("Seeded site metadata");

    tracing::info!("Database seeding completed");
    Ok(report)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn services() -> Vec<Service> {
    [
        (
            "Finance Systems Implementation",
            "End-to-end configuration of cloud ERP accounting modules.",
            "Server",
            &["Chart of accounts design", "Data migration", "User acceptance testing"][..],
        ),
        (
            "Management Reporting",
            "Budgeting, forecasting and board-ready reporting packs.",
            "BarChart3",
            &["Monthly packs", "Variance analysis"][..],
        ),
        (
            "Process Automation",
            "Removing manual steps from close and reconciliation.",
            "Settings",
            &["Saved searches", "Workflow design", "Scheduled scripts"][..],
        ),
        (
            "Training and Adoption",
            "Hands-on training that gets teams using new systems.",
            "Users",
            &["Role-based guides", "Workshops"][..],
        ),
    ]
    .into_iter()
    .map(|(title, description, icon, features)| Service {
        title: title.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        features: strings(features),
        order: 0,
    })
    .collect()
}

fn experience() -> Vec<ExperienceEntry> {
    vec![
        ExperienceEntry {
            role: "Finance Systems Consultant".to_string(),
            company: "Northwind Consulting".to_string(),
            company_subtitle: Some("ERP partner".to_string()),
            dates: "Mar 2021 - Present".to_string(),
            duration: "3 yrs".to_string(),
            location: Some("London, England".to_string()),
            description: "Leads accounting configuration and data migration for mid-market clients."
                .to_string(),
            skills: strings(&["NetSuite", "Data migration", "Stakeholder engagement"]),
            order: 0,
            is_active: true,
        },
        ExperienceEntry {
            role: "Management Accountant".to_string(),
            company: "Contoso Retail".to_string(),
            company_subtitle: None,
            dates: "Jun 2015 - Feb 2021".to_string(),
            duration: "5 yrs 9 mos".to_string(),
            location: None,
            description: "Owned month-end close, budgeting and forecasting.".to_string(),
            skills: strings(&["Budgeting", "Forecasting", "Reporting"]),
            order: 0,
            is_active: true,
        },
    ]
}

fn education() -> Vec<EducationEntry> {
    vec![EducationEntry {
        degree: "BSc".to_string(),
        field: "Accounting and Finance".to_string(),
        institution: "University of Example".to_string(),
        dates: "2010 - 2013".to_string(),
        order: 0,
    }]
}

fn skill_categories() -> Vec<SkillCategory> {
    [
        ("Core Skills", &["Financial analysis", "Budgeting", "Forecasting"][..]),
        ("Technical Skills", &["NetSuite", "Power BI", "Excel"][..]),
        ("Business Skills", &["Stakeholder engagement", "Agile delivery"][..]),
    ]
    .into_iter()
    .map(|(name, skills)| SkillCategory {
        name: name.to_string(),
        skills: strings(skills),
        order: 0,
    })
    .collect()
}

fn site_details() -> SiteDetails {
    let name = "Alex Morgan";
    let title = "Finance Automation Consultant";

    let mut social = BTreeMap::new();
    social.insert("github".to_string(), "https://github.com/example".to_string());
    social.insert(
        "linkedin".to_string(),
        "https://www.linkedin.com/in/example".to_string(),
    );
    social.insert("email".to_string(), "mailto:hello@example.com".to_string());

    SiteDetails {
        name: name.to_string(),
        title: title.to_string(),
        initials: "AM".to_string(),
        email: "hello@example.com".to_string(),
        phone: "+44 20 0000 0000".to_string(),
        location: "London Area, England".to_string(),
        cv_path: "/cv.pdf".to_string(),
        profile: "Finance systems professional focused on accounting configuration, \
                  data migration and end-user adoption."
            .to_string(),
        about_me: format!("Welcome to my portfolio! I'm {}, {}.", name, title),
        about_quote: "I am deeply committed to my work.".to_string(),
        social,
        certifications: strings(&["NetSuite ERP Consultant", "Chartered Management Accountant"]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_repository;

    #[tokio::test]
    async fn test_seed_populates_every_collection() {
        let (repo, _dir) = test_repository().await;

        let report = seed_database(&repo).await.unwrap();

        assert_eq!(report.services, repo.list::<Service>().await.unwrap().len());
        assert_eq!(report.experience, 2);
        assert_eq!(report.education, 1);
        assert_eq!(report.skill_categories, 3);
        assert!(report.metadata);

        // Equal orders keep insertion order.
        let names: Vec<String> = repo
            .list::<SkillCategory>()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.fields.name)
            .collect();
        assert_eq!(names, vec!["Core Skills", "Technical Skills", "Business Skills"]);

        let metadata = repo.get_site_metadata().await.unwrap().unwrap();
        assert_eq!(metadata.details.initials, "AM");
        assert_eq!(metadata.details.certifications.len(), 2);
    }

    #[tokio::test]
    async fn test_seed_twice_duplicates_records() {
        let (repo, _dir) = test_repository().await;

        seed_database(&repo).await.unwrap();
        seed_database(&repo).await.unwrap();

        assert_eq!(repo.count::<SkillCategory>().await.unwrap(), 6);
        assert_eq!(repo.count::<EducationEntry>().await.unwrap(), 2);
        // The singleton is overwritten, not duplicated.
        assert_eq!(repo.list_certifications().await.unwrap().len(), 2);
    }
}
