//! Admin area: section directory and edit-buffer controllers.

mod form;
mod metadata;

pub use form::*;
pub use metadata::*;

/// Client-side prefix of the admin area.
pub const ADMIN_BASE_PATH: &str = "/secret-section";

/// Content edited by an admin section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionContent {
    Services,
    Experience,
    Education,
    SkillCategories,
    SiteMetadata,
}

/// One editable section of the admin area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminSection {
    pub id: &'static str,
    pub content: SectionContent,
    pub name: &'static str,
    pub description: &'static str,
    /// Client route, relative to [`ADMIN_BASE_PATH`]
    pub route: &'static str,
    /// API collection route, relative to `/api/admin`
    pub api_route: &'static str,
}

/// Admin sections in dashboard order.
pub const ADMIN_SECTIONS: [AdminSection; 5] = [
    AdminSection {
        id: "services",
        content: SectionContent::Services,
        name: "Services",
        description: "Manage service offerings",
        route: "/services",
        api_route: "/services",
    },
    AdminSection {
        id: "experience",
        content: SectionContent::Experience,
        name: "Experience",
        description: "Manage work experience entries",
        route: "/experience",
        api_route: "/experience",
    },
    AdminSection {
        id: "education",
        content: SectionContent::Education,
        name: "Education",
        description: "Manage education entries",
        route: "/education",
        api_route: "/education",
    },
    AdminSection {
        id: "skills",
        content: SectionContent::SkillCategories,
        name: "Skills",
        description: "Manage skill categories",
        route: "/skills",
        api_route: "/skill-categories",
    },
    AdminSection {
        id: "metadata",
        content: SectionContent::SiteMetadata,
        name: "Site Metadata",
        description: "Manage site information and social links",
        route: "/metadata",
        api_route: "/site/metadata",
    },
];

impl AdminSection {
    pub fn client_path(&self) -> String {
        format!("{}{}", ADMIN_BASE_PATH, self.route)
    }
}
