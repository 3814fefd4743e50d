//! Data models for the portfolio content.
//!
//! Field names serialize in camelCase to match the documents the site frontend reads.

mod content;
mod education;
mod experience;
mod service;
mod site;
mod skill;
mod timestamp;

pub use content::*;
pub use education::*;
pub use experience::*;
pub use service::*;
pub use site::*;
pub use skill::*;
pub use timestamp::*;
