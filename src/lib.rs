pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::{
    form::{FellowshipForm, FormState, View},
    page::Page,
};
pub use config::AppConfig;
pub use crate::core::{client::HttpAssignmentService, fallback::FallbackPolicy};
pub use utils::error::{AssignError, Result};
