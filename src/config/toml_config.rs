use crate::core::client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
use crate::core::fallback::{default_families, DEFAULT_FALLBACK_DELAY};
use crate::core::{ConfigProvider, FallbackMode, ResponseField};
use crate::utils::error::{AssignError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_TITLE: &str = "Cherubim & Seraphim Campus Fellowship";
pub const DEFAULT_SUBTITLE: &str = "Unilag Chapter - Family Assignment";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub fallback: FallbackConfig,
    pub page: PageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub response_field: ResponseField,
    pub timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            response_field: ResponseField::default(),
            timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub mode: FallbackMode,
    pub delay_ms: u64,
    pub families: Vec<String>,
    pub seed: Option<u64>,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            mode: FallbackMode::default(),
            delay_ms: DEFAULT_FALLBACK_DELAY.as_millis() as u64,
            families: default_families(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub subtitle: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex is valid"))
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AssignError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| AssignError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left untouched.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for AppConfig {
    fn endpoint(&self) -> &str {
        &self.service.endpoint
    }

    fn response_field(&self) -> ResponseField {
        self.service.response_field
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.service.timeout_seconds)
    }

    fn fallback_mode(&self) -> FallbackMode {
        self.fallback.mode
    }

    fn fallback_delay(&self) -> Duration {
        Duration::from_millis(self.fallback.delay_ms)
    }

    fn fallback_families(&self) -> &[String] {
        &self.fallback.families
    }

    fn fallback_seed(&self) -> Option<u64> {
        self.fallback.seed
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("service.endpoint", &self.service.endpoint)?;
        validation::validate_positive_number(
            "service.timeout_seconds",
            self.service.timeout_seconds,
            1,
        )?;
        validation::validate_candidates("fallback.families", &self.fallback.families)?;
        validation::validate_non_empty_string("page.title", &self.page.title)?;
        validation::validate_non_empty_string("page.subtitle", &self.page.subtitle)?;
        Ok(())
    }
}
