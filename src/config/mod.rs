pub mod toml_config;

pub use toml_config::AppConfig;

#[cfg(feature = "cli")]
use crate::core::{FallbackMode, ResponseField};
#[cfg(feature = "cli")]
use crate::utils::logger::LogFormat;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "fellowship-assign")]
#[command(about = "Register for a fellowship family and see your assignment")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Full name; together with --phone submits once without prompting
    #[arg(long)]
    pub name: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Assignment service URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Response field carrying the family name: familyName, family or auto
    #[arg(long)]
    pub response_field: Option<ResponseField>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long)]
    pub fallback_delay_ms: Option<u64>,

    /// Report service failures instead of assigning a local family
    #[arg(long)]
    pub no_fallback: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the config file (or defaults) and applies command line overrides on top.
    pub fn load_app_config(&self) -> crate::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.service.endpoint = endpoint.clone();
            tracing::debug!("🔧 Endpoint overridden to: {}", endpoint);
        }
        if let Some(field) = self.response_field {
            config.service.response_field = field;
        }
        if let Some(timeout) = self.timeout_seconds {
            config.service.timeout_seconds = timeout;
        }
        if let Some(delay) = self.fallback_delay_ms {
            config.fallback.delay_ms = delay;
        }
        if self.no_fallback {
            config.fallback.mode = FallbackMode::Fail;
            tracing::debug!("🔧 Fallback disabled");
        }
    }

    /// Both fields given on the command line means a single non-interactive run.
    pub fn registration_args(&self) -> Option<(&str, &str)> {
        match (&self.name, &self.phone) {
            (Some(name), Some(phone)) => Some((name.as_str(), phone.as_str())),
            _ => None,
        }
    }
}
