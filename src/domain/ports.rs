use crate::domain::model::{AssignmentOutcome, Registration};
use async_trait::async_trait;
use std::time::Duration;

/// The external family assignment service.
///
/// Implementations never return an error: every way a call can go wrong is
/// folded into [`AssignmentOutcome::Failure`] so the caller's fallback
/// policy sees all failures the same way.
#[async_trait]
pub trait AssignmentService: Send + Sync {
    async fn assign(&self, registration: &Registration) -> AssignmentOutcome;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn response_field(&self) -> ResponseField;
    fn request_timeout(&self) -> Duration;
    fn fallback_mode(&self) -> FallbackMode;
    fn fallback_delay(&self) -> Duration;
    fn fallback_families(&self) -> &[String];
    fn fallback_seed(&self) -> Option<u64>;
}

/// Which JSON field of a success body carries the family name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ResponseField {
    #[serde(rename = "familyName")]
    FamilyName,
    #[serde(rename = "family")]
    Family,
    /// `familyName` first, then `family`.
    #[default]
    #[serde(rename = "auto")]
    Auto,
}

impl ResponseField {
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            Self::FamilyName => &["familyName"],
            Self::Family => &["family"],
            Self::Auto => &["familyName", "family"],
        }
    }
}

impl std::str::FromStr for ResponseField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "familyName" | "family_name" => Ok(Self::FamilyName),
            "family" => Ok(Self::Family),
            "auto" => Ok(Self::Auto),
            other => Err(format!(
                "unknown response field '{}', expected familyName, family or auto",
                other
            )),
        }
    }
}

/// What to do with a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackMode {
    /// Wait, then show a locally chosen family as if the call succeeded.
    #[default]
    Mask,
    /// Report the failure to the member.
    Fail,
}
