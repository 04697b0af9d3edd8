use crate::utils::error::{AssignError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The name/phone pair a member submits. Values are kept exactly as typed;
/// trimming only applies to the emptiness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub phone: String,
}

impl Registration {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Result<Self> {
        let registration = Self {
            name: name.into(),
            phone: phone.into(),
        };
        if registration.name.trim().is_empty() || registration.phone.trim().is_empty() {
            return Err(AssignError::validation(
                "Both name and phone number are required.",
            ));
        }
        Ok(registration)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub family_name: String,
}

impl AssignmentResult {
    pub fn new(family_name: impl Into<String>) -> Self {
        Self {
            family_name: family_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The service answered with a non-2xx status.
    Status(u16),
    /// The request never produced a response (connect, timeout, ...).
    Transport(String),
    /// A 2xx response whose body could not be read as an assignment.
    Malformed(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(code) => write!(f, "service returned status {}", code),
            Self::Transport(msg) => write!(f, "transport error: {}", msg),
            Self::Malformed(msg) => write!(f, "malformed response: {}", msg),
        }
    }
}

/// What a single outbound call produced, before any fallback is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentOutcome {
    Success(AssignmentResult),
    Failure(FailureReason),
}

impl AssignmentOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentSource {
    Service,
    Fallback(FailureReason),
}

/// The family shown to the member, and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub result: AssignmentResult,
    pub source: AssignmentSource,
}

impl Resolution {
    pub fn family_name(&self) -> &str {
        &self.result.family_name
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, AssignmentSource::Fallback(_))
    }
}
