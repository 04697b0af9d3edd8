use crate::domain::model::FailureReason;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssignError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("A submission is already in progress")]
    SubmissionPending,

    #[error("Submission was discarded because the form was reset")]
    StaleSubmission,

    #[error("Family assignment failed: {reason}")]
    AssignmentFailed { reason: FailureReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AssignError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::AssignmentFailed { .. } => ErrorCategory::Network,
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::ValidationError { .. } | Self::SubmissionPending | Self::StaleSubmission => {
                ErrorCategory::Input
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SubmissionPending | Self::StaleSubmission => ErrorSeverity::Low,
            Self::ApiError(_) | Self::AssignmentFailed { .. } => ErrorSeverity::Medium,
            Self::ValidationError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } => message.clone(),
            Self::SubmissionPending => "Assigning family... please wait.".to_string(),
            Self::StaleSubmission => "The form was reset before the assignment arrived.".to_string(),
            Self::AssignmentFailed { .. } | Self::ApiError(_) => {
                "We could not reach the family assignment service.".to_string()
            }
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            Self::IoError(e) => format!("Could not read or write: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check the service endpoint and your network connection, or enable the fallback"
            }
            ErrorCategory::Configuration => {
                "Check the config file and command line flags against the documented keys"
            }
            ErrorCategory::Input => "Fill in both your full name and phone number",
            ErrorCategory::System => "Check terminal input and file permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, AssignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_is_input_category() {
        let err = AssignError::validation("Both name and phone number are required.");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(
            err.user_friendly_message(),
            "Both name and phone number are required."
        );
    }

    #[test]
    fn test_assignment_failure_is_network_category() {
        let err = AssignError::AssignmentFailed {
            reason: FailureReason::Status(503),
        };
        assert_eq!(err.category(), ErrorCategory::Network);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_config_errors_map_to_exit_code_one() {
        let err = AssignError::InvalidConfigValueError {
            field: "service.endpoint".to_string(),
            value: "/api/assign-family".to_string(),
            reason: "URL has no host".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().starts_with("Configuration problem:"));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Low < ErrorSeverity::Medium);
        assert!(ErrorSeverity::High < ErrorSeverity::Critical);
    }
}
