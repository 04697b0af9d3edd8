use crate::utils::error::{AssignError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// The assignment endpoint must be an absolute http(s) URL with a host. A
/// relative path such as `/api/assign-family` only works from a served page.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    let invalid = |reason: String| AssignError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: url_str.to_string(),
        reason,
    };

    if url_str.trim().is_empty() {
        return Err(invalid("URL cannot be empty".to_string()));
    }
    if url_str.starts_with('/') {
        return Err(invalid(
            "Relative paths are not supported, prefix the service host (e.g. http://localhost:8080)"
                .to_string(),
        ));
    }

    let url = Url::parse(url_str).map_err(|e| invalid(format!("Invalid URL format: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("Unsupported URL scheme: {}", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("URL has no host".to_string()));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(AssignError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AssignError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// A candidate list must be non-empty, with no blank or repeated names.
pub fn validate_candidates(field_name: &str, candidates: &[String]) -> Result<()> {
    if candidates.is_empty() {
        return Err(AssignError::ConfigValidationError {
            field: field_name.to_string(),
            message: "At least one family name is required".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for name in candidates {
        validate_non_empty_string(field_name, name)?;
        if !seen.insert(name.trim()) {
            return Err(AssignError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.clone(),
                reason: "Duplicate family name".to_string(),
            });
        }
    }

    Ok(())
}
