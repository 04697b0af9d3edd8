use crate::core::{
    AssignmentOutcome, AssignmentResult, AssignmentService, ConfigProvider, FailureReason,
    Registration, ResponseField,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api/assign-family";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts registrations to the assignment service as JSON.
pub struct HttpAssignmentService {
    client: Client,
    endpoint: String,
    response_field: ResponseField,
}

impl HttpAssignmentService {
    pub fn new(
        endpoint: impl Into<String>,
        response_field: ResponseField,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            response_field,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.endpoint(),
            config.response_field(),
            config.request_timeout(),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Reads the family name out of a success body. Blank names count as missing.
pub fn extract_family_name(body: &serde_json::Value, field: ResponseField) -> Option<String> {
    let obj = body.as_object()?;
    field
        .candidates()
        .iter()
        .filter_map(|key| obj.get(*key))
        .filter_map(|value| value.as_str())
        .find(|name| !name.trim().is_empty())
        .map(str::to_string)
}

#[async_trait]
impl AssignmentService for HttpAssignmentService {
    async fn assign(&self, registration: &Registration) -> AssignmentOutcome {
        tracing::debug!("Posting registration to: {}", self.endpoint);

        let response = match self
            .client
            .post(&self.endpoint)
            .json(registration)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Assignment request failed: {}", e);
                return AssignmentOutcome::Failure(FailureReason::Transport(e.to_string()));
            }
        };

        let status = response.status();
        tracing::debug!("Assignment response status: {}", status);

        if !status.is_success() {
            return AssignmentOutcome::Failure(FailureReason::Status(status.as_u16()));
        }

        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(e) => return AssignmentOutcome::Failure(FailureReason::Malformed(e.to_string())),
        };

        match extract_family_name(&body, self.response_field) {
            Some(family_name) => AssignmentOutcome::Success(AssignmentResult::new(family_name)),
            None => AssignmentOutcome::Failure(FailureReason::Malformed(format!(
                "no family name under {}",
                self.response_field.candidates().join(" or ")
            ))),
        }
    }
}
