use anyhow::Result;
use fellowship_assign::core::fallback::DEFAULT_FAMILIES;
use fellowship_assign::core::{AssignmentSource, FailureReason};
use fellowship_assign::{AppConfig, AssignError, FellowshipForm, Page, View};
use httpmock::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;
use tokio_test::{assert_err, assert_ok};

fn config_for(endpoint: String, extra: &str) -> Result<AppConfig> {
    let toml_content = format!(
        r#"
[service]
endpoint = "{}"
timeout_seconds = 5

[fallback]
delay_ms = 0
{}
"#,
        endpoint, extra
    );
    Ok(AppConfig::from_toml_str(&toml_content)?)
}

fn fill(form: &FellowshipForm<fellowship_assign::HttpAssignmentService>) {
    form.set_name("Ada Obi");
    form.set_phone("08012345678");
}

fn shown_family(view: View) -> Option<String> {
    match view {
        View::Result(result) => Some(result.family_name),
        View::Input(_) => None,
    }
}

#[tokio::test]
async fn test_service_assignment_is_displayed() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/assign-family")
            .header("content-type", "application/json")
            .json_body(serde_json::json!({"name": "Ada Obi", "phone": "08012345678"}));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"familyName": "Grace Family"}));
    });

    let config = config_for(server.url("/api/assign-family"), "")?;
    let form = FellowshipForm::from_config(&config)?;
    fill(&form);

    let resolution = assert_ok!(form.submit().await);

    api_mock.assert();
    assert_eq!(resolution.source, AssignmentSource::Service);
    assert_eq!(shown_family(form.view()).as_deref(), Some("Grace Family"));

    let page = Page::from_config(&config.page).render(&form.view());
    assert!(page.contains("Grace Family"));
    Ok(())
}

#[tokio::test]
async fn test_family_field_variant_is_supported() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/assign");
        then.status(201)
            .json_body(serde_json::json!({"family": "Hope Family", "members": 12}));
    });

    let mut config = config_for(server.url("/assign"), "")?;
    config.service.response_field = "family".parse().map_err(anyhow::Error::msg)?;
    let form = FellowshipForm::from_config(&config)?;
    fill(&form);

    assert_ok!(form.submit().await);

    api_mock.assert();
    assert_eq!(shown_family(form.view()).as_deref(), Some("Hope Family"));
    Ok(())
}

#[tokio::test]
async fn test_server_error_falls_back_to_candidate() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/assign-family");
        then.status(500);
    });

    let config = config_for(server.url("/api/assign-family"), "")?;
    let form = FellowshipForm::from_config(&config)?;
    fill(&form);

    let resolution = assert_ok!(form.submit().await);

    api_mock.assert();
    assert_eq!(
        resolution.source,
        AssignmentSource::Fallback(FailureReason::Status(500))
    );
    let family = shown_family(form.view()).unwrap_or_default();
    assert!(DEFAULT_FAMILIES.contains(&family.as_str()));
    Ok(())
}

#[tokio::test]
async fn test_malformed_success_falls_back() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/assign-family");
        then.status(200).json_body(serde_json::json!({"status": "ok"}));
    });

    let config = config_for(server.url("/api/assign-family"), "")?;
    let form = FellowshipForm::from_config(&config)?;
    fill(&form);

    let resolution = assert_ok!(form.submit().await);

    api_mock.assert();
    assert!(resolution.is_fallback());
    assert!(DEFAULT_FAMILIES.contains(&resolution.family_name()));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_service_falls_back() -> Result<()> {
    let config = config_for("http://127.0.0.1:9/api/assign-family".to_string(), "")?;
    let form = FellowshipForm::from_config(&config)?;
    fill(&form);

    let resolution = assert_ok!(form.submit().await);

    assert!(matches!(
        resolution.source,
        AssignmentSource::Fallback(FailureReason::Transport(_))
    ));
    assert!(shown_family(form.view()).is_some());
    Ok(())
}

#[tokio::test]
async fn test_blank_fields_never_reach_the_service() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/assign-family");
        then.status(200)
            .json_body(serde_json::json!({"familyName": "Grace Family"}));
    });

    let config = config_for(server.url("/api/assign-family"), "")?;
    let form = FellowshipForm::from_config(&config)?;
    form.set_name("   ");
    form.set_phone("08012345678");

    let err = assert_err!(form.submit().await);

    assert!(matches!(err, AssignError::ValidationError { .. }));
    api_mock.assert_hits(0);
    assert!(matches!(form.view(), View::Input(_)));
    Ok(())
}

#[tokio::test]
async fn test_no_fallback_surfaces_failure() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/assign-family");
        then.status(502);
    });

    let config = config_for(server.url("/api/assign-family"), r#"mode = "fail""#)?;
    let form = FellowshipForm::from_config(&config)?;
    fill(&form);

    let err = assert_err!(form.submit().await);

    api_mock.assert();
    assert!(matches!(
        err,
        AssignError::AssignmentFailed {
            reason: FailureReason::Status(502)
        }
    ));
    assert!(matches!(form.view(), View::Input(_)));
    Ok(())
}

#[tokio::test]
async fn test_configured_families_from_file() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/assign-family");
        then.status(404);
    });

    let mut temp_file = NamedTempFile::new()?;
    let toml_content = format!(
        r#"
[service]
endpoint = "{}"

[fallback]
delay_ms = 0
families = ["Covenant Family"]
"#,
        server.url("/api/assign-family")
    );
    temp_file.write_all(toml_content.as_bytes())?;

    let config = AppConfig::from_file(temp_file.path())?;
    let form = FellowshipForm::from_config(&config)?;
    fill(&form);

    let resolution = assert_ok!(form.submit().await);

    api_mock.assert();
    assert_eq!(resolution.family_name(), "Covenant Family");
    Ok(())
}

#[tokio::test]
async fn test_reset_then_resubmit_calls_service_again() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/api/assign-family");
        then.status(200)
            .json_body(serde_json::json!({"familyName": "Joy Family"}));
    });

    let config = config_for(server.url("/api/assign-family"), "")?;
    let form = FellowshipForm::from_config(&config)?;
    fill(&form);
    assert_ok!(form.submit().await);

    form.reset();
    let state = form.state();
    assert!(state.name.is_empty() && state.phone.is_empty());
    assert_eq!(state.assigned_family, None);

    fill(&form);
    assert_ok!(form.submit().await);

    api_mock.assert_hits(2);
    Ok(())
}
