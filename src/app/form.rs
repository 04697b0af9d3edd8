//! The registration form: two fields, one submit, and a result screen.
//!
//! State lives behind a mutex that is never held across an `.await`, so a
//! form can be shared by reference while a submission is in flight. The
//! pending flag doubles as the disabled state of the submit action.

use crate::core::client::HttpAssignmentService;
use crate::core::fallback::FallbackPolicy;
use crate::core::{AssignmentService, ConfigProvider, Registration, Resolution};
use crate::utils::error::{AssignError, Result};
use std::sync::{Mutex, MutexGuard};

pub const SUBMIT_LABEL: &str = "Join Fellowship";
pub const SUBMITTING_LABEL: &str = "Assigning Family...";
pub const RESET_LABEL: &str = "Submit Another Registration";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// A transient message shown next to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    fn welcome(family_name: &str) -> Self {
        Self {
            title: "Welcome to your fellowship family! 🎉".to_string(),
            description: format!("You've been assigned to {}", family_name),
            variant: NoticeVariant::Default,
        }
    }

    fn missing_fields() -> Self {
        Self {
            title: "Please fill in all fields".to_string(),
            description: "Both name and phone number are required.".to_string(),
            variant: NoticeVariant::Destructive,
        }
    }

    fn assignment_failed() -> Self {
        Self {
            title: "Family assignment failed".to_string(),
            description: "We could not assign a family right now. Please try again.".to_string(),
            variant: NoticeVariant::Destructive,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub phone: String,
    pub assigned_family: Option<String>,
    pub is_submitting: bool,
    pub has_submitted: bool,
    pub last_notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    pub name: String,
    pub phone: String,
    pub submit_label: &'static str,
    pub submit_disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub family_name: String,
    pub reset_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Input(InputView),
    Result(ResultView),
}

#[derive(Debug, Default)]
struct Inner {
    state: FormState,
    // Advanced by every reset; a submission only applies within its own generation.
    generation: u64,
}

pub struct FellowshipForm<S: AssignmentService> {
    service: S,
    fallback: FallbackPolicy,
    inner: Mutex<Inner>,
}

impl FellowshipForm<HttpAssignmentService> {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Ok(Self::new(
            HttpAssignmentService::from_config(config)?,
            FallbackPolicy::from_config(config)?,
        ))
    }
}

impl<S: AssignmentService> FellowshipForm<S> {
    pub fn new(service: S, fallback: FallbackPolicy) -> Self {
        Self {
            service,
            fallback,
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        let mut inner = self.lock();
        match field {
            Field::Name => inner.state.name = value.into(),
            Field::Phone => inner.state.phone = value.into(),
        }
    }

    pub fn set_name(&self, value: impl Into<String>) {
        self.set_field(Field::Name, value);
    }

    pub fn set_phone(&self, value: impl Into<String>) {
        self.set_field(Field::Phone, value);
    }

    pub fn state(&self) -> FormState {
        self.lock().state.clone()
    }

    pub fn view(&self) -> View {
        let inner = self.lock();
        let state = &inner.state;
        match (&state.assigned_family, state.has_submitted) {
            (Some(family_name), true) => View::Result(ResultView {
                family_name: family_name.clone(),
                reset_label: RESET_LABEL,
            }),
            _ => View::Input(InputView {
                name: state.name.clone(),
                phone: state.phone.clone(),
                submit_label: if state.is_submitting {
                    SUBMITTING_LABEL
                } else {
                    SUBMIT_LABEL
                },
                submit_disabled: state.is_submitting,
            }),
        }
    }

    /// Back to an empty input view. A submission still in flight is discarded
    /// when it resolves, and submit stays disabled until then.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.generation += 1;
        let is_submitting = inner.state.is_submitting;
        inner.state = FormState {
            is_submitting,
            ..FormState::default()
        };
        tracing::debug!("Form reset (generation {})", inner.generation);
    }

    pub async fn submit(&self) -> Result<Resolution> {
        let (registration, generation) = {
            let mut inner = self.lock();
            let registration =
                match Registration::new(inner.state.name.clone(), inner.state.phone.clone()) {
                    Ok(registration) => registration,
                    Err(e) => {
                        inner.state.last_notice = Some(Notice::missing_fields());
                        return Err(e);
                    }
                };

            if inner.state.is_submitting {
                tracing::debug!("Submit ignored while a request is pending");
                return Err(AssignError::SubmissionPending);
            }

            inner.state.is_submitting = true;
            (registration, inner.generation)
        };

        tracing::debug!("📨 Submitting registration (generation {})", generation);
        let outcome = self.service.assign(&registration).await;
        tracing::debug!("Assignment service succeeded: {}", outcome.is_success());
        let resolved = self.fallback.resolve(outcome).await;

        let mut inner = self.lock();
        // Only one request is ever in flight, so this one owns the pending flag
        // even across a reset.
        inner.state.is_submitting = false;
        if inner.generation != generation {
            tracing::warn!("⚠️ Discarding assignment that resolved after a reset");
            return Err(AssignError::StaleSubmission);
        }

        match resolved {
            Ok(resolution) => {
                let family_name = resolution.family_name().to_string();
                tracing::info!("✅ Assigned to {}", family_name);
                inner.state.last_notice = Some(Notice::welcome(&family_name));
                inner.state.assigned_family = Some(family_name);
                inner.state.has_submitted = true;
                Ok(resolution)
            }
            Err(e) => {
                inner.state.last_notice = Some(Notice::assignment_failed());
                Err(e)
            }
        }
    }
}
