pub mod client;
pub mod fallback;

pub use crate::domain::model::{
    AssignmentOutcome, AssignmentResult, AssignmentSource, FailureReason, Registration,
    Resolution,
};
pub use crate::domain::ports::{AssignmentService, ConfigProvider, FallbackMode, ResponseField};
pub use crate::utils::error::Result;
