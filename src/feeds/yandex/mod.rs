//! Schema B feed engine: streaming validation and publication of Yandex
//! feed documents.

mod publisher;
mod report;
mod validator;

pub use publisher::{FeedPublisher, PublishError, PublishOutcome};
pub use report::{codes, Issue, ValidationReport};
pub use validator::validate;
