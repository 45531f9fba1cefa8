//! Validated URL and record types.

mod records;
mod service_url;

pub use records::{ExamProfile, Profile, TestStatus};
pub use service_url::ServiceUrl;

pub(crate) use records::string_or_number;
