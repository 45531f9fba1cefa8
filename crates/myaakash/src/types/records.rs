//! Records returned by the session and exam services.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The signed-in student's profile, as of the last successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename(deserialize = "first_name"))]
    pub name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub psid: String,
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub courses: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub phone: Option<String>,
    #[serde(default)]
    pub mail: Option<String>,
}

/// Identity of a test-taking attempt, resolved when an exam session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamProfile {
    #[serde(rename(deserialize = "user_id"), deserialize_with = "string_or_number")]
    pub psid: String,
    #[serde(rename(deserialize = "we_user_id"), deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub exam_schedule_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub tenant_id: String,
    #[serde(rename(deserialize = "tenant_name"))]
    pub tenant: String,
    #[serde(rename(deserialize = "phoenix_test_id"), deserialize_with = "string_or_number")]
    pub test_id: String,
    #[serde(rename(deserialize = "cms_test_short_code"))]
    pub test_short_code: String,
}

/// Filter for the LMS test listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Live,
    Upcoming,
    Passed,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Live => "live",
            TestStatus::Upcoming => "upcoming",
            TestStatus::Passed => "passed",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The services are inconsistent about quoting numeric identifiers.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }
    }
}

pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_maps_first_name_and_numeric_ids() {
        let profile: Profile = serde_json::from_value(json!({
            "first_name": "Asha",
            "last_name": "Rao",
            "psid": "00001234567",
            "user_id": 98765,
            "dob": "2007-04-01",
            "courses": [{"course_id": "C1"}],
            "phone": 9876543210u64,
            "mail": "asha@example.com"
        }))
        .unwrap();

        assert_eq!(profile.name, "Asha");
        assert_eq!(profile.user_id, "98765");
        assert_eq!(profile.phone.as_deref(), Some("9876543210"));
        assert_eq!(profile.courses.len(), 1);
    }

    #[test]
    fn profile_tolerates_missing_optional_fields() {
        let profile: Profile = serde_json::from_value(json!({
            "first_name": "Asha",
            "psid": "00001234567",
            "user_id": "u-1",
            "phone": null
        }))
        .unwrap();

        assert!(profile.dob.is_none());
        assert!(profile.phone.is_none());
        assert!(profile.courses.is_empty());
    }

    #[test]
    fn exam_profile_renames_server_fields() {
        let exam: ExamProfile = serde_json::from_value(json!({
            "user_id": "00001234567",
            "we_user_id": "u-1",
            "exam_schedule_id": 42,
            "tenant_id": 7,
            "tenant_name": "aakash",
            "phoenix_test_id": "T-100",
            "cms_test_short_code": "AIATS-01"
        }))
        .unwrap();

        assert_eq!(exam.psid, "00001234567");
        assert_eq!(exam.user_id, "u-1");
        assert_eq!(exam.exam_schedule_id, "42");
        assert_eq!(exam.tenant, "aakash");
        assert_eq!(exam.test_id, "T-100");
        assert_eq!(exam.test_short_code, "AIATS-01");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(TestStatus::Upcoming).unwrap(), json!("upcoming"));
        assert_eq!(TestStatus::Passed.to_string(), "passed");
    }
}
