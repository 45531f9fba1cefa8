//! Endpoint paths and request/response types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Session service
// ============================================================================

/// POST to log in, PUT to refresh.
pub const USER_SESSION: &str = "/user/session";

pub const USER: &str = "/user";

pub const LOGOUT: &str = "/logout";

// ============================================================================
// Learning-management service
// ============================================================================

pub const TESTS: &str = "/tests";

pub const TEST: &str = "/test";

/// Path segments of a syllabus, for [`ServiceUrl::resource`](crate::ServiceUrl::resource).
pub fn syllabus(syllabus_id: &str) -> [&str; 2] {
    ["syllabus", syllabus_id]
}

// ============================================================================
// Channel (iTutor) service
// ============================================================================

/// Served by channel v1.
pub const PACKAGES: &str = "/itutor/package";

/// Served by channel v1.
pub fn subjects(package_id: &str) -> [&str; 4] {
    ["itutor", "package", package_id, "subject"]
}

/// Served by channel v2.
pub fn chapter<'a>(package_id: &'a str, course_id: &'a str) -> [&'a str; 6] {
    ["itutor", "package", package_id, "course", course_id, "chapter"]
}

/// Served by channel v2.
pub fn asset<'a>(
    package_id: &'a str,
    course_id: &'a str,
    chapter_id: &'a str,
    asset_id: &'a str,
) -> [&'a str; 9] {
    [
        "itutor", "package", package_id, "course", course_id, "chapter", chapter_id, "asset",
        asset_id,
    ]
}

// ============================================================================
// Exam platform
// ============================================================================

pub const EXAM_INIT: &str = "/exam/init";

pub const EXAM_ANALYSIS_OVERALL: &str = "/exam/analysis/overall";

pub const EXAM_ATTEMPT: &str = "/exam/attempt";

pub const EXAM_ANALYSIS_ANSWER_KEY: &str = "/exam/analysis/answer-key";

pub const EXAM_ANALYSIS_COMPARATIVE: &str = "/exam/analysis/comparative";

pub const EXAM_ANALYSIS_CHAPTER: &str = "/exam/analysis/chapter";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Fixed page size for the test listing.
pub const TESTS_PAGE_SIZE: u32 = 50;

/// `next_page` value marking the last page.
pub const NO_MORE_PAGES: i64 = -1;

/// An empty query string.
pub const NO_PARAMS: &[(&str, &str)] = &[];

/// Request body for password login.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub password: &'a str,
    pub profile: &'a str,
    pub psid_or_mobile: &'a str,
}

/// Request body for a token refresh.
#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Payload of a successful login or refresh.
#[derive(Debug, Deserialize)]
pub struct SessionGrant {
    pub access_token: String,
    pub refresh_token: String,
    pub aakash_login_value: String,
    pub web_session_key: String,
    pub web_session_value: String,
    #[serde(deserialize_with = "crate::types::string_or_number")]
    pub user_id: String,
}

/// Query parameters for one page of the test listing.
#[derive(Debug, Serialize)]
pub struct TestsQuery<'a> {
    pub filter: &'a str,
    pub page_number: i64,
    pub page_size: u32,
    pub status: &'a str,
}

/// Query parameters for a single test.
#[derive(Debug, Serialize)]
pub struct TestQuery<'a> {
    pub test_id: &'a str,
    pub test_short_code: &'a str,
}

/// Query parameters for the subjects of a course.
#[derive(Debug, Serialize)]
pub struct SubjectsQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<&'a str>,
    pub course_id: &'a str,
}

/// Query parameters for a chapter's assets.
#[derive(Debug, Serialize)]
pub struct ChapterQuery<'a> {
    pub node_id: &'a str,
}

/// Query parameters for a single asset.
#[derive(Debug, Serialize)]
pub struct AssetQuery<'a> {
    pub asset_type: &'a str,
}

/// Query parameters for an exam attempt.
#[derive(Debug, Serialize)]
pub struct AttemptQuery {
    pub consumed_time: bool,
}

/// Payload of one page of the test listing.
#[derive(Debug, Deserialize)]
pub struct TestsPage {
    #[serde(default)]
    pub tests: Vec<serde_json::Value>,
    pub pagination: Pagination,
}

/// Page cursor; `next_page` is [`NO_MORE_PAGES`] on the last page.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub next_page: i64,
}
