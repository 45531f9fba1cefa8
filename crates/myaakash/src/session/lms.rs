//! Learning-management accessors: tests and syllabi.

use serde_json::Value;
use tracing::{debug, instrument};

use crate::Result;
use crate::api::{
    NO_MORE_PAGES, NO_PARAMS, TEST, TESTS, TESTS_PAGE_SIZE, TestQuery, TestsPage, TestsQuery,
    decode, syllabus,
};
use crate::types::TestStatus;

use super::AakashSession;

const STATUS_FILTER: &str = "status";

impl AakashSession {
    /// List every test with the given status.
    ///
    /// Pages of [`TESTS_PAGE_SIZE`] are requested starting at page 1, following
    /// `pagination.next_page` until the service returns `-1`. The tests of all
    /// pages are returned in page order.
    #[instrument(skip(self))]
    pub async fn get_tests(&self, status: TestStatus) -> Result<Vec<Value>> {
        let mut tests = Vec::new();
        let mut next_page = 1;

        while next_page != NO_MORE_PAGES {
            let query = TestsQuery {
                filter: STATUS_FILTER,
                page_number: next_page,
                page_size: TESTS_PAGE_SIZE,
                status: status.as_str(),
            };

            let data = self.fetch(&self.config.lms_api, TESTS, &query).await?;
            let page: TestsPage = decode(data)?;
            debug!(page = next_page, count = page.tests.len(), "Fetched tests page");

            tests.extend(page.tests);
            next_page = page.pagination.next_page;
        }

        Ok(tests)
    }

    /// Details of one test.
    #[instrument(skip(self))]
    pub async fn get_test(&self, test_id: &str, short_code: &str) -> Result<Value> {
        let query = TestQuery {
            test_id,
            test_short_code: short_code,
        };
        self.fetch(&self.config.lms_api, TEST, &query).await
    }

    /// A syllabus by id.
    #[instrument(skip(self))]
    pub async fn get_syllabus(&self, syllabus_id: &str) -> Result<Value> {
        self.fetch_resource(&self.config.lms_api, syllabus(syllabus_id), NO_PARAMS)
            .await
    }
}
