//! Channel (iTutor) accessors: packages, courses, chapters, and assets.

use serde_json::Value;
use tracing::instrument;

use crate::Result;
use crate::api::{
    AssetQuery, ChapterQuery, NO_PARAMS, PACKAGES, SubjectsQuery, asset, chapter, field, subjects,
};

use super::AakashSession;

impl AakashSession {
    /// Packages the student is enrolled in.
    #[instrument(skip(self))]
    pub async fn get_packages(&self) -> Result<Vec<Value>> {
        let data = self
            .fetch(&self.config.channel_v1_api, PACKAGES, NO_PARAMS)
            .await?;
        field(data, "/packages")
    }

    /// Subjects of a course within a package, optionally narrowed to a class.
    #[instrument(skip(self))]
    pub async fn get_course(
        &self,
        package_id: &str,
        course_id: &str,
        class: Option<&str>,
    ) -> Result<Vec<Value>> {
        let query = SubjectsQuery { class, course_id };
        let data = self
            .fetch_resource(&self.config.channel_v1_api, subjects(package_id), &query)
            .await?;
        field(data, "/subjects")
    }

    /// Assets listed under one chapter.
    #[instrument(skip(self))]
    pub async fn get_chapter_assets(
        &self,
        package_id: &str,
        course_id: &str,
        chapter_id: &str,
    ) -> Result<Value> {
        let query = ChapterQuery {
            node_id: chapter_id,
        };
        self.fetch_resource(
            &self.config.channel_v2_api,
            chapter(package_id, course_id),
            &query,
        )
        .await
    }

    /// A single learning asset.
    #[instrument(skip(self))]
    pub async fn get_asset(
        &self,
        package_id: &str,
        course_id: &str,
        chapter_id: &str,
        asset_id: &str,
        asset_type: &str,
    ) -> Result<Value> {
        let query = AssetQuery { asset_type };
        let data = self
            .fetch_resource(
                &self.config.channel_v2_api,
                asset(package_id, course_id, chapter_id, asset_id),
                &query,
            )
            .await?;
        field(data, "/asset")
    }
}
