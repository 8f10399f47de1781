//! Record source trait (port)

use async_trait::async_trait;

use crate::domain::RawRecord;
use crate::error::CoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Content records of a page in `language`, optionally including
    /// records flagged for all languages.
    async fn fetch_records(
        &self,
        page_id: i64,
        language: i64,
        include_all_language_variants: bool,
    ) -> Result<Vec<RawRecord>, CoreError>;

    /// Content records by identifier. Callers pass a deduplicated list of at
    /// most 500 identifiers.
    async fn fetch_by_ids(&self, ids: &[i64], language: i64) -> Result<Vec<RawRecord>, CoreError>;

    /// Translation of `parent_id` in `language`, if one exists.
    async fn fetch_translation(
        &self,
        table: &str,
        parent_id: i64,
        language: i64,
    ) -> Result<Option<RawRecord>, CoreError>;

    /// Any record of any table by identifier.
    async fn find_record(&self, table: &str, uid: i64) -> Result<Option<RawRecord>, CoreError>;
}
