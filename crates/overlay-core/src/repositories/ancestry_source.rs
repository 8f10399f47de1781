//! Page tree (rootline) trait (port)

use async_trait::async_trait;

use crate::error::CoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AncestrySource: Send + Sync {
    /// Whether `candidate_ancestor_id` appears in the rootline of `page_id`
    /// (the page itself excluded).
    async fn is_descendant_of(
        &self,
        page_id: i64,
        candidate_ancestor_id: i64,
    ) -> Result<bool, CoreError>;
}
