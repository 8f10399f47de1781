//! Host ACL trait (port)

use async_trait::async_trait;

use crate::domain::{Actor, ContentRecord};
use crate::error::CoreError;
use crate::services::RootlineCache;

/// Record and page level permission rules of the host CMS. Page tree
/// questions go through the request's `rootline` so repeated checks on the
/// same page stay cheap.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionPolicy: Send + Sync {
    async fn can_edit_record(
        &self,
        actor: &Actor,
        table: &str,
        record: &ContentRecord,
        rootline: &RootlineCache,
    ) -> Result<bool, CoreError>;

    async fn has_page_access(
        &self,
        actor: &Actor,
        page_id: i64,
        rootline: &RootlineCache,
    ) -> Result<bool, CoreError>;
}
