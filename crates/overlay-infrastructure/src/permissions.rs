// ============================================================================
// Overlay Infrastructure - Mount Permission Policy
// File: crates/overlay-infrastructure/src/permissions.rs
// Description: Host ACL based on editor page mounts and table/type lists
// ============================================================================

use async_trait::async_trait;
use tracing::debug;

use overlay_core::domain::{Actor, ContentRecord};
use overlay_core::error::CoreError;
use overlay_core::repositories::PermissionPolicy;
use overlay_core::services::RootlineCache;

pub const PAGES_TABLE: &str = "pages";

#[derive(Debug, Clone, Default)]
pub struct MountPermissionPolicy;

impl MountPermissionPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Page is one of the editor's mounts or lies below one.
    async fn in_mounts(
        &self,
        actor: &Actor,
        page_id: i64,
        rootline: &RootlineCache,
    ) -> Result<bool, CoreError> {
        for mount in &actor.db_mounts {
            if rootline.is_within(page_id, *mount).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[async_trait]
impl PermissionPolicy for MountPermissionPolicy {
    async fn can_edit_record(
        &self,
        actor: &Actor,
        table: &str,
        record: &ContentRecord,
        rootline: &RootlineCache,
    ) -> Result<bool, CoreError> {
        if actor.is_admin {
            return Ok(true);
        }
        if !actor.may_modify_table(table) {
            debug!("Editor {} may not modify table {}", actor.uid, table);
            return Ok(false);
        }
        if !record.record_type.is_empty() && !actor.may_edit_type(&record.record_type) {
            return Ok(false);
        }
        if record.edit_locked {
            debug!("Record {}:{} is edit locked", table, record.uid);
            return Ok(false);
        }

        let page_id = if table == PAGES_TABLE { record.uid } else { record.pid };
        self.in_mounts(actor, page_id, rootline).await
    }

    async fn has_page_access(
        &self,
        actor: &Actor,
        page_id: i64,
        rootline: &RootlineCache,
    ) -> Result<bool, CoreError> {
        if actor.is_admin {
            return Ok(true);
        }
        self.in_mounts(actor, page_id, rootline).await
    }
}
