// ============================================================================
// Overlay Core - Access Oracle
// File: crates/overlay-core/src/services/access_oracle.rs
// ============================================================================
//! Capability checks for the current editor of one request

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{Actor, ContentRecord};
use crate::error::CoreError;
use crate::repositories::{ActorRepository, PermissionPolicy};
use crate::services::RootlineCache;

/// Wraps the request's editor identity. Without a fully initialized editor
/// every check denies instead of failing.
pub struct AccessOracle {
    actor: Option<Actor>,
    policy: Arc<dyn PermissionPolicy>,
    actors: Arc<dyn ActorRepository>,
    rootline: Arc<RootlineCache>,
}

impl AccessOracle {
    pub fn new(
        actor: Option<Actor>,
        policy: Arc<dyn PermissionPolicy>,
        actors: Arc<dyn ActorRepository>,
        rootline: Arc<RootlineCache>,
    ) -> Self {
        Self {
            actor,
            policy,
            actors,
            rootline,
        }
    }

    /// Page tree memo shared by every check of this request.
    pub fn rootline(&self) -> &RootlineCache {
        &self.rootline
    }

    pub fn current_actor(&self) -> Option<&Actor> {
        self.actor.as_ref().filter(|actor| actor.is_initialized())
    }

    pub async fn can_edit_record(&self, table: &str, record: &ContentRecord) -> bool {
        let Some(actor) = self.current_actor() else {
            return false;
        };
        match self.policy.can_edit_record(actor, table, record, &self.rootline).await {
            Ok(allowed) => {
                if !allowed {
                    debug!("Editor {} may not edit {}:{}", actor.uid, table, record.uid);
                }
                allowed
            }
            Err(e) => {
                warn!(
                    "Edit permission check failed for editor {} on {}:{}: {}",
                    actor.uid, table, record.uid, e
                );
                false
            }
        }
    }

    pub async fn has_page_access(&self, page_id: i64) -> bool {
        let Some(actor) = self.current_actor() else {
            return false;
        };
        match self.policy.has_page_access(actor, page_id, &self.rootline).await {
            Ok(allowed) => allowed,
            Err(e) => {
                warn!(
                    "Page access check failed for editor {} on page {}: {}",
                    actor.uid, page_id, e
                );
                false
            }
        }
    }

    /// Persisted opt-out flag. Without an editor nothing is disabled, but
    /// every other check denies anyway.
    pub fn is_editing_disabled(&self) -> bool {
        self.current_actor()
            .map(|actor| actor.editing_disabled)
            .unwrap_or(false)
    }

    /// Flip and persist the opt-out flag, returning the new state. The write
    /// has completed when this returns.
    pub async fn toggle_disabled_state(&mut self) -> Result<bool, CoreError> {
        let uid = self.current_actor().map(|a| a.uid).ok_or(CoreError::NoActor)?;

        let current = self.actors.load_editing_disabled(uid).await?;
        let disabled = !current;
        self.actors.store_editing_disabled(uid, disabled).await?;

        if let Some(actor) = self.actor.as_mut() {
            actor.editing_disabled = disabled;
        }
        info!("Editor {} set frontend editing disabled={}", uid, disabled);
        Ok(disabled)
    }
}
