//! Actor repository trait (port)

use async_trait::async_trait;

use crate::domain::Actor;
use crate::error::CoreError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActorRepository: Send + Sync {
    /// Active editor account by identifier.
    async fn find_actor(&self, uid: i64) -> Result<Option<Actor>, CoreError>;

    async fn load_editing_disabled(&self, uid: i64) -> Result<bool, CoreError>;

    /// Durably persist the overlay opt-out flag.
    async fn store_editing_disabled(&self, uid: i64, disabled: bool) -> Result<(), CoreError>;

    /// Drain the serialized feedback messages queued for the editor.
    async fn take_feedback_messages(&self, uid: i64) -> Result<Vec<String>, CoreError>;
}
