//! Layered configuration trait (port)

use crate::domain::{IconSize, RawMenuSettings};
use crate::error::CoreError;

/// One configuration strategy per deployment.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigSource: Send + Sync {
    /// Merged menu settings, or `None` when no store is present.
    fn resolve_layered_config(&self) -> Result<Option<RawMenuSettings>, CoreError>;

    fn default_icon_size(&self) -> IconSize;
}
