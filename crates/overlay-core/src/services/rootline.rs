//! Request-scoped memo of page tree lookups

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::CoreError;
use crate::repositories::AncestrySource;

/// Answers rootline questions for one request. Each `(page, ancestor)` pair
/// reaches the page tree at most once; build a new cache per request.
pub struct RootlineCache {
    ancestry: Arc<dyn AncestrySource>,
    /// (page, ancestor) -> descendant
    lookups: Mutex<HashMap<(i64, i64), bool>>,
}

impl RootlineCache {
    pub fn new(ancestry: Arc<dyn AncestrySource>) -> Self {
        Self {
            ancestry,
            lookups: Mutex::new(HashMap::new()),
        }
    }

    pub async fn is_descendant_of(
        &self,
        page_id: i64,
        ancestor_id: i64,
    ) -> Result<bool, CoreError> {
        let key = (page_id, ancestor_id);
        let cached = self.lookups.lock().get(&key).copied();
        if let Some(hit) = cached {
            return Ok(hit);
        }

        let result = self.ancestry.is_descendant_of(page_id, ancestor_id).await?;
        self.lookups.lock().insert(key, result);
        Ok(result)
    }

    /// The page is `root` itself or lies below it.
    pub async fn is_within(&self, page_id: i64, root_id: i64) -> Result<bool, CoreError> {
        if page_id == root_id {
            return Ok(true);
        }
        self.is_descendant_of(page_id, root_id).await
    }
}
