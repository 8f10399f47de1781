// ============================================================================
// Overlay Infrastructure - PostgreSQL Page Tree
// File: crates/overlay-infrastructure/src/database/postgres/page_tree_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

use overlay_core::error::CoreError;
use overlay_core::repositories::AncestrySource;

/// Rootline walks deeper than this are treated as cycles.
const MAX_ROOTLINE_DEPTH: i32 = 99;

pub struct PgPageTree {
    pool: PgPool,
}

impl PgPageTree {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AncestrySource for PgPageTree {
    async fn is_descendant_of(
        &self,
        page_id: i64,
        candidate_ancestor_id: i64,
    ) -> Result<bool, CoreError> {
        if page_id == candidate_ancestor_id || page_id <= 0 || candidate_ancestor_id <= 0 {
            return Ok(false);
        }

        let found: bool = sqlx::query_scalar(
            r#"
            WITH RECURSIVE rootline AS (
                SELECT uid::bigint AS uid, pid::bigint AS pid, 0 AS depth
                FROM pages
                WHERE uid = $1 AND deleted = 0
                UNION ALL
                SELECT p.uid::bigint, p.pid::bigint, r.depth + 1
                FROM pages p
                JOIN rootline r ON p.uid = r.pid
                WHERE r.pid > 0 AND r.depth < $3 AND p.deleted = 0
            )
            SELECT EXISTS (SELECT 1 FROM rootline WHERE uid = $2 AND depth > 0)
            "#,
        )
        .bind(page_id)
        .bind(candidate_ancestor_id)
        .bind(MAX_ROOTLINE_DEPTH)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!(
                "Database error walking rootline of page {} (ancestor {}): {}",
                page_id, candidate_ancestor_id, e
            );
            CoreError::PageTree(e.to_string())
        })?;

        Ok(found)
    }
}
