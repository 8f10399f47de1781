// ============================================================================
// Overlay Infrastructure - PostgreSQL Actor Repository
// File: crates/overlay-infrastructure/src/database/postgres/actor_repo_impl.rs
// ============================================================================

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use overlay_core::domain::actor::DEFAULT_LANGUAGE;
use overlay_core::domain::Actor;
use overlay_core::error::CoreError;
use overlay_core::repositories::ActorRepository;

pub struct PgActorRepository {
    pool: PgPool,
    content_table: String,
}

impl PgActorRepository {
    pub fn new(pool: PgPool, content_table: impl Into<String>) -> Self {
        Self {
            pool,
            content_table: content_table.into(),
        }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct EditorRow {
    pub uid: i64,
    pub username: String,
    pub lang: String,
    pub admin: bool,
    pub db_mountpoints: String,
    pub tables_modify: String,
    pub explicit_allowdeny: String,
    pub overlay_disabled: bool,
}

impl EditorRow {
    fn into_actor(self, content_table: &str) -> Actor {
        let language = match self.lang.trim() {
            "" => DEFAULT_LANGUAGE.to_string(),
            lang => lang.to_string(),
        };

        Actor {
            uid: self.uid,
            username: self.username,
            language,
            is_admin: self.admin,
            db_mounts: csv(&self.db_mountpoints)
                .filter_map(|mount| mount.parse().ok())
                .collect(),
            tables_modify: csv(&self.tables_modify).map(str::to_string).collect(),
            allowed_types: allowed_types(&self.explicit_allowdeny, content_table),
            editing_disabled: self.overlay_disabled,
            initialized: true,
        }
    }
}

fn csv(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|v| !v.is_empty())
}

/// Types allowed through `<table>:CType:<type>:ALLOW` entries.
fn allowed_types(explicit_allowdeny: &str, content_table: &str) -> BTreeSet<String> {
    csv(explicit_allowdeny)
        .filter_map(|entry| {
            let mut parts = entry.split(':');
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(table), Some("CType"), Some(record_type), Some("ALLOW"))
                    if table == content_table =>
                {
                    Some(record_type.to_string())
                }
                _ => None,
            }
        })
        .collect()
}

fn store_error(context: &str, uid: i64, e: sqlx::Error) -> CoreError {
    error!("Database error {} for editor {}: {}", context, uid, e);
    CoreError::ActorStore(e.to_string())
}

#[async_trait]
impl ActorRepository for PgActorRepository {
    async fn find_actor(&self, uid: i64) -> Result<Option<Actor>, CoreError> {
        let row: Option<EditorRow> = sqlx::query_as(
            r#"
            SELECT
                uid::bigint AS uid,
                username,
                COALESCE(lang, '') AS lang,
                admin <> 0 AS admin,
                COALESCE(db_mountpoints, '') AS db_mountpoints,
                COALESCE(tables_modify, '') AS tables_modify,
                COALESCE(explicit_allowdeny, '') AS explicit_allowdeny,
                overlay_disabled <> 0 AS overlay_disabled
            FROM be_users
            WHERE uid = $1 AND disable = 0 AND deleted = 0
            "#,
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("loading account", uid, e))?;

        Ok(row.map(|row| row.into_actor(&self.content_table)))
    }

    async fn load_editing_disabled(&self, uid: i64) -> Result<bool, CoreError> {
        let disabled: Option<bool> = sqlx::query_scalar(
            "SELECT overlay_disabled <> 0 FROM be_users WHERE uid = $1 AND deleted = 0",
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("reading overlay flag", uid, e))?;

        disabled.ok_or_else(|| CoreError::ActorStore(format!("editor {} not found", uid)))
    }

    async fn store_editing_disabled(&self, uid: i64, disabled: bool) -> Result<(), CoreError> {
        let result = sqlx::query(
            "UPDATE be_users SET overlay_disabled = $2, tstamp = $3 WHERE uid = $1 AND deleted = 0",
        )
        .bind(uid)
        .bind(i16::from(disabled))
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("writing overlay flag", uid, e))?;

        if result.rows_affected() == 0 {
            return Err(CoreError::ActorStore(format!("editor {} not found", uid)));
        }
        info!("Stored overlay_disabled={} for editor {}", disabled, uid);
        Ok(())
    }

    async fn take_feedback_messages(&self, uid: i64) -> Result<Vec<String>, CoreError> {
        sqlx::query_scalar(
            r#"
            WITH drained AS (
                DELETE FROM overlay_feedback_messages
                WHERE editor_uid = $1
                RETURNING uid, payload
            )
            SELECT payload FROM drained ORDER BY uid
            "#,
        )
        .bind(uid)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("draining feedback messages", uid, e))
    }
}
