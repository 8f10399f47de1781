// ============================================================================
// Overlay Infrastructure - PostgreSQL Record Source
// File: crates/overlay-infrastructure/src/database/postgres/record_source_impl.rs
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{debug, error, warn};

use overlay_core::domain::additional_data::MAX_UID_SCOPE;
use overlay_core::domain::RawRecord;
use overlay_core::error::CoreError;
use overlay_core::repositories::RecordSource;

/// Rows are fetched as `to_jsonb(t)` so any table shape maps onto
/// [`RawRecord`] without per-table row types.
pub struct PgRecordSource {
    pool: PgPool,
    content_table: String,
}

impl PgRecordSource {
    pub fn new(pool: PgPool, content_table: impl Into<String>) -> Self {
        Self {
            pool,
            content_table: content_table.into(),
        }
    }

    fn content_table(&self) -> Result<String, CoreError> {
        quote_table(&self.content_table).ok_or_else(|| {
            CoreError::RecordSource(format!("invalid content table {}", self.content_table))
        })
    }

    async fn fetch_rows(
        &self,
        table: &str,
        sql: &str,
        binds: Vec<Bind>,
    ) -> Result<Vec<RawRecord>, CoreError> {
        let mut query = sqlx::query_scalar::<_, Value>(sql);
        for bind in binds {
            query = match bind {
                Bind::Int(value) => query.bind(value),
                Bind::Flag(value) => query.bind(value),
                Bind::Ids(values) => query.bind(values),
            };
        }
        let rows = query.fetch_all(&self.pool).await.map_err(|e: sqlx::Error| {
            error!("Database error fetching {} rows: {}", table, e);
            CoreError::RecordSource(e.to_string())
        })?;
        Ok(rows.into_iter().filter_map(|row| into_raw(table, row)).collect())
    }
}

enum Bind {
    Int(i64),
    Flag(bool),
    Ids(Vec<i64>),
}

/// Double-quoted identifier, or `None` when the name is not a plain
/// `[A-Za-z_][A-Za-z0-9_]*` identifier.
pub(crate) fn quote_table(table: &str) -> Option<String> {
    let mut chars = table.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some(format!("\"{}\"", table))
}

fn into_raw(table: &str, row: Value) -> Option<RawRecord> {
    match row {
        Value::Object(fields) => Some(RawRecord::new(table, fields)),
        other => {
            warn!("Ignoring non-object row from {}: {}", table, other);
            None
        }
    }
}

#[async_trait]
impl RecordSource for PgRecordSource {
    async fn fetch_records(
        &self,
        page_id: i64,
        language: i64,
        include_all_language_variants: bool,
    ) -> Result<Vec<RawRecord>, CoreError> {
        let table = self.content_table()?;
        let sql = format!(
            r#"
            SELECT to_jsonb(t) AS row
            FROM {table} t
            WHERE t.pid = $1
              AND t.deleted = 0
              AND (t.sys_language_uid = $2 OR ($3 AND t.sys_language_uid = -1))
            ORDER BY t."colPos", t.sorting
            "#
        );
        let binds = vec![
            Bind::Int(page_id),
            Bind::Int(language),
            Bind::Flag(include_all_language_variants),
        ];

        let records = self.fetch_rows(&self.content_table, &sql, binds).await?;
        debug!("Fetched {} records for page {} language {}", records.len(), page_id, language);
        Ok(records)
    }

    async fn fetch_by_ids(&self, ids: &[i64], language: i64) -> Result<Vec<RawRecord>, CoreError> {
        let ids: Vec<i64> = ids.iter().copied().take(MAX_UID_SCOPE).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let table = self.content_table()?;
        // Records are matched directly or through their translation parent,
        // and returned in the order of the requested identifiers.
        let sql = format!(
            r#"
            SELECT to_jsonb(t) AS row
            FROM {table} t
            WHERE (t.uid = ANY($1) OR t.l18n_parent = ANY($1))
              AND t.deleted = 0
              AND t.sys_language_uid IN ($2, -1)
            ORDER BY array_position($1::bigint[], COALESCE(NULLIF(t.l18n_parent, 0), t.uid)::bigint)
            "#
        );
        self.fetch_rows(&self.content_table, &sql, vec![Bind::Ids(ids), Bind::Int(language)])
            .await
    }

    async fn fetch_translation(
        &self,
        table: &str,
        parent_id: i64,
        language: i64,
    ) -> Result<Option<RawRecord>, CoreError> {
        let Some(quoted) = quote_table(table) else {
            warn!("Refusing translation lookup on invalid table name {}", table);
            return Ok(None);
        };
        // Parent column differs between tables (l18n_parent / l10n_parent).
        let sql = format!(
            r#"
            SELECT r.row
            FROM (SELECT to_jsonb(t) AS row FROM {quoted} t) r
            WHERE COALESCE(r.row->>'l18n_parent', r.row->>'l10n_parent')::bigint = $1
              AND (r.row->>'sys_language_uid')::bigint = $2
              AND COALESCE((r.row->>'deleted')::int, 0) = 0
            LIMIT 1
            "#
        );
        let binds = vec![Bind::Int(parent_id), Bind::Int(language)];
        Ok(self.fetch_rows(table, &sql, binds).await?.into_iter().next())
    }

    async fn find_record(&self, table: &str, uid: i64) -> Result<Option<RawRecord>, CoreError> {
        let Some(quoted) = quote_table(table) else {
            warn!("Refusing record lookup on invalid table name {}", table);
            return Ok(None);
        };
        let sql = format!(
            r#"
            SELECT to_jsonb(t) AS row
            FROM {quoted} t
            WHERE t.uid = $1
              AND COALESCE((to_jsonb(t)->>'deleted')::int, 0) = 0
            "#
        );
        Ok(self.fetch_rows(table, &sql, vec![Bind::Int(uid)]).await?.into_iter().next())
    }
}
