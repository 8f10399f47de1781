// ============================================================================
// Overlay Core - Additional Data Resolution
// File: crates/overlay-core/src/services/additional_data.rs
// Description: Turns client supplied entries into ready-to-append links
// ============================================================================

use tracing::{debug, warn};

use crate::domain::{AdditionalDataEntry, ClientPayload, ContentRecord, EntryTarget};
use crate::error::CoreError;
use crate::repositories::{RecordSource, RouteBuilder, TypeConfigSource};
use crate::services::url_builder::{append_query_flag, edit_url, ActionTarget, OVERLAY_MARKER};
use crate::services::AccessOracle;
use crate::text::truncate;

pub const LABEL_MAX_LENGTH: usize = 30;
pub const FALLBACK_RECORD_ICON: &str = "default-record";
pub const EXTERNAL_LINK_ICON: &str = "actions-link";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub label: String,
    pub url: String,
    pub icon: String,
}

pub struct AdditionalDataResolver<'a> {
    records: &'a dyn RecordSource,
    types: &'a dyn TypeConfigSource,
    routes: &'a dyn RouteBuilder,
    oracle: &'a AccessOracle,
}

impl<'a> AdditionalDataResolver<'a> {
    pub fn new(
        records: &'a dyn RecordSource,
        types: &'a dyn TypeConfigSource,
        routes: &'a dyn RouteBuilder,
        oracle: &'a AccessOracle,
    ) -> Self {
        Self {
            records,
            types,
            routes,
            oracle,
        }
    }

    /// Entries sent for the record, falling back to the ones sent for its
    /// translation source.
    pub fn entries_for<'p>(
        payload: &'p ClientPayload,
        record: &ContentRecord,
    ) -> &'p [AdditionalDataEntry] {
        payload
            .entries_for(record.uid)
            .or_else(|| {
                record
                    .translation_parent
                    .and_then(|parent| payload.entries_for(parent))
            })
            .unwrap_or(&[])
    }

    /// Resolve usable entries in order. Invalid, inaccessible or
    /// untranslated targets are dropped silently.
    pub async fn resolve(
        &self,
        entries: &[AdditionalDataEntry],
        language: i64,
        return_url: &str,
    ) -> Result<Vec<ResolvedEntry>, CoreError> {
        let mut resolved = Vec::with_capacity(entries.len());

        for entry in entries {
            if !entry.has_label() {
                debug!("Skipping additional data entry without label");
                continue;
            }
            let Some(target) = entry.target() else {
                debug!("Skipping additional data entry '{}' without target", entry.label);
                continue;
            };
            let label = truncate(entry.label.trim(), LABEL_MAX_LENGTH);

            match target {
                EntryTarget::Url(url) => resolved.push(ResolvedEntry {
                    label,
                    url: url.to_string(),
                    icon: entry.icon().unwrap_or(EXTERNAL_LINK_ICON).to_string(),
                }),
                EntryTarget::Record { table, uid } => {
                    let Some(record) = self.resolve_record(table, uid, language).await? else {
                        continue;
                    };
                    let action = ActionTarget {
                        table,
                        uid: record.uid,
                        pid: record.pid,
                        language,
                        return_url,
                    };
                    let url = match edit_url(self.routes, &action) {
                        Ok(url) => append_query_flag(&url, OVERLAY_MARKER.0, OVERLAY_MARKER.1),
                        Err(e) => {
                            warn!("Skipping additional data link to {}:{}: {}", table, uid, e);
                            continue;
                        }
                    };
                    let icon = entry
                        .icon()
                        .map(str::to_string)
                        .or_else(|| self.types.table_icon(table))
                        .unwrap_or_else(|| FALLBACK_RECORD_ICON.to_string());

                    resolved.push(ResolvedEntry { label, url, icon });
                }
            }
        }

        Ok(resolved)
    }

    /// Load the target, check edit access and switch to its translation in
    /// `language` when needed.
    async fn resolve_record(
        &self,
        table: &str,
        uid: i64,
        language: i64,
    ) -> Result<Option<ContentRecord>, CoreError> {
        let Some(raw) = self.records.find_record(table, uid).await? else {
            debug!("Additional data target {}:{} not found", table, uid);
            return Ok(None);
        };
        let record = match ContentRecord::from_raw(raw) {
            Ok(record) => record,
            Err(e) => {
                warn!("Additional data target {}:{} is malformed: {}", table, uid, e);
                return Ok(None);
            }
        };

        if !self.oracle.can_edit_record(table, &record).await {
            return Ok(None);
        }
        if record.matches_language(language) {
            return Ok(Some(record));
        }

        match self.records.fetch_translation(table, record.uid, language).await? {
            Some(raw) => Ok(ContentRecord::from_raw(raw).ok()),
            None => {
                debug!(
                    "No translation of {}:{} in language {}, dropping entry",
                    table, uid, language
                );
                Ok(None)
            }
        }
    }
}
