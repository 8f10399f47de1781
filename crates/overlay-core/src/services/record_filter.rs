// ============================================================================
// Overlay Core - Record Filter
// File: crates/overlay-core/src/services/record_filter.rs
// ============================================================================
//! Narrows candidate records to the ones the editor may act on

use tracing::debug;

use crate::domain::{ContentRecord, MenuConfiguration};
use crate::error::CoreError;
use crate::services::{AccessOracle, RootlineCache};

pub struct RecordFilter<'a> {
    settings: &'a MenuConfiguration,
    rootline: &'a RootlineCache,
}

impl<'a> RecordFilter<'a> {
    pub fn new(settings: &'a MenuConfiguration, rootline: &'a RootlineCache) -> Self {
        Self { settings, rootline }
    }

    /// True when the page is, or lies anywhere below, an ignored page.
    pub async fn is_page_excluded(&self, page_id: i64) -> Result<bool, CoreError> {
        for ignored in self.settings.ignored_page_id_values() {
            if self.rootline.is_within(page_id, ignored).await? {
                debug!("Page {} excluded by ignored page {}", page_id, ignored);
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Ignore-list rules that need no lookups.
    pub fn is_ignored(&self, record: &ContentRecord) -> bool {
        if self.settings.is_uid_ignored(record.uid) {
            return true;
        }
        if self.settings.is_type_ignored(&record.record_type) {
            return true;
        }
        record.is_plugin()
            && record
                .subtype
                .as_deref()
                .is_some_and(|subtype| self.settings.is_subtype_ignored(subtype))
    }

    /// Keep records the editor may edit and no ignore rule matches. Input
    /// order is preserved.
    pub async fn filter(
        &self,
        records: Vec<ContentRecord>,
        oracle: &AccessOracle,
    ) -> Result<Vec<ContentRecord>, CoreError> {
        let mut allowed = Vec::with_capacity(records.len());

        for record in records {
            if self.is_ignored(&record) {
                debug!("Record {}:{} matches an ignore list", record.table, record.uid);
                continue;
            }
            if self.is_page_excluded(record.pid).await? {
                continue;
            }
            if !oracle.can_edit_record(&record.table, &record).await {
                continue;
            }
            allowed.push(record);
        }

        Ok(allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Actor, ListSetting, RawMenuSettings, RawRecord};
    use crate::repositories::{MockActorRepository, MockAncestrySource, MockPermissionPolicy};
    use mockall::predicate::eq;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn record(value: Value) -> ContentRecord {
        ContentRecord::from_raw(RawRecord::new("tt_content", value.as_object().unwrap().clone()))
            .unwrap()
    }

    fn settings(raw: RawMenuSettings) -> MenuConfiguration {
        MenuConfiguration::from(raw)
    }

    fn permissive_oracle() -> AccessOracle {
        let mut policy = MockPermissionPolicy::new();
        policy
            .expect_can_edit_record()
            .returning(|_, _, record, _| Ok(record.uid != 13));
        AccessOracle::new(
            Some(Actor::new(1, "editor")),
            Arc::new(policy),
            Arc::new(MockActorRepository::new()),
            Arc::new(RootlineCache::new(Arc::new(MockAncestrySource::new()))),
        )
    }

    #[tokio::test]
    async fn test_grandchild_of_ignored_page_is_excluded() {
        let config = settings(RawMenuSettings {
            ignore_pids: Some(ListSetting::Csv("5".into())),
            ..Default::default()
        });
        let mut ancestry = MockAncestrySource::new();
        ancestry
            .expect_is_descendant_of()
            .with(eq(12), eq(5))
            .times(1)
            .returning(|_, _| Ok(true));
        ancestry
            .expect_is_descendant_of()
            .with(eq(40), eq(5))
            .returning(|_, _| Ok(false));

        let rootline = RootlineCache::new(Arc::new(ancestry));
        let filter = RecordFilter::new(&config, &rootline);
        assert!(filter.is_page_excluded(5).await.unwrap());
        assert!(filter.is_page_excluded(12).await.unwrap());
        // second lookup is served from the request cache
        assert!(filter.is_page_excluded(12).await.unwrap());
        assert!(!filter.is_page_excluded(40).await.unwrap());
    }

    #[tokio::test]
    async fn test_no_ignored_pages_needs_no_lookup() {
        let config = MenuConfiguration::default();
        let mut ancestry = MockAncestrySource::new();
        ancestry.expect_is_descendant_of().never();

        let rootline = RootlineCache::new(Arc::new(ancestry));
        let filter = RecordFilter::new(&config, &rootline);
        assert!(!filter.is_page_excluded(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_filter_applies_ignore_lists_and_permissions() {
        let config = settings(RawMenuSettings {
            ignore_uids: Some(ListSetting::Csv("11".into())),
            ignore_types: Some(ListSetting::Csv("html".into())),
            ignore_list_types: Some(ListSetting::Csv("news_pi1".into())),
            ..Default::default()
        });
        let rootline = RootlineCache::new(Arc::new(MockAncestrySource::new()));
        let filter = RecordFilter::new(&config, &rootline);
        let oracle = permissive_oracle();

        let records = vec![
            record(json!({ "uid": 10, "pid": 5, "CType": "text" })),
            record(json!({ "uid": 11, "pid": 5, "CType": "text" })),
            record(json!({ "uid": 12, "pid": 5, "CType": "html" })),
            record(json!({ "uid": 13, "pid": 5, "CType": "text" })),
            record(json!({ "uid": 14, "pid": 5, "CType": "list", "list_type": "news_pi1" })),
            record(json!({ "uid": 15, "pid": 5, "CType": "list", "list_type": "form_pi1" })),
            record(json!({ "uid": 16, "pid": 5, "CType": "textpic" })),
        ];

        let allowed = filter.filter(records, &oracle).await.unwrap();
        let uids: Vec<i64> = allowed.iter().map(|r| r.uid).collect();
        assert_eq!(uids, vec![10, 15, 16]);

        let again = filter.filter(allowed.clone(), &oracle).await.unwrap();
        assert_eq!(again, allowed);
    }

    #[tokio::test]
    async fn test_records_on_ignored_pages_are_dropped() {
        let config = settings(RawMenuSettings {
            ignore_pids: Some(ListSetting::Items(vec![])),
            ..Default::default()
        });
        assert!(config.ignored_page_ids.is_empty());

        let config = settings(RawMenuSettings {
            ignore_pids: Some(ListSetting::Number(7)),
            ..Default::default()
        });
        let mut ancestry = MockAncestrySource::new();
        ancestry.expect_is_descendant_of().returning(|page, _| Ok(page == 8));

        let rootline = RootlineCache::new(Arc::new(ancestry));
        let filter = RecordFilter::new(&config, &rootline);
        let records = vec![
            record(json!({ "uid": 1, "pid": 7, "CType": "text" })),
            record(json!({ "uid": 2, "pid": 8, "CType": "text" })),
            record(json!({ "uid": 3, "pid": 9, "CType": "text" })),
        ];
        let allowed = filter.filter(records, &permissive_oracle()).await.unwrap();
        assert_eq!(allowed.len(), 1);
        assert_eq!(allowed[0].uid, 3);
    }
}
