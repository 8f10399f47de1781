// ============================================================================
// Overlay Core - Menu Tree Builder
// File: crates/overlay-core/src/services/menu_builder.rs
// Description: Assembles the dropdown tree of one content record
// ============================================================================

use tracing::{debug, warn};

use crate::domain::{section, ContentRecord, Label, MenuConfiguration, MenuNode, TypeConfig};
use crate::error::{CoreError, RouteError};
use crate::repositories::{RouteBuilder, TypeConfigSource};
use crate::services::url_builder::{self, append_query_flag, ActionTarget, OVERLAY_MARKER};
use crate::services::{NodeFactory, ResolvedEntry};
use crate::text::truncate;

pub const TITLE_MAX_LENGTH: usize = 30;

/// Localization keys used by the generated menus.
pub mod label_keys {
    pub const DIV_INFO: &str = "div_info";
    pub const DIV_EDIT: &str = "div_edit";
    pub const DIV_ACTION: &str = "div_action";
    pub const DIV_ADDITIONAL: &str = "div_additional";
    pub const EDIT_CONTENT: &str = "edit_content";
    pub const EDIT_PLUGIN: &str = "edit_plugin";
    pub const EDIT_PAGE: &str = "edit_page";
    pub const HIDE: &str = "hide";
    pub const UNHIDE: &str = "unhide";
    pub const INFO: &str = "info";
    pub const MOVE: &str = "move";
    pub const HISTORY: &str = "history";
    pub const NEW_CONTENT_AFTER: &str = "new_content_after";
}

/// Child keys of a full menu, in render order.
pub mod node_keys {
    pub const DIV_INFO: &str = "div_info";
    pub const HEADER: &str = "header";
    pub const DIV_EDIT: &str = "div_edit";
    pub const EDIT: &str = "edit";
    pub const EDIT_PAGE: &str = "edit_page";
    pub const DIV_ACTION: &str = "div_action";
    pub const HIDE: &str = "hide";
    pub const INFO: &str = "info";
    pub const MOVE: &str = "move";
    pub const HISTORY: &str = "history";
    pub const NEW_CONTENT_AFTER: &str = "new_content_after";
    pub const DIV_ADDITIONAL: &str = "div_additional";
    pub const ADDITIONAL_PREFIX: &str = "additional_";
}

pub mod icons {
    pub const OPEN: &str = "actions-open";
    pub const PLUGIN: &str = "content-plugin";
    pub const FALLBACK_TYPE: &str = "mimetypes-x-content-text";
    pub const PAGE_LAYOUT: &str = "actions-page-open";
    pub const HIDE: &str = "actions-edit-hide";
    pub const UNHIDE: &str = "actions-edit-unhide";
    pub const INFO: &str = "actions-document-info";
    pub const MOVE: &str = "actions-document-move";
    pub const HISTORY: &str = "actions-document-history-open";
    pub const NEW_AFTER: &str = "actions-document-new";
}

/// Request data every record menu is built against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuContext {
    pub page_id: i64,
    pub language: i64,
    pub return_url: String,
}

pub struct MenuBuilder<'a> {
    settings: &'a MenuConfiguration,
    routes: &'a dyn RouteBuilder,
    types: &'a dyn TypeConfigSource,
    factory: NodeFactory,
}

impl<'a> MenuBuilder<'a> {
    pub fn new(
        settings: &'a MenuConfiguration,
        routes: &'a dyn RouteBuilder,
        types: &'a dyn TypeConfigSource,
    ) -> Self {
        Self {
            settings,
            routes,
            types,
            factory: NodeFactory::new(settings.link_target_blank),
        }
    }

    /// Build the tree of one record. Errors are record scoped unless the
    /// route builder itself misbehaves in a way the caller must see.
    pub fn build(
        &self,
        record: &ContentRecord,
        additional: &[ResolvedEntry],
        ctx: &MenuContext,
    ) -> Result<MenuNode, CoreError> {
        let type_config = self.type_config(record)?;
        let target = ActionTarget {
            table: &record.table,
            uid: record.uid,
            pid: record.pid,
            language: ctx.language,
            return_url: &ctx.return_url,
        };

        if self.settings.is_simple_mode() {
            debug!("Building simple menu for {}:{}", record.table, record.uid);
            let url = self.marked_edit_url(&target)?;
            return Ok(self
                .factory
                .standalone_link(Label::key(edit_label_key(record)), url, icons::OPEN));
        }

        let mut root = MenuNode::menu(Label::key(&type_config.label));

        if self.settings.check_default_menu_structure(section::INFO) {
            self.info_section(&mut root, record, &type_config);
        }
        if self.settings.check_default_menu_structure(section::EDIT) {
            self.edit_section(&mut root, record, &target)?;
        }
        if self.settings.check_default_menu_structure(section::ACTION) {
            if let Err(e) = self.action_section(&mut root, record, &target) {
                warn!(
                    "Omitting action section for {}:{}: {}",
                    record.table, record.uid, e
                );
            }
        }
        if !additional.is_empty()
            && self.settings.check_default_menu_structure(section::ADDITIONAL_DATA)
        {
            self.additional_section(&mut root, additional);
        }

        Ok(root)
    }

    fn type_config(&self, record: &ContentRecord) -> Result<TypeConfig, CoreError> {
        if record.record_type.is_empty() {
            return Err(CoreError::MalformedRecord(format!(
                "{}:{}: missing type",
                record.table, record.uid
            )));
        }
        self.types
            .config_for(&record.record_type, record.subtype.as_deref())
            .ok_or_else(|| {
                CoreError::UnknownContentType(match &record.subtype {
                    Some(subtype) => format!("{}/{}", record.record_type, subtype),
                    None => record.record_type.clone(),
                })
            })
    }

    fn marked_edit_url(&self, target: &ActionTarget) -> Result<String, RouteError> {
        let url = url_builder::edit_url(self.routes, target)?;
        Ok(append_query_flag(&url, OVERLAY_MARKER.0, OVERLAY_MARKER.1))
    }

    fn info_section(&self, root: &mut MenuNode, record: &ContentRecord, type_config: &TypeConfig) {
        self.factory.divider(root, node_keys::DIV_INFO, label_keys::DIV_INFO);

        let mut label = Label::key(&type_config.label);
        if let Some(title) = record.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            label = label.then_text(format!(": {}", truncate(title, TITLE_MAX_LENGTH)));
        }
        label = label.then_text(format!(" [uid: {}]", record.uid));

        let icon = type_config.icon.as_deref().unwrap_or(icons::FALLBACK_TYPE);
        self.factory.info(root, node_keys::HEADER, label, icon);
    }

    fn edit_section(
        &self,
        root: &mut MenuNode,
        record: &ContentRecord,
        target: &ActionTarget,
    ) -> Result<(), RouteError> {
        let edit = self.marked_edit_url(target)?;
        let page_layout = url_builder::page_layout_url(self.routes, target)?;
        let icon = if record.is_plugin() { icons::PLUGIN } else { icons::OPEN };

        self.factory.divider(root, node_keys::DIV_EDIT, label_keys::DIV_EDIT);
        self.factory
            .link(root, node_keys::EDIT, Label::key(edit_label_key(record)), edit, icon);
        self.factory.link(
            root,
            node_keys::EDIT_PAGE,
            Label::key(label_keys::EDIT_PAGE),
            page_layout,
            icons::PAGE_LAYOUT,
        );
        Ok(())
    }

    /// Either all five actions are added or none.
    fn action_section(
        &self,
        root: &mut MenuNode,
        record: &ContentRecord,
        target: &ActionTarget,
    ) -> Result<(), RouteError> {
        let hide = !record.hidden;
        let (hide_label, hide_icon) = if hide {
            (label_keys::HIDE, icons::HIDE)
        } else {
            (label_keys::UNHIDE, icons::UNHIDE)
        };

        let links = [
            (
                node_keys::HIDE,
                hide_label,
                url_builder::hide_url(self.routes, target, hide)?,
                hide_icon,
            ),
            (
                node_keys::INFO,
                label_keys::INFO,
                url_builder::info_url(self.routes, target)?,
                icons::INFO,
            ),
            (
                node_keys::MOVE,
                label_keys::MOVE,
                url_builder::move_url(self.routes, target)?,
                icons::MOVE,
            ),
            (
                node_keys::HISTORY,
                label_keys::HISTORY,
                url_builder::history_url(self.routes, target)?,
                icons::HISTORY,
            ),
            (
                node_keys::NEW_CONTENT_AFTER,
                label_keys::NEW_CONTENT_AFTER,
                url_builder::new_after_url(self.routes, target)?,
                icons::NEW_AFTER,
            ),
        ];

        self.factory.divider(root, node_keys::DIV_ACTION, label_keys::DIV_ACTION);
        for (key, label, url, icon) in links {
            self.factory.link(root, key, Label::key(label), url, icon);
        }
        Ok(())
    }

    fn additional_section(&self, root: &mut MenuNode, entries: &[ResolvedEntry]) {
        self.factory
            .divider(root, node_keys::DIV_ADDITIONAL, label_keys::DIV_ADDITIONAL);
        for (index, entry) in entries.iter().enumerate() {
            self.factory.link(
                root,
                &format!("{}{}", node_keys::ADDITIONAL_PREFIX, index),
                Label::text(&entry.label),
                entry.url.clone(),
                &entry.icon,
            );
        }
    }
}

fn edit_label_key(record: &ContentRecord) -> &'static str {
    if record.is_plugin() {
        label_keys::EDIT_PLUGIN
    } else {
        label_keys::EDIT_CONTENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NodeKind, RawMenuSettings, RawRecord, Toggle};
    use crate::repositories::MockRouteBuilder;
    use indexmap::IndexMap;
    use serde_json::{json, Value};

    struct Types;

    impl TypeConfigSource for Types {
        fn config_for(&self, type_code: &str, _: Option<&str>) -> Option<TypeConfig> {
            match type_code {
                "text" => Some(TypeConfig {
                    label: "type.text".into(),
                    icon: Some("content-text".into()),
                    group: Some("common".into()),
                }),
                "list" => Some(TypeConfig {
                    label: "type.list".into(),
                    icon: None,
                    group: None,
                }),
                _ => None,
            }
        }

        fn table_icon(&self, _: &str) -> Option<String> {
            None
        }
    }

    fn record(value: Value) -> ContentRecord {
        ContentRecord::from_raw(RawRecord::new("tt_content", value.as_object().unwrap().clone()))
            .unwrap()
    }

    fn routes() -> MockRouteBuilder {
        let mut routes = MockRouteBuilder::new();
        routes.expect_build_url().returning(|name, _| Ok(format!("/{}", name)));
        routes
    }

    fn ctx() -> MenuContext {
        MenuContext {
            page_id: 5,
            language: 0,
            return_url: "/home".into(),
        }
    }

    fn structure(entries: &[(&str, bool)]) -> MenuConfiguration {
        MenuConfiguration::from(RawMenuSettings {
            default_menu_structure: Some(
                entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), Toggle::Flag(*v)))
                    .collect::<IndexMap<_, _>>(),
            ),
            ..Default::default()
        })
    }

    #[test]
    fn test_full_menu_has_sections_in_order() {
        let settings = MenuConfiguration::default();
        let routes = routes();
        let builder = MenuBuilder::new(&settings, &routes, &Types);
        let record = record(json!({
            "uid": 10, "pid": 5, "CType": "text", "header": "Hello World This Is A Long Title"
        }));
        let extra = vec![ResolvedEntry {
            label: "News".into(),
            url: "/news".into(),
            icon: "news".into(),
        }];

        let tree = builder.build(&record, &extra, &ctx()).unwrap();

        assert_eq!(tree.kind(), NodeKind::Menu);
        assert_eq!(
            tree.child_keys(),
            vec![
                "div_info", "header", "div_edit", "edit", "edit_page", "div_action", "hide",
                "info", "move", "history", "new_content_after", "div_additional", "additional_0"
            ]
        );

        let header = tree.child("header").unwrap();
        let label = header.label().resolve(|key| key.to_string());
        assert_eq!(label, "type.text: Hello World This Is A Long Tit… [uid: 10]");
        assert_eq!(header.icon(), Some("content-text"));

        assert_eq!(tree.child("edit").unwrap().url(), Some("/record_edit?frontend_edit=1"));
        assert_eq!(
            tree.child("edit_page").unwrap().url(),
            Some("/web_layout#element-tt_content-10")
        );
        assert_eq!(tree.child("hide").unwrap().icon(), Some(icons::HIDE));
        assert!(tree.child("div_info").unwrap().url().is_none());
    }

    #[test]
    fn test_simple_mode_yields_single_link() {
        let settings = MenuConfiguration::from(RawMenuSettings {
            simple_mode: Some(Toggle::Text("1".into())),
            link_target_blank: Some(Toggle::Flag(true)),
            ..Default::default()
        });
        let routes = routes();
        let builder = MenuBuilder::new(&settings, &routes, &Types);

        let tree = builder
            .build(&record(json!({ "uid": 3, "pid": 5, "CType": "text" })), &[], &ctx())
            .unwrap();

        assert_eq!(tree.kind(), NodeKind::Link);
        assert!(!tree.has_children());
        assert!(tree.target_blank());
        assert_eq!(tree.icon(), Some(icons::OPEN));
        assert_eq!(tree.url(), Some("/record_edit?frontend_edit=1"));
    }

    #[test]
    fn test_derived_simple_structure() {
        let settings = structure(&[("edit", true), ("info", false), ("action", false)]);
        let routes = routes();
        let builder = MenuBuilder::new(&settings, &routes, &Types);

        let tree = builder
            .build(&record(json!({ "uid": 3, "pid": 5, "CType": "text" })), &[], &ctx())
            .unwrap();
        assert_eq!(tree.kind(), NodeKind::Link);
    }

    #[test]
    fn test_sections_gated_individually() {
        let settings = structure(&[("info", true), ("edit", false), ("action", true)]);
        let routes = routes();
        let builder = MenuBuilder::new(&settings, &routes, &Types);
        let extra = vec![ResolvedEntry {
            label: "News".into(),
            url: "/news".into(),
            icon: "news".into(),
        }];

        let hidden = record(json!({ "uid": 3, "pid": 5, "CType": "text", "hidden": 1 }));
        let tree = builder.build(&hidden, &extra, &ctx()).unwrap();

        assert!(tree.child("div_edit").is_none());
        assert!(tree.child("div_additional").is_none());
        assert!(tree.child("header").is_some());
        assert_eq!(tree.child("hide").unwrap().icon(), Some(icons::UNHIDE));
    }

    #[test]
    fn test_plugin_edit_label_and_icon() {
        let settings = MenuConfiguration::default();
        let routes = routes();
        let builder = MenuBuilder::new(&settings, &routes, &Types);

        let tree = builder
            .build(
                &record(json!({ "uid": 4, "pid": 5, "CType": "list", "list_type": "news_pi1" })),
                &[],
                &ctx(),
            )
            .unwrap();
        let edit = tree.child("edit").unwrap();
        assert_eq!(edit.label(), &Label::key(label_keys::EDIT_PLUGIN));
        assert_eq!(edit.icon(), Some(icons::PLUGIN));
        assert_eq!(tree.child("header").unwrap().icon(), Some(icons::FALLBACK_TYPE));
    }

    #[test]
    fn test_unknown_type_is_record_scoped() {
        let settings = MenuConfiguration::default();
        let routes = routes();
        let builder = MenuBuilder::new(&settings, &routes, &Types);

        let err = builder
            .build(&record(json!({ "uid": 4, "pid": 5, "CType": "mystery" })), &[], &ctx())
            .unwrap_err();
        assert!(err.is_record_scoped());

        let err = builder
            .build(&record(json!({ "uid": 4, "pid": 5 })), &[], &ctx())
            .unwrap_err();
        assert!(matches!(err, CoreError::MalformedRecord(_)));
    }

    #[test]
    fn test_unresolvable_action_route_drops_only_that_section() {
        let settings = MenuConfiguration::default();
        let mut routes = MockRouteBuilder::new();
        routes.expect_build_url().returning(|name, _| {
            if name == url_builder::routes::MOVE_ELEMENT {
                Err(RouteError::NotResolvable(name.to_string()))
            } else {
                Ok(format!("/{}", name))
            }
        });
        let builder = MenuBuilder::new(&settings, &routes, &Types);

        let tree = builder
            .build(&record(json!({ "uid": 4, "pid": 5, "CType": "text" })), &[], &ctx())
            .unwrap();
        assert!(tree.child("edit").is_some());
        assert!(tree.child("div_action").is_none());
        assert!(tree.child("hide").is_none());
    }

    #[test]
    fn test_unresolvable_edit_route_skips_record() {
        let settings = MenuConfiguration::default();
        let mut routes = MockRouteBuilder::new();
        routes
            .expect_build_url()
            .returning(|name, _| Err(RouteError::NotResolvable(name.to_string())));
        let builder = MenuBuilder::new(&settings, &routes, &Types);

        let err = builder
            .build(&record(json!({ "uid": 4, "pid": 5, "CType": "text" })), &[], &ctx())
            .unwrap_err();
        assert_eq!(err.code(), "ROUTE_NOT_RESOLVABLE");
    }
}
