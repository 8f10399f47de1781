// ============================================================================
// Overlay Core - Edit Information Service
// File: crates/overlay-core/src/services/edit_information.rs
// Description: Runs the full filter -> build -> render pipeline for a page
// ============================================================================

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::domain::{section, Actor, ClientPayload, ContentRecord, FeedbackMessage, RawRecord};
use crate::error::CoreError;
use crate::repositories::{
    ActorRepository, AncestrySource, ConfigSource, IconProvider, PermissionPolicy, RecordSource,
    RouteBuilder, Translator, TypeConfigSource,
};
use crate::services::{
    feedback, AccessOracle, AdditionalDataResolver, HookContext, MenuBuilder, MenuContext,
    MenuHooks, MenuRenderer, RecordFilter, RenderedNode, RootlineCache, SettingsResolver,
};

/// Every capability the pipeline reaches out to.
#[derive(Clone)]
pub struct Collaborators {
    pub records: Arc<dyn RecordSource>,
    pub ancestry: Arc<dyn AncestrySource>,
    pub types: Arc<dyn TypeConfigSource>,
    pub actors: Arc<dyn ActorRepository>,
    pub policy: Arc<dyn PermissionPolicy>,
    pub routes: Arc<dyn RouteBuilder>,
    pub config: Arc<dyn ConfigSource>,
    pub translator: Arc<dyn Translator>,
    pub icons: Arc<dyn IconProvider>,
}

#[derive(Debug, Clone, Default)]
pub struct EditInformationRequest {
    pub page_id: i64,
    pub language: i64,
    pub return_url: String,
    pub payload: ClientPayload,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordMenu {
    pub element: Map<String, Value>,
    pub menu: RenderedNode,
}

/// Record identifier (as string) -> element and rendered menu.
pub type EditInformation = IndexMap<String, RecordMenu>;

#[derive(Clone)]
pub struct FrontendEditService {
    deps: Collaborators,
    hooks: MenuHooks,
}

impl FrontendEditService {
    pub fn new(deps: Collaborators) -> Self {
        Self {
            deps,
            hooks: MenuHooks::new(),
        }
    }

    pub fn with_hooks(mut self, hooks: MenuHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Fresh oracle for one request.
    pub fn oracle(&self, actor: Option<Actor>) -> AccessOracle {
        AccessOracle::new(
            actor,
            self.deps.policy.clone(),
            self.deps.actors.clone(),
            Arc::new(RootlineCache::new(self.deps.ancestry.clone())),
        )
    }

    /// Resolve the editor behind a session. Unknown or disabled accounts
    /// yield no actor.
    pub async fn load_actor(&self, uid: Option<i64>) -> Result<Option<Actor>, CoreError> {
        let Some(uid) = uid else {
            return Ok(None);
        };
        let actor = self.deps.actors.find_actor(uid).await?;
        if actor.is_none() {
            debug!("Session references unknown or disabled editor {}", uid);
        }
        Ok(actor)
    }

    pub async fn edit_information(
        &self,
        actor: Option<Actor>,
        request: EditInformationRequest,
    ) -> Result<EditInformation, CoreError> {
        let mut result = EditInformation::new();
        let page_id = request.page_id;
        let language = request.language;

        let oracle = self.oracle(actor);
        let Some((actor_uid, actor_language)) = oracle
            .current_actor()
            .map(|actor| (actor.uid, actor.language.clone()))
        else {
            debug!("No editor for page {}, returning empty edit information", page_id);
            return Ok(result);
        };
        if oracle.is_editing_disabled() {
            debug!("Editor {} disabled frontend editing", actor_uid);
            return Ok(result);
        }
        if !oracle.has_page_access(page_id).await {
            debug!("Editor {} has no access to page {}", actor_uid, page_id);
            return Ok(result);
        }

        let settings = SettingsResolver::new(self.deps.config.clone());
        let config = settings.resolve();
        let filter = RecordFilter::new(config, oracle.rootline());

        let excluded = filter
            .is_page_excluded(page_id)
            .await
            .inspect_err(|e| error!("Page tree lookup failed for page {}: {}", page_id, e))?;
        if excluded {
            debug!("Page {} is excluded from frontend editing", page_id);
            return Ok(result);
        }

        let raw = match &request.payload.uid_scope {
            Some(ids) if ids.is_empty() => {
                debug!("Empty uid scope for page {}", page_id);
                return Ok(result);
            }
            Some(ids) => self.deps.records.fetch_by_ids(ids, language).await,
            None => self.deps.records.fetch_records(page_id, language, true).await,
        }
        .inspect_err(|e| error!("Failed to fetch records for page {}: {}", page_id, e))?;

        let records = parse_records(raw);
        let allowed = filter.filter(records, &oracle).await?;
        debug!(
            "Editor {} may edit {} records on page {}",
            actor_uid,
            allowed.len(),
            page_id
        );

        let resolver = AdditionalDataResolver::new(
            self.deps.records.as_ref(),
            self.deps.types.as_ref(),
            self.deps.routes.as_ref(),
            &oracle,
        );
        let builder = MenuBuilder::new(config, self.deps.routes.as_ref(), self.deps.types.as_ref());
        let renderer = MenuRenderer::new(
            self.deps.translator.as_ref(),
            self.deps.icons.as_ref(),
            &actor_language,
            settings.default_icon_size(),
        );
        let menu_ctx = MenuContext {
            page_id,
            language,
            return_url: request.return_url.clone(),
        };
        let hook_ctx = HookContext {
            page_id,
            language,
            return_url: request.return_url.clone(),
            actor_uid,
        };

        // Simple menus and a gated-off section never show additional data.
        let wants_additional = !config.is_simple_mode()
            && config.check_default_menu_structure(section::ADDITIONAL_DATA);

        for record in allowed {
            let additional = if wants_additional {
                let entries = AdditionalDataResolver::entries_for(&request.payload, &record);
                resolver
                    .resolve(entries, language, &request.return_url)
                    .await?
            } else {
                Vec::new()
            };

            let tree = match builder.build(&record, &additional, &menu_ctx) {
                Ok(tree) => tree,
                Err(e) if e.is_record_scoped() => {
                    warn!(
                        "Skipping {}:{} on page {}: {} ({})",
                        record.table,
                        record.uid,
                        page_id,
                        e,
                        e.code()
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };

            let tree = self.hooks.apply(&record, tree, &hook_ctx);
            let menu = renderer.render(&tree);
            if config.debug {
                info!(
                    "Menu for {}:{}: {}",
                    record.table,
                    record.uid,
                    serde_json::to_string(&menu).unwrap_or_default()
                );
            }

            result.insert(
                record.uid.to_string(),
                RecordMenu {
                    element: record.element().clone(),
                    menu,
                },
            );
        }

        Ok(result)
    }

    /// Flip the editor's opt-out flag, returning the new state.
    pub async fn toggle_disabled(&self, actor: Option<Actor>) -> Result<bool, CoreError> {
        self.oracle(actor).toggle_disabled_state().await
    }

    /// Drain the editor's queued feedback messages.
    pub async fn feedback_messages(
        &self,
        actor: Option<Actor>,
    ) -> Result<Vec<FeedbackMessage>, CoreError> {
        let oracle = self.oracle(actor);
        let Some(actor) = oracle.current_actor() else {
            return Ok(Vec::new());
        };
        let raw = self.deps.actors.take_feedback_messages(actor.uid).await?;
        Ok(feedback::decode_messages(&raw))
    }
}

fn parse_records(raw: Vec<RawRecord>) -> Vec<ContentRecord> {
    raw.into_iter()
        .filter_map(|row| match ContentRecord::from_raw(row) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed record: {}", e);
                None
            }
        })
        .collect()
}
