//! Menu hooks
//!
//! Registered transforms run after a record's tree is built. Each hook gets
//! the previous hook's output and may return it modified or replaced.

use std::fmt;
use std::sync::Arc;

use crate::domain::{ContentRecord, MenuNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookContext {
    pub page_id: i64,
    pub language: i64,
    pub return_url: String,
    pub actor_uid: i64,
}

pub type MenuHook = Arc<dyn Fn(&ContentRecord, MenuNode, &HookContext) -> MenuNode + Send + Sync>;

#[derive(Clone, Default)]
pub struct MenuHooks {
    hooks: Vec<MenuHook>,
}

impl MenuHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, hook: F)
    where
        F: Fn(&ContentRecord, MenuNode, &HookContext) -> MenuNode + Send + Sync + 'static,
    {
        self.hooks.push(Arc::new(hook));
    }

    /// Run every hook in registration order.
    pub fn apply(&self, record: &ContentRecord, tree: MenuNode, ctx: &HookContext) -> MenuNode {
        self.hooks.iter().fold(tree, |tree, hook| hook(record, tree, ctx))
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for MenuHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuHooks").field("hooks", &self.hooks.len()).finish()
    }
}
