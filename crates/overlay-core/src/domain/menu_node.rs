// ============================================================================
// Overlay Core - Menu Node Entity
// File: crates/overlay-core/src/domain/menu_node.rs
// Description: Tree of dropdown entries shown by the overlay button
// ============================================================================

use indexmap::IndexMap;
use serde::Serialize;

use super::label::Label;
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Divider,
    Info,
    Link,
    Menu,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Divider => "divider",
            NodeKind::Info => "info",
            NodeKind::Link => "link",
            NodeKind::Menu => "menu",
        }
    }
}

/// A single dropdown entry. Only [`NodeKind::Link`] nodes carry a URL;
/// children keep their insertion order and keys are unique per parent.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuNode {
    label: Label,
    kind: NodeKind,
    url: Option<String>,
    icon: Option<String>,
    target_blank: bool,
    children: IndexMap<String, MenuNode>,
}

impl MenuNode {
    fn new(label: Label, kind: NodeKind, url: Option<String>) -> Self {
        Self {
            label,
            kind,
            url,
            icon: None,
            target_blank: false,
            children: IndexMap::new(),
        }
    }

    pub fn menu(label: Label) -> Self {
        Self::new(label, NodeKind::Menu, None)
    }

    pub fn divider(label: Label) -> Self {
        Self::new(label, NodeKind::Divider, None)
    }

    pub fn info(label: Label) -> Self {
        Self::new(label, NodeKind::Info, None)
    }

    pub fn link(label: Label, url: impl Into<String>) -> Self {
        Self::new(label, NodeKind::Link, Some(url.into()))
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_target_blank(mut self, target_blank: bool) -> Self {
        self.target_blank = target_blank;
        self
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn set_label(&mut self, label: Label) {
        self.label = label;
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Replace the action URL. Rejected for every kind except links.
    pub fn set_url(&mut self, url: impl Into<String>) -> Result<(), CoreError> {
        if self.kind != NodeKind::Link {
            return Err(CoreError::InvalidNode(format!(
                "{} nodes cannot carry a url",
                self.kind.as_str()
            )));
        }
        self.url = Some(url.into());
        Ok(())
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn set_icon(&mut self, icon: Option<String>) {
        self.icon = icon;
    }

    pub fn target_blank(&self) -> bool {
        self.target_blank
    }

    pub fn set_target_blank(&mut self, target_blank: bool) {
        self.target_blank = target_blank;
    }

    /// Append a child. An existing child with the same key is replaced in
    /// place and returned.
    pub fn append(&mut self, key: impl Into<String>, node: MenuNode) -> Option<MenuNode> {
        self.children.insert(key.into(), node)
    }

    /// Insert a child right after `after`, or at the end when `after` is
    /// not a child of this node.
    pub fn insert_after(&mut self, after: &str, key: impl Into<String>, node: MenuNode) {
        let key = key.into();
        self.children.shift_remove(&key);
        match self.children.get_index_of(after) {
            Some(index) => {
                self.children.shift_insert(index + 1, key, node);
            }
            None => {
                self.children.insert(key, node);
            }
        }
    }

    /// Remove a child, keeping the order of the remaining ones.
    pub fn remove_child(&mut self, key: &str) -> Option<MenuNode> {
        self.children.shift_remove(key)
    }

    pub fn child(&self, key: &str) -> Option<&MenuNode> {
        self.children.get(key)
    }

    pub fn child_mut(&mut self, key: &str) -> Option<&mut MenuNode> {
        self.children.get_mut(key)
    }

    pub fn children(&self) -> &IndexMap<String, MenuNode> {
        &self.children
    }

    pub fn child_keys(&self) -> Vec<&str> {
        self.children.keys().map(String::as_str).collect()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Number of levels including this node.
    pub fn depth(&self) -> usize {
        1 + self.children.values().map(MenuNode::depth).max().unwrap_or(0)
    }
}
