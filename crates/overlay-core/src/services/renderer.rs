// ============================================================================
// Overlay Core - Tree Renderer
// File: crates/overlay-core/src/services/renderer.rs
// Description: Localizes a menu tree and turns it into its wire shape
// ============================================================================

use indexmap::IndexMap;
use serde::Serialize;

use crate::domain::{IconSize, MenuNode, NodeKind};
use crate::repositories::{IconProvider, Translator};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedNode {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_blank: Option<bool>,
    /// Icon markup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub children: IndexMap<String, RenderedNode>,
}

pub struct MenuRenderer<'a> {
    translator: &'a dyn Translator,
    icons: &'a dyn IconProvider,
    language: &'a str,
    icon_size: IconSize,
}

impl<'a> MenuRenderer<'a> {
    pub fn new(
        translator: &'a dyn Translator,
        icons: &'a dyn IconProvider,
        language: &'a str,
        icon_size: IconSize,
    ) -> Self {
        Self {
            translator,
            icons,
            language,
            icon_size,
        }
    }

    pub fn render(&self, node: &MenuNode) -> RenderedNode {
        let label = node.label().resolve(|key| {
            self.translator
                .translate(key, self.language)
                .unwrap_or_else(|| key.to_string())
        });
        let url = node.url().map(str::to_string);
        let target_blank = url.as_ref().map(|_| node.target_blank());

        RenderedNode {
            label,
            kind: node.kind(),
            url,
            target_blank,
            icon: node.icon().map(|icon| self.icons.markup(icon, self.icon_size)),
            children: node
                .children()
                .iter()
                .map(|(key, child)| (key.clone(), self.render(child)))
                .collect(),
        }
    }
}
