//! Node factory
//!
//! Small value type used by the menu builders to create and append nodes
//! with consistent labels, icons and link targets.

use crate::domain::{Label, MenuNode};

#[derive(Debug, Clone, Copy, Default)]
pub struct NodeFactory {
    target_blank: bool,
}

impl NodeFactory {
    pub fn new(target_blank: bool) -> Self {
        Self { target_blank }
    }

    pub fn divider(&self, parent: &mut MenuNode, key: &str, label_key: &str) {
        parent.append(key, MenuNode::divider(Label::key(label_key)));
    }

    pub fn info(&self, parent: &mut MenuNode, key: &str, label: Label, icon: &str) {
        parent.append(key, MenuNode::info(label).with_icon(icon));
    }

    pub fn link(&self, parent: &mut MenuNode, key: &str, label: Label, url: String, icon: &str) {
        parent.append(key, self.standalone_link(label, url, icon));
    }

    /// Link node not attached to any parent (simple mode root).
    pub fn standalone_link(&self, label: Label, url: String, icon: &str) -> MenuNode {
        MenuNode::link(label, url)
            .with_icon(icon)
            .with_target_blank(self.target_blank)
    }
}
