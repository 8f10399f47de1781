//! Icon markup

use overlay_core::domain::IconSize;
use overlay_core::repositories::IconProvider;

/// Renders icons as `<span>` wrapped SVG images below a base path.
#[derive(Debug, Clone)]
pub struct SpanIconProvider {
    base_path: String,
}

impl SpanIconProvider {
    pub fn new(base_path: impl Into<String>) -> Self {
        let base_path = base_path.into();
        Self {
            base_path: base_path.trim_end_matches('/').to_string(),
        }
    }
}

impl IconProvider for SpanIconProvider {
    fn markup(&self, identifier: &str, size: IconSize) -> String {
        let identifier = escape_attribute(identifier);
        format!(
            concat!(
                r#"<span class="icon icon-size-{size}" data-identifier="{id}" aria-hidden="true">"#,
                r#"<img src="{base}/{id}.svg" width="16" height="16" alt="" /></span>"#,
            ),
            size = size.as_str(),
            id = identifier,
            base = self.base_path,
        )
    }
}

/// Identifiers may come from page templates; never let them break out of
/// the attribute.
fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
