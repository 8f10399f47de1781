//! Action URL builders
//!
//! One pure function per action. Unresolvable routes are reported to the
//! caller, which decides whether the affected entry can be skipped.

use crate::error::RouteError;
use crate::repositories::RouteBuilder;

pub mod routes {
    pub const RECORD_EDIT: &str = "record_edit";
    pub const TCE_DB: &str = "tce_db";
    pub const SHOW_ITEM: &str = "show_item";
    pub const MOVE_ELEMENT: &str = "move_element";
    pub const RECORD_HISTORY: &str = "record_history";
    pub const NEW_CONTENT_WIZARD: &str = "new_content_element_wizard";
    pub const WEB_LAYOUT: &str = "web_layout";
}

/// Query flag telling the backend editor it was opened from the overlay.
pub const OVERLAY_MARKER: (&str, &str) = ("frontend_edit", "1");

/// Minimal identification of the record an action applies to.
#[derive(Debug, Clone, Copy)]
pub struct ActionTarget<'a> {
    pub table: &'a str,
    pub uid: i64,
    pub pid: i64,
    pub language: i64,
    pub return_url: &'a str,
}

fn param(name: impl Into<String>, value: impl ToString) -> (String, String) {
    (name.into(), value.to_string())
}

pub fn edit_url(routes: &dyn RouteBuilder, target: &ActionTarget) -> Result<String, RouteError> {
    routes.build_url(
        routes::RECORD_EDIT,
        &[
            param(format!("edit[{}][{}]", target.table, target.uid), "edit"),
            param("returnUrl", target.return_url),
        ],
    )
}

/// Set the hidden flag to `hide`.
pub fn hide_url(
    routes: &dyn RouteBuilder,
    target: &ActionTarget,
    hide: bool,
) -> Result<String, RouteError> {
    routes.build_url(
        routes::TCE_DB,
        &[
            param(
                format!("data[{}][{}][hidden]", target.table, target.uid),
                u8::from(hide),
            ),
            param("redirect", target.return_url),
        ],
    )
}

pub fn info_url(routes: &dyn RouteBuilder, target: &ActionTarget) -> Result<String, RouteError> {
    routes.build_url(
        routes::SHOW_ITEM,
        &[
            param("table", target.table),
            param("uid", target.uid),
            param("returnUrl", target.return_url),
        ],
    )
}

pub fn move_url(routes: &dyn RouteBuilder, target: &ActionTarget) -> Result<String, RouteError> {
    routes.build_url(
        routes::MOVE_ELEMENT,
        &[
            param("table", target.table),
            param("uid", target.uid),
            param("returnUrl", target.return_url),
        ],
    )
}

pub fn history_url(routes: &dyn RouteBuilder, target: &ActionTarget) -> Result<String, RouteError> {
    routes.build_url(
        routes::RECORD_HISTORY,
        &[
            param("element", format!("{}:{}", target.table, target.uid)),
            param("returnUrl", target.return_url),
        ],
    )
}

/// New record placed directly after the target (negative uid_pid).
pub fn new_after_url(
    routes: &dyn RouteBuilder,
    target: &ActionTarget,
) -> Result<String, RouteError> {
    routes.build_url(
        routes::NEW_CONTENT_WIZARD,
        &[
            param("id", target.pid),
            param("sys_language_uid", target.language),
            param("uid_pid", -target.uid),
            param("returnUrl", target.return_url),
        ],
    )
}

/// Page layout of the owning page, anchored at the record.
pub fn page_layout_url(
    routes: &dyn RouteBuilder,
    target: &ActionTarget,
) -> Result<String, RouteError> {
    let url = routes.build_url(
        routes::WEB_LAYOUT,
        &[param("id", target.pid), param("language", target.language)],
    )?;
    Ok(format!("{}#element-{}-{}", url, target.table, target.uid))
}

/// Append `name=value` to a URL, keeping any fragment at the end.
pub fn append_query_flag(url: &str, name: &str, value: &str) -> String {
    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let separator = if base.contains('?') { '&' } else { '?' };
    let mut out = format!("{}{}{}={}", base, separator, name, value);
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}
