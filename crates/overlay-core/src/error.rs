//! Domain errors

use thiserror::Error;

/// Failure raised by a [`RouteBuilder`](crate::repositories::RouteBuilder).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Route not resolvable: {0}")]
    NotResolvable(String),
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Record source failure: {0}")]
    RecordSource(String),

    #[error("Page tree lookup failed: {0}")]
    PageTree(String),

    #[error("Actor store failure: {0}")]
    ActorStore(String),

    #[error("Permission check failed: {0}")]
    Permission(String),

    #[error("Configuration source failure: {0}")]
    ConfigSource(String),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Unknown content type: {0}")]
    UnknownContentType(String),

    #[error("No editor is logged in")]
    NoActor,

    #[error("Invalid menu node: {0}")]
    InvalidNode(String),
}

impl CoreError {
    /// Stable machine readable code, used in logs and error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::RecordSource(_) => "RECORD_SOURCE_FAILURE",
            CoreError::PageTree(_) => "PAGE_TREE_FAILURE",
            CoreError::ActorStore(_) => "ACTOR_STORE_FAILURE",
            CoreError::Permission(_) => "PERMISSION_FAILURE",
            CoreError::ConfigSource(_) => "CONFIG_SOURCE_FAILURE",
            CoreError::Route(_) => "ROUTE_NOT_RESOLVABLE",
            CoreError::MalformedRecord(_) => "MALFORMED_RECORD",
            CoreError::UnknownContentType(_) => "UNKNOWN_CONTENT_TYPE",
            CoreError::NoActor => "NO_ACTOR",
            CoreError::InvalidNode(_) => "INVALID_NODE",
        }
    }

    /// Lookup misses that only cost the affected record its menu.
    pub fn is_record_scoped(&self) -> bool {
        matches!(
            self,
            CoreError::Route(_)
                | CoreError::MalformedRecord(_)
                | CoreError::UnknownContentType(_)
                | CoreError::InvalidNode(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_error_converts() {
        let err: CoreError = RouteError::NotResolvable("record_edit".into()).into();
        assert_eq!(err.code(), "ROUTE_NOT_RESOLVABLE");
        assert!(err.is_record_scoped());
        assert_eq!(err.to_string(), "Route not resolvable: record_edit");
    }

    #[test]
    fn test_backend_faults_are_not_record_scoped() {
        assert!(!CoreError::RecordSource("timeout".into()).is_record_scoped());
        assert!(!CoreError::PageTree("timeout".into()).is_record_scoped());
        assert_eq!(CoreError::RecordSource("x".into()).code(), "RECORD_SOURCE_FAILURE");
    }
}
