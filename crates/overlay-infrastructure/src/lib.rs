//! # Overlay Infrastructure
//! 
//! Concrete collaborators (adapters) for the overlay pipeline: PostgreSQL
//! sources, layered configuration, backend routes, registries and the host
//! permission policy.

pub mod database;
pub mod config_source;
pub mod routing;
pub mod content_types;
pub mod labels;
pub mod icons;
pub mod permissions;

pub use database::{create_pool, PgActorRepository, PgPageTree, PgRecordSource};
pub use config_source::LayeredConfigSource;
pub use routing::RouteTable;
pub use content_types::TypeRegistry;
pub use labels::LabelCatalog;
pub use icons::SpanIconProvider;
pub use permissions::MountPermissionPolicy;
