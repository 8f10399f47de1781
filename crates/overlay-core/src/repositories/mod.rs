//! Collaborator traits (ports)
//!
//! Everything the pipeline needs from the host CMS is reached through these
//! traits and injected explicitly; no service reads ambient global state.

pub mod record_source;
pub mod ancestry_source;
pub mod type_config_source;
pub mod actor_repository;
pub mod permission_policy;
pub mod route_builder;
pub mod config_source;
pub mod translator;
pub mod icon_provider;

pub use record_source::RecordSource;
pub use ancestry_source::AncestrySource;
pub use type_config_source::TypeConfigSource;
pub use actor_repository::ActorRepository;
pub use permission_policy::PermissionPolicy;
pub use route_builder::RouteBuilder;
pub use config_source::ConfigSource;
pub use translator::Translator;
pub use icon_provider::IconProvider;

#[cfg(test)]
pub use record_source::MockRecordSource;
#[cfg(test)]
pub use ancestry_source::MockAncestrySource;
#[cfg(test)]
pub use actor_repository::MockActorRepository;
#[cfg(test)]
pub use permission_policy::MockPermissionPolicy;
#[cfg(test)]
pub use route_builder::MockRouteBuilder;
#[cfg(test)]
pub use config_source::MockConfigSource;
