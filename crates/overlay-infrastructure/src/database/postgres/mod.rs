//! PostgreSQL repository implementations

pub mod record_source_impl;
pub mod page_tree_impl;
pub mod actor_repo_impl;

pub use record_source_impl::PgRecordSource;
pub use page_tree_impl::PgPageTree;
pub use actor_repo_impl::PgActorRepository;
