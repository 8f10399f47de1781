//! Pipeline services

pub mod settings_resolver;
pub mod rootline;
pub mod access_oracle;
pub mod record_filter;
pub mod url_builder;
pub mod node_factory;
pub mod additional_data;
pub mod menu_builder;
pub mod hooks;
pub mod renderer;
pub mod edit_information;
pub mod feedback;

pub use settings_resolver::SettingsResolver;
pub use rootline::RootlineCache;
pub use access_oracle::AccessOracle;
pub use record_filter::RecordFilter;
pub use url_builder::ActionTarget;
pub use node_factory::NodeFactory;
pub use additional_data::{AdditionalDataResolver, ResolvedEntry};
pub use menu_builder::{MenuBuilder, MenuContext};
pub use hooks::{HookContext, MenuHooks};
pub use renderer::{MenuRenderer, RenderedNode};
pub use edit_information::{
    Collaborators, EditInformation, EditInformationRequest, FrontendEditService, RecordMenu,
};
