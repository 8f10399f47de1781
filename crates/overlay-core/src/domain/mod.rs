//! # Overlay Core - Domain Module
//! 
//! Domain entities for the frontend editing overlay.

pub mod label;
pub mod menu_node;
pub mod content_record;
pub mod additional_data;
pub mod menu_configuration;
pub mod actor;
pub mod type_config;
pub mod icon;
pub mod feedback;

// Re-export all entities and enums
pub use label::{Label, LabelPart};
pub use menu_node::{MenuNode, NodeKind};
pub use content_record::{ContentRecord, RawRecord, PLUGIN_TYPE};
pub use additional_data::{AdditionalDataEntry, ClientPayload, EntryTarget, PayloadError};
pub use menu_configuration::{section, ListSetting, MenuConfiguration, RawMenuSettings, Toggle};
pub use actor::Actor;
pub use type_config::TypeConfig;
pub use icon::IconSize;
pub use feedback::{FeedbackMessage, FeedbackSeverity};
