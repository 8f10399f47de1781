//! Content type configuration trait (port)

use crate::domain::TypeConfig;

pub trait TypeConfigSource: Send + Sync {
    /// Display settings of a record type; plugin records pass their subtype.
    fn config_for(&self, type_code: &str, subtype_code: Option<&str>) -> Option<TypeConfig>;

    /// Default icon for records of `table`.
    fn table_icon(&self, table: &str) -> Option<String>;
}
