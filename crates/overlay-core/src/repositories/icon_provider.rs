//! Icon markup trait (port)

use crate::domain::IconSize;

pub trait IconProvider: Send + Sync {
    fn markup(&self, identifier: &str, size: IconSize) -> String;
}
