//! Backend routing trait (port)

use crate::error::RouteError;

#[cfg_attr(test, mockall::automock)]
pub trait RouteBuilder: Send + Sync {
    fn build_url(
        &self,
        route_name: &str,
        params: &[(String, String)],
    ) -> Result<String, RouteError>;
}
