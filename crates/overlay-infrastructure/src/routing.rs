//! Backend route table

use std::collections::HashMap;

use url::form_urlencoded;

use overlay_core::error::RouteError;
use overlay_core::repositories::RouteBuilder;
use overlay_shared::config::RouteSettings;

/// Maps route names to backend paths below a common base path.
#[derive(Debug, Clone)]
pub struct RouteTable {
    base_path: String,
    paths: HashMap<String, String>,
}

impl RouteTable {
    /// Configured paths are merged over the built-in ones.
    pub fn from_settings(settings: &RouteSettings) -> Self {
        let mut paths = RouteSettings::default().paths;
        paths.extend(settings.paths.clone());
        Self {
            base_path: settings.base_path.trim_end_matches('/').to_string(),
            paths,
        }
    }
}

impl RouteBuilder for RouteTable {
    fn build_url(
        &self,
        route_name: &str,
        params: &[(String, String)],
    ) -> Result<String, RouteError> {
        let path = self
            .paths
            .get(route_name)
            .filter(|path| !path.trim().is_empty())
            .ok_or_else(|| RouteError::NotResolvable(route_name.to_string()))?;

        let mut url = format!("{}/{}", self.base_path, path.trim_start_matches('/'));
        if !params.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish();
            url.push('?');
            url.push_str(&query);
        }
        Ok(url)
    }
}
