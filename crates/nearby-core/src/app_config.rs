use crate::geo::Coordinate;

#[derive(Clone)]
pub struct AppConfig {
    pub overpass_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
    /// Origin used when the caller supplies no coordinate.
    pub default_origin: Option<Coordinate>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("overpass_url", &self.overpass_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            // A default origin is a home address more often than not.
            .field(
                "default_origin",
                &self.default_origin.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
