use super::RequestsLoggingLevel;
use crate::config::{DEFAULT_METRICS_PORT, DEFAULT_PORT, DEFAULT_QUERY_TIMEOUT_SEC};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    pub metrics_port: u16,
    /// Upper bound for a single catalog store call, `None` waits forever.
    pub query_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: DEFAULT_PORT,
            metrics_port: DEFAULT_METRICS_PORT,
            query_timeout: Some(Duration::from_secs(DEFAULT_QUERY_TIMEOUT_SEC)),
        }
    }
}
