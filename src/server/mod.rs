pub mod config;
pub mod error;
mod http_layers;
mod json_body;
pub mod metrics;
#[allow(clippy::module_inception)]
pub mod server;
pub mod state;
mod store_access;
#[cfg(test)]
mod test_support;

pub use config::ServerConfig;
pub use error::ApiError;
pub use http_layers::*;
pub use server::{make_app, make_metrics_app, run_server};
pub use store_access::StoreAccess;
