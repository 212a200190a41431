pub mod config;
pub mod error;

pub use config::{BlogConfig, Config, LlmBackendKind, LlmConfig};
pub use error::{CrawlerError, CrawlerResult};
