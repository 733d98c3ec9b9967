pub mod catalog;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, LocalStorage};

pub use config::AppConfig;
pub use core::{export::PortfolioExporter, session::PortfolioSession};
pub use utils::error::{PortfolioError, Result};
