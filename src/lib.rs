pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::console::ConsoleRenderer;
pub use crate::app::export::CsvExporter;
pub use crate::app::summary::Summary;
pub use crate::config::cli::LocalStorage;
pub use crate::config::toml_config::TomlConfig;
pub use crate::config::translations::{Catalog, Label};
pub use crate::core::{flow::AssessmentFlow, scorer, session::Session};
pub use crate::utils::error::{Result, SkyluxError};
