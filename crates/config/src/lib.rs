// Configuration loading

pub mod settings;

pub use settings::{CatalogSettings, ConfigError, PathSettings, ReportSettings, Settings};
