// Application settings
// Loaded from --config, ./salesgrid.toml, or ~/.config/salesgrid/settings.toml

use std::fs;
use std::path::{Path, PathBuf};

use salesgrid_analytics::AnalyticsConfig;
use serde::{Deserialize, Serialize};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "salesgrid.toml";

#[derive(Debug)]
pub enum ConfigError {
    /// Config file missing or unreadable.
    Read { path: PathBuf, message: String },
    /// TOML parse / deserialization error.
    Parse(String),
    /// Values parsed but are unusable.
    Validation(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "cannot read config {}: {message}", path.display())
            }
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Validation(msg) => write!(f, "config validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Where input and output files live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Relative to `data_dir`.
    pub raw_file: String,
    /// Relative to `output_dir`.
    pub cleaned_file: String,
    /// Relative to `data_dir`.
    pub enriched_file: String,
    /// Relative to `output_dir`.
    pub report_file: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("output"),
            raw_file: "sales_data.txt".into(),
            cleaned_file: "Sales_cleaned_data.txt".into(),
            enriched_file: "enriched_sales_data.txt".into(),
            report_file: "sales_report.txt".into(),
        }
    }
}

impl PathSettings {
    pub fn raw_path(&self) -> PathBuf {
        self.data_dir.join(&self.raw_file)
    }

    pub fn cleaned_path(&self) -> PathBuf {
        self.output_dir.join(&self.cleaned_file)
    }

    pub fn enriched_path(&self) -> PathBuf {
        self.data_dir.join(&self.enriched_file)
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            url: "https://dummyjson.com/products?limit=100&skip=0".into(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub currency_symbol: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            currency_symbol: "₹".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub analytics: AnalyticsConfig,
    pub catalog: CatalogSettings,
    pub report: ReportSettings,
}

impl Settings {
    /// Per-user settings file path.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("salesgrid");
        config_dir.join("settings.toml")
    }

    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analytics
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        if self.catalog.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "catalog.timeout_secs must be at least 1".into(),
            ));
        }
        if self.catalog.url.trim().is_empty() {
            return Err(ConfigError::Validation("catalog.url must not be empty".into()));
        }
        Ok(())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    /// Resolve settings: `explicit` file, else `./salesgrid.toml`, else the
    /// per-user file, else defaults. Returns the file used, if any.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::load_with(explicit, Path::new("."), Some(Self::config_path()))
    }

    /// [`Settings::load`] with the working directory and user file injected.
    pub fn load_with(
        explicit: Option<&Path>,
        cwd: &Path,
        user_file: Option<PathBuf>,
    ) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            // An explicit file must exist; never fall back silently.
            return Ok((Self::load_from(path)?, Some(path.to_path_buf())));
        }

        let candidates = std::iter::once(cwd.join(LOCAL_CONFIG_FILE)).chain(user_file);
        for candidate in candidates {
            if candidate.is_file() {
                log::info!("using config {}", candidate.display());
                let settings = Self::load_from(&candidate)?;
                return Ok((settings, Some(candidate)));
            }
        }

        log::debug!("no config file found, using defaults");
        Ok((Self::default(), None))
    }
}
