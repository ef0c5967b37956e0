use std::fmt;

#[derive(Debug)]
pub enum AnalyticsError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (zero-sized selections, etc.).
    ConfigValidation(String),
}

impl fmt::Display for AnalyticsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "analytics config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "analytics config validation error: {msg}"),
        }
    }
}

impl std::error::Error for AnalyticsError {}
