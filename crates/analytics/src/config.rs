use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

/// Selection sizes and thresholds for one analytics run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Products kept by the top-N by quantity selector.
    pub top_products: usize,
    /// Customers shown in the console table.
    pub top_customers_display: usize,
    /// Customers listed in the composed report.
    pub top_customers_report: usize,
    /// Products with total quantity strictly below this are low performers.
    pub low_threshold: i64,
    /// Daily trend rows shown in the console table.
    pub trend_rows: usize,
    /// Daily trend rows listed in the composed report.
    pub report_trend_rows: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_products: 5,
            top_customers_display: 10,
            top_customers_report: 5,
            low_threshold: 10,
            trend_rows: 15,
            report_trend_rows: 26,
        }
    }
}

impl AnalyticsConfig {
    pub fn from_toml(input: &str) -> Result<Self, AnalyticsError> {
        let config: AnalyticsConfig =
            toml::from_str(input).map_err(|e| AnalyticsError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if self.top_products == 0 {
            return Err(AnalyticsError::ConfigValidation(
                "top_products must be at least 1".into(),
            ));
        }
        if self.top_customers_display == 0 || self.top_customers_report == 0 {
            return Err(AnalyticsError::ConfigValidation(
                "top customer counts must be at least 1".into(),
            ));
        }
        if self.low_threshold < 0 {
            return Err(AnalyticsError::ConfigValidation(format!(
                "low_threshold must not be negative, got {}",
                self.low_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = AnalyticsConfig::from_toml("").unwrap();
        assert_eq!(config, AnalyticsConfig::default());
        assert_eq!(config.top_products, 5);
        assert_eq!(config.low_threshold, 10);
    }

    #[test]
    fn partial_override() {
        let config = AnalyticsConfig::from_toml("top_products = 3\nlow_threshold = 20\n").unwrap();
        assert_eq!(config.top_products, 3);
        assert_eq!(config.low_threshold, 20);
        assert_eq!(config.top_customers_display, 10);
    }

    #[test]
    fn rejects_zero_top_products() {
        let err = AnalyticsConfig::from_toml("top_products = 0").unwrap_err();
        assert!(matches!(err, AnalyticsError::ConfigValidation(_)));
        assert!(err.to_string().contains("top_products"));
    }

    #[test]
    fn rejects_bad_type() {
        let err = AnalyticsConfig::from_toml("top_products = \"five\"").unwrap_err();
        assert!(matches!(err, AnalyticsError::ConfigParse(_)));
    }
}
