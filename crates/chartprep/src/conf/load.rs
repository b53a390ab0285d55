//! Load — config loading from file and environment variables.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::ChartConfig;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/chartprep/chart.toml";

impl ChartConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("CHART_CONFIG_FILE")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading chart configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!("Config file not found at {}, using defaults", config_path);
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        Self::from_toml_str(&contents).with_context(|| format!("Invalid config file {}", path))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse chart configuration")
    }

    /// Apply `CHART_THRESHOLD_PCT` / `CHART_OTHER_LABEL` as returned by `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(pct) = lookup("CHART_THRESHOLD_PCT") {
            self.threshold_pct = pct
                .trim()
                .parse()
                .with_context(|| format!("CHART_THRESHOLD_PCT is not a number: {:?}", pct))?;
        }
        if let Some(label) = lookup("CHART_OTHER_LABEL") {
            self.other_label = label;
        }
        Ok(())
    }

    /// Validate that configuration values are sane
    pub fn validate(&self) -> Result<(), String> {
        if !self.threshold_pct.is_finite() || !(0.0..=1.0).contains(&self.threshold_pct) {
            return Err(format!(
                "threshold_pct must be between 0 and 1, got {}",
                self.threshold_pct
            ));
        }
        if self.other_label.is_empty() {
            return Err("other_label must not be empty".to_string());
        }
        Ok(())
    }
}
