//! Advisor thresholds and data locations
//!
//! Config is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/pennywise/config/advisor.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Any key missing from an override keeps its default value.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Longest spending window accepted from a config file (ten years)
pub const MAX_WINDOW_DAYS: i64 = 3650;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/advisor.toml");

/// Thresholds used by the [`Advisor`](crate::analysis::Advisor)
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorConfig {
    /// Length of the trailing spending window in days
    pub window_days: i64,
    /// Share of total expenses above which a category is called out
    pub dominant_share_percent: f64,
    /// Window-over-window change that triggers a rise/fall message
    pub change_alert_percent: f64,
    /// Savings rate below which the user is told to save more
    pub min_savings_rate_percent: f64,
    /// Savings rate above which the user is congratulated
    pub high_savings_rate_percent: f64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            dominant_share_percent: 50.0,
            change_alert_percent: 20.0,
            min_savings_rate_percent: 10.0,
            high_savings_rate_percent: 20.0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    spending: Option<RawSpending>,
    savings: Option<RawSavings>,
}

#[derive(Debug, Deserialize)]
struct RawSpending {
    window_days: Option<i64>,
    dominant_share_percent: Option<f64>,
    change_alert_percent: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawSavings {
    min_rate_percent: Option<f64>,
    high_rate_percent: Option<f64>,
}

impl AdvisorConfig {
    /// Load from the default override location, falling back to the embedded defaults
    pub fn load() -> Result<Self> {
        load_config(None)
    }

    /// Load from an explicit path (embedded defaults if the file does not exist)
    pub fn load_from(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        parse_config(content)
    }
}

/// Platform data directory for Pennywise
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("pennywise"))
}

/// Default location of the advisor config override
pub fn default_config_path() -> Option<PathBuf> {
    data_dir().map(|d| d.join("config").join("advisor.toml"))
}

/// Default database location
pub fn default_db_path() -> Option<PathBuf> {
    data_dir().map(|d| d.join("pennywise.db"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<AdvisorConfig> {
    let path = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let content = match path {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading advisor config override");
            fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

fn parse_config(content: &str) -> Result<AdvisorConfig> {
    let raw: RawConfig =
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = AdvisorConfig::default();

    if let Some(spending) = raw.spending {
        if let Some(days) = spending.window_days {
            config.window_days = days;
        }
        if let Some(share) = spending.dominant_share_percent {
            config.dominant_share_percent = share;
        }
        if let Some(change) = spending.change_alert_percent {
            config.change_alert_percent = change;
        }
    }

    if let Some(savings) = raw.savings {
        if let Some(min) = savings.min_rate_percent {
            config.min_savings_rate_percent = min;
        }
        if let Some(high) = savings.high_rate_percent {
            config.high_savings_rate_percent = high;
        }
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &AdvisorConfig) -> Result<()> {
    if config.window_days <= 0 || config.window_days > MAX_WINDOW_DAYS {
        return Err(Error::Config(format!(
            "spending.window_days must be between 1 and {}, got {}",
            MAX_WINDOW_DAYS, config.window_days
        )));
    }
    if config.min_savings_rate_percent > config.high_savings_rate_percent {
        return Err(Error::Config(format!(
            "savings.min_rate_percent ({}) exceeds savings.high_rate_percent ({})",
            config.min_savings_rate_percent, config.high_savings_rate_percent
        )));
    }
    Ok(())
}
