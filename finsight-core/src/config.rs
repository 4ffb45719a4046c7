//! Configuration management
//!
//! Settings live in `settings.json` inside the finsight directory:
//! ```json
//! {
//!   "api": { "url": "http://127.0.0.1:8000/api", "token": null },
//!   "analytics": { "monthOrdering": "first_seen", "monthMatch": "any_year", "trendMonths": 6 },
//!   "export": { "defaultCurrency": "PKR" }
//! }
//! ```
//! Keys this crate does not manage are preserved when saving.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{MonthMatch, MonthOrdering};
use crate::services::{AggregatorOptions, DEFAULT_TREND_MONTHS};

const SETTINGS_FILE: &str = "settings.json";
const DEFAULT_CURRENCY: &str = "PKR";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(default)]
    analytics: AnalyticsSettings,
    #[serde(default)]
    export: ExportSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyticsSettings {
    #[serde(default)]
    month_ordering: MonthOrdering,
    #[serde(default)]
    month_match: MonthMatch,
    #[serde(default)]
    trend_months: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportSettings {
    #[serde(default)]
    default_currency: Option<String>,
}

/// Finsight configuration (resolved view of settings + environment)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: Option<String>,
    pub api_token: Option<String>,
    pub month_ordering: MonthOrdering,
    pub month_match: MonthMatch,
    pub trend_months: u32,
    pub default_currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            api_token: None,
            month_ordering: MonthOrdering::default(),
            month_match: MonthMatch::default(),
            trend_months: DEFAULT_TREND_MONTHS,
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Config {
    /// Load config from the finsight directory
    ///
    /// Environment variables override the file:
    /// - `FINSIGHT_API_URL`, `FINSIGHT_API_TOKEN`
    /// - `FINSIGHT_CHRONOLOGICAL` (true/false) for the monthly ordering
    pub fn load(finsight_dir: &Path) -> Result<Self> {
        let raw = read_settings(finsight_dir)?;
        let mut config = Self::from_settings(&raw);

        if let Some(url) = env_value("FINSIGHT_API_URL") {
            config.api_url = Some(url);
        }
        if let Some(token) = env_value("FINSIGHT_API_TOKEN") {
            config.api_token = Some(token);
        }
        match env_value("FINSIGHT_CHRONOLOGICAL").as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => {
                config.month_ordering = MonthOrdering::Chronological
            }
            Some("false" | "0" | "no" | "FALSE" | "NO") => {
                config.month_ordering = MonthOrdering::FirstSeen
            }
            _ => {}
        }

        Ok(config)
    }

    fn from_settings(raw: &SettingsFile) -> Self {
        let defaults = Self::default();
        Self {
            api_url: raw.api.url.clone().filter(|s| !s.trim().is_empty()),
            api_token: raw.api.token.clone().filter(|s| !s.trim().is_empty()),
            month_ordering: raw.analytics.month_ordering,
            month_match: raw.analytics.month_match,
            trend_months: raw
                .analytics
                .trend_months
                .filter(|m| *m > 0)
                .unwrap_or(defaults.trend_months),
            default_currency: raw
                .export
                .default_currency
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.default_currency),
        }
    }

    /// Save config to the finsight directory
    /// Preserves settings this crate doesn't manage
    pub fn save(&self, finsight_dir: &Path) -> Result<()> {
        let mut settings = read_settings(finsight_dir)?;

        settings.api.url = self.api_url.clone();
        settings.api.token = self.api_token.clone();
        settings.analytics.month_ordering = self.month_ordering;
        settings.analytics.month_match = self.month_match;
        settings.analytics.trend_months = Some(self.trend_months);
        settings.export.default_currency = Some(self.default_currency.clone());

        std::fs::create_dir_all(finsight_dir)
            .with_context(|| format!("Failed to create {}", finsight_dir.display()))?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(finsight_dir.join(SETTINGS_FILE), content)?;
        Ok(())
    }

    /// Aggregator options anchored at `reference_date` with the configured month policies
    pub fn aggregator_options(&self, reference_date: NaiveDate) -> AggregatorOptions {
        AggregatorOptions::new(reference_date)
            .with_month_ordering(self.month_ordering)
            .with_month_match(self.month_match)
    }

    /// Update one setting by its dotted key (e.g. `api.url`)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        let optional = || (!value.is_empty()).then(|| value.to_string());

        match key {
            "api.url" => self.api_url = optional(),
            "api.token" => self.api_token = optional(),
            "analytics.monthOrdering" => {
                self.month_ordering = match value {
                    "first_seen" => MonthOrdering::FirstSeen,
                    "chronological" => MonthOrdering::Chronological,
                    _ => anyhow::bail!("monthOrdering must be first_seen or chronological"),
                }
            }
            "analytics.monthMatch" => {
                self.month_match = match value {
                    "any_year" => MonthMatch::AnyYear,
                    "same_year" => MonthMatch::SameYear,
                    _ => anyhow::bail!("monthMatch must be any_year or same_year"),
                }
            }
            "analytics.trendMonths" => {
                let months: u32 = value
                    .parse()
                    .with_context(|| format!("trendMonths must be a number: {}", value))?;
                if months == 0 {
                    anyhow::bail!("trendMonths must be at least 1");
                }
                self.trend_months = months;
            }
            "export.defaultCurrency" => {
                if value.is_empty() {
                    anyhow::bail!("defaultCurrency cannot be empty");
                }
                self.default_currency = value.to_uppercase();
            }
            _ => anyhow::bail!("Unknown setting: {}", key),
        }
        Ok(())
    }
}

fn read_settings(finsight_dir: &Path) -> Result<SettingsFile> {
    let settings_path = finsight_dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }

    let content = std::fs::read_to_string(&settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable {}: {}", settings_path.display(), e);
        SettingsFile::default()
    }))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
