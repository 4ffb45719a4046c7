//! Config command - show and change settings

use anyhow::Result;
use clap::Subcommand;
use comfy_table::Cell;
use finsight_core::config::Config;
use serde_json::json;

use super::get_finsight_dir;
use crate::output::{self, create_table};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective settings (file plus environment overrides)
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change a setting (e.g. `api.url`, `analytics.monthOrdering`)
    Set {
        /// Setting key
        key: String,
        /// New value (empty string clears optional settings)
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let finsight_dir = get_finsight_dir()?;

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&finsight_dir)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&settings_json(&config))?);
                return Ok(());
            }

            output::info(&format!("Settings directory: {}", finsight_dir.display()));
            let mut table = create_table();
            table.set_header(vec!["Setting", "Value"]);
            for (key, value) in settings_rows(&config) {
                table.add_row(vec![Cell::new(key), Cell::new(value)]);
            }
            println!("{}", table);
        }
        ConfigCommands::Set { key, value, json } => {
            let mut config = Config::load(&finsight_dir)?;
            config.set(&key, &value)?;
            config.save(&finsight_dir)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&settings_json(&config))?);
            } else {
                output::success(&format!("Updated {}", key));
            }
        }
    }

    Ok(())
}

fn settings_rows(config: &Config) -> Vec<(&'static str, String)> {
    vec![
        ("api.url", config.api_url.clone().unwrap_or_else(|| "(not set)".to_string())),
        ("api.token", mask_token(config.api_token.as_deref())),
        ("analytics.monthOrdering", enum_name(&config.month_ordering)),
        ("analytics.monthMatch", enum_name(&config.month_match)),
        ("analytics.trendMonths", config.trend_months.to_string()),
        ("export.defaultCurrency", config.default_currency.clone()),
    ]
}

fn settings_json(config: &Config) -> serde_json::Value {
    json!({
        "api": {
            "url": config.api_url,
            "token": config.api_token.as_deref().map(|t| mask_token(Some(t))),
        },
        "analytics": {
            "monthOrdering": config.month_ordering,
            "monthMatch": config.month_match,
            "trendMonths": config.trend_months,
        },
        "export": {
            "defaultCurrency": config.default_currency,
        },
    })
}

fn enum_name<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

/// Show only the last four characters of a token
fn mask_token(token: Option<&str>) -> String {
    match token {
        None => "(not set)".to_string(),
        Some(token) => {
            let chars: Vec<char> = token.chars().collect();
            let visible: String = chars[chars.len().saturating_sub(4)..].iter().collect();
            format!("****{}", visible)
        }
    }
}
