//! CLI command implementations

pub mod breakdown;
pub mod config;
pub mod export;
pub mod insights;
pub mod list;
pub mod summary;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use finsight_core::adapters::json::{read_activities, JsonFileSource};
use finsight_core::{ActivitySource, FinancialActivity, FinsightContext};

/// Get the finsight directory from environment or default
pub fn get_finsight_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("FINSIGHT_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".finsight"))
        .context("Could not find home directory; set FINSIGHT_DIR")
}

/// Load settings and build the finsight context
pub fn get_context() -> Result<FinsightContext> {
    let finsight_dir = get_finsight_dir()?;
    FinsightContext::new(&finsight_dir).context("Failed to initialize finsight context")
}

/// Load activities from a file, stdin, or the configured API
///
/// Stdin is read only when the file is `-`. Without a file the backend
/// API is used, whatever stdin is attached to.
pub fn load_activities(ctx: &FinsightContext, file: Option<&Path>) -> Result<Vec<FinancialActivity>> {
    match file {
        Some(path) if path == Path::new("-") => read_stdin(),
        Some(path) => {
            let source = JsonFileSource::new(path);
            source
                .fetch()
                .with_context(|| format!("Failed to load activities from {}", path.display()))
        }
        None => {
            let source = ctx.api_source().map_err(|err| {
                if atty::isnt(atty::Stream::Stdin) {
                    err.context("Pass - as the file to read activities from stdin")
                } else {
                    err
                }
            })?;
            log::info!("Fetching activities from {}", source.endpoint());
            source
                .fetch()
                .with_context(|| format!("Failed to fetch activities from {}", source.endpoint()))
        }
    }
}

fn read_stdin() -> Result<Vec<FinancialActivity>> {
    read_activities(io::stdin().lock()).context("Failed to read activities from stdin")
}

/// Parse a `--reference-date` style argument, defaulting to today
pub fn reference_date(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(text) => parse_date_arg(text),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn parse_date_arg(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}': expected YYYY-MM-DD", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(
            parse_date_arg(" 2024-06-15 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
        );
        assert!(parse_date_arg("15/06/2024").is_err());
    }

    #[test]
    fn test_missing_file_is_reported() {
        let ctx = FinsightContext::from_config(Default::default());
        let err = load_activities(&ctx, Some(Path::new("/no/such/activities.json"))).unwrap_err();
        assert!(format!("{:#}", err).contains("/no/such/activities.json"));
    }

    #[test]
    fn test_no_file_uses_api_not_stdin() {
        let ctx = FinsightContext::from_config(Default::default());
        let err = load_activities(&ctx, None).unwrap_err();
        assert!(format!("{:#}", err).contains("api.url"));
    }
}
