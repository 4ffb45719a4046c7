//! Finsight Core - Analytics over a business's financial activities
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (FinancialActivity, AnalyticsSummary, etc.)
//! - **ports**: Trait definitions for external dependencies (ActivitySource)
//! - **services**: Aggregation, filtering, breakdowns, insights and export
//! - **adapters**: Concrete implementations (JSON files, backend HTTP API)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use adapters::http::HttpActivitySource;
use config::Config;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::Error;
pub use domain::{
    ActivityStatus, ActivityType, AnalyticsSummary, FinancialActivity, MonthMatch, MonthOrdering,
};
pub use ports::ActivitySource;

/// Main context for Finsight operations
///
/// Holds the resolved configuration and the services configured from it.
/// Activities are fetched separately and passed in by reference.
pub struct FinsightContext {
    pub config: Config,
    pub breakdown_service: BreakdownService,
    pub insights_service: InsightsService,
    pub export_service: ExportService,
}

impl FinsightContext {
    /// Create a context from the settings in `finsight_dir`
    pub fn new(finsight_dir: &Path) -> Result<Self> {
        let config = Config::load(finsight_dir)
            .with_context(|| format!("Failed to load settings from {}", finsight_dir.display()))?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Config) -> Self {
        let breakdown_service = BreakdownService::new();
        let insights_service = InsightsService::new(config.trend_months);
        let export_service = ExportService::new(config.default_currency.clone());

        Self {
            config,
            breakdown_service,
            insights_service,
            export_service,
        }
    }

    /// Aggregator for `reference_date` using the configured month policies
    pub fn aggregator(&self, reference_date: NaiveDate) -> ActivityAggregator {
        ActivityAggregator::new(self.config.aggregator_options(reference_date))
    }

    pub fn summarize(
        &self,
        activities: &[FinancialActivity],
        reference_date: NaiveDate,
    ) -> AnalyticsSummary {
        self.aggregator(reference_date).aggregate(activities)
    }

    /// Source for the configured backend API
    pub fn api_source(&self) -> Result<HttpActivitySource> {
        let url = self.config.api_url.as_deref().context(
            "No activity source: pass a file or set api.url (or FINSIGHT_API_URL)",
        )?;
        HttpActivitySource::new(url, self.config.api_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_context_uses_configured_services() {
        let mut config = Config::default();
        config.month_ordering = MonthOrdering::Chronological;
        let context = FinsightContext::from_config(config);

        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let aggregator = context.aggregator(date);
        assert_eq!(aggregator.options().month_ordering, MonthOrdering::Chronological);

        let activities = vec![FinancialActivity::new(
            "1",
            ActivityType::Income,
            Decimal::new(250, 0),
            ActivityStatus::Paid,
            date,
        )];
        let summary = context.summarize(&activities, date);
        assert_eq!(summary.total_income, Decimal::new(250, 0));
    }

    #[test]
    fn test_api_source_requires_url() {
        let context = FinsightContext::from_config(Config::default());
        assert!(context.api_source().is_err());

        let mut config = Config::default();
        config.api_url = Some("http://127.0.0.1:8000/api".to_string());
        let context = FinsightContext::from_config(config);
        assert_eq!(
            context.api_source().unwrap().endpoint(),
            "http://127.0.0.1:8000/api/financial-activities/"
        );
    }
}
