//! Service layer - business logic orchestration
//!
//! Services take the already-fetched activity list and derive the
//! analytics views from it. None of them hold state between calls.

mod aggregate;
mod breakdown;
mod export;
pub(crate) mod grouping;
mod insights;
mod query;

pub use aggregate::{ActivityAggregator, AggregatorOptions};
pub use breakdown::{ActivityBreakdown, BreakdownService, BucketTotals, StatusBucket, TypeBucket};
pub use export::ExportService;
pub use insights::{
    CashFlowPoint, CategoryTotal, DashboardInsights, InsightsService, DEFAULT_TREND_MONTHS,
};
pub use query::{ActivityQuery, SortField};
