//! Core domain entities
//!
//! Pure data structures and the rules attached to them - no I/O.

mod activity;
pub mod classification;
pub(crate) mod lenient;
pub(crate) mod money;
pub mod month;
pub mod result;
pub mod summary;

pub use activity::{ActivityStatus, ActivityType, FinancialActivity};
pub use classification::{Classification, Dimension};
pub use month::{MonthKey, MonthMatch, MonthOrdering};
pub use summary::{
    AnalyticsSummary, BalanceBreakdown, CategoryAmount, CostCenterAmount, ExpenseBreakdown,
    MonthlyPoint, PerformanceRating, ProjectExpenses, TypeShare,
};
