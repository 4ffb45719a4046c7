//! Analytics summary produced by the aggregator
//!
//! Field names serialize in camelCase so the JSON matches what the
//! dashboard front end reads.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::activity::ActivityType;
use super::money;

/// Full analytics summary over a set of activities
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
    pub profit_margin: Decimal,
    pub pending_amount: Decimal,
    pub overdue_amount: Decimal,
    pub receivables: BalanceBreakdown,
    pub payables: BalanceBreakdown,
    pub expenses: ExpenseBreakdown,
    pub monthly_data: Vec<MonthlyPoint>,
    pub type_distribution: Vec<TypeShare>,
    pub health_score: u8,
    pub performance: PerformanceRating,
}

impl AnalyticsSummary {
    /// Summary of an empty activity list
    ///
    /// Every numeric field is zero, including the health score: with no
    /// data there is nothing to score.
    pub fn empty() -> Self {
        Self {
            total_income: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
            net_profit: Decimal::ZERO,
            profit_margin: Decimal::ZERO,
            pending_amount: Decimal::ZERO,
            overdue_amount: Decimal::ZERO,
            receivables: BalanceBreakdown::default(),
            payables: BalanceBreakdown::default(),
            expenses: ExpenseBreakdown::default(),
            monthly_data: Vec::new(),
            type_distribution: Vec::new(),
            health_score: 0,
            performance: PerformanceRating::NeedsAttention,
        }
    }
}

/// Receivable or payable totals
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceBreakdown {
    pub total: Decimal,
    pub overdue: Decimal,
    pub current_month: Decimal,
    pub count: usize,
}

/// Expense totals with project, category and cost-center breakdowns
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBreakdown {
    pub total: Decimal,
    pub current_month: Decimal,
    pub pending: Decimal,
    pub count: usize,
    pub by_project: Vec<ProjectExpenses>,
    pub by_category: Vec<CategoryAmount>,
    pub by_cost_center: Vec<CostCenterAmount>,
}

/// Expenses attributed to one project
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectExpenses {
    pub project: String,
    pub total: Decimal,
    pub count: usize,
    pub pending: Decimal,
    pub paid: Decimal,
    pub categories: Vec<CategoryAmount>,
    pub cost_centers: Vec<CostCenterAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAmount {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostCenterAmount {
    pub center: String,
    pub amount: Decimal,
}

/// One point of the monthly trend series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPoint {
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub receivables: Decimal,
    pub payables: Decimal,
}

/// Share of the grand total carried by one activity type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeShare {
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub amount: Decimal,
    pub percentage: Decimal,
}

/// Qualitative rating derived from the profit margin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceRating {
    Excellent,
    Good,
    Stable,
    NeedsAttention,
}

impl PerformanceRating {
    pub fn from_margin(margin: Decimal) -> Self {
        if margin > Decimal::from(20) {
            PerformanceRating::Excellent
        } else if margin > Decimal::from(10) {
            PerformanceRating::Good
        } else if margin > Decimal::ZERO {
            PerformanceRating::Stable
        } else {
            PerformanceRating::NeedsAttention
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceRating::Excellent => "Excellent Performance",
            PerformanceRating::Good => "Good Performance",
            PerformanceRating::Stable => "Stable Performance",
            PerformanceRating::NeedsAttention => "Needs Attention",
        }
    }
}

/// Business health score in 0..=100: the margin shifted by 50 and clamped
pub fn health_score(profit_margin: Decimal) -> u8 {
    let shifted = money::add(profit_margin, Decimal::from(50))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let score = shifted.to_i64().unwrap_or(if shifted.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    });
    score.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_score_clamps() {
        assert_eq!(health_score(Decimal::ZERO), 50);
        assert_eq!(health_score(Decimal::from(60)), 100);
        assert_eq!(health_score(Decimal::from(-75)), 0);
        assert_eq!(health_score(Decimal::new(125, 1)), 63);
        assert_eq!(health_score(Decimal::new(-1, 1)), 50);
    }

    #[test]
    fn test_health_score_out_of_i64_range() {
        assert_eq!(health_score(Decimal::MAX), 100);
        assert_eq!(health_score(Decimal::MIN), 0);
        assert_eq!(health_score(Decimal::from_i128_with_scale(10_i128.pow(20), 0)), 100);
    }

    #[test]
    fn test_performance_thresholds() {
        assert_eq!(PerformanceRating::from_margin(Decimal::from(21)), PerformanceRating::Excellent);
        assert_eq!(PerformanceRating::from_margin(Decimal::from(20)), PerformanceRating::Good);
        assert_eq!(PerformanceRating::from_margin(Decimal::from(10)), PerformanceRating::Stable);
        assert_eq!(PerformanceRating::from_margin(Decimal::ZERO), PerformanceRating::NeedsAttention);
    }

    #[test]
    fn test_empty_summary_serializes_camel_case() {
        let json = serde_json::to_value(AnalyticsSummary::empty()).unwrap();
        assert_eq!(json["totalIncome"].as_f64(), Some(0.0));
        assert_eq!(json["expenses"]["byCostCenter"], serde_json::json!([]));
        assert_eq!(json["receivables"]["currentMonth"].as_f64(), Some(0.0));
        assert_eq!(json["healthScore"], serde_json::json!(0));
        assert_eq!(json["performance"], serde_json::json!("needs_attention"));
    }
}
