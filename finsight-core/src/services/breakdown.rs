//! Breakdown service - activity counts and totals per type and status

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::money;
use crate::domain::{ActivityStatus, ActivityType, FinancialActivity};

/// Count and amount for one bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BucketTotals {
    pub count: usize,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeBucket {
    pub activity_type: ActivityType,
    #[serde(flatten)]
    pub totals: BucketTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusBucket {
    pub status: ActivityStatus,
    #[serde(flatten)]
    pub totals: BucketTotals,
}

/// Per-type and per-status summary of an activity list
///
/// Every type and status is listed, in declaration order, even when
/// no activity falls in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityBreakdown {
    pub total_activities: usize,
    pub by_type: Vec<TypeBucket>,
    pub by_status: Vec<StatusBucket>,
}

/// Computes [`ActivityBreakdown`] values
#[derive(Debug, Clone, Default)]
pub struct BreakdownService;

impl BreakdownService {
    pub fn new() -> Self {
        Self
    }

    pub fn breakdown(&self, activities: &[FinancialActivity]) -> ActivityBreakdown {
        let by_type = ActivityType::ALL
            .into_iter()
            .map(|activity_type| TypeBucket {
                activity_type,
                totals: bucket(activities.iter().filter(|a| a.activity_type == activity_type)),
            })
            .collect();

        let by_status = ActivityStatus::ALL
            .into_iter()
            .map(|status| StatusBucket {
                status,
                totals: bucket(activities.iter().filter(|a| a.status == status)),
            })
            .collect();

        ActivityBreakdown {
            total_activities: activities.len(),
            by_type,
            by_status,
        }
    }
}

fn bucket<'a>(activities: impl Iterator<Item = &'a FinancialActivity>) -> BucketTotals {
    activities.fold(BucketTotals::default(), |mut acc, activity| {
        acc.count += 1;
        money::add_into(&mut acc.total_amount, activity.amount);
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn activity(activity_type: ActivityType, status: ActivityStatus, amount: i64) -> FinancialActivity {
        FinancialActivity::new(
            "x",
            activity_type,
            Decimal::from(amount),
            status,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_breakdown_lists_every_bucket() {
        let breakdown = BreakdownService::new().breakdown(&[]);
        assert_eq!(breakdown.total_activities, 0);
        assert_eq!(breakdown.by_type.len(), ActivityType::ALL.len());
        assert_eq!(breakdown.by_status.len(), ActivityStatus::ALL.len());
        assert!(breakdown.by_type.iter().all(|b| b.totals == BucketTotals::default()));
    }

    #[test]
    fn test_breakdown_counts_and_sums() {
        let activities = vec![
            activity(ActivityType::Expense, ActivityStatus::Paid, 40),
            activity(ActivityType::Expense, ActivityStatus::Pending, 60),
            activity(ActivityType::Income, ActivityStatus::Paid, 500),
        ];

        let breakdown = BreakdownService::new().breakdown(&activities);
        assert_eq!(breakdown.total_activities, 3);

        let expense = breakdown
            .by_type
            .iter()
            .find(|b| b.activity_type == ActivityType::Expense)
            .unwrap();
        assert_eq!(expense.totals.count, 2);
        assert_eq!(expense.totals.total_amount, Decimal::from(100));

        let paid = breakdown
            .by_status
            .iter()
            .find(|b| b.status == ActivityStatus::Paid)
            .unwrap();
        assert_eq!(paid.totals.count, 2);
        assert_eq!(paid.totals.total_amount, Decimal::from(540));
    }

    #[test]
    fn test_breakdown_serializes_flat_buckets() {
        let breakdown = BreakdownService::new()
            .breakdown(&[activity(ActivityType::Payable, ActivityStatus::Approved, 10)]);
        let json = serde_json::to_value(&breakdown).unwrap();
        let payable = &json["by_type"][3];
        assert_eq!(payable["activity_type"], "payable");
        assert_eq!(payable["count"], 1);
    }
}
