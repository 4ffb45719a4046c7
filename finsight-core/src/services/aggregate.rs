//! Activity aggregator - dashboard analytics over financial activities
//!
//! Turns an already-fetched list of activities into an
//! [`AnalyticsSummary`]. The aggregator is a pure function of its input
//! and options: it never reads the clock, never mutates the input and
//! never fails. Bad amounts were already coerced to zero when the
//! records were decoded.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::grouping::OrderedGroups;
use crate::domain::money;
use crate::domain::summary::health_score;
use crate::domain::{
    ActivityStatus, ActivityType, AnalyticsSummary, BalanceBreakdown, CategoryAmount,
    CostCenterAmount, Dimension, ExpenseBreakdown, FinancialActivity, MonthKey, MonthMatch,
    MonthOrdering, MonthlyPoint, PerformanceRating, ProjectExpenses, TypeShare,
};

/// Knobs for a single aggregation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorOptions {
    /// Stands in for "now" in current-month and overdue checks
    pub reference_date: NaiveDate,
    pub month_ordering: MonthOrdering,
    pub month_match: MonthMatch,
}

impl AggregatorOptions {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            month_ordering: MonthOrdering::default(),
            month_match: MonthMatch::default(),
        }
    }

    /// Options anchored at today's local date
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn with_month_ordering(mut self, ordering: MonthOrdering) -> Self {
        self.month_ordering = ordering;
        self
    }

    pub fn with_month_match(mut self, policy: MonthMatch) -> Self {
        self.month_match = policy;
        self
    }
}

/// Computes [`AnalyticsSummary`] values
#[derive(Debug, Clone)]
pub struct ActivityAggregator {
    options: AggregatorOptions,
}

impl ActivityAggregator {
    pub fn new(options: AggregatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AggregatorOptions {
        &self.options
    }

    /// Aggregate `activities` into a summary
    pub fn aggregate(&self, activities: &[FinancialActivity]) -> AnalyticsSummary {
        if activities.is_empty() {
            log::debug!("No activities to aggregate");
            return AnalyticsSummary::empty();
        }

        let reference_date = self.options.reference_date;

        let total_income = sum_where(activities, |a| a.is_realized_income());
        let total_expenses = sum_where(activities, |a| a.is_type(ActivityType::Expense));
        let pending_amount = sum_where(activities, |a| a.status == ActivityStatus::Pending);
        let overdue_amount = sum_where(activities, |a| a.overdue_as_of(reference_date));

        let net_profit = money::sub(total_income, total_expenses);
        // Guarded so an income-free period reports 0 instead of dividing by zero
        let profit_margin = if total_income > Decimal::ZERO {
            money::percentage(net_profit, total_income)
        } else {
            Decimal::ZERO
        };

        log::debug!(
            "Aggregated {} activities: income={} expenses={} pending={} overdue={}",
            activities.len(),
            total_income,
            total_expenses,
            pending_amount,
            overdue_amount
        );

        AnalyticsSummary {
            total_income,
            total_expenses,
            net_profit,
            profit_margin,
            pending_amount,
            overdue_amount,
            receivables: self.balance_breakdown(activities, ActivityType::Receivable),
            payables: self.balance_breakdown(activities, ActivityType::Payable),
            expenses: self.expense_breakdown(activities),
            monthly_data: self.monthly_data(activities),
            type_distribution: type_distribution(activities),
            health_score: health_score(profit_margin),
            performance: PerformanceRating::from_margin(profit_margin),
        }
    }

    fn in_current_month(&self, activity: &FinancialActivity) -> bool {
        MonthKey::of(self.options.reference_date)
            .matches(activity.transaction_date, self.options.month_match)
    }

    /// Totals for receivables or payables
    fn balance_breakdown(
        &self,
        activities: &[FinancialActivity],
        activity_type: ActivityType,
    ) -> BalanceBreakdown {
        let mut breakdown = BalanceBreakdown::default();

        for activity in activities.iter().filter(|a| a.is_type(activity_type)) {
            money::add_into(&mut breakdown.total, activity.amount);
            breakdown.count += 1;
            if activity.status == ActivityStatus::Overdue {
                money::add_into(&mut breakdown.overdue, activity.amount);
            }
            if self.in_current_month(activity) {
                money::add_into(&mut breakdown.current_month, activity.amount);
            }
        }

        breakdown
    }

    /// Expense totals plus project, category and cost-center breakdowns
    fn expense_breakdown(&self, activities: &[FinancialActivity]) -> ExpenseBreakdown {
        let mut breakdown = ExpenseBreakdown::default();
        let mut projects: OrderedGroups<&str, ProjectAccumulator> = OrderedGroups::new();
        let mut categories: OrderedGroups<&str, Decimal> = OrderedGroups::new();
        let mut cost_centers: OrderedGroups<&str, Decimal> = OrderedGroups::new();

        for expense in activities.iter().filter(|a| a.is_type(ActivityType::Expense)) {
            let amount = expense.amount;
            let category = expense.classify(Dimension::Category).label();
            let cost_center = expense.classify(Dimension::CostCenter).label();

            money::add_into(&mut breakdown.total, amount);
            breakdown.count += 1;
            if expense.status == ActivityStatus::Pending {
                money::add_into(&mut breakdown.pending, amount);
            }
            if self.in_current_month(expense) {
                money::add_into(&mut breakdown.current_month, amount);
            }

            let project = projects.entry(expense.classify(Dimension::Project).label());
            money::add_into(&mut project.total, amount);
            project.count += 1;
            project.categories.add(category, amount);
            project.cost_centers.add(cost_center, amount);
            match expense.status {
                ActivityStatus::Pending => money::add_into(&mut project.pending, amount),
                ActivityStatus::Paid => money::add_into(&mut project.paid, amount),
                _ => {}
            }

            categories.add(category, amount);
            cost_centers.add(cost_center, amount);
        }

        breakdown.by_project = projects
            .into_entries()
            .into_iter()
            .map(|(project, acc)| acc.finish(project))
            .collect();
        breakdown.by_category = category_amounts(categories);
        breakdown.by_cost_center = cost_center_amounts(cost_centers);

        breakdown
    }

    /// Monthly income / expense / receivable / payable series
    fn monthly_data(&self, activities: &[FinancialActivity]) -> Vec<MonthlyPoint> {
        let mut months: OrderedGroups<MonthKey, MonthAccumulator> = OrderedGroups::new();

        for activity in activities {
            let bucket = months.entry(MonthKey::of_optional(activity.transaction_date));
            match activity.activity_type {
                ActivityType::Income if activity.status == ActivityStatus::Paid => {
                    money::add_into(&mut bucket.income, activity.amount)
                }
                ActivityType::Expense => money::add_into(&mut bucket.expenses, activity.amount),
                ActivityType::Receivable => money::add_into(&mut bucket.receivables, activity.amount),
                ActivityType::Payable => money::add_into(&mut bucket.payables, activity.amount),
                _ => {}
            }
        }

        let mut entries = months.into_entries();
        if self.options.month_ordering == MonthOrdering::Chronological {
            entries.sort_by_key(|(key, _)| *key);
        }

        entries
            .into_iter()
            .map(|(key, acc)| MonthlyPoint {
                month: key.label(),
                income: acc.income,
                expenses: acc.expenses,
                receivables: acc.receivables,
                payables: acc.payables,
            })
            .collect()
    }
}

/// Amount per activity type, with each type's share of the grand total
fn type_distribution(activities: &[FinancialActivity]) -> Vec<TypeShare> {
    let mut types: OrderedGroups<ActivityType, Decimal> = OrderedGroups::new();
    for activity in activities {
        types.add(activity.activity_type, activity.amount);
    }

    let entries = types.into_entries();
    let grand_total = money::sum(entries.iter().map(|(_, amount)| amount));

    entries
        .into_iter()
        .map(|(activity_type, amount)| TypeShare {
            activity_type,
            amount,
            percentage: if grand_total > Decimal::ZERO {
                money::percentage(amount, grand_total)
            } else {
                Decimal::ZERO
            },
        })
        .collect()
}

fn sum_where<F>(activities: &[FinancialActivity], predicate: F) -> Decimal
where
    F: Fn(&FinancialActivity) -> bool,
{
    money::sum(activities.iter().filter(|a| predicate(a)).map(|a| &a.amount))
}

fn category_amounts(groups: OrderedGroups<&str, Decimal>) -> Vec<CategoryAmount> {
    groups
        .into_entries()
        .into_iter()
        .map(|(category, amount)| CategoryAmount {
            category: category.to_string(),
            amount,
        })
        .collect()
}

fn cost_center_amounts(groups: OrderedGroups<&str, Decimal>) -> Vec<CostCenterAmount> {
    groups
        .into_entries()
        .into_iter()
        .map(|(center, amount)| CostCenterAmount {
            center: center.to_string(),
            amount,
        })
        .collect()
}

#[derive(Debug, Default)]
struct ProjectAccumulator<'a> {
    total: Decimal,
    count: usize,
    categories: OrderedGroups<&'a str, Decimal>,
    cost_centers: OrderedGroups<&'a str, Decimal>,
    pending: Decimal,
    paid: Decimal,
}

impl<'a> ProjectAccumulator<'a> {
    fn finish(self, project: &str) -> ProjectExpenses {
        ProjectExpenses {
            project: project.to_string(),
            total: self.total,
            count: self.count,
            pending: self.pending,
            paid: self.paid,
            categories: category_amounts(self.categories),
            cost_centers: cost_center_amounts(self.cost_centers),
        }
    }
}

#[derive(Debug, Default)]
struct MonthAccumulator {
    income: Decimal,
    expenses: Decimal,
    receivables: Decimal,
    payables: Decimal,
}
