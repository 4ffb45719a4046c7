//! Insights service - dashboard figures relative to a reference date
//!
//! Unlike the aggregator, these figures only count activities that have
//! moved through approval, and they respect the calendar year.

use std::cmp::Reverse;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::grouping::OrderedGroups;
use crate::domain::money;
use crate::domain::{ActivityStatus, ActivityType, FinancialActivity, MonthKey};

/// Months shown in the cash-flow trend unless told otherwise
pub const DEFAULT_TREND_MONTHS: u32 = 6;

/// Accounts listed in the top-expenses table
const TOP_CATEGORY_LIMIT: usize = 5;
/// Label for expenses booked without an account
const UNASSIGNED_ACCOUNT: &str = "Unassigned";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowPoint {
    /// "YYYY-MM"
    pub month: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

/// Approved expenses booked against one account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub account: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardInsights {
    pub reference_date: NaiveDate,
    pub total_receivables: Decimal,
    pub total_payables: Decimal,
    pub total_income_current_month: Decimal,
    pub total_expenses_current_month: Decimal,
    pub overdue_receivables: Decimal,
    pub overdue_payables: Decimal,
    pub pending_approvals: usize,
    pub cash_flow_trend: Vec<CashFlowPoint>,
    pub top_expense_categories: Vec<CategoryTotal>,
}

/// Computes [`DashboardInsights`]
#[derive(Debug, Clone)]
pub struct InsightsService {
    trend_months: u32,
}

impl Default for InsightsService {
    fn default() -> Self {
        Self::new(DEFAULT_TREND_MONTHS)
    }
}

impl InsightsService {
    pub fn new(trend_months: u32) -> Self {
        Self {
            trend_months: trend_months.max(1),
        }
    }

    pub fn insights(
        &self,
        activities: &[FinancialActivity],
        reference_date: NaiveDate,
    ) -> DashboardInsights {
        let current_month = MonthKey::of(reference_date);
        let month_start = current_month.first_day().unwrap_or(reference_date);

        let open_of = |activity_type: ActivityType| {
            activities
                .iter()
                .filter(move |a| a.activity_type == activity_type && a.status.is_open())
        };
        let approved_since_month_start = |activity_type: ActivityType| {
            activities.iter().filter(move |a| {
                a.activity_type == activity_type
                    && a.status == ActivityStatus::Approved
                    && a.transaction_date.is_some_and(|d| d >= month_start)
            })
        };
        let past_due = |a: &&FinancialActivity| a.due_date.is_some_and(|due| due < reference_date);

        DashboardInsights {
            reference_date,
            total_receivables: amount_sum(open_of(ActivityType::Receivable)),
            total_payables: amount_sum(open_of(ActivityType::Payable)),
            total_income_current_month: amount_sum(approved_since_month_start(ActivityType::Income)),
            total_expenses_current_month: amount_sum(approved_since_month_start(
                ActivityType::Expense,
            )),
            overdue_receivables: amount_sum(open_of(ActivityType::Receivable).filter(past_due)),
            overdue_payables: amount_sum(open_of(ActivityType::Payable).filter(past_due)),
            pending_approvals: activities
                .iter()
                .filter(|a| a.status == ActivityStatus::Pending)
                .count(),
            cash_flow_trend: self.cash_flow_trend(activities, current_month),
            top_expense_categories: top_accounts(approved_since_month_start(
                ActivityType::Expense,
            )),
        }
    }

    /// Approved income and expenses per calendar month, oldest first
    fn cash_flow_trend(
        &self,
        activities: &[FinancialActivity],
        current_month: MonthKey,
    ) -> Vec<CashFlowPoint> {
        (0..self.trend_months)
            .rev()
            .filter_map(|back| current_month.months_back(back))
            .map(|month| {
                let in_month = |activity_type: ActivityType| {
                    activities.iter().filter(move |a| {
                        a.activity_type == activity_type
                            && a.status == ActivityStatus::Approved
                            && MonthKey::of_optional(a.transaction_date) == month
                    })
                };
                let income = amount_sum(in_month(ActivityType::Income));
                let expenses = amount_sum(in_month(ActivityType::Expense));
                CashFlowPoint {
                    month: month.iso_label(),
                    income,
                    expenses,
                    net: money::sub(income, expenses),
                }
            })
            .collect()
    }
}

fn amount_sum<'a>(activities: impl Iterator<Item = &'a FinancialActivity>) -> Decimal {
    activities.fold(Decimal::ZERO, |acc, a| money::add(acc, a.amount))
}

fn top_accounts<'a>(
    expenses: impl Iterator<Item = &'a FinancialActivity>,
) -> Vec<CategoryTotal> {
    let mut groups: OrderedGroups<&str, Decimal> = OrderedGroups::new();
    for expense in expenses {
        let account = expense
            .account_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNASSIGNED_ACCOUNT);
        groups.add(account, expense.amount);
    }

    let mut entries = groups.into_entries();
    entries.sort_by_key(|(_, total)| Reverse(*total));
    entries
        .into_iter()
        .take(TOP_CATEGORY_LIMIT)
        .map(|(account, total)| CategoryTotal {
            account: account.to_string(),
            total,
        })
        .collect()
}
