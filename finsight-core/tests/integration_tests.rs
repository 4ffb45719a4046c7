//! Integration tests for finsight-core
//!
//! These tests drive the public API end to end: decoding activity
//! payloads, aggregating them and exporting the results. File IO is real
//! (temp directories); no network access is needed.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tempfile::TempDir;

use finsight_core::adapters::json::{parse_activities, JsonFileSource};
use finsight_core::config::Config;
use finsight_core::domain::{ActivityStatus, ActivityType, FinancialActivity, MonthMatch};
use finsight_core::services::{
    ActivityAggregator, ActivityQuery, AggregatorOptions, BreakdownService, ExportService,
    InsightsService, SortField,
};
use finsight_core::{ActivitySource, FinsightContext};

// ============================================================================
// Test Helpers
// ============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dec(value: i64) -> Decimal {
    Decimal::new(value, 0)
}

fn activity(
    id: &str,
    activity_type: ActivityType,
    amount: i64,
    status: ActivityStatus,
    on: NaiveDate,
) -> FinancialActivity {
    FinancialActivity::new(id, activity_type, dec(amount), status, on)
}

/// A mixed book of activities spanning two years
fn sample_book() -> Vec<FinancialActivity> {
    vec![
        activity("1", ActivityType::Income, 5000, ActivityStatus::Paid, date(2024, 5, 3))
            .with_client("Acme Builders"),
        activity("2", ActivityType::Income, 1200, ActivityStatus::Pending, date(2024, 6, 1))
            .with_client("Acme Builders"),
        activity("3", ActivityType::Expense, 800, ActivityStatus::Paid, date(2024, 5, 10))
            .with_project("PRJ-7")
            .with_category("Materials")
            .with_cost_center("Site"),
        activity("4", ActivityType::Expense, 300, ActivityStatus::Pending, date(2024, 6, 2))
            .with_category("Travel"),
        activity("5", ActivityType::Expense, 150, ActivityStatus::Approved, date(2023, 6, 20))
            .with_project("PRJ-7")
            .with_category("Materials"),
        activity("6", ActivityType::Receivable, 2000, ActivityStatus::Overdue, date(2024, 4, 1))
            .with_due_date(date(2024, 5, 1)),
        activity("7", ActivityType::Payable, 650, ActivityStatus::Approved, date(2024, 6, 5))
            .with_due_date(date(2024, 6, 10)),
        activity("8", ActivityType::Invoice, 900, ActivityStatus::Pending, date(2024, 6, 7)),
        activity("9", ActivityType::Quotation, 400, ActivityStatus::Rejected, date(2024, 3, 15)),
    ]
}

fn aggregator_at(reference: NaiveDate) -> ActivityAggregator {
    ActivityAggregator::new(AggregatorOptions::new(reference))
}

// ============================================================================
// Aggregation Properties
// ============================================================================

#[test]
fn test_empty_input_is_all_zero() {
    let summary = aggregator_at(date(2024, 6, 15)).aggregate(&[]);

    assert_eq!(summary.total_income, Decimal::ZERO);
    assert_eq!(summary.total_expenses, Decimal::ZERO);
    assert_eq!(summary.net_profit, Decimal::ZERO);
    assert_eq!(summary.profit_margin, Decimal::ZERO);
    assert_eq!(summary.pending_amount, Decimal::ZERO);
    assert_eq!(summary.overdue_amount, Decimal::ZERO);
    assert_eq!(summary.receivables.count, 0);
    assert_eq!(summary.payables.count, 0);
    assert_eq!(summary.expenses.count, 0);
    assert!(summary.expenses.by_project.is_empty());
    assert!(summary.expenses.by_category.is_empty());
    assert!(summary.expenses.by_cost_center.is_empty());
    assert!(summary.monthly_data.is_empty());
    assert!(summary.type_distribution.is_empty());
    assert_eq!(summary.health_score, 0);
}

#[test]
fn test_net_profit_identity() {
    let summary = aggregator_at(date(2024, 6, 15)).aggregate(&sample_book());

    assert_eq!(summary.total_income, dec(5000));
    assert_eq!(summary.total_expenses, dec(1250));
    assert_eq!(
        summary.net_profit,
        summary.total_income - summary.total_expenses
    );
}

#[test]
fn test_margin_is_zero_without_income() {
    let book = vec![
        activity("1", ActivityType::Expense, 500, ActivityStatus::Paid, date(2024, 1, 1)),
        activity("2", ActivityType::Income, 900, ActivityStatus::Pending, date(2024, 1, 2)),
    ];
    let summary = aggregator_at(date(2024, 1, 31)).aggregate(&book);

    assert_eq!(summary.total_income, Decimal::ZERO);
    assert_eq!(summary.net_profit, dec(-500));
    assert_eq!(summary.profit_margin, Decimal::ZERO);
    assert_eq!(summary.health_score, 50);
}

#[test]
fn test_type_distribution_conserves_total() {
    let book = sample_book();
    let summary = aggregator_at(date(2024, 6, 15)).aggregate(&book);

    let distributed: Decimal = summary.type_distribution.iter().map(|s| s.amount).sum();
    let grand_total: Decimal = book.iter().map(|a| a.amount).sum();
    assert_eq!(distributed, grand_total);
}

#[test]
fn test_non_numeric_amount_contributes_zero() {
    let activities = parse_activities(
        r#"[
            {"id": 1, "activity_type": "income", "amount": "100", "status": "paid", "transaction_date": "2024-06-01"},
            {"id": 2, "activity_type": "invoice", "amount": "abc123", "status": "pending", "transaction_date": "2024-06-02"},
            {"id": 3, "activity_type": "invoice", "amount": "INV-2024", "status": "pending", "transaction_date": "2024-06-03"},
            {"id": 4, "activity_type": "expense", "amount": "Rs. 1,250.00", "status": "paid", "transaction_date": "2024-06-04"}
        ]"#,
    )
    .unwrap();
    assert_eq!(activities.len(), 4);

    let summary = aggregator_at(date(2024, 6, 15)).aggregate(&activities);
    let invoices = summary
        .type_distribution
        .iter()
        .find(|s| s.activity_type == ActivityType::Invoice)
        .unwrap();
    assert_eq!(invoices.amount, Decimal::ZERO);
    assert_eq!(invoices.percentage, Decimal::ZERO);

    let distributed: Decimal = summary.type_distribution.iter().map(|s| s.amount).sum();
    assert_eq!(distributed, dec(1350));
    assert_eq!(summary.total_expenses, dec(1250));
}

#[test]
fn test_extreme_and_garbage_amounts_never_fail() {
    let activities = parse_activities(
        r#"[
            {"id": 1, "activity_type": "expense", "amount": "79228162514264337593543950335", "status": "paid", "transaction_date": "2024-06-01"},
            {"id": 2, "activity_type": "expense", "amount": "79228162514264337593543950335", "status": "approved", "transaction_date": "2024-06-02"},
            {"id": 3, "activity_type": "income", "amount": "0.01", "status": "paid", "transaction_date": "2024-06-03"},
            {"id": 4, "activity_type": "expense", "amount": "1000000000000000000000000000", "status": "pending", "transaction_date": "2024-05-03"},
            {"id": 5, "activity_type": "income", "amount": "1e40", "status": "paid", "transaction_date": "2024-06-04"},
            {"id": 6, "activity_type": "income", "amount": 1e40, "status": "paid", "transaction_date": "2024-06-04"},
            {"id": 7, "activity_type": "invoice", "amount": "INV-2024", "status": "pending"},
            {"id": 8, "activity_type": "receivable", "amount": null, "status": "overdue"}
        ]"#,
    )
    .unwrap();
    assert_eq!(activities.len(), 8);

    let summary = aggregator_at(date(2024, 6, 15)).aggregate(&activities);
    assert_eq!(summary.total_income, Decimal::new(1, 2));
    assert_eq!(summary.total_expenses, Decimal::MAX);
    assert_eq!(summary.expenses.total, Decimal::MAX);
    assert_eq!(summary.profit_margin, Decimal::MIN);
    assert_eq!(summary.health_score, 0);
    assert_eq!(summary.receivables.total, Decimal::ZERO);

    let insights = InsightsService::new(6).insights(&activities, date(2024, 6, 15));
    assert_eq!(insights.total_expenses_current_month, Decimal::MAX);
    assert_eq!(insights.cash_flow_trend.len(), 6);

    let breakdown = BreakdownService::new().breakdown(&activities);
    let expenses = breakdown
        .by_type
        .iter()
        .find(|b| b.activity_type == ActivityType::Expense)
        .unwrap();
    assert_eq!(expenses.totals.count, 3);
    assert_eq!(expenses.totals.total_amount, Decimal::MAX);
}

#[test]
fn test_category_breakdown_sums_to_expense_total() {
    let summary = aggregator_at(date(2024, 6, 15)).aggregate(&sample_book());

    let by_category: Decimal = summary.expenses.by_category.iter().map(|c| c.amount).sum();
    let by_center: Decimal = summary.expenses.by_cost_center.iter().map(|c| c.amount).sum();
    let by_project: Decimal = summary.expenses.by_project.iter().map(|p| p.total).sum();
    assert_eq!(by_category, summary.expenses.total);
    assert_eq!(by_center, summary.expenses.total);
    assert_eq!(by_project, summary.expenses.total);
}

#[test]
fn test_aggregation_is_idempotent_and_non_mutating() {
    let book = sample_book();
    let before = book.clone();
    let aggregator = aggregator_at(date(2024, 6, 15));

    let first = aggregator.aggregate(&book);
    let second = aggregator.aggregate(&book);

    assert_eq!(first, second);
    assert_eq!(book, before);
}

// ============================================================================
// Concrete Scenarios
// ============================================================================

#[test]
fn test_income_and_materials_expense() {
    let book = vec![
        activity("1", ActivityType::Income, 1000, ActivityStatus::Paid, date(2024, 1, 15)),
        activity("2", ActivityType::Expense, 400, ActivityStatus::Paid, date(2024, 1, 20))
            .with_category("Materials"),
    ];
    let summary = aggregator_at(date(2024, 1, 31)).aggregate(&book);

    assert_eq!(summary.total_income, dec(1000));
    assert_eq!(summary.total_expenses, dec(400));
    assert_eq!(summary.net_profit, dec(600));
    assert_eq!(summary.profit_margin, dec(60));
    assert_eq!(summary.expenses.by_category.len(), 1);
    assert_eq!(summary.expenses.by_category[0].category, "Materials");
    assert_eq!(summary.expenses.by_category[0].amount, dec(400));

    assert_eq!(summary.monthly_data.len(), 1);
    let point = &summary.monthly_data[0];
    assert_eq!(point.month, "Jan 2024");
    assert_eq!(point.income, dec(1000));
    assert_eq!(point.expenses, dec(400));
    assert_eq!(point.receivables, Decimal::ZERO);
    assert_eq!(point.payables, Decimal::ZERO);
}

#[test]
fn test_unclassified_pending_expense() {
    let book = vec![activity(
        "1",
        ActivityType::Expense,
        75,
        ActivityStatus::Pending,
        date(2024, 2, 1),
    )];
    let summary = aggregator_at(date(2024, 2, 10)).aggregate(&book);

    assert_eq!(summary.expenses.pending, dec(75));
    assert_eq!(summary.expenses.by_category[0].category, "Uncategorized");
    assert_eq!(summary.expenses.by_cost_center[0].center, "General");
    assert_eq!(summary.expenses.by_project[0].project, "Unassigned");
}

#[test]
fn test_current_month_match_policies() {
    let book = vec![
        activity("1", ActivityType::Receivable, 100, ActivityStatus::Pending, date(2023, 6, 1)),
        activity("2", ActivityType::Receivable, 200, ActivityStatus::Pending, date(2024, 6, 1)),
    ];
    let reference = date(2024, 6, 20);

    let any_year = aggregator_at(reference).aggregate(&book);
    assert_eq!(any_year.receivables.current_month, dec(300));

    let same_year = ActivityAggregator::new(
        AggregatorOptions::new(reference).with_month_match(MonthMatch::SameYear),
    )
    .aggregate(&book);
    assert_eq!(same_year.receivables.current_month, dec(200));
}

// ============================================================================
// File Source Pipeline
// ============================================================================

const API_EXPORT: &str = r#"{
    "count": 4,
    "next": null,
    "previous": null,
    "results": [
        {"id": 11, "activity_type": "income", "amount": "2,500.00", "status": "paid",
         "transaction_date": "2024-03-02", "client_name": "Northwind", "currency": "PKR",
         "reference_number": "INC-11"},
        {"id": 12, "activity_type": "expense", "amount": 500, "status": "approved",
         "transaction_date": "2024-03-05T09:30:00Z", "expense_category": "Fuel",
         "cost_center": "Fleet", "project_number": "PRJ-1"},
        {"id": 13, "activity_type": "payable", "amount": "abc", "status": "pending",
         "transaction_date": "2024-03-08", "due_date": "2024-03-01"},
        {"id": 14, "activity_type": "bonus", "amount": 1}
    ]
}"#;

#[test]
fn test_file_source_to_summary_and_export() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("activities.json");
    std::fs::write(&input, API_EXPORT).unwrap();

    let source = JsonFileSource::new(&input);
    let activities = source.fetch().unwrap();
    // The unknown "bonus" record is skipped, the rest survive
    assert_eq!(activities.len(), 3);
    assert_eq!(activities[0].amount, dec(2500));
    assert_eq!(activities[2].amount, Decimal::ZERO);

    let summary = aggregator_at(date(2024, 3, 20)).aggregate(&activities);
    assert_eq!(summary.total_income, dec(2500));
    assert_eq!(summary.total_expenses, dec(500));
    assert_eq!(summary.expenses.current_month, dec(500));
    assert_eq!(summary.expenses.by_project[0].project, "PRJ-1");

    let output = temp_dir.path().join("export.csv");
    let rows = ExportService::new("PKR")
        .export_to_file(&output, &activities)
        .unwrap();
    assert_eq!(rows, 3);

    let csv = std::fs::read_to_string(&output).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Reference Number,Type,Amount,Currency,Client,Account,Description,Status,Transaction Date,Due Date"
    );
    assert!(lines.next().unwrap().starts_with("INC-11,Income,2500"));
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn test_bare_list_and_envelope_decode_alike() {
    let bare = r#"[{"id": 1, "activity_type": "expense", "amount": 10, "status": "paid"}]"#;
    let wrapped = r#"{"results": [{"id": 1, "activity_type": "expense", "amount": 10, "status": "paid"}]}"#;

    assert_eq!(parse_activities(bare).unwrap(), parse_activities(wrapped).unwrap());
    assert!(parse_activities(r#"{"detail": "Authentication required"}"#).is_err());
}

// ============================================================================
// Query, Breakdown and Insights
// ============================================================================

#[test]
fn test_query_filters_and_sorts() {
    let book = sample_book();

    let expenses = ActivityQuery::new()
        .of_type(ActivityType::Expense)
        .sorted_by(SortField::Amount, false)
        .apply(&book);
    let ids: Vec<&str> = expenses.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "4", "5"]);

    let acme = ActivityQuery::new().search("acme").apply(&book);
    assert_eq!(acme.len(), 2);

    let june = ActivityQuery::new()
        .between(Some(date(2024, 6, 1)), Some(date(2024, 6, 30)))
        .sorted_by(SortField::TransactionDate, true)
        .apply(&book);
    let ids: Vec<&str> = june.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "4", "7", "8"]);
}

#[test]
fn test_breakdown_covers_every_type_and_status() {
    let breakdown = BreakdownService::new().breakdown(&sample_book());

    assert_eq!(breakdown.total_activities, 9);
    assert_eq!(breakdown.by_type.len(), ActivityType::ALL.len());
    assert_eq!(breakdown.by_status.len(), ActivityStatus::ALL.len());

    let cancelled = breakdown
        .by_status
        .iter()
        .find(|b| b.status == ActivityStatus::Cancelled)
        .unwrap();
    assert_eq!(cancelled.totals.count, 0);
    assert_eq!(cancelled.totals.total_amount, Decimal::ZERO);

    let counted: usize = breakdown.by_type.iter().map(|b| b.totals.count).sum();
    assert_eq!(counted, 9);
}

#[test]
fn test_insights_trend_is_chronological() {
    let insights = InsightsService::new(6).insights(&sample_book(), date(2024, 6, 15));

    let months: Vec<&str> = insights.cash_flow_trend.iter().map(|p| p.month.as_str()).collect();
    assert_eq!(
        months,
        vec!["2024-01", "2024-02", "2024-03", "2024-04", "2024-05", "2024-06"]
    );
    assert_eq!(insights.pending_approvals, 3);
    assert_eq!(insights.total_payables, dec(650));
}

// ============================================================================
// Context
// ============================================================================

#[test]
fn test_context_reads_settings_from_directory() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("settings.json"),
        r#"{"analytics": {"monthMatch": "same_year", "trendMonths": 3}, "export": {"defaultCurrency": "USD"}}"#,
    )
    .unwrap();

    let context = FinsightContext::new(temp_dir.path()).unwrap();
    assert_eq!(context.config.month_match, MonthMatch::SameYear);
    assert_eq!(context.config.trend_months, 3);

    let insights = context
        .insights_service
        .insights(&sample_book(), date(2024, 6, 15));
    assert_eq!(insights.cash_flow_trend.len(), 3);
}

#[test]
fn test_summary_serializes_in_camel_case() {
    let summary = FinsightContext::from_config(Config::default())
        .summarize(&sample_book(), date(2024, 6, 15));
    let json = serde_json::to_value(&summary).unwrap();

    assert!(json.get("totalIncome").is_some());
    assert!(json.get("monthlyData").is_some());
    assert!(json["expenses"].get("byCostCenter").is_some());
    assert_eq!(json["typeDistribution"][0]["type"], "income");
}
