//! Summary command - dashboard analytics over all activities

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use comfy_table::Cell;
use finsight_core::domain::{AnalyticsSummary, PerformanceRating};
use finsight_core::services::ActivityAggregator;
use finsight_core::{MonthMatch, MonthOrdering};

use super::{get_context, load_activities, reference_date};
use crate::output::{self, amount_cell, create_table, format_amount, format_percent, signed_amount};

pub fn run(
    file: Option<&Path>,
    reference: Option<&str>,
    chronological: bool,
    same_year: bool,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;
    let activities = load_activities(&ctx, file)?;
    let reference = reference_date(reference)?;

    let mut options = ctx.config.aggregator_options(reference);
    if chronological {
        options = options.with_month_ordering(MonthOrdering::Chronological);
    }
    if same_year {
        options = options.with_month_match(MonthMatch::SameYear);
    }
    let summary = ActivityAggregator::new(options).aggregate(&activities);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if activities.is_empty() {
        output::warning("No activities found.");
        return Ok(());
    }

    print_overview(&summary);
    print_balances(&summary);
    print_expenses(&summary);
    print_monthly(&summary);
    print_distribution(&summary);

    Ok(())
}

fn print_overview(summary: &AnalyticsSummary) {
    println!("{}", "Financial Overview".bold());
    println!();

    let mut table = create_table();
    table.add_row(vec![Cell::new("Total Income"), amount_cell(summary.total_income)]);
    table.add_row(vec![Cell::new("Total Expenses"), amount_cell(summary.total_expenses)]);
    table.add_row(vec![Cell::new("Net Profit"), Cell::new(signed_amount(summary.net_profit))]);
    table.add_row(vec![Cell::new("Profit Margin"), Cell::new(format_percent(summary.profit_margin))]);
    table.add_row(vec![Cell::new("Pending"), amount_cell(summary.pending_amount)]);
    table.add_row(vec![Cell::new("Overdue"), amount_cell(summary.overdue_amount)]);
    println!("{}", table);

    let rating = match summary.performance {
        PerformanceRating::Excellent => summary.performance.label().green(),
        PerformanceRating::Good => summary.performance.label().cyan(),
        PerformanceRating::Stable => summary.performance.label().yellow(),
        PerformanceRating::NeedsAttention => summary.performance.label().red(),
    };
    println!("Health score: {}/100 ({})", summary.health_score, rating);
    println!();
}

fn print_balances(summary: &AnalyticsSummary) {
    let mut table = create_table();
    table.set_header(vec!["", "Count", "Total", "Overdue", "This Month"]);
    for (label, balance) in [("Receivables", &summary.receivables), ("Payables", &summary.payables)] {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(balance.count),
            amount_cell(balance.total),
            amount_cell(balance.overdue),
            amount_cell(balance.current_month),
        ]);
    }
    println!("{}", table);
    println!();
}

fn print_expenses(summary: &AnalyticsSummary) {
    let expenses = &summary.expenses;
    if expenses.count == 0 {
        return;
    }

    println!(
        "{} {} total, {} pending, {} this month",
        "Expenses:".bold(),
        format_amount(expenses.total),
        format_amount(expenses.pending),
        format_amount(expenses.current_month)
    );

    let mut table = create_table();
    table.set_header(vec!["Project", "Count", "Total", "Pending", "Paid"]);
    for project in &expenses.by_project {
        table.add_row(vec![
            Cell::new(&project.project),
            Cell::new(project.count),
            amount_cell(project.total),
            amount_cell(project.pending),
            amount_cell(project.paid),
        ]);
    }
    println!("{}", table);

    let mut table = create_table();
    table.set_header(vec!["Category", "Amount"]);
    for category in &expenses.by_category {
        table.add_row(vec![Cell::new(&category.category), amount_cell(category.amount)]);
    }
    println!("{}", table);

    let mut table = create_table();
    table.set_header(vec!["Cost Center", "Amount"]);
    for center in &expenses.by_cost_center {
        table.add_row(vec![Cell::new(&center.center), amount_cell(center.amount)]);
    }
    println!("{}", table);
    println!();
}

fn print_monthly(summary: &AnalyticsSummary) {
    println!("{}", "Monthly".bold());
    let mut table = create_table();
    table.set_header(vec!["Month", "Income", "Expenses", "Receivables", "Payables"]);
    for point in &summary.monthly_data {
        table.add_row(vec![
            Cell::new(&point.month),
            amount_cell(point.income),
            amount_cell(point.expenses),
            amount_cell(point.receivables),
            amount_cell(point.payables),
        ]);
    }
    println!("{}", table);
    println!();
}

fn print_distribution(summary: &AnalyticsSummary) {
    println!("{}", "By Type".bold());
    let mut table = create_table();
    table.set_header(vec!["Type", "Amount", "Share"]);
    for share in &summary.type_distribution {
        table.add_row(vec![
            Cell::new(share.activity_type.label()),
            amount_cell(share.amount),
            Cell::new(format_percent(share.percentage)),
        ]);
    }
    println!("{}", table);
}
