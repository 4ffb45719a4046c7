//! Insights command - outstanding balances and cash-flow trend

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use comfy_table::Cell;
use finsight_core::services::InsightsService;

use super::{get_context, load_activities, reference_date};
use crate::output::{amount_cell, create_table, signed_amount};

pub fn run(file: Option<&Path>, reference: Option<&str>, months: Option<u32>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let activities = load_activities(&ctx, file)?;
    let reference = reference_date(reference)?;

    let insights = match months {
        Some(0) => anyhow::bail!("--months must be at least 1"),
        Some(months) => InsightsService::new(months).insights(&activities, reference),
        None => ctx.insights_service.insights(&activities, reference),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    println!("{} {}", "Insights as of".bold(), insights.reference_date);
    println!();

    let mut table = create_table();
    table.add_row(vec![Cell::new("Open Receivables"), amount_cell(insights.total_receivables)]);
    table.add_row(vec![Cell::new("Overdue Receivables"), amount_cell(insights.overdue_receivables)]);
    table.add_row(vec![Cell::new("Open Payables"), amount_cell(insights.total_payables)]);
    table.add_row(vec![Cell::new("Overdue Payables"), amount_cell(insights.overdue_payables)]);
    table.add_row(vec![Cell::new("Income This Month"), amount_cell(insights.total_income_current_month)]);
    table.add_row(vec![Cell::new("Expenses This Month"), amount_cell(insights.total_expenses_current_month)]);
    table.add_row(vec![Cell::new("Pending Approvals"), Cell::new(insights.pending_approvals)]);
    println!("{}", table);
    println!();

    println!("{}", "Cash Flow".bold());
    let mut table = create_table();
    table.set_header(vec!["Month", "Income", "Expenses", "Net"]);
    for point in &insights.cash_flow_trend {
        table.add_row(vec![
            Cell::new(&point.month),
            amount_cell(point.income),
            amount_cell(point.expenses),
            Cell::new(signed_amount(point.net)),
        ]);
    }
    println!("{}", table);

    if !insights.top_expense_categories.is_empty() {
        println!();
        println!("{}", "Top Expense Accounts This Month".bold());
        let mut table = create_table();
        table.set_header(vec!["Account", "Total"]);
        for top in &insights.top_expense_categories {
            table.add_row(vec![Cell::new(&top.account), amount_cell(top.total)]);
        }
        println!("{}", table);
    }

    Ok(())
}
