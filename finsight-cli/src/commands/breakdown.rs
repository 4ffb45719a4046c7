//! Breakdown command - counts and totals per type and status

use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use comfy_table::Cell;

use super::{get_context, load_activities};
use crate::output::{amount_cell, create_table};

pub fn run(file: Option<&Path>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let activities = load_activities(&ctx, file)?;
    let breakdown = ctx.breakdown_service.breakdown(&activities);

    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    println!("{} {}", "Total activities:".bold(), breakdown.total_activities);
    println!();

    let mut table = create_table();
    table.set_header(vec!["Type", "Count", "Total"]);
    for bucket in &breakdown.by_type {
        table.add_row(vec![
            Cell::new(bucket.activity_type.label()),
            Cell::new(bucket.totals.count),
            amount_cell(bucket.totals.total_amount),
        ]);
    }
    println!("{}", table);
    println!();

    let mut table = create_table();
    table.set_header(vec!["Status", "Count", "Total"]);
    for bucket in &breakdown.by_status {
        table.add_row(vec![
            Cell::new(bucket.status.label()),
            Cell::new(bucket.totals.count),
            amount_cell(bucket.totals.total_amount),
        ]);
    }
    println!("{}", table);

    Ok(())
}
