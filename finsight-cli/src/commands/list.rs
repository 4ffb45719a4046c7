//! List command - filter and sort activities

use std::io;
use std::path::Path;

use anyhow::Result;
use comfy_table::Cell;
use finsight_core::services::{ActivityQuery, SortField};
use finsight_core::{ActivityStatus, ActivityType, FinancialActivity};

use super::{get_context, load_activities, parse_date_arg};
use crate::output::{self, amount_cell, create_table};

/// Raw filter arguments as given on the command line
pub struct ListFilters {
    pub search: Option<String>,
    pub activity_type: Option<String>,
    pub status: Option<String>,
    pub client: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub sort: String,
    pub ascending: bool,
}

impl ListFilters {
    fn into_query(self) -> Result<ActivityQuery> {
        let mut query = ActivityQuery::new();

        if let Some(term) = self.search {
            query = query.search(term);
        }
        if let Some(activity_type) = self.activity_type {
            query = query.of_type(activity_type.parse::<ActivityType>()?);
        }
        if let Some(status) = self.status {
            query = query.with_status(status.parse::<ActivityStatus>()?);
        }
        if let Some(client) = self.client {
            query = query.for_client(client);
        }

        let from = self.from.as_deref().map(parse_date_arg).transpose()?;
        let to = self.to.as_deref().map(parse_date_arg).transpose()?;
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                anyhow::bail!("--from {} is after --to {}", from, to);
            }
        }

        let sort_by = self.sort.parse::<SortField>()?;

        Ok(query.between(from, to).sorted_by(sort_by, self.ascending))
    }
}

pub fn run(file: Option<&Path>, filters: ListFilters, format: &str) -> Result<()> {
    let query = filters.into_query()?;
    let ctx = get_context()?;
    let activities = load_activities(&ctx, file)?;
    let selected = query.apply(&activities);

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&selected)?);
        }
        "csv" => {
            ctx.export_service
                .write_csv(io::stdout().lock(), selected.iter().copied())?;
        }
        _ => {
            if selected.is_empty() {
                output::warning("No activities match.");
                return Ok(());
            }
            print_table(&selected);
            println!();
            println!("{} of {} activities", selected.len(), activities.len());
        }
    }

    Ok(())
}

fn print_table(activities: &[&FinancialActivity]) {
    let mut table = create_table();
    table.set_header(vec!["Reference", "Type", "Status", "Date", "Client", "Amount"]);

    for activity in activities {
        table.add_row(vec![
            Cell::new(activity.reference_number.as_deref().unwrap_or(&activity.id)),
            Cell::new(activity.activity_type.label()),
            Cell::new(activity.status.label()),
            Cell::new(
                activity
                    .transaction_date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ),
            Cell::new(activity.client_name.as_deref().unwrap_or("")),
            amount_cell(activity.amount),
        ]);
    }

    println!("{}", table);
}
