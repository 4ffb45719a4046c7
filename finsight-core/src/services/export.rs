//! Export service - CSV export of activity lists

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::result::Result;
use crate::domain::FinancialActivity;

const HEADER: [&str; 10] = [
    "Reference Number",
    "Type",
    "Amount",
    "Currency",
    "Client",
    "Account",
    "Description",
    "Status",
    "Transaction Date",
    "Due Date",
];

/// Writes activity lists as CSV
#[derive(Debug, Clone)]
pub struct ExportService {
    default_currency: String,
}

impl ExportService {
    /// `default_currency` fills rows whose activity carries no currency
    pub fn new(default_currency: impl Into<String>) -> Self {
        Self {
            default_currency: default_currency.into(),
        }
    }

    /// Write `activities` as CSV to any writer, returning the row count
    pub fn write_csv<'a, W, I>(&self, writer: W, activities: I) -> Result<usize>
    where
        W: Write,
        I: IntoIterator<Item = &'a FinancialActivity>,
    {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(HEADER)?;

        let mut rows = 0;
        for activity in activities {
            csv_writer.write_record(self.row(activity))?;
            rows += 1;
        }
        csv_writer.flush()?;

        log::debug!("Exported {} activities to CSV", rows);
        Ok(rows)
    }

    /// Write `activities` as CSV to a file
    pub fn export_to_file<'a, I>(&self, path: &Path, activities: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a FinancialActivity>,
    {
        let file = File::create(path)?;
        self.write_csv(file, activities)
    }

    fn row(&self, activity: &FinancialActivity) -> [String; 10] {
        let date = |d: Option<chrono::NaiveDate>| {
            d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
        };

        [
            activity.reference_number.clone().unwrap_or_default(),
            activity.activity_type.label().to_string(),
            activity.amount.to_string(),
            activity
                .currency
                .clone()
                .unwrap_or_else(|| self.default_currency.clone()),
            activity
                .client_name
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "N/A".to_string()),
            activity.account_name.clone().unwrap_or_default(),
            activity.description.clone().unwrap_or_default(),
            activity.status.label().to_string(),
            date(activity.transaction_date),
            date(activity.due_date),
        ]
    }
}
