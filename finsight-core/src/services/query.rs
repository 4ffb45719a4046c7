//! Activity query - filtering and sorting of activity lists

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::result::Error;
use crate::domain::{ActivityStatus, ActivityType, FinancialActivity};

/// Field to sort activities by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    TransactionDate,
    Amount,
    Status,
    ActivityType,
    ClientName,
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "transaction_date" | "date" => Ok(SortField::TransactionDate),
            "amount" => Ok(SortField::Amount),
            "status" => Ok(SortField::Status),
            "activity_type" | "type" => Ok(SortField::ActivityType),
            "client_name" | "client" => Ok(SortField::ClientName),
            _ => Err(Error::parse(format!("Unknown sort field: {}", s))),
        }
    }
}

/// Filter and sort criteria; all criteria are optional and combine with AND
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityQuery {
    /// Case-insensitive match on reference number, client name or description
    pub search: Option<String>,
    pub activity_type: Option<ActivityType>,
    pub status: Option<ActivityStatus>,
    /// Case-insensitive exact client name
    pub client: Option<String>,
    /// Inclusive lower bound on the transaction date
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the transaction date
    pub date_to: Option<NaiveDate>,
    pub sort_by: SortField,
    pub ascending: bool,
}

impl ActivityQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn of_type(mut self, activity_type: ActivityType) -> Self {
        self.activity_type = Some(activity_type);
        self
    }

    pub fn with_status(mut self, status: ActivityStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn for_client(mut self, client: impl Into<String>) -> Self {
        self.client = Some(client.into());
        self
    }

    pub fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    pub fn sorted_by(mut self, field: SortField, ascending: bool) -> Self {
        self.sort_by = field;
        self.ascending = ascending;
        self
    }

    /// Whether a single activity passes every filter
    pub fn matches(&self, activity: &FinancialActivity) -> bool {
        if let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let needle = term.to_lowercase();
            let hit = [
                activity.reference_number.as_deref(),
                activity.client_name.as_deref(),
                activity.description.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if self.activity_type.is_some_and(|t| t != activity.activity_type) {
            return false;
        }
        if self.status.is_some_and(|s| s != activity.status) {
            return false;
        }

        if let Some(client) = &self.client {
            match &activity.client_name {
                Some(name) if name.eq_ignore_ascii_case(client.trim()) => {}
                _ => return false,
            }
        }

        // Undated activities cannot satisfy a date bound
        if let Some(from) = self.date_from {
            if !activity.transaction_date.is_some_and(|d| d >= from) {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if !activity.transaction_date.is_some_and(|d| d <= to) {
                return false;
            }
        }

        true
    }

    /// Filter and sort; the input slice is left untouched
    pub fn apply<'a>(&self, activities: &'a [FinancialActivity]) -> Vec<&'a FinancialActivity> {
        let mut selected: Vec<&FinancialActivity> =
            activities.iter().filter(|a| self.matches(a)).collect();

        // Stable sort keeps input order between equal keys
        selected.sort_by(|a, b| {
            let ordering = compare(a, b, self.sort_by);
            if self.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });

        selected
    }
}

fn compare(a: &FinancialActivity, b: &FinancialActivity, field: SortField) -> Ordering {
    match field {
        SortField::TransactionDate => a.transaction_date.cmp(&b.transaction_date),
        SortField::Amount => a.amount.cmp(&b.amount),
        SortField::Status => a.status.as_str().cmp(b.status.as_str()),
        SortField::ActivityType => a.activity_type.as_str().cmp(b.activity_type.as_str()),
        SortField::ClientName => a
            .client_name
            .as_deref()
            .map(str::to_lowercase)
            .cmp(&b.client_name.as_deref().map(str::to_lowercase)),
    }
}
