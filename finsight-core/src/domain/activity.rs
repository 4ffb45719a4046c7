//! Financial activity domain model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::classification::{Classification, Dimension};
use super::lenient;
use super::result::Error;

/// Kind of financial activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Income,
    Expense,
    Receivable,
    Payable,
    Invoice,
    Quotation,
}

impl ActivityType {
    pub const ALL: [ActivityType; 6] = [
        ActivityType::Income,
        ActivityType::Expense,
        ActivityType::Receivable,
        ActivityType::Payable,
        ActivityType::Invoice,
        ActivityType::Quotation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Income => "income",
            ActivityType::Expense => "expense",
            ActivityType::Receivable => "receivable",
            ActivityType::Payable => "payable",
            ActivityType::Invoice => "invoice",
            ActivityType::Quotation => "quotation",
        }
    }

    /// Capitalized display label ("Receivable")
    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::Income => "Income",
            ActivityType::Expense => "Expense",
            ActivityType::Receivable => "Receivable",
            ActivityType::Payable => "Payable",
            ActivityType::Invoice => "Invoice",
            ActivityType::Quotation => "Quotation",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| Error::parse(format!("Unknown activity type: {}", s)))
    }
}

/// Workflow status of an activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    #[default]
    Pending,
    Approved,
    Paid,
    Rejected,
    Cancelled,
    Overdue,
}

impl ActivityStatus {
    pub const ALL: [ActivityStatus; 6] = [
        ActivityStatus::Pending,
        ActivityStatus::Approved,
        ActivityStatus::Paid,
        ActivityStatus::Rejected,
        ActivityStatus::Cancelled,
        ActivityStatus::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Pending => "pending",
            ActivityStatus::Approved => "approved",
            ActivityStatus::Paid => "paid",
            ActivityStatus::Rejected => "rejected",
            ActivityStatus::Cancelled => "cancelled",
            ActivityStatus::Overdue => "overdue",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActivityStatus::Pending => "Pending",
            ActivityStatus::Approved => "Approved",
            ActivityStatus::Paid => "Paid",
            ActivityStatus::Rejected => "Rejected",
            ActivityStatus::Cancelled => "Cancelled",
            ActivityStatus::Overdue => "Overdue",
        }
    }

    /// Still awaiting settlement (counts towards outstanding balances)
    pub fn is_open(&self) -> bool {
        matches!(self, ActivityStatus::Pending | ActivityStatus::Approved)
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == needle)
            .ok_or_else(|| Error::parse(format!("Unknown activity status: {}", s)))
    }
}

/// A single financial activity as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialActivity {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: String,
    pub activity_type: ActivityType,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: Decimal,
    #[serde(default)]
    pub status: ActivityStatus,
    /// `None` when the payload date was missing or unparseable
    #[serde(default, deserialize_with = "lenient::date")]
    pub transaction_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub paid_date: Option<NaiveDate>,
    /// Server-computed flag; derived from `due_date` when absent
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_overdue: Option<bool>,

    #[serde(default, deserialize_with = "lenient::text")]
    pub reference_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub client_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub account_name: Option<String>,

    // =========================================================================
    // Expense classification
    // =========================================================================
    #[serde(default, deserialize_with = "lenient::text")]
    pub project_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub expense_category: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub cost_center: Option<String>,
}

impl FinancialActivity {
    /// Create a new activity with required fields
    pub fn new(
        id: impl Into<String>,
        activity_type: ActivityType,
        amount: Decimal,
        status: ActivityStatus,
        transaction_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            activity_type,
            amount,
            status,
            transaction_date: Some(transaction_date),
            due_date: None,
            paid_date: None,
            is_overdue: None,
            reference_number: None,
            description: None,
            currency: None,
            client_name: None,
            account_name: None,
            project_number: None,
            expense_category: None,
            cost_center: None,
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_overdue_flag(mut self, is_overdue: bool) -> Self {
        self.is_overdue = Some(is_overdue);
        self
    }

    pub fn with_client(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = Some(client_name.into());
        self
    }

    pub fn with_account(mut self, account_name: impl Into<String>) -> Self {
        self.account_name = Some(account_name.into());
        self
    }

    pub fn with_reference(mut self, reference_number: impl Into<String>) -> Self {
        self.reference_number = Some(reference_number.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_project(mut self, project_number: impl Into<String>) -> Self {
        self.project_number = Some(project_number.into());
        self
    }

    pub fn with_category(mut self, expense_category: impl Into<String>) -> Self {
        self.expense_category = Some(expense_category.into());
        self
    }

    pub fn with_cost_center(mut self, cost_center: impl Into<String>) -> Self {
        self.cost_center = Some(cost_center.into());
        self
    }

    pub fn is_type(&self, activity_type: ActivityType) -> bool {
        self.activity_type == activity_type
    }

    /// Income that has actually been received
    pub fn is_realized_income(&self) -> bool {
        self.activity_type == ActivityType::Income && self.status == ActivityStatus::Paid
    }

    /// Overdue state as of `reference_date`
    ///
    /// The server flag wins when present. Otherwise an open activity
    /// (pending or approved) is overdue once its due date has passed.
    pub fn overdue_as_of(&self, reference_date: NaiveDate) -> bool {
        match self.is_overdue {
            Some(flag) => flag,
            None => match self.due_date {
                Some(due) => self.status.is_open() && reference_date > due,
                None => false,
            },
        }
    }

    /// Classification of this activity along a grouping dimension
    ///
    /// Projects fall back to the client name before being unassigned.
    pub fn classify(&self, dimension: Dimension) -> Classification<'_> {
        match dimension {
            Dimension::Project => Classification::of(dimension, self.project_number.as_deref())
                .or_else(|| Classification::of(dimension, self.client_name.as_deref())),
            Dimension::Category => Classification::of(dimension, self.expense_category.as_deref()),
            Dimension::CostCenter => Classification::of(dimension, self.cost_center.as_deref()),
        }
    }
}
