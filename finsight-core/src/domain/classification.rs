//! Classification of expenses along free-text grouping dimensions

use serde::Serialize;

/// A grouping dimension with its own "unclassified" bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Project,
    Category,
    CostCenter,
}

impl Dimension {
    /// Bucket label for activities with no value on this dimension
    pub fn unclassified_label(&self) -> &'static str {
        match self {
            Dimension::Project => "Unassigned",
            Dimension::Category => "Uncategorized",
            Dimension::CostCenter => "General",
        }
    }
}

/// The value of an activity along one dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification<'a> {
    Named(&'a str),
    Unclassified(Dimension),
}

impl<'a> Classification<'a> {
    /// Classify a raw field value; blank strings count as missing
    pub fn of(dimension: Dimension, value: Option<&'a str>) -> Self {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Classification::Named(v),
            _ => Classification::Unclassified(dimension),
        }
    }

    /// Fall back to another classification when this one is unclassified
    pub fn or_else(self, fallback: impl FnOnce() -> Classification<'a>) -> Self {
        match self {
            Classification::Named(_) => self,
            Classification::Unclassified(_) => fallback(),
        }
    }

    pub fn is_classified(&self) -> bool {
        matches!(self, Classification::Named(_))
    }

    /// Grouping key as shown in breakdowns
    pub fn label(&self) -> &'a str {
        match self {
            Classification::Named(v) => v,
            Classification::Unclassified(dimension) => dimension.unclassified_label(),
        }
    }
}
