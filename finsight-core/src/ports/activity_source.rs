//! Activity source port
//!
//! Defines the interface for loading financial activities from wherever
//! they live (a JSON export, the backend API, test fixtures).

use crate::domain::result::Result;
use crate::domain::FinancialActivity;

/// Activity source trait
///
/// Implementations hand back a complete, normalized activity list. Any
/// response envelope is unwrapped before the list leaves the source.
pub trait ActivitySource: Send + Sync {
    /// Source name for logs and messages (e.g., "file", "api")
    fn name(&self) -> &str;

    /// Fetch every activity the source knows about
    fn fetch(&self) -> Result<Vec<FinancialActivity>>;
}

impl ActivitySource for Vec<FinancialActivity> {
    fn name(&self) -> &str {
        "memory"
    }

    fn fetch(&self) -> Result<Vec<FinancialActivity>> {
        Ok(self.clone())
    }
}
