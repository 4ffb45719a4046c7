//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The analytics
//! services depend only on already-fetched activity lists; where those
//! lists come from is behind these traits.

mod activity_source;

pub use activity_source::ActivitySource;
