//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - JSON files / readers for exported activity lists
//! - Blocking HTTP client for the backend's activity endpoint

pub mod http;
pub mod json;
