//! Utility functions.
//!
//! This module provides:
//! - CSS selector parsing
//! - Text normalization for scraped table cells

pub mod sanitize;
mod selector;

pub use sanitize::{clean_numeric_text, normalize_whitespace};
pub use selector::parse_selector;
