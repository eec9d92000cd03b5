//! Common utilities for marklabel.
//!
//! This crate provides shared infrastructure used by all label components:
//! - **Warning System** - deduplicated, colored terminal output for malformed
//!   markup and invalid attribute values
//! - **Link targets** - resolution of `href` values against a base URL

pub mod url;
pub mod warning;
