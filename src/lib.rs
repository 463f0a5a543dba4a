//! Fuzzy abbreviation matching: decide whether every character of a short
//! query occurs in a candidate in order, case-insensitively, aligned with
//! word and camelCase boundaries, and score matches for ranking.
//!
//! Embedding hosts filter candidate lists through
//! [`filter::filter_items`]; the `abbrmatch` binary drives the same modules
//! over stdin lines.

pub mod align;
pub mod boundary;
pub mod config;
pub mod filter;
pub mod grep;
pub mod input;
pub mod matcher;
pub mod output;
pub mod pattern;
pub mod rank;
