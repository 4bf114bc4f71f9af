//! Parsers for registry responses and filing documents.
//!
//! Everything here is synchronous and works on already-fetched content, which
//! keeps the network-facing stages thin and lets the parsers be tested on
//! fixtures.

pub mod browse;
pub mod document;
pub mod fields;
pub mod table;
