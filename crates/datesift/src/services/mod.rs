//! Parsing and comparison services.

pub mod compare;
pub mod parser;
