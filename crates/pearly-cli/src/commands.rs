// Rust guideline compliant 2026-10-18

//! Command implementations for the Pearly CLI.

pub mod check;
pub mod diff;
pub mod types;
