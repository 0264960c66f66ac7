//! Data models

pub mod filter;
pub mod manifest;
pub mod report;
pub mod stats;
