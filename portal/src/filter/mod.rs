//! Report filtering and statistics
//!
//! Pure functions over report collections; nothing here performs I/O.

pub mod engine;
pub mod stats;
