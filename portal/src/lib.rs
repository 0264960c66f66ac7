//! Deployment report portal library
//!
//! Resolves deployment reports from a static manifest (with a built-in
//! fallback dataset), filters them, and derives per-environment statistics.

pub mod app;
pub mod errors;
pub mod filesys;
pub mod filter;
pub mod http;
pub mod logs;
pub mod models;
pub mod server;
pub mod storage;
pub mod store;
pub mod utils;
