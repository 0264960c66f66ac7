//! Report store
//!
//! Chooses between the remote manifest and the embedded fallback dataset.

pub mod fallback;
pub mod reports;
pub mod sequence;
pub mod source;
