//! Server state

use std::sync::Arc;

use crate::store::reports::ReportStore;

/// Server state shared across handlers
pub struct ServerState {
    pub store: Arc<ReportStore>,
}

impl ServerState {
    pub fn new(store: Arc<ReportStore>) -> Self {
        Self { store }
    }
}
