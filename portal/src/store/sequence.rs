//! Request sequencing for discarding stale responses

use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket handed out for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn number(&self) -> u64 {
        self.0
    }
}

/// Monotonically increasing request counter
///
/// A response is current only if its ticket is the last one issued.
#[derive(Debug, Default)]
pub struct RequestSequence {
    issued: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether no newer ticket has been issued since `ticket`
    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }
}
