//! Sequencing guard for bulk reloads. Loads can resolve out of order;
//! each request gets a monotonically increasing ticket and only the
//! most recently issued one may replace the store, so a slow stale
//! response can never overwrite a fresher one.

use tracing::{debug, warn};

use crate::data::record::UserRecord;
use crate::data::record_store::RecordStore;
use crate::error::FetchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct LoadSequencer {
    latest_issued: u64,
}

impl LoadSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a load that is about to start
    pub fn begin(&mut self) -> LoadTicket {
        self.latest_issued += 1;
        debug!(seq = self.latest_issued, "issued load ticket");
        LoadTicket(self.latest_issued)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.latest_issued
    }

    /// Apply a completed load. Stale completions are dropped and the
    /// store is left alone; returns whether the records were applied.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        store: &mut RecordStore,
        records: Vec<UserRecord>,
    ) -> bool {
        if !self.is_current(ticket) {
            warn!(
                seq = ticket.0,
                latest = self.latest_issued,
                "dropping stale load result"
            );
            return false;
        }
        store.replace_all(records);
        true
    }

    /// Record a failed load. The prior store contents stay intact
    /// either way; returns whether the failure was for the current
    /// load (stale failures are not worth surfacing).
    pub fn fail(&mut self, ticket: LoadTicket, error: &FetchError) -> bool {
        if !self.is_current(ticket) {
            debug!(seq = ticket.0, "ignoring failure of stale load");
            return false;
        }
        warn!(seq = ticket.0, %error, "load failed, keeping previous records");
        true
    }
}
