//! Per-User Usage Ledger
//!
//! Accumulates usage entries and enter/leave events for a single
//! resource. Entries are keyed by user; events are append-only.

use serde::{Deserialize, Serialize};

/// A single usage entry recorded against a resource.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UsageEntry {
    /// User the entry belongs to
    pub user: String,
    /// How many times the user exercised the resource
    pub count: u64,
    /// Duration in seconds from the most recent entry for this user
    pub duration: f64,
}

/// A timestamped presence event (enter or leave) for a user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PresenceEvent {
    /// User the event belongs to
    pub user: String,
    /// Event time in seconds since run start
    pub timestamp: f64,
}

/// Usage ledger for one resource.
///
/// Holds at most one [`UsageEntry`] per user. Recording for a user that
/// already has an entry overwrites it in place, so report order stays
/// stable across updates. Enter and leave events are kept in recording
/// order without deduplication.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UsageLedger {
    entries: Vec<UsageEntry>,
    enters: Vec<PresenceEvent>,
    leaves: Vec<PresenceEvent>,
}

impl UsageLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a usage entry for `user`, overwriting any existing entry.
    pub fn record_usage(&mut self, user: &str, count: u64, duration: f64) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.user == user) {
            entry.count = count;
            entry.duration = duration;
            return;
        }
        self.entries.push(UsageEntry {
            user: user.to_string(),
            count,
            duration,
        });
    }

    /// Records an enter event for `user`.
    pub fn record_enter(&mut self, user: &str, timestamp: f64) {
        self.enters.push(PresenceEvent {
            user: user.to_string(),
            timestamp,
        });
    }

    /// Records a leave event for `user`.
    pub fn record_leave(&mut self, user: &str, timestamp: f64) {
        self.leaves.push(PresenceEvent {
            user: user.to_string(),
            timestamp,
        });
    }

    /// Returns all usage entries in first-recorded order.
    pub fn entries(&self) -> &[UsageEntry] {
        &self.entries
    }

    /// Returns the usage entry for `user`, if any.
    pub fn entry(&self, user: &str) -> Option<&UsageEntry> {
        self.entries.iter().find(|e| e.user == user)
    }

    /// Returns all enter events in recording order.
    pub fn enters(&self) -> &[PresenceEvent] {
        &self.enters
    }

    /// Returns all leave events in recording order.
    pub fn leaves(&self) -> &[PresenceEvent] {
        &self.leaves
    }

    /// Number of users with a usage entry.
    pub fn user_count(&self) -> usize {
        self.entries.len()
    }

    /// Sum of counts across all usage entries.
    pub fn total_count(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Mean duration across usage entries, or 0.0 when empty.
    pub fn mean_duration(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.entries.iter().map(|e| e.duration).sum::<f64>() / self.entries.len() as f64
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.enters.is_empty() && self.leaves.is_empty()
    }
}
