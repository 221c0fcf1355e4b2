//! Telemetry Ledger Module
//!
//! Event records accumulated against registry entities during a run.
//!
//! # Components
//!
//! - [`UsageLedger`]: per-user usage entries plus enter/leave events
//! - [`TransferLog`]: put/get events for containers and stores

pub mod exchange;
pub mod usage;

pub use exchange::{TransferEvent, TransferLog};
pub use usage::{PresenceEvent, UsageEntry, UsageLedger};
