//! Offline supply auditor for the Citrate ledger.
//!
//! Loads a ledger snapshot, runs the registered supply invariants through the
//! block runner and reports the outcome.

pub mod audit;
pub mod config;
pub mod logging;
pub mod metrics;

pub use audit::{build_registry, build_runner, format_audit, load_snapshot, run_check, CheckRequest};
pub use config::AuditorConfig;
