// citrate/core/supply/src/runner.rs

//! Block-driven invariant runner.
//!
//! The runner decides when registered invariants execute and what a failure
//! means for the host. It never stops the process itself; it hands back a
//! [`RunnerDecision`] and the host acts on it.

use crate::registry::{InvariantRegistry, InvariantReport};
use crate::snapshot::LedgerSnapshot;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Run every `check_period` blocks; 0 disables block-driven checks
    #[serde(default = "default_check_period")]
    pub check_period: u64,

    /// Ask the host to halt when any invariant fails
    #[serde(default = "default_halt_on_violation")]
    pub halt_on_violation: bool,
}

fn default_check_period() -> u64 {
    1
}

fn default_halt_on_violation() -> bool {
    true
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            check_period: default_check_period(),
            halt_on_violation: default_halt_on_violation(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerDecision {
    /// Not scheduled at this height
    Skipped,
    /// All invariants passed, or failures are configured as non-fatal
    Continue,
    /// At least one invariant failed and state transitions must stop
    Halt,
}

/// Reports from one scheduled run
#[derive(Debug, Clone)]
pub struct BlockAudit {
    pub height: u64,
    pub decision: RunnerDecision,
    pub reports: Vec<InvariantReport>,
}

impl BlockAudit {
    pub fn failures(&self) -> impl Iterator<Item = &InvariantReport> {
        self.reports.iter().filter(|r| !r.is_ok())
    }
}

pub struct InvariantRunner {
    registry: InvariantRegistry,
    config: RunnerConfig,
}

impl InvariantRunner {
    pub fn new(registry: InvariantRegistry, config: RunnerConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &InvariantRegistry {
        &self.registry
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn is_scheduled(&self, height: u64) -> bool {
        self.config.check_period != 0 && height % self.config.check_period == 0
    }

    /// Called once per committed block
    pub fn on_block(&self, height: u64, snapshot: &dyn LedgerSnapshot) -> BlockAudit {
        if !self.is_scheduled(height) {
            return BlockAudit {
                height,
                decision: RunnerDecision::Skipped,
                reports: Vec::new(),
            };
        }
        self.run_now(height, snapshot)
    }

    /// Run every registered invariant regardless of schedule
    pub fn run_now(&self, height: u64, snapshot: &dyn LedgerSnapshot) -> BlockAudit {
        let reports = self.registry.run_all(snapshot);

        for report in &reports {
            match &report.outcome {
                Ok(()) => info!(
                    "Invariant {} passed at height {} ({:?})",
                    report.key, height, report.elapsed
                ),
                Err(e) if e.is_violation() => {
                    error!("Invariant {} broken at height {}: {}", report.key, height, e)
                }
                Err(e) => warn!(
                    "Invariant {} could not be evaluated at height {}: {}",
                    report.key, height, e
                ),
            }
        }

        let failed = reports.iter().any(|r| !r.is_ok());
        let decision = if failed && self.config.halt_on_violation {
            RunnerDecision::Halt
        } else {
            RunnerDecision::Continue
        };

        if decision == RunnerDecision::Halt {
            error!("Supply invariants failed at height {}; halting state transitions", height);
        }

        BlockAudit {
            height,
            decision,
            reports,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::register_supply_invariants;
    use crate::snapshot::MemorySnapshot;
    use crate::supplier::Supplier;
    use chrono::Utc;

    fn runner(config: RunnerConfig) -> InvariantRunner {
        let mut registry = InvariantRegistry::new();
        register_supply_invariants(&mut registry).unwrap();
        InvariantRunner::new(registry, config)
    }

    fn broken_snapshot() -> MemorySnapshot {
        let mut supplier = Supplier::default();
        supplier.total_supply = "1atom".parse().unwrap();
        MemorySnapshot::new(4, Utc::now()).with_supplier(supplier)
    }

    #[test]
    fn test_check_period() {
        let r = runner(RunnerConfig {
            check_period: 5,
            halt_on_violation: true,
        });
        assert!(r.is_scheduled(0));
        assert!(!r.is_scheduled(4));
        assert!(r.is_scheduled(10));

        let audit = r.on_block(4, &broken_snapshot());
        assert_eq!(audit.decision, RunnerDecision::Skipped);
        assert!(audit.reports.is_empty());
    }

    #[test]
    fn test_period_zero_disables() {
        let r = runner(RunnerConfig {
            check_period: 0,
            halt_on_violation: true,
        });
        assert!(!r.is_scheduled(0));
        assert_eq!(r.on_block(0, &broken_snapshot()).decision, RunnerDecision::Skipped);
    }

    #[test]
    fn test_violation_halts() {
        let r = runner(RunnerConfig::default());
        let audit = r.on_block(4, &broken_snapshot());
        assert_eq!(audit.decision, RunnerDecision::Halt);
        let failed: Vec<_> = audit.failures().map(|f| f.key.as_str()).collect();
        assert_eq!(failed, vec!["supply/total-supply"]);
    }

    #[test]
    fn test_violation_without_halt_continues() {
        let r = runner(RunnerConfig {
            check_period: 1,
            halt_on_violation: false,
        });
        let audit = r.on_block(4, &broken_snapshot());
        assert_eq!(audit.decision, RunnerDecision::Continue);
        assert_eq!(audit.failures().count(), 1);
    }

    #[test]
    fn test_unavailable_collaborator_is_a_failure() {
        let r = runner(RunnerConfig::default());
        let mut snapshot = MemorySnapshot::new(1, Utc::now());
        snapshot.accounts = None;
        let audit = r.run_now(1, &snapshot);
        assert_eq!(audit.decision, RunnerDecision::Halt);
        assert_eq!(audit.failures().count(), 1);
    }
}
