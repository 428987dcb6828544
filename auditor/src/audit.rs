use crate::config::AuditorConfig;
use crate::metrics;
use anyhow::Context;
use citrate_supply::{
    register_supply_invariants, BlockAudit, InvariantRegistry, InvariantRunner, MemorySnapshot,
    RunnerDecision, MODULE_NAME,
};
use std::path::Path;
use tracing::{info, warn};

/// What a single `check` invocation should evaluate
#[derive(Debug, Clone, Default)]
pub struct CheckRequest {
    /// Limit the run to one route; overrides the configured routes
    pub route: Option<String>,
    /// Evaluate as the block at this height, honouring the check period
    pub height: Option<u64>,
}

/// Accept both "supply/supplier" and the bare "supplier"
pub fn normalize_route(route: &str) -> String {
    if route.contains('/') {
        route.to_string()
    } else {
        InvariantRegistry::route_key(MODULE_NAME, route)
    }
}

/// Registry with the supply routes, narrowed to `routes` when non-empty
pub fn build_registry(routes: &[String]) -> anyhow::Result<InvariantRegistry> {
    let mut registry = InvariantRegistry::new();
    register_supply_invariants(&mut registry)?;

    if !routes.is_empty() {
        let keys: Vec<String> = routes.iter().map(|r| normalize_route(r)).collect();
        registry.retain_keys(&keys)?;
    }

    Ok(registry)
}

pub fn build_runner(config: &AuditorConfig, request: &CheckRequest) -> anyhow::Result<InvariantRunner> {
    let routes = match &request.route {
        Some(route) => vec![normalize_route(route)],
        None => config.invariants.route_keys(),
    };
    let registry = build_registry(&routes)?;
    Ok(InvariantRunner::new(registry, config.invariants.runner_config()))
}

pub fn load_snapshot(path: &Path) -> anyhow::Result<MemorySnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let snapshot = MemorySnapshot::from_json(&content)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;
    Ok(snapshot)
}

/// Run the requested invariants against `snapshot` and record metrics
pub fn run_check(
    config: &AuditorConfig,
    snapshot: &MemorySnapshot,
    request: &CheckRequest,
) -> anyhow::Result<BlockAudit> {
    let runner = build_runner(config, request)?;
    info!(
        "Auditing snapshot at height {} with {} route(s)",
        snapshot.height,
        runner.registry().len()
    );

    let audit = match request.height {
        Some(height) => runner.on_block(height, snapshot),
        None => runner.run_now(snapshot.height, snapshot),
    };

    for report in &audit.reports {
        metrics::record_report(report);
    }

    if audit.decision == RunnerDecision::Skipped {
        warn!(
            "Height {} is not on the check period ({}); nothing evaluated",
            audit.height,
            runner.config().check_period
        );
    }

    Ok(audit)
}

/// Human-readable summary, one line per route plus diagnostics
pub fn format_audit(audit: &BlockAudit) -> String {
    let mut out = format!("height {}: {:?}\n", audit.height, audit.decision);
    for report in &audit.reports {
        match &report.outcome {
            Ok(()) => out.push_str(&format!("  ok    {} ({:?})\n", report.key, report.elapsed)),
            Err(e) => out.push_str(&format!("  FAIL  {}: {}\n", report.key, e)),
        }
    }
    out
}
