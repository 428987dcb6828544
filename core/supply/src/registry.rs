// citrate/core/supply/src/registry.rs

use crate::error::SupplyError;
use crate::invariants::{Invariant, SupplierInvariant, TotalSupplyInvariant, MODULE_NAME};
use crate::snapshot::LedgerSnapshot;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Outcome of one registered invariant
#[derive(Debug, Clone)]
pub struct InvariantReport {
    /// `"<module>/<route>"`
    pub key: String,
    pub outcome: Result<(), SupplyError>,
    pub elapsed: Duration,
}

impl InvariantReport {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Invariants keyed by `"<module>/<route>"`.
///
/// Keys iterate in sorted order so repeated runs report identically.
#[derive(Default, Clone)]
pub struct InvariantRegistry {
    routes: BTreeMap<String, Arc<dyn Invariant>>,
}

impl InvariantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route_key(module: &str, route: &str) -> String {
        format!("{}/{}", module, route)
    }

    pub fn register_route(
        &mut self,
        module: &str,
        invariant: Arc<dyn Invariant>,
    ) -> Result<(), SupplyError> {
        let key = Self::route_key(module, invariant.route());
        if self.routes.contains_key(&key) {
            return Err(SupplyError::DuplicateRoute(key));
        }
        debug!("Registered invariant route {}", key);
        self.routes.insert(key, invariant);
        Ok(())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Keep only the listed keys; unknown keys are an error
    pub fn retain_keys(&mut self, keys: &[String]) -> Result<(), SupplyError> {
        if let Some(unknown) = keys.iter().find(|k| !self.routes.contains_key(k.as_str())) {
            return Err(SupplyError::UnknownRoute(unknown.clone()));
        }
        self.routes.retain(|key, _| keys.contains(key));
        Ok(())
    }

    /// Run a single route
    pub fn run(&self, key: &str, snapshot: &dyn LedgerSnapshot) -> Result<InvariantReport, SupplyError> {
        let invariant = self
            .routes
            .get(key)
            .ok_or_else(|| SupplyError::UnknownRoute(key.to_string()))?;
        Ok(Self::run_one(key, invariant.as_ref(), snapshot))
    }

    /// Run every route; a failing route does not stop the others
    pub fn run_all(&self, snapshot: &dyn LedgerSnapshot) -> Vec<InvariantReport> {
        self.routes
            .iter()
            .map(|(key, invariant)| Self::run_one(key, invariant.as_ref(), snapshot))
            .collect()
    }

    fn run_one(key: &str, invariant: &dyn Invariant, snapshot: &dyn LedgerSnapshot) -> InvariantReport {
        let start = Instant::now();
        let outcome = invariant.check(snapshot);
        InvariantReport {
            key: key.to_string(),
            outcome,
            elapsed: start.elapsed(),
        }
    }
}

/// Register the supplier and total supply checks under the supply module
pub fn register_supply_invariants(registry: &mut InvariantRegistry) -> Result<(), SupplyError> {
    registry.register_route(MODULE_NAME, Arc::new(SupplierInvariant))?;
    registry.register_route(MODULE_NAME, Arc::new(TotalSupplyInvariant))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::MemorySnapshot;
    use chrono::Utc;

    #[test]
    fn test_supply_routes_have_stable_keys() {
        let mut registry = InvariantRegistry::new();
        register_supply_invariants(&mut registry).unwrap();

        let keys: Vec<_> = registry.keys().collect();
        assert_eq!(keys, vec!["supply/supplier", "supply/total-supply"]);
    }

    #[test]
    fn test_duplicate_route_rejected() {
        let mut registry = InvariantRegistry::new();
        register_supply_invariants(&mut registry).unwrap();
        assert_eq!(
            register_supply_invariants(&mut registry),
            Err(SupplyError::DuplicateRoute("supply/supplier".to_string()))
        );
    }

    #[test]
    fn test_unknown_route() {
        let registry = InvariantRegistry::new();
        let snapshot = MemorySnapshot::new(1, Utc::now());
        assert!(matches!(
            registry.run("supply/nope", &snapshot),
            Err(SupplyError::UnknownRoute(_))
        ));
    }

    #[test]
    fn test_retain_keys() {
        let mut registry = InvariantRegistry::new();
        register_supply_invariants(&mut registry).unwrap();

        registry.retain_keys(&["supply/total-supply".to_string()]).unwrap();
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["supply/total-supply"]);

        assert!(registry.retain_keys(&["bank/nonnegative".to_string()]).is_err());
    }

    #[test]
    fn test_run_all_on_empty_ledger_passes() {
        let mut registry = InvariantRegistry::new();
        register_supply_invariants(&mut registry).unwrap();

        let snapshot = MemorySnapshot::new(1, Utc::now());
        let reports = registry.run_all(&snapshot);
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(InvariantReport::is_ok));
    }
}
