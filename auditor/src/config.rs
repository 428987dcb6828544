use crate::audit::normalize_route;
use citrate_supply::RunnerConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Auditor configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditorConfig {
    /// Invariant scheduling and routing
    #[serde(default)]
    pub invariants: InvariantsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvariantsConfig {
    /// Run every N blocks (0 disables block-driven checks)
    #[serde(default = "default_check_period")]
    pub check_period: u64,

    /// Exit with failure when any invariant is broken
    #[serde(default = "default_halt")]
    pub halt_on_violation: bool,

    /// Routes to run, e.g. "supply/total-supply" or "supplier". Empty runs all.
    #[serde(default)]
    pub routes: Vec<String>,
}

fn default_check_period() -> u64 {
    1
}

fn default_halt() -> bool {
    true
}

impl Default for InvariantsConfig {
    fn default() -> Self {
        Self {
            check_period: default_check_period(),
            halt_on_violation: default_halt(),
            routes: Vec::new(),
        }
    }
}

impl InvariantsConfig {
    /// Configured routes as full registry keys; bare names belong to the
    /// supply module
    pub fn route_keys(&self) -> Vec<String> {
        self.routes.iter().map(|r| normalize_route(r.trim())).collect()
    }

    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            check_period: self.check_period,
            halt_on_violation: self.halt_on_violation,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level filter, overridden by RUST_LOG
    #[serde(default = "default_level")]
    pub level: String,

    /// pretty, compact or json
    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default = "default_ansi")]
    pub ansi_colors: bool,

    /// Per-target levels, e.g. `citrate_supply = "trace"`
    #[serde(default)]
    pub targets: BTreeMap<String, String>,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

fn default_ansi() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            ansi_colors: default_ansi(),
            targets: BTreeMap::new(),
        }
    }
}

impl AuditorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(bad) = self
            .invariants
            .route_keys()
            .into_iter()
            .find(|key| key.split('/').any(str::is_empty))
        {
            return Err(format!(
                "Invalid route key {:?}: expected \"<route>\" or \"<module>/<route>\"",
                bad
            ));
        }
        Ok(())
    }

    /// Load from file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AuditorConfig = toml::from_str(&content)?;
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    /// Save to file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
