use refine_schema::{ComponentLibrary, ScenarioLibrary};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_CONFIG_NAME: &str = "refine.config.json";

/// Workspace configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceConfig {
    /// History entries kept per session, oldest dropped first
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Undo snapshots kept per session (0 = unlimited)
    #[serde(default = "default_max_undo_levels")]
    pub max_undo_levels: usize,

    /// Scenario used when a generation request names none
    #[serde(default)]
    pub default_scenario: Option<String>,

    #[serde(default)]
    pub component_library_path: Option<String>,

    #[serde(default)]
    pub scenario_library_path: Option<String>,

    /// Escalate auto-routed fast instructions that parse to nothing
    #[serde(default = "default_auto_escalate")]
    pub auto_escalate: bool,
}

fn default_max_history() -> usize {
    50
}

fn default_max_undo_levels() -> usize {
    100
}

fn default_auto_escalate() -> bool {
    true
}

impl WorkspaceConfig {
    /// Load config from a directory
    pub fn load(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: WorkspaceConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(WorkspaceConfig::default())
        }
    }

    /// Component library named by the config, or the built-in one.
    ///
    /// Relative paths resolve against `base`. Unreadable or malformed files
    /// fall back to the defaults.
    pub fn component_library(&self, base: &Path) -> ComponentLibrary {
        match read_optional(base, self.component_library_path.as_deref()) {
            Some(source) => ComponentLibrary::from_json_or_default(&source),
            None => ComponentLibrary::default(),
        }
    }

    pub fn scenario_library(&self, base: &Path) -> ScenarioLibrary {
        match read_optional(base, self.scenario_library_path.as_deref()) {
            Some(source) => ScenarioLibrary::from_json_or_default(&source),
            None => ScenarioLibrary::default(),
        }
    }
}

fn read_optional(base: &Path, path: Option<&str>) -> Option<String> {
    let path = resolve_path(base, path?);
    match std::fs::read_to_string(&path) {
        Ok(source) => Some(source),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Cannot read library file, using defaults");
            None
        }
    }
}

fn resolve_path(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
            max_undo_levels: default_max_undo_levels(),
            default_scenario: None,
            component_library_path: None,
            scenario_library_path: None,
            auto_escalate: default_auto_escalate(),
        }
    }
}
