use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use crate::common::{DomainError, DomainResult};
use crate::domains::escape_planning::ports::ScenarioDataSource;

pub const SCENARIO_DIR_ENV: &str = "ESCAPE_SCENARIO_DIR";

/// Reads `<base>/<name>` scenario documents from disk.
pub struct FilesystemDataSource {
    base: PathBuf,
}

impl FilesystemDataSource {
    /// Base directory precedence: explicit argument -> ESCAPE_SCENARIO_DIR -> ./resources/scenarios
    /// -> /usr/share/prison-escape/scenarios
    pub fn new(base: Option<PathBuf>) -> Self {
        let base = base.unwrap_or_else(resolve_scenario_dir);
        Self { base }
    }

    /// Scenario names found in the base directory, sorted.
    pub fn list_scenarios(&self) -> DomainResult<Vec<String>> {
        let entries = fs::read_dir(&self.base).map_err(|e| DomainError::InfrastructureError(format!("{}", e)))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DomainError::InfrastructureError(format!("{}", e)))?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

impl ScenarioDataSource for FilesystemDataSource {
    fn load_scenario(&self, name: &str) -> DomainResult<String> {
        let path = self.base.join(name);
        fs::read_to_string(&path)
            .map_err(|e| DomainError::InfrastructureError(format!("{}: {}", path.display(), e)))
    }
}

fn resolve_scenario_dir() -> PathBuf {
    if let Ok(v) = env::var(SCENARIO_DIR_ENV) {
        return PathBuf::from(v);
    }
    let cwd_default = Path::new("resources/scenarios");
    if cwd_default.exists() {
        return cwd_default.to_path_buf();
    }
    PathBuf::from("/usr/share/prison-escape/scenarios")
}
