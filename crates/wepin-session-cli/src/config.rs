/*
[INPUT]:  YAML configuration file
[OUTPUT]: Session and sandbox settings for the CLI
[POS]:    CLI configuration
[UPDATE]: When adding new configuration sections
*/

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use wepin_session::{SandboxConfig, SessionConfig};

/// Top-level CLI configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    pub session: SessionConfig,
    #[serde(default)]
    pub sandbox: SandboxConfig,
}

impl CliConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.session.validate()?;
        Ok(config)
    }

    /// `<config_dir>/wepin-session/session.yaml`
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;
        Ok(dir.join("wepin-session").join("session.yaml"))
    }
}
