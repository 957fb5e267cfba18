use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dataset::DISPATCH_DIR;
use crate::error::DispatchError;
use crate::schedule::{Granularity, SourceToggles};

/// Per-data-root configuration, read from `.dispatch/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub data: DataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// View used when `--view` is not given: day, week, or month.
    #[serde(default = "default_view")]
    pub default_view: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            default_view: default_view(),
        }
    }
}

impl ScheduleConfig {
    /// Parse the configured default view, falling back to week on typos.
    #[must_use]
    pub fn default_granularity(&self) -> Granularity {
        self.default_view.parse().unwrap_or_else(|_| {
            tracing::warn!(
                value = %self.default_view,
                "unrecognized default_view in config, using week"
            );
            Granularity::Week
        })
    }
}

/// Which source collections are shown unless overridden on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_true")]
    pub projects: bool,
    #[serde(default = "default_true")]
    pub work_orders: bool,
    #[serde(default = "default_true")]
    pub recurring: bool,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            projects: true,
            work_orders: true,
            recurring: true,
        }
    }
}

impl SourcesConfig {
    #[must_use]
    pub const fn toggles(&self) -> SourceToggles {
        SourceToggles {
            projects: self.projects,
            work_orders: self.work_orders,
            recurring: self.recurring,
        }
    }
}

/// Collection file names under `.dispatch/`, overridable per data root for
/// exports that use different naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_projects_file")]
    pub projects_file: String,
    #[serde(default = "default_work_orders_file")]
    pub work_orders_file: String,
    #[serde(default = "default_recurring_file")]
    pub recurring_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            projects_file: default_projects_file(),
            work_orders_file: default_work_orders_file(),
            recurring_file: default_recurring_file(),
        }
    }
}

/// Per-user configuration, read from `<config_dir>/dispatch/config.toml`.
///
/// Consulted during output-mode resolution in the CLI, below explicit flags
/// and the `FORMAT` env var, above TTY detection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    /// Preferred output mode: pretty, text, or json.
    #[serde(default)]
    pub output: Option<String>,
}

/// Load `.dispatch/config.toml`, defaulting when absent.
///
/// # Errors
///
/// Returns [`DispatchError::ConfigParse`] when the file exists but is not
/// valid TOML for [`ProjectConfig`].
pub fn load_project_config(root: &Path) -> Result<ProjectConfig> {
    let path = root.join(DISPATCH_DIR).join("config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content).map_err(|source| {
        DispatchError::ConfigParse {
            path: path.clone(),
            source,
        }
        .into()
    })
}

/// Load the user-level config, defaulting when absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    load_user_config_from(&config_dir.join("dispatch/config.toml"))
}

fn load_user_config_from(path: &PathBuf) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

const fn default_true() -> bool {
    true
}

fn default_view() -> String {
    "week".to_string()
}

fn default_projects_file() -> String {
    crate::dataset::PROJECTS_FILE.to_string()
}

fn default_work_orders_file() -> String {
    crate::dataset::WORK_ORDERS_FILE.to_string()
}

fn default_recurring_file() -> String {
    crate::dataset::RECURRING_FILE.to_string()
}
