use std::path::{Path, PathBuf};

use anyhow::bail;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::collections::{BTreeMap, HashSet};

pub fn config_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(".config")
        .join("rift-tile")
        .join("config.toml")
}

/// A reason a configuration is refused at startup.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("workspaces.names must declare at least one workspace")]
    NoWorkspaces,
    #[error("workspace name {0:?} must be a single printable character")]
    InvalidWorkspaceName(String),
    #[error("workspace name {0:?} is declared more than once")]
    DuplicateWorkspace(String),
    #[error("app {bundle_id:?} is mapped to undeclared workspace {workspace:?}")]
    UnknownAppWorkspace { bundle_id: String, workspace: String },
    #[error("margin must be a non-negative number, got {0}")]
    InvalidMargin(f64),
    #[error("enlarge_ratio must be in (0, 1], got {0}")]
    InvalidEnlargeRatio(f64),
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub workspaces: WorkspaceSettings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Gap in pixels between tiles and around the screen edge.
    #[serde(default = "default_margin")]
    pub margin: f64,
    /// Share of the usable width given to an enlarged window.
    #[serde(default = "default_enlarge_ratio")]
    pub enlarge_ratio: f64,
    #[serde(default)]
    pub hide_corner: HideCorner,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            margin: default_margin(),
            enlarge_ratio: default_enlarge_ratio(),
            hide_corner: HideCorner::default(),
        }
    }
}

impl Settings {
    pub fn errors(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !self.margin.is_finite() || self.margin < 0.0 {
            errors.push(ConfigError::InvalidMargin(self.margin));
        }
        if !(self.enlarge_ratio > 0.0 && self.enlarge_ratio <= 1.0) {
            errors.push(ConfigError::InvalidEnlargeRatio(self.enlarge_ratio));
        }
        errors
    }

    pub fn validate(&self) -> Vec<String> {
        self.errors().iter().map(ToString::to_string).collect()
    }
}

/// Screen corner that hidden windows are pushed past.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum HideCorner {
    BottomLeft,
    #[default]
    BottomRight,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceSettings {
    /// Declared workspace names, in order. The first one is active at startup.
    #[serde(default = "default_workspace_names")]
    pub names: Vec<String>,
    /// Windows with one of these exact titles float.
    #[serde(default)]
    pub float_titles: Vec<String>,
    /// Windows owned by one of these bundle identifiers float.
    #[serde(default)]
    pub float_bundle_ids: Vec<String>,
    /// Bundle identifier -> workspace its new windows are placed on.
    #[serde(default)]
    pub apps: BTreeMap<String, String>,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            names: default_workspace_names(),
            float_titles: Vec::new(),
            float_bundle_ids: Vec::new(),
            apps: BTreeMap::new(),
        }
    }
}

impl WorkspaceSettings {
    pub fn errors(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.names.is_empty() {
            errors.push(ConfigError::NoWorkspaces);
        }

        let mut seen = HashSet::default();
        for name in &self.names {
            if !is_valid_workspace_name(name) {
                errors.push(ConfigError::InvalidWorkspaceName(name.clone()));
            }
            if !seen.insert(name.as_str()) {
                errors.push(ConfigError::DuplicateWorkspace(name.clone()));
            }
        }

        for (bundle_id, workspace) in &self.apps {
            if !seen.contains(workspace.as_str()) {
                errors.push(ConfigError::UnknownAppWorkspace {
                    bundle_id: bundle_id.clone(),
                    workspace: workspace.clone(),
                });
            }
        }

        errors
    }

    pub fn validate(&self) -> Vec<String> {
        self.errors().iter().map(ToString::to_string).collect()
    }
}

fn is_valid_workspace_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if !c.is_control() && !c.is_whitespace())
}

fn default_margin() -> f64 { 5.0 }
fn default_enlarge_ratio() -> f64 { 0.9 }

fn default_workspace_names() -> Vec<String> {
    ["1", "2", "3", "4"].iter().map(|s| s.to_string()).collect()
}

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)?;
        Self::parse(&buf)
    }

    /// Reads `path`, or falls back to the defaults when it does not exist.
    pub fn read_or_default(path: &Path) -> anyhow::Result<Config> {
        if path.exists() {
            Self::read(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Like [`Config::read_or_default`], but refuses any configuration that
    /// fails validation.
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let config = Self::read_or_default(path)?;
        let issues = config.validate();
        if !issues.is_empty() {
            bail!("Invalid configuration {}:\n  {}", path.display(), issues.join("\n  "));
        }
        Ok(config)
    }

    /// Save the current config to a file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, toml_string.as_bytes())?;
        Ok(())
    }

    /// Validates the entire configuration and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        issues.extend(self.settings.validate());
        issues.extend(self.workspaces.validate());
        issues
    }

    pub(crate) fn parse(buf: &str) -> anyhow::Result<Config> {
        match toml::from_str::<Config>(buf) {
            Ok(config) => Ok(config),
            Err(e) => bail!("{e}"),
        }
    }
}
