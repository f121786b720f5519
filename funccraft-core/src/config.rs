//! Configuration file support for funccraft
//!
//! Loads project-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.funccraftrc.json` in project root
//! 3. `funccraft.config.json` in project root
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::pipeline::PrepareOptions;
use crate::prompt::Task;
use crate::validate::ValidationOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names probed in the project root, in priority order
const CONFIG_FILE_NAMES: &[&str] = &[".funccraftrc.json", "funccraft.config.json"];

/// funccraft configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunccraftConfig {
    /// Keep only the first N corpus rows (default: all rows)
    #[serde(default)]
    pub limit: Option<usize>,

    /// Worker threads for extraction (default: one per core)
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Validator reporting settings
    #[serde(default)]
    pub validation: Option<ValidationConfig>,

    /// Body variant used for model inputs: 1 = no comments, 2 = with comments
    #[serde(default)]
    pub task: Option<u8>,
}

/// Validator reporting settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Rows reported in detail (default: 10)
    pub samples: Option<usize>,
    /// Characters per preview before truncation (default: 200)
    pub preview_chars: Option<usize>,
}

/// Resolved configuration with defaults applied
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub limit: Option<usize>,
    pub jobs: Option<usize>,
    pub validation: ValidationOptions,
    pub task: Task,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl FunccraftConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if self.limit == Some(0) {
            anyhow::bail!("limit must be positive (got 0)");
        }
        if self.jobs == Some(0) {
            anyhow::bail!("jobs must be positive (got 0)");
        }

        if let Some(ref v) = self.validation {
            if v.preview_chars == Some(0) {
                anyhow::bail!("validation.preview_chars must be positive (got 0)");
            }
        }

        if let Some(task) = self.task {
            if Task::from_id(task).is_none() {
                anyhow::bail!("task must be 1 or 2 (got {})", task);
            }
        }

        Ok(())
    }

    /// Resolve config into the form the pipeline consumes
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let defaults = ValidationOptions::default();
        let validation = match &self.validation {
            Some(v) => ValidationOptions {
                samples: v.samples.unwrap_or(defaults.samples),
                preview_chars: v.preview_chars.unwrap_or(defaults.preview_chars),
            },
            None => defaults,
        };

        let task = self
            .task
            .and_then(Task::from_id)
            .unwrap_or(Task::BodyNoComments);

        Ok(ResolvedConfig {
            limit: self.limit,
            jobs: self.jobs,
            validation,
            task,
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        FunccraftConfig::default().resolve()
    }

    pub fn prepare_options(&self) -> PrepareOptions {
        PrepareOptions { limit: self.limit }
    }
}

/// Discover and load a config file from the project root
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(project_root: &Path) -> Result<Option<(FunccraftConfig, PathBuf)>> {
    for name in CONFIG_FILE_NAMES {
        let path = project_root.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }
    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<FunccraftConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: FunccraftConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config for a project
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config from the project root.
/// Returns default config if nothing is found.
pub fn load_and_resolve(project_root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(project_root)? {
            Some((config, path)) => (config, Some(path)),
            None => (FunccraftConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}
