//! Configuration handling for the wizard

use crate::state::Revalidation;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Where finished forms go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    #[default]
    File,
    Log,
}

/// User configuration for the wizard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WizardConfig {
    /// Built-in form to open
    pub form: Option<String>,
    /// Which steps the submit gate rechecks
    pub revalidation: Option<Revalidation>,
    /// Submit sink
    pub sink: Option<SinkKind>,
    /// Directory for the file sink
    pub submissions_dir: Option<PathBuf>,
}

impl WizardConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "stepform", "stepform")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for log files and default submissions
    pub fn data_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                config = serde_json::from_str(&content)?;
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply `STEPFORM_FORM` / `STEPFORM_REVALIDATION` overrides
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(form) = var("STEPFORM_FORM") {
            self.form = Some(form);
        }
        if let Some(raw) = var("STEPFORM_REVALIDATION") {
            match raw.parse() {
                Ok(policy) => self.revalidation = Some(policy),
                Err(e) => tracing::warn!("ignoring STEPFORM_REVALIDATION: {e}"),
            }
        }
    }

    pub fn form_name(&self) -> &str {
        self.form.as_deref().unwrap_or("checkout")
    }

    pub fn revalidation(&self) -> Revalidation {
        self.revalidation.unwrap_or_default()
    }

    pub fn sink_kind(&self) -> SinkKind {
        self.sink.unwrap_or_default()
    }

    /// Configured submissions directory, or `<data dir>/submissions`
    pub fn submissions_dir(&self) -> PathBuf {
        self.submissions_dir.clone().unwrap_or_else(|| {
            Self::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("submissions")
        })
    }
}
