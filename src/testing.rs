//! In-memory collaborators for workflow and server tests.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::{AppConfig, DEFAULT_MAX_DIFF_LINES};
use crate::context::AppContext;
use crate::domain::template::{TemplateEntry, template_file_name};
use crate::error::{AppError, AppResult};
use crate::services::{TemplateSource, VersionControlService};

pub struct FakeVersionControl {
    paths: Result<Vec<String>, String>,
    diff: Result<String, String>,
}

impl FakeVersionControl {
    pub fn staged(paths: &[&str], diff: &str) -> Self {
        Self {
            paths: Ok(paths.iter().map(|p| p.to_string()).collect()),
            diff: Ok(diff.to_string()),
        }
    }

    pub fn failing(detail: &str) -> Self {
        Self {
            paths: Err(detail.to_string()),
            diff: Err(detail.to_string()),
        }
    }

    pub fn diff_failing(paths: &[&str], detail: &str) -> Self {
        Self {
            paths: Ok(paths.iter().map(|p| p.to_string()).collect()),
            diff: Err(detail.to_string()),
        }
    }
}

#[async_trait]
impl VersionControlService for FakeVersionControl {
    async fn staged_changed_paths(&self) -> AppResult<Vec<String>> {
        self.paths.clone().map_err(AppError::VersionControl)
    }

    async fn staged_diff(&self) -> AppResult<String> {
        self.diff.clone().map_err(AppError::VersionControl)
    }
}

/// `None` entries behave like a missing template directory.
pub struct MemoryTemplateSource {
    entries: Option<Vec<TemplateEntry>>,
}

impl MemoryTemplateSource {
    pub fn new(entries: Vec<TemplateEntry>) -> Self {
        Self {
            entries: Some(entries),
        }
    }

    pub fn with_templates(templates: &[(&str, &str)]) -> Self {
        Self::new(
            templates
                .iter()
                .map(|(name, content)| TemplateEntry::loaded(*name, *content))
                .collect(),
        )
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn unavailable() -> Self {
        Self { entries: None }
    }
}

#[async_trait]
impl TemplateSource for MemoryTemplateSource {
    async fn enumerate(&self) -> AppResult<Vec<TemplateEntry>> {
        self.entries.clone().ok_or_else(|| {
            AppError::SourceUnavailable("Directory 'pr_templates' does not exist.".to_string())
        })
    }

    async fn read(&self, name: &str) -> AppResult<Option<String>> {
        let Some(file_name) = template_file_name(name) else {
            return Ok(None);
        };
        let Some(entries) = &self.entries else {
            return Ok(None);
        };
        match entries.iter().find(|entry| entry.name == file_name) {
            Some(entry) => entry
                .body
                .clone()
                .map(Some)
                .map_err(|err| AppError::Io(std::io::Error::other(err))),
            None => Ok(None),
        }
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        workspace_root: PathBuf::from("/work/repo"),
        template_dir: PathBuf::from("/work/repo/pr_templates"),
        max_diff_lines: NonZeroUsize::new(DEFAULT_MAX_DIFF_LINES).unwrap(),
        git_timeout: Duration::from_secs(10),
    }
}

pub fn test_context(vcs: FakeVersionControl, templates: MemoryTemplateSource) -> AppContext {
    AppContext::new(test_config(), Arc::new(vcs), Arc::new(templates))
}
