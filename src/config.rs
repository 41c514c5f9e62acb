use std::env;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_TEMPLATE_DIR_NAME: &str = "pr_templates";
pub const DEFAULT_MAX_DIFF_LINES: usize = 1000;
pub const DEFAULT_GIT_TIMEOUT_SECS: u64 = 10;

const TEMPLATE_DIR_VAR: &str = "PR_AGENT_TEMPLATE_DIR";
const MAX_DIFF_LINES_VAR: &str = "PR_AGENT_MAX_DIFF_LINES";
const GIT_TIMEOUT_VAR: &str = "PR_AGENT_GIT_TIMEOUT_SECS";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub workspace_root: PathBuf,
    pub template_dir: PathBuf,
    pub max_diff_lines: NonZeroUsize,
    pub git_timeout: Duration,
}

/// Values supplied on the command line; they win over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub workspace_root: Option<PathBuf>,
    pub template_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn load(workspace_hint: &Path, overrides: ConfigOverrides) -> AppResult<Self> {
        Self::from_lookup(workspace_hint, overrides, |key| env::var(key).ok())
    }

    fn from_lookup(
        workspace_hint: &Path,
        overrides: ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> AppResult<Self> {
        let workspace_root = overrides
            .workspace_root
            .unwrap_or_else(|| workspace_hint.to_path_buf());

        let template_dir = overrides
            .template_dir
            .or_else(|| {
                lookup(TEMPLATE_DIR_VAR)
                    .filter(|value| !value.trim().is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| workspace_root.join(DEFAULT_TEMPLATE_DIR_NAME));

        let max_diff_lines = match lookup(MAX_DIFF_LINES_VAR) {
            Some(raw) => parse_positive(MAX_DIFF_LINES_VAR, &raw)?,
            None => DEFAULT_MAX_DIFF_LINES,
        };
        let max_diff_lines = NonZeroUsize::new(max_diff_lines).ok_or_else(|| {
            AppError::Configuration(format!("{MAX_DIFF_LINES_VAR} must be positive"))
        })?;

        let git_timeout_secs = match lookup(GIT_TIMEOUT_VAR) {
            Some(raw) => parse_positive(GIT_TIMEOUT_VAR, &raw)? as u64,
            None => DEFAULT_GIT_TIMEOUT_SECS,
        };

        Ok(Self {
            workspace_root,
            template_dir,
            max_diff_lines,
            git_timeout: Duration::from_secs(git_timeout_secs),
        })
    }
}

fn parse_positive(key: &str, raw: &str) -> AppResult<usize> {
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(AppError::Configuration(format!(
            "{key} must be a positive integer, got '{raw}'"
        ))),
        Ok(value) => Ok(value),
    }
}
