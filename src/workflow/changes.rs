use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::domain::change::{ChangeSet, summarize};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
pub struct ChangeRequest {
    /// Skip fetching the diff and report changed paths only.
    pub skip_diff: bool,
    /// Overrides the configured cap for this call.
    pub max_diff_lines: Option<i64>,
}

/// Summary result returned to callers. `error` is set when git failed, in
/// which case every other field keeps its empty default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ChangeReport {
    pub changed_files: Vec<String>,
    pub diff: String,
    pub diff_line_count: usize,
    pub truncated: bool,
    pub error: Option<String>,
}

impl ChangeReport {
    fn failed(error: &AppError) -> Self {
        Self {
            error: Some(error.detail()),
            ..Self::default()
        }
    }
}

impl From<ChangeSet> for ChangeReport {
    fn from(set: ChangeSet) -> Self {
        Self {
            changed_files: set.changed_paths,
            diff: set.diff_text,
            diff_line_count: set.line_count,
            truncated: set.truncated,
            error: None,
        }
    }
}

pub async fn analyze_changes(ctx: &AppContext, request: ChangeRequest) -> ChangeReport {
    match collect_changes(ctx, &request).await {
        Ok(set) => {
            debug!(
                files = set.changed_paths.len(),
                lines = set.line_count,
                truncated = set.truncated,
                "summarized staged changes"
            );
            set.into()
        }
        Err(err) => {
            warn!(error = %err, "failed to summarize staged changes");
            ChangeReport::failed(&err)
        }
    }
}

async fn collect_changes(ctx: &AppContext, request: &ChangeRequest) -> AppResult<ChangeSet> {
    let max_lines = match request.max_diff_lines {
        Some(value) => usize::try_from(value)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "max_diff_lines must be a positive integer, got {value}"
                ))
            })?,
        None => ctx.config.max_diff_lines,
    };

    let changed_paths = ctx.version_control.staged_changed_paths().await?;
    if request.skip_diff {
        return Ok(ChangeSet {
            changed_paths,
            ..ChangeSet::empty()
        });
    }

    let diff = ctx.version_control.staged_diff().await?;
    Ok(summarize(&diff, changed_paths, max_lines))
}
