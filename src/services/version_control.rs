use async_trait::async_trait;

use crate::error::AppResult;

/// Read-only view of the staged changes in a working tree.
#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Repository-relative paths with staged modifications, in tool order.
    async fn staged_changed_paths(&self) -> AppResult<Vec<String>>;
    /// Full unified diff of the staged changes.
    async fn staged_diff(&self) -> AppResult<String>;
}
