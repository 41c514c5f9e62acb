use async_trait::async_trait;

use crate::domain::template::TemplateEntry;
use crate::error::AppResult;

#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Every readable document at the source, in the order the source yields
    /// them. Fails with `SourceUnavailable` when the source cannot be listed.
    async fn enumerate(&self) -> AppResult<Vec<TemplateEntry>>;

    /// Body of the template stored under `name`, or `Ok(None)` when it does
    /// not exist.
    async fn read(&self, name: &str) -> AppResult<Option<String>>;
}
