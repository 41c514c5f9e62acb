use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::warn;

use crate::domain::template::{TemplateEntry, template_file_name};
use crate::error::{AppError, AppResult};
use crate::services::TemplateSource;

/// Templates stored as files in a single directory.
pub struct DirectoryTemplateSource {
    root: PathBuf,
}

impl DirectoryTemplateSource {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl TemplateSource for DirectoryTemplateSource {
    async fn enumerate(&self) -> AppResult<Vec<TemplateEntry>> {
        let unavailable = || {
            AppError::SourceUnavailable(format!(
                "Directory '{}' does not exist.",
                self.root.display()
            ))
        };

        match fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(unavailable()),
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(unavailable()),
            Err(err) => {
                return Err(AppError::SourceUnavailable(format!(
                    "cannot access '{}': {err}",
                    self.root.display()
                )));
            }
        }

        let mut dir = fs::read_dir(&self.root).await.map_err(|err| {
            AppError::SourceUnavailable(format!("cannot list '{}': {err}", self.root.display()))
        })?;

        let mut entries = Vec::new();
        while let Some(item) = dir.next_entry().await.map_err(|err| {
            AppError::SourceUnavailable(format!("cannot list '{}': {err}", self.root.display()))
        })? {
            let path = item.path();
            // Follows symlinks, so a link to a regular file counts as a document.
            match fs::metadata(&path).await {
                Ok(meta) if meta.is_file() => {}
                _ => continue,
            }

            let name = item.file_name().to_string_lossy().into_owned();
            match fs::read_to_string(&path).await {
                Ok(content) => entries.push(TemplateEntry::loaded(name, content)),
                Err(err) => {
                    warn!(template = %name, error = %err, "failed to read template");
                    entries.push(TemplateEntry::unreadable(name, err.to_string()));
                }
            }
        }

        Ok(entries)
    }

    async fn read(&self, name: &str) -> AppResult<Option<String>> {
        let Some(file_name) = template_file_name(name) else {
            return Ok(None);
        };
        let path = self.root.join(file_name);

        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(None),
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AppError::Io(err)),
        }

        Ok(Some(fs::read_to_string(&path).await?))
    }
}
