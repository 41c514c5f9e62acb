use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::domain::recommend::{MatchStrategy, NO_TEMPLATE_REASON, recommend};
use crate::domain::template::{Template, TemplateEntry, catalog_from_entries};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ListedTemplate {
    Loaded { filename: String, content: String },
    Unreadable { filename: String, error: String },
}

impl From<TemplateEntry> for ListedTemplate {
    fn from(entry: TemplateEntry) -> Self {
        match entry.body {
            Ok(content) => ListedTemplate::Loaded {
                filename: entry.name,
                content,
            },
            Err(error) => ListedTemplate::Unreadable {
                filename: entry.name,
                error,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CatalogListing {
    Templates { templates: Vec<ListedTemplate> },
    Unavailable { error: String },
}

pub async fn list_templates(ctx: &AppContext) -> CatalogListing {
    match ctx.templates.enumerate().await {
        Ok(entries) => CatalogListing::Templates {
            templates: entries.into_iter().map(ListedTemplate::from).collect(),
        },
        Err(err) => {
            warn!(error = %err, "failed to list templates");
            CatalogListing::Unavailable {
                error: err.detail(),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateFetch {
    Found(String),
    Missing { error: String },
}

impl TemplateFetch {
    /// Raw body when found, otherwise an `{"error": …}` document.
    pub fn render(&self) -> String {
        match self {
            TemplateFetch::Found(content) => content.clone(),
            TemplateFetch::Missing { error } => json!({ "error": error }).to_string(),
        }
    }
}

pub async fn fetch_template(ctx: &AppContext, name: &str) -> TemplateFetch {
    match ctx.templates.read(name).await {
        Ok(Some(content)) => TemplateFetch::Found(content),
        Ok(None) => TemplateFetch::Missing {
            error: AppError::NotFound(format!("Template '{name}'")).to_string(),
        },
        Err(err) => {
            warn!(template = %name, error = %err, "failed to read template");
            TemplateFetch::Missing {
                error: err.detail(),
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SuggestRequest {
    pub changes_summary: Option<String>,
    pub change_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Suggestion {
    Selected {
        selected_template: Template,
        reason: String,
        matched_by: MatchStrategy,
        available_templates: Vec<String>,
    },
    Failed {
        error: String,
        available_templates: Vec<String>,
    },
}

/// Loads a fresh catalog and recommends a template for `change_type`.
///
/// A missing template directory does not fail the call; the recommendation
/// runs against an empty catalog instead. Unreadable templates are never
/// selected but stay listed in `available_templates`.
pub async fn suggest_template(ctx: &AppContext, request: SuggestRequest) -> Suggestion {
    let entries = match ctx.templates.enumerate().await {
        Ok(entries) => entries,
        Err(err) => {
            warn!(error = %err, "template source unavailable, recommending from an empty catalog");
            Vec::new()
        }
    };
    let catalog = catalog_from_entries(&entries);
    let available_templates: Vec<String> = entries.into_iter().map(|entry| entry.name).collect();

    if let Some(summary) = request.changes_summary.as_deref() {
        debug!(summary_len = summary.len(), "suggest_template called with change summary");
    }

    match recommend(&catalog, &request.change_type) {
        Ok(rec) => match (rec.selected, rec.matched_by) {
            (Some(selected_template), Some(matched_by)) => {
                debug!(
                    template = %selected_template.name,
                    strategy = matched_by.as_str(),
                    "selected template"
                );
                Suggestion::Selected {
                    selected_template,
                    reason: rec.reason,
                    matched_by,
                    available_templates,
                }
            }
            _ => Suggestion::Failed {
                error: rec.reason,
                available_templates,
            },
        },
        Err(err) => Suggestion::Failed {
            error: err.detail(),
            available_templates,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::infra::templates::DirectoryTemplateSource;
    use crate::testing::{FakeVersionControl, MemoryTemplateSource, test_config, test_context};

    fn context(templates: MemoryTemplateSource) -> AppContext {
        test_context(FakeVersionControl::staged(&[], ""), templates)
    }

    #[tokio::test]
    async fn listing_reports_unreadable_items_in_place() {
        let ctx = context(MemoryTemplateSource::new(vec![
            TemplateEntry::loaded("bugfix.md", "## Bug"),
            TemplateEntry::unreadable("broken.md", "permission denied"),
        ]));

        let listing = list_templates(&ctx).await;
        assert_eq!(
            serde_json::to_value(&listing).unwrap(),
            json!({
                "templates": [
                    { "filename": "bugfix.md", "content": "## Bug" },
                    { "filename": "broken.md", "error": "permission denied" }
                ]
            })
        );
    }

    #[tokio::test]
    async fn listing_of_missing_source_is_top_level_error() {
        let ctx = context(MemoryTemplateSource::unavailable());

        let listing = list_templates(&ctx).await;
        assert_eq!(
            serde_json::to_value(&listing).unwrap(),
            json!({ "error": "Directory 'pr_templates' does not exist." })
        );
    }

    #[tokio::test]
    async fn fetch_returns_raw_body_or_error_document() {
        let ctx = context(MemoryTemplateSource::with_templates(&[(
            "feature.md",
            "## Feature",
        )]));

        assert_eq!(fetch_template(&ctx, "feature").await.render(), "## Feature");

        let missing = fetch_template(&ctx, "security").await;
        assert_eq!(
            missing,
            TemplateFetch::Missing {
                error: "Template 'security' not found".to_string()
            }
        );
        let rendered: serde_json::Value = serde_json::from_str(&missing.render()).unwrap();
        assert_eq!(rendered, json!({ "error": "Template 'security' not found" }));
    }

    #[tokio::test]
    async fn suggestion_selects_by_name() {
        let ctx = context(MemoryTemplateSource::with_templates(&[
            ("bugfix.md", "## Bug"),
            ("feature.md", "## Feature"),
        ]));

        let suggestion = suggest_template(
            &ctx,
            SuggestRequest {
                changes_summary: Some("Fixes a crash on startup".to_string()),
                change_type: "bug".to_string(),
            },
        )
        .await;
        assert_eq!(
            serde_json::to_value(&suggestion).unwrap(),
            json!({
                "selected_template": { "filename": "bugfix.md", "content": "## Bug" },
                "reason": "Template name matched change_type 'bug'.",
                "matched_by": "name",
                "available_templates": ["bugfix.md", "feature.md"]
            })
        );
    }

    #[tokio::test]
    async fn suggestion_skips_unreadable_templates_but_lists_them() {
        let ctx = context(MemoryTemplateSource::new(vec![
            TemplateEntry::unreadable("bugfix.md", "permission denied"),
            TemplateEntry::loaded("general.md", "Describe the change."),
        ]));

        let suggestion = suggest_template(
            &ctx,
            SuggestRequest {
                changes_summary: None,
                change_type: "bug".to_string(),
            },
        )
        .await;
        match suggestion {
            Suggestion::Selected {
                selected_template,
                matched_by,
                available_templates,
                ..
            } => {
                assert_eq!(selected_template.name, "general.md");
                assert_eq!(matched_by, MatchStrategy::Fallback);
                assert_eq!(available_templates, vec!["bugfix.md", "general.md"]);
            }
            other => panic!("expected a selection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_source_yields_no_suitable_template() {
        let ctx = context(MemoryTemplateSource::unavailable());

        let suggestion = suggest_template(
            &ctx,
            SuggestRequest {
                changes_summary: None,
                change_type: "feature".to_string(),
            },
        )
        .await;
        assert_eq!(
            suggestion,
            Suggestion::Failed {
                error: NO_TEMPLATE_REASON.to_string(),
                available_templates: Vec::new(),
            }
        );
    }

    #[tokio::test]
    async fn empty_change_type_is_reported_with_alternatives() {
        let ctx = context(MemoryTemplateSource::with_templates(&[("feature.md", "")]));

        let suggestion = suggest_template(&ctx, SuggestRequest::default()).await;
        assert_eq!(
            suggestion,
            Suggestion::Failed {
                error: "change_type must not be empty".to_string(),
                available_templates: vec!["feature.md".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn unreadable_only_catalog_still_lists_names() {
        let ctx = context(MemoryTemplateSource::new(vec![TemplateEntry::unreadable(
            "bugfix.md",
            "permission denied",
        )]));

        let suggestion = suggest_template(
            &ctx,
            SuggestRequest {
                changes_summary: None,
                change_type: "bug".to_string(),
            },
        )
        .await;
        assert_eq!(
            suggestion,
            Suggestion::Failed {
                error: NO_TEMPLATE_REASON.to_string(),
                available_templates: vec!["bugfix.md".to_string()],
            }
        );
    }

    #[tokio::test]
    async fn each_suggestion_sees_current_directory_contents() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("feature.md"), "## Feature").unwrap();
        let ctx = AppContext::new(
            test_config(),
            Arc::new(FakeVersionControl::staged(&[], "")),
            Arc::new(DirectoryTemplateSource::new(dir.path().to_path_buf())),
        );
        let request = SuggestRequest {
            changes_summary: None,
            change_type: "bug".to_string(),
        };

        let selected = |suggestion: Suggestion| match suggestion {
            Suggestion::Selected {
                selected_template, ..
            } => selected_template.name,
            other => panic!("expected a selection, got {other:?}"),
        };

        let first = selected(suggest_template(&ctx, request.clone()).await);
        assert_eq!(first, "feature.md");

        fs::write(dir.path().join("bugfix.md"), "## Bug").unwrap();
        let second = selected(suggest_template(&ctx, request).await);
        assert_eq!(second, "bugfix.md");
    }
}
