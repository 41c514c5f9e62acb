use serde_json::{Value, json};

use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::workflow::templates::{fetch_template, list_templates};

pub const CATALOG_URI: &str = "templates://documents";
const TEMPLATE_URI_PREFIX: &str = "templates://documents/";

pub fn resource_definitions() -> Vec<Value> {
    vec![json!({
        "uri": CATALOG_URI,
        "name": "pr_templates",
        "description": "List available PR templates in the repository.",
        "mimeType": "application/json"
    })]
}

pub fn resource_template_definitions() -> Vec<Value> {
    vec![json!({
        "uriTemplate": "templates://documents/{template_name}",
        "name": "pr_template",
        "description": "Fetch a specific PR template by name (e.g. 'bugfix', 'feature', without extension).",
        "mimeType": "text/markdown"
    })]
}

/// Reads a resource into MCP `contents`. Missing templates are reported inside
/// the content, not as a protocol error.
pub async fn read_resource(ctx: &AppContext, uri: &str) -> AppResult<Value> {
    let (mime_type, text) = if uri == CATALOG_URI {
        let listing = list_templates(ctx).await;
        ("application/json", serde_json::to_string(&listing)?)
    } else if let Some(name) = uri.strip_prefix(TEMPLATE_URI_PREFIX) {
        ("text/markdown", fetch_template(ctx, name).await.render())
    } else {
        return Err(AppError::Protocol(format!("Unknown resource: {uri}")));
    };

    Ok(json!({
        "contents": [{ "uri": uri, "mimeType": mime_type, "text": text }]
    }))
}
