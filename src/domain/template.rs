use std::path::{Component, Path};

use serde::Serialize;

pub const TEMPLATE_EXTENSION: &str = "md";

/// A loaded template document. `name` is the file name, extension included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    #[serde(rename = "filename")]
    pub name: String,
    pub content: String,
}

impl Template {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// One item enumerated from a template source. Items that could not be read
/// keep their place in the listing with the read error instead of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub name: String,
    pub body: Result<String, String>,
}

impl TemplateEntry {
    pub fn loaded(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: Ok(content.into()),
        }
    }

    pub fn unreadable(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: Err(error.into()),
        }
    }
}

/// Readable templates in discovery order. No sorting or deduplication.
pub fn catalog_from_entries(entries: &[TemplateEntry]) -> Vec<Template> {
    entries
        .iter()
        .filter_map(|entry| {
            entry
                .body
                .as_ref()
                .ok()
                .map(|content| Template::new(entry.name.clone(), content.clone()))
        })
        .collect()
}

/// File name a template is stored under, or `None` when `name` would leave
/// the template directory.
pub fn template_file_name(name: &str) -> Option<String> {
    let name = name.trim();
    // Both separators are rejected on every platform; `components` drops a trailing `/`.
    if name.is_empty() || name.contains(['/', '\\']) {
        return None;
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Some(format!("{name}.{TEMPLATE_EXTENSION}")),
        _ => None,
    }
}
