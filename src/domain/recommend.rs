use serde::Serialize;

use crate::domain::taxonomy::Taxonomy;
use crate::domain::template::Template;
use crate::error::{AppError, AppResult};

/// Number of leading content characters searched by [`MatchStrategy::Content`].
pub const CONTENT_WINDOW_CHARS: usize = 512;

pub const NO_TEMPLATE_REASON: &str = "No suitable template found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    Name,
    Content,
    Fallback,
}

/// Strategies in the order they are tried. The first hit wins.
pub const MATCH_ORDER: [MatchStrategy; 3] = [
    MatchStrategy::Name,
    MatchStrategy::Content,
    MatchStrategy::Fallback,
];

impl MatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrategy::Name => "name",
            MatchStrategy::Content => "content",
            MatchStrategy::Fallback => "fallback",
        }
    }

    /// First template in catalog order accepted by this strategy.
    pub fn find<'c>(&self, catalog: &'c [Template], terms: &[&str]) -> Option<&'c Template> {
        match self {
            MatchStrategy::Name => catalog
                .iter()
                .find(|template| contains_any(&template.name.to_lowercase(), terms)),
            MatchStrategy::Content => catalog.iter().find(|template| {
                let head: String = template.content.chars().take(CONTENT_WINDOW_CHARS).collect();
                contains_any(&head.to_lowercase(), terms)
            }),
            MatchStrategy::Fallback => catalog.first(),
        }
    }

    fn reason(&self, label: &str) -> String {
        match self {
            MatchStrategy::Name => format!("Template name matched change_type '{label}'."),
            MatchStrategy::Content => format!("Template content matched change_type '{label}'."),
            MatchStrategy::Fallback => format!(
                "No template matched change_type '{label}'; defaulting to the first available template."
            ),
        }
    }
}

fn contains_any(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| haystack.contains(term))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub selected: Option<Template>,
    pub matched_by: Option<MatchStrategy>,
    pub reason: String,
    pub available: Vec<String>,
}

/// Recommends a template using the built-in taxonomy.
pub fn recommend(catalog: &[Template], change_type: &str) -> AppResult<Recommendation> {
    recommend_with(Taxonomy::builtin(), catalog, change_type)
}

pub fn recommend_with(
    taxonomy: &Taxonomy,
    catalog: &[Template],
    change_type: &str,
) -> AppResult<Recommendation> {
    let label = change_type.trim();
    if label.is_empty() {
        return Err(AppError::Validation(
            "change_type must not be empty".to_string(),
        ));
    }

    let canonical = label.to_lowercase();
    let terms = taxonomy.search_terms(&canonical);
    let available = catalog.iter().map(|t| t.name.clone()).collect();

    let hit = MATCH_ORDER
        .iter()
        .find_map(|strategy| strategy.find(catalog, &terms).map(|t| (*strategy, t)));

    Ok(match hit {
        Some((strategy, template)) => Recommendation {
            selected: Some(template.clone()),
            matched_by: Some(strategy),
            reason: strategy.reason(label),
            available,
        },
        None => Recommendation {
            selected: None,
            matched_by: None,
            reason: NO_TEMPLATE_REASON.to_string(),
            available,
        },
    })
}
