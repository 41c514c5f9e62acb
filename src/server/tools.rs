use serde::Deserialize;
use serde_json::{Value, json};

use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::workflow::changes::{ChangeRequest, analyze_changes};
use crate::workflow::templates::{SuggestRequest, suggest_template};

pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    input_schema: fn() -> Value,
}

impl ToolDescriptor {
    pub fn definition(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": (self.input_schema)(),
        })
    }
}

pub const ANALYZE_FILE_CHANGES: &str = "analyze_file_changes";
pub const SUGGEST_TEMPLATE: &str = "suggest_template";

/// Tools published by the server, in listing order.
pub const TOOLS: &[ToolDescriptor] = &[
    ToolDescriptor {
        name: ANALYZE_FILE_CHANGES,
        description: "Get the full diff and list of changed files in the current git repository.",
        input_schema: analyze_schema,
    },
    ToolDescriptor {
        name: SUGGEST_TEMPLATE,
        description: "Analyze changes and suggest the most appropriate PR template based on change type.",
        input_schema: suggest_schema,
    },
];

fn analyze_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "include_diff": {
                "type": "boolean",
                "description": "Include the full diff content (default: true)",
                "default": true
            },
            "max_diff_lines": {
                "type": "integer",
                "description": "Maximum number of diff lines to include (default: 1000)",
                "minimum": 1
            }
        }
    })
}

fn suggest_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "changes_summary": {
                "type": "string",
                "description": "Your analysis of what the changes do"
            },
            "change_type": {
                "type": "string",
                "description": "The type of change you've identified (bug, feature, docs, refactor, test, etc.)"
            }
        },
        "required": ["change_type"]
    })
}

pub fn find_tool(name: &str) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().find(|tool| tool.name == name)
}

pub fn tool_definitions() -> Vec<Value> {
    TOOLS.iter().map(ToolDescriptor::definition).collect()
}

fn default_include_diff() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct AnalyzeArgs {
    #[serde(default = "default_include_diff")]
    include_diff: bool,
    #[serde(default)]
    max_diff_lines: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct SuggestArgs {
    #[serde(default)]
    changes_summary: Option<String>,
    change_type: String,
}

fn parse_args<T: for<'de> Deserialize<'de>>(tool: &str, args: Value) -> AppResult<T> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args)
        .map_err(|err| AppError::Protocol(format!("invalid arguments for {tool}: {err}")))
}

/// Runs a tool and returns its result record. Errors are reserved for
/// unknown tools and malformed arguments; tool failures are in the record.
pub async fn call_tool(ctx: &AppContext, name: &str, args: Value) -> AppResult<Value> {
    match name {
        ANALYZE_FILE_CHANGES => {
            let args: AnalyzeArgs = parse_args(name, args)?;
            let report = analyze_changes(
                ctx,
                ChangeRequest {
                    skip_diff: !args.include_diff,
                    max_diff_lines: args.max_diff_lines,
                },
            )
            .await;
            Ok(serde_json::to_value(report)?)
        }
        SUGGEST_TEMPLATE => {
            let args: SuggestArgs = parse_args(name, args)?;
            let suggestion = suggest_template(
                ctx,
                SuggestRequest {
                    changes_summary: args.changes_summary,
                    change_type: args.change_type,
                },
            )
            .await;
            Ok(serde_json::to_value(suggestion)?)
        }
        other => Err(AppError::Protocol(format!("Unknown tool: {other}"))),
    }
}
