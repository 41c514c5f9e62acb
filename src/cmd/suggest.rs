use clap::Args;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::templates::{SuggestRequest, suggest_template};

#[derive(Args, Debug, Clone)]
pub struct SuggestArgs {
    /// Kind of change (bug, feature, docs, refactor, test, performance, security, ...).
    #[arg(short = 't', long)]
    pub change_type: String,
    /// Free-form description of what the changes do.
    #[arg(short, long)]
    pub summary: Option<String>,
}

pub async fn run(ctx: &AppContext, args: SuggestArgs) -> AppResult<()> {
    let suggestion = suggest_template(
        ctx,
        SuggestRequest {
            changes_summary: args.summary,
            change_type: args.change_type,
        },
    )
    .await;
    println!("{}", serde_json::to_string_pretty(&suggestion)?);
    Ok(())
}
