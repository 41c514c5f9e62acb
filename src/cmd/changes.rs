use clap::Args;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::changes::{ChangeRequest, analyze_changes};

#[derive(Args, Debug, Clone)]
pub struct ChangesArgs {
    /// Only list changed files; skip the diff.
    #[arg(long)]
    pub no_diff: bool,
    /// Maximum number of diff lines to include.
    #[arg(long, allow_negative_numbers = true)]
    pub max_diff_lines: Option<i64>,
}

pub async fn run(ctx: &AppContext, args: ChangesArgs) -> AppResult<()> {
    let report = analyze_changes(
        ctx,
        ChangeRequest {
            skip_diff: args.no_diff,
            max_diff_lines: args.max_diff_lines,
        },
    )
    .await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
