use clap::{Args, Subcommand};

use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::templates::{fetch_template, list_templates};

#[derive(Args, Debug, Clone)]
pub struct TemplatesArgs {
    #[command(subcommand)]
    pub command: TemplatesCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TemplatesCommand {
    /// List every template with its content.
    List,
    /// Print a single template by name, without the extension.
    Show { name: String },
}

pub async fn run(ctx: &AppContext, command: TemplatesCommand) -> AppResult<()> {
    match command {
        TemplatesCommand::List => {
            let listing = list_templates(ctx).await;
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
        TemplatesCommand::Show { name } => {
            println!("{}", fetch_template(ctx, &name).await.render());
        }
    }
    Ok(())
}
