use crate::context::AppContext;
use crate::error::AppResult;
use crate::server::McpServer;
use crate::server::stdio::run_stdio;

pub async fn run(ctx: AppContext) -> AppResult<()> {
    let mut server = McpServer::new(ctx);
    run_stdio(&mut server).await
}
