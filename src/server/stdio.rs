use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use super::McpServer;
use super::jsonrpc::{INVALID_REQUEST, JsonRpcRequest, PARSE_ERROR, json_rpc_error};
use crate::error::AppResult;

/// Serves newline-delimited JSON-RPC until the reader reaches EOF.
pub async fn serve<R, W>(server: &mut McpServer, reader: R, mut writer: W) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }
        if let Some(response) = handle_line(server, raw).await {
            let mut encoded = serde_json::to_vec(&response)?;
            encoded.push(b'\n');
            writer.write_all(&encoded).await?;
            writer.flush().await?;
        }
    }
    debug!("input closed");
    Ok(())
}

pub async fn run_stdio(server: &mut McpServer) -> AppResult<()> {
    info!("serving tools on stdio");
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    serve(server, stdin, tokio::io::stdout()).await
}

async fn handle_line(server: &mut McpServer, raw: &str) -> Option<Value> {
    let data: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            return Some(json_rpc_error(
                None,
                PARSE_ERROR,
                &format!("Parse error: {err}"),
            ));
        }
    };

    let Some(obj) = data.as_object() else {
        return Some(json_rpc_error(None, INVALID_REQUEST, "Invalid Request"));
    };
    let id = obj.get("id").cloned();
    if !obj.contains_key("method") {
        return Some(json_rpc_error(id, INVALID_REQUEST, "Invalid Request"));
    }

    let request: JsonRpcRequest = match serde_json::from_value(data) {
        Ok(request) => request,
        Err(err) => {
            return Some(json_rpc_error(
                id,
                INVALID_REQUEST,
                &format!("Invalid Request: {err}"),
            ));
        }
    };

    server.handle(request).await
}
