//! Newline-delimited JSON transport
//!
//! Each incoming line is handled on its own task so a slow upstream call does
//! not hold up other requests. Responses go through a channel to a single
//! writer task, which keeps output lines whole.

use crate::error::{Error, Result};
use crate::mcp::server::McpServer;
use crate::mcp::types::{JsonRpcError, JsonRpcResponse};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Serve MCP over the process's stdin and stdout
pub async fn serve_stdio(server: Arc<McpServer>) -> Result<()> {
    serve(server, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Serve MCP over an arbitrary reader/writer pair until the reader hits EOF
///
/// Lines that are not valid UTF-8 or not valid JSON get a parse error and the
/// loop carries on. In-flight requests are allowed to finish before returning,
/// including after a read error.
pub async fn serve<R, W>(server: Arc<McpServer>, reader: R, writer: W) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel::<JsonRpcResponse>();
    let writer_task = tokio::spawn(write_responses(rx, writer));

    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut handlers = JoinSet::new();

    info!("MCP server listening");

    let read_result = loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break Ok(()),
            Ok(_) => {}
            Err(e) => break Err(e),
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim().to_string(),
            Err(e) => {
                warn!(error = %e, "Received a line that is not valid UTF-8");
                let _ = tx.send(JsonRpcResponse::error(
                    None,
                    JsonRpcError::parse_error(format!("Parse error: {}", e)),
                ));
                continue;
            }
        };

        if line.is_empty() {
            continue;
        }

        let server = Arc::clone(&server);
        let tx = tx.clone();
        handlers.spawn(async move {
            if let Some(response) = server.handle_message(&line).await {
                // The writer only goes away after every sender is dropped.
                let _ = tx.send(response);
            }
        });

        // Reap finished handlers so the set does not grow unbounded.
        while let Some(joined) = handlers.try_join_next() {
            if let Err(e) = joined {
                error!(error = %e, "Request handler panicked");
            }
        }
    };

    match &read_result {
        Ok(()) => debug!("Input closed, waiting for in-flight requests"),
        Err(e) => error!(error = %e, "Failed to read input, waiting for in-flight requests"),
    }

    while let Some(joined) = handlers.join_next().await {
        if let Err(e) = joined {
            error!(error = %e, "Request handler panicked");
        }
    }

    drop(tx);
    writer_task
        .await
        .map_err(|e| Error::Generic(format!("writer task failed: {}", e)))??;

    read_result?;

    info!("MCP server stopped");
    Ok(())
}

async fn write_responses<W>(
    mut rx: mpsc::UnboundedReceiver<JsonRpcResponse>,
    mut writer: W,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_string(&response)?;
        line.push('\n');
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use crate::mcp::types::RequestId;
    use crate::pixabay::PixabayClient;
    use crate::tools::ToolRegistry;
    use serde_json::Value;
    use tokio::io::{duplex, AsyncReadExt};

    fn keyless_server() -> Arc<McpServer> {
        let client = Arc::new(PixabayClient::new(GatewayConfig::default()).unwrap());
        Arc::new(McpServer::new(ToolRegistry::default().create_executor(client)))
    }

    async fn run(input: &str) -> Vec<JsonRpcResponse> {
        let (mut output_reader, output_writer) = duplex(64 * 1024);

        serve(keyless_server(), input.as_bytes(), output_writer)
            .await
            .unwrap();

        let mut output = String::new();
        output_reader.read_to_string(&mut output).await.unwrap();

        output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_session_over_stream() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05"}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"delete_image"}}"#,
            "\n",
        );

        let mut responses = run(input).await;
        responses.sort_by_key(|r| match &r.id {
            Some(RequestId::Number(n)) => *n,
            _ => -1,
        });

        // The notification and the blank line produce nothing.
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0].id, Some(RequestId::Number(1)));

        let tools = &responses[1].result.as_ref().unwrap()["tools"];
        assert_eq!(tools.as_array().unwrap().len(), 4);

        let call = responses[2].result.as_ref().unwrap();
        assert_eq!(call["isError"], Value::Bool(true));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_stop_the_server() {
        let mut input = Vec::new();
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#);
        input.push(b'\n');
        input.extend_from_slice(
            b"{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/call\",\"params\":{\"name\":\"caf\xe9\"}}\n",
        );
        input.extend_from_slice(br#"{"jsonrpc":"2.0","id":3,"method":"tools/list"}"#);
        input.push(b'\n');

        let (mut output_reader, output_writer) = duplex(64 * 1024);
        serve(keyless_server(), &input[..], output_writer)
            .await
            .unwrap();

        let mut output = String::new();
        output_reader.read_to_string(&mut output).await.unwrap();
        let responses: Vec<JsonRpcResponse> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(responses.len(), 3);

        let parse_error = responses.iter().find(|r| r.id.is_none()).unwrap();
        assert_eq!(
            parse_error.error.as_ref().unwrap().code,
            crate::mcp::types::error_codes::PARSE_ERROR
        );

        let ids: Vec<_> = responses.iter().filter_map(|r| r.id.clone()).collect();
        assert!(ids.contains(&RequestId::Number(1)));
        assert!(ids.contains(&RequestId::Number(3)));
    }

    #[tokio::test]
    async fn test_garbage_line_gets_parse_error() {
        let responses = run("this is not json\n").await;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].id, None);
        assert!(responses[0].error.is_some());
    }
}
