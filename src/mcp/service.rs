use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService,
    session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::twapi::Engine;

use super::server::TeamworkMcp;

/// Builds the streamable-HTTP MCP service. Each MCP session gets its own
/// handler sharing the one [`Engine`]; the token shuts down SSE streams on
/// server exit.
pub fn create_mcp_service(
    engine: impl Into<Arc<Engine>>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<TeamworkMcp, LocalSessionManager> {
    let engine = engine.into();

    // One handler per MCP session; rmcp expects an io::Error factory.
    let service_factory =
        move || -> Result<TeamworkMcp, std::io::Error> { Ok(TeamworkMcp::new(Arc::clone(&engine))) };

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default()
            .with_sse_keep_alive(None)
            .with_sse_retry(None)
            .with_stateful_mode(true)
            .with_cancellation_token(cancellation_token),
    )
}
