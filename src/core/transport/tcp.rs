//! TCP transport: one rmcp session per accepted connection, line-delimited
//! JSON-RPC.

use std::net::SocketAddr;
use std::time::Duration;

use rmcp::ServiceExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// Pause after a failed `accept` so a persistent error does not spin.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Accept connections forever; each client gets its own task sharing the
    /// same tool context.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (JSON-RPC over TCP)", addr);

        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    if let Err(e) = stream.set_nodelay(true) {
                        warn!("Failed to set TCP_NODELAY for {}: {}", peer, e);
                    }
                    tokio::spawn(serve_client(server.clone(), stream, peer));
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                }
            }
        }
    }
}

#[instrument(skip(server, stream))]
async fn serve_client(server: McpServer, stream: TcpStream, peer: SocketAddr) {
    let service = match server.serve(stream).await {
        Ok(service) => service,
        Err(e) => {
            warn!("MCP handshake with {} failed: {}", peer, e);
            return;
        }
    };

    info!("Client {} connected", peer);

    match service.waiting().await {
        Ok(_) => info!("Client {} disconnected", peer),
        Err(e) => warn!("Session with {} ended with error: {}", peer, e),
    }
}
