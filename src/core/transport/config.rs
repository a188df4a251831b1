//! Transport selection and listener settings.

use serde::{Deserialize, Serialize};

#[cfg(any(feature = "tcp", feature = "http"))]
use crate::core::config::{env_parse, env_string};

/// Which transport the process serves MCP over.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output, the usual MCP client setup.
    #[cfg(feature = "stdio")]
    Stdio,

    /// Line-delimited JSON-RPC over TCP sockets.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),

    /// JSON-RPC over HTTP POST, plus liveness endpoints.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// TCP listener settings.
#[cfg(feature = "tcp")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TcpConfig {
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

/// HTTP listener settings.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Path of the JSON-RPC endpoint.
    #[serde(default = "default_rpc_path")]
    pub rpc_path: String,

    /// Allow any origin, so browser-based agents can call the tools.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

#[cfg(any(feature = "tcp", feature = "http"))]
const DEFAULT_PORT: u16 = 3000;

#[cfg(any(feature = "tcp", feature = "http"))]
fn default_host() -> String {
    "0.0.0.0".to_string()
}

#[cfg(feature = "http")]
fn default_rpc_path() -> String {
    "/mcp".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            return Self::Stdio;
        }

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        {
            return Self::Tcp(TcpConfig::default());
        }

        #[cfg(all(not(feature = "stdio"), not(feature = "tcp"), feature = "http"))]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(not(any(feature = "stdio", feature = "tcp", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio, tcp, or http");
        }
    }
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: default_host(),
        }
    }
}

#[cfg(feature = "tcp")]
impl TcpConfig {
    fn from_env() -> Self {
        Self {
            port: env_parse("MCP_TCP_PORT").unwrap_or(DEFAULT_PORT),
            host: env_string("MCP_TCP_HOST").unwrap_or_else(default_host),
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            host: default_host(),
            rpc_path: default_rpc_path(),
            enable_cors: default_cors(),
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    /// `MCP_HTTP_*` variables win; plain `PORT` / `HOST` are honoured for
    /// container platforms that only inject those.
    fn from_env() -> Self {
        let port = env_parse("MCP_HTTP_PORT")
            .or_else(|| env_parse("PORT"))
            .unwrap_or(DEFAULT_PORT);
        let host = env_string("MCP_HTTP_HOST")
            .or_else(|| env_string("HOST"))
            .unwrap_or_else(default_host);
        let rpc_path = env_string("MCP_HTTP_PATH").unwrap_or_else(default_rpc_path);
        let enable_cors = env_string("MCP_HTTP_CORS")
            .map(|v| parse_flag(&v))
            .unwrap_or_else(default_cors);

        Self {
            port,
            host,
            rpc_path,
            enable_cors,
        }
    }
}

#[cfg(feature = "http")]
fn parse_flag(raw: &str) -> bool {
    !matches!(raw.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off")
}

impl TransportConfig {
    /// Select the transport from `MCP_TRANSPORT`, falling back to the default
    /// for unknown or disabled values.
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "tcp")]
            "tcp" => Self::Tcp(TcpConfig::from_env()),
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig::from_env()),
            _ => Self::default(),
        }
    }

    /// Short description for the startup log.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}:{}", cfg.host, cfg.port),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }
}
