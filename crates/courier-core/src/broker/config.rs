use serde::Deserialize;

/// Top-level broker configuration, deserializable from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub server: ServerConfig,
    pub engine: EngineConfig,
}

/// Server configuration: listen address, receive policy, HTTP/2 keepalive.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Queue used when a request does not name one.
    pub default_queue: String,
    /// Visibility timeout applied to every receive, in milliseconds. This is
    /// transport policy — the engine takes the timeout per call.
    pub visibility_timeout_ms: u64,
    /// HTTP/2 keepalive ping interval, in milliseconds.
    pub keepalive_interval_ms: u64,
    /// Time to wait for a keepalive ping ack before closing the connection,
    /// in milliseconds.
    pub keepalive_timeout_ms: u64,
}

/// Engine configuration (command channel capacity).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Bound on buffered commands. A full channel rejects new operations
    /// with a resource-exhausted error rather than queueing without limit.
    pub command_channel_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:50051".to_string(),
            default_queue: "default".to_string(),
            visibility_timeout_ms: 30_000,
            keepalive_interval_ms: 300_000,
            keepalive_timeout_ms: 20_000,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command_channel_capacity: 10_000,
        }
    }
}
