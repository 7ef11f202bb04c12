use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use common::config::Validate;

pub const DEFAULT_CONFIG_PATH: &str = "bingo_server.yaml";
pub const MAX_RESET_DELAY_SECS: u64 = 3600;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// How long a finished game stays on screen before the room resets.
    pub reset_delay_secs: u64,
    pub client_channel_capacity: usize,
    pub static_files_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3001".to_string(),
            reset_delay_secs: 20,
            client_channel_capacity: 128,
            static_files_path: None,
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        self.socket_addr()?;
        if self.reset_delay_secs > MAX_RESET_DELAY_SECS {
            return Err(format!(
                "reset_delay_secs must be at most {}, got {}",
                MAX_RESET_DELAY_SECS, self.reset_delay_secs
            ));
        }
        if self.client_channel_capacity == 0 {
            return Err("client_channel_capacity must be positive".to_string());
        }
        Ok(())
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        self.listen_addr
            .parse()
            .map_err(|e| format!("Invalid listen_addr '{}': {}", self.listen_addr, e))
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_secs(self.reset_delay_secs)
    }

    pub fn with_port(mut self, port: u16) -> Result<Self, String> {
        let mut addr = self.socket_addr()?;
        addr.set_port(port);
        self.listen_addr = addr.to_string();
        Ok(self)
    }
}
