use crate::config::constants::defaults;
use serde::{Deserialize, Serialize};

/// HTTP surface settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    defaults::SERVER_HOST.to_string()
}

fn default_port() -> u16 {
    defaults::SERVER_PORT
}
