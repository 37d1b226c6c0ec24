/// Server configuration.
///
/// The host listens on `127.0.0.1:8080` unless `FRUIT_GUNCH_HOST` or
/// `FRUIT_GUNCH_PORT` say otherwise.
use log::warn;

/// Default interface to bind the HTTP server to.
pub const BIND_HOST: &str = "127.0.0.1";

/// Default TCP port for the HTTP server.
pub const BIND_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: BIND_HOST.to_string(),
            port: BIND_PORT,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("FRUIT_GUNCH_HOST") {
            if !host.trim().is_empty() {
                config.host = host.trim().to_string();
            }
        }
        if let Ok(raw) = std::env::var("FRUIT_GUNCH_PORT") {
            match raw.trim().parse::<u16>() {
                Ok(port) => config.port = port,
                Err(_) => warn!(
                    "[Config] Ignoring invalid FRUIT_GUNCH_PORT={raw:?}, using {}",
                    config.port
                ),
            }
        }
        config
    }
}
