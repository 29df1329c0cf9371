//! Server configuration from environment variables.

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port the server binds to.
    pub port: u16,
    /// External base URL baked into the QR codes. Defaults to localhost so
    /// local development produces scannable codes out of the box.
    pub base_url: String,
}

impl ServerConfig {
    /// Load config from `PORT` and `PUBLIC_BASE_URL`.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let base_url = std::env::var("PUBLIC_BASE_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                tracing::warn!(
                    "PUBLIC_BASE_URL not set, QR codes will point at localhost:{}",
                    port
                );
                format!("http://localhost:{}", port)
            });

        Self { port, base_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults_without_env() {
        std::env::remove_var("PORT");
        std::env::remove_var("PUBLIC_BASE_URL");

        let config = ServerConfig::from_env();
        assert_eq!(config.port, 3000);
        assert_eq!(config.base_url, "http://localhost:3000");
    }

    #[test]
    #[serial]
    fn test_reads_port_and_base_url() {
        std::env::set_var("PORT", "8080");
        std::env::set_var("PUBLIC_BASE_URL", "https://hunt.example.org/");

        let config = ServerConfig::from_env();
        assert_eq!(config.port, 8080);
        // Trailing slash is stripped so URL joins stay clean.
        assert_eq!(config.base_url, "https://hunt.example.org");

        std::env::remove_var("PORT");
        std::env::remove_var("PUBLIC_BASE_URL");
    }

    #[test]
    #[serial]
    fn test_unparsable_port_falls_back() {
        std::env::set_var("PORT", "not-a-port");
        std::env::remove_var("PUBLIC_BASE_URL");

        let config = ServerConfig::from_env();
        assert_eq!(config.port, 3000);

        std::env::remove_var("PORT");
    }
}
