/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Minimum seconds between repeat alerts for one (tag, condition)
    /// pair (default: `600`).
    pub alert_cooldown_secs: i64,
    /// Base URL of the push-notification collaborator.
    pub push_gateway_url: String,
    /// Timeout for a single push-notification attempt (default: `10`).
    pub push_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                       |
    /// |-----------------------|-------------------------------|
    /// | `HOST`                | `0.0.0.0`                     |
    /// | `PORT`                | `3000`                        |
    /// | `CORS_ORIGINS`        | `http://localhost:5173`       |
    /// | `REQUEST_TIMEOUT_SECS`| `30`                          |
    /// | `ALERT_COOLDOWN_SECS` | `600`                         |
    /// | `PUSH_GATEWAY_URL`    | `http://localhost:8081/notify`|
    /// | `PUSH_TIMEOUT_SECS`   | `10`                          |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let alert_cooldown_secs: i64 = std::env::var("ALERT_COOLDOWN_SECS")
            .unwrap_or_else(|_| "600".into())
            .parse()
            .expect("ALERT_COOLDOWN_SECS must be a valid i64");

        let push_gateway_url = std::env::var("PUSH_GATEWAY_URL")
            .unwrap_or_else(|_| "http://localhost:8081/notify".into());

        let push_timeout_secs: u64 = std::env::var("PUSH_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("PUSH_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            alert_cooldown_secs,
            push_gateway_url,
            push_timeout_secs,
        }
    }
}
