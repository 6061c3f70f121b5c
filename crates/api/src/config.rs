use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
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
    /// JWT token configuration (secret, expiry duration).
    pub jwt: JwtConfig,
    /// SMTP notification configuration.
    pub smtp: SmtpConfig,
    /// Root directory of the local upload store (default: `./uploads`).
    pub upload_root: String,
    /// Timeout in seconds for file-store lookups (default: `5`).
    pub file_store_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `UPLOAD_ROOT`             | `./uploads`                |
    /// | `FILE_STORE_TIMEOUT_SECS` | `5`                        |
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

        let upload_root = std::env::var("UPLOAD_ROOT").unwrap_or_else(|_| "./uploads".into());

        let file_store_timeout_secs: u64 = std::env::var("FILE_STORE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("FILE_STORE_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();
        let smtp = SmtpConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            smtp,
            upload_root,
            file_store_timeout_secs,
        }
    }
}

/// SMTP configuration for outbound notification email.
///
/// When `relay` is unset, notification emails are logged instead of sent.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP relay hostname. `None` disables real delivery.
    pub relay: Option<String>,
    /// `From` address on outbound mail.
    pub from_address: String,
}

impl SmtpConfig {
    /// Load SMTP configuration from environment variables.
    ///
    /// | Env Var         | Default                |
    /// |-----------------|------------------------|
    /// | `SMTP_RELAY`    | unset (log-only mode)  |
    /// | `SMTP_FROM`     | `no-reply@eygar.local` |
    pub fn from_env() -> Self {
        let relay = std::env::var("SMTP_RELAY").ok().filter(|s| !s.is_empty());
        let from_address =
            std::env::var("SMTP_FROM").unwrap_or_else(|_| "no-reply@eygar.local".into());

        Self {
            relay,
            from_address,
        }
    }
}
