use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
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
    /// Graceful shutdown timeout in seconds (default: `30`).
    #[allow(dead_code)]
    pub shutdown_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Payment gateway credentials and currency.
    pub payment: PaymentConfig,
}

/// Payment gateway configuration.
///
/// `key_secret` signs payment confirmations and must never reach the client;
/// only `key_id` is safe to embed in the checkout widget.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Public gateway key identifier.
    pub key_id: String,
    /// Secret key used for order-creation auth and signature verification.
    pub key_secret: String,
    /// ISO currency code all orders are created in (default: `INR`).
    pub currency: String,
    /// Base URL of the gateway REST API.
    pub api_base: String,
}

impl PaymentConfig {
    /// Load payment configuration from environment variables.
    ///
    /// | Env Var              | Required | Default                      |
    /// |----------------------|----------|------------------------------|
    /// | `PAYMENT_KEY_ID`     | **yes**  | --                           |
    /// | `PAYMENT_KEY_SECRET` | **yes**  | --                           |
    /// | `PAYMENT_CURRENCY`   | no       | `INR`                        |
    /// | `PAYMENT_API_BASE`   | no       | `https://api.razorpay.com/v1`|
    ///
    /// # Panics
    ///
    /// Panics if either key variable is missing or empty.
    pub fn from_env() -> Self {
        let key_id =
            std::env::var("PAYMENT_KEY_ID").expect("PAYMENT_KEY_ID must be set in the environment");
        let key_secret = std::env::var("PAYMENT_KEY_SECRET")
            .expect("PAYMENT_KEY_SECRET must be set in the environment");
        assert!(!key_id.is_empty(), "PAYMENT_KEY_ID must not be empty");
        assert!(!key_secret.is_empty(), "PAYMENT_KEY_SECRET must not be empty");

        let currency = std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "INR".into());
        let api_base = std::env::var("PAYMENT_API_BASE")
            .unwrap_or_else(|_| "https://api.razorpay.com/v1".into());

        Self {
            key_id,
            key_secret,
            currency,
            api_base,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
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

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt: JwtConfig::from_env(),
            payment: PaymentConfig::from_env(),
        }
    }
}
