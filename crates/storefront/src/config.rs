//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MURELA_ADMIN_PASSWORD` - Admin panel password (min 8 chars, not a placeholder)
//!
//! ## Optional
//! - `MURELA_HOST` - Bind address (default: 127.0.0.1)
//! - `MURELA_PORT` - Listen port (default: 3000)
//! - `MURELA_BASE_URL` - Public URL, used for the payment redirect (default: http://localhost:3000)
//! - `MURELA_DATA_DIR` - Directory for the local document store (default: .murela)
//! - `MURELA_ADMIN_USERNAME` - Admin panel username (default: admin)
//! - `MURELA_ORIGIN_CEP` - Postal code shipments leave from (default: 01001000)
//! - `MURELA_MERCHANT_ID` - Merchant id sent to the hosted checkout (default: `MURELA_MERCHANT`)
//! - `MURELA_CHECKOUT_URL` - Hosted checkout page (default: <https://checkout.efi.com.br/>)
//! - `MURELA_ADDRESS_DELAY_MS` - Simulated address lookup latency (default: 800)
//! - `MURELA_SHIPPING_DELAY_MS` - Simulated shipping quote latency (default: 1000)
//! - `MURELA_PAYMENT_DELAY_MS` - Simulated payment latency (default: 1500)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use murela_core::PostalCode;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

const MIN_ADMIN_PASSWORD_LENGTH: usize = 8;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "changeme",
    "replace",
    "placeholder",
    "password",
    "your-",
    "xxx",
    "todo",
    "fixme",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Directory holding the local document store
    pub data_dir: PathBuf,
    /// Admin panel credentials
    pub admin: AdminCredentials,
    /// Checkout and mock service settings
    pub checkout: CheckoutSettings,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Admin panel credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: SecretString,
}

impl AdminCredentials {
    /// Compare a login attempt against the configured credentials.
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        // Both comparisons always run.
        let user_ok = constant_time_eq(self.username.as_bytes(), username.as_bytes());
        let pass_ok = constant_time_eq(self.password.expose_secret().as_bytes(), password.as_bytes());
        user_ok & pass_ok
    }
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Checkout settings: shipping origin, hosted checkout and simulated latencies.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    /// Postal code shipments leave from
    pub origin_cep: PostalCode,
    /// Merchant id sent to the hosted checkout page
    pub merchant_id: String,
    /// Hosted checkout page the buyer is redirected to
    pub checkout_url: Url,
    /// Where the hosted checkout sends the buyer back to
    pub return_url: Url,
    /// Simulated latency of each mock service
    pub latency: MockLatency,
}

/// Artificial delay of each mock service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    pub address: Duration,
    pub shipping: Duration,
    pub payment: Duration,
}

impl MockLatency {
    /// No delay at all, for tests.
    pub const NONE: Self = Self {
        address: Duration::ZERO,
        shipping: Duration::ZERO,
        payment: Duration::ZERO,
    };
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the admin password fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("MURELA_HOST", "127.0.0.1")?;
        let port = parse_env("MURELA_PORT", "3000")?;
        let base_url = parse_env::<Url>("MURELA_BASE_URL", "http://localhost:3000")?;
        let data_dir = PathBuf::from(get_env_or_default("MURELA_DATA_DIR", ".murela"));

        let admin = AdminCredentials {
            username: get_env_or_default("MURELA_ADMIN_USERNAME", "admin"),
            password: get_validated_secret("MURELA_ADMIN_PASSWORD")?,
        };

        let checkout = CheckoutSettings::from_env(&base_url)?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            host,
            port,
            base_url,
            data_dir,
            admin,
            checkout,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CheckoutSettings {
    fn from_env(base_url: &Url) -> Result<Self, ConfigError> {
        let return_url = base_url.join("/api/checkout/success").map_err(|e| {
            ConfigError::InvalidEnvVar("MURELA_BASE_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            origin_cep: parse_env("MURELA_ORIGIN_CEP", "01001000")?,
            merchant_id: get_env_or_default("MURELA_MERCHANT_ID", "MURELA_MERCHANT"),
            checkout_url: parse_env("MURELA_CHECKOUT_URL", "https://checkout.efi.com.br/")?,
            return_url,
            latency: MockLatency {
                address: parse_millis("MURELA_ADDRESS_DELAY_MS", 800)?,
                shipping: parse_millis("MURELA_SHIPPING_DELAY_MS", 1000)?,
                payment: parse_millis("MURELA_PAYMENT_DELAY_MS", 1500)?,
            },
        })
    }

    /// Settings for local development and tests: São Paulo origin, the
    /// default hosted checkout, and no artificial latency.
    ///
    /// # Panics
    ///
    /// Never; the built-in literals are valid.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn local() -> Self {
        Self {
            origin_cep: PostalCode::parse("01001000").expect("valid literal CEP"),
            merchant_id: "MURELA_MERCHANT".to_string(),
            checkout_url: Url::parse("https://checkout.efi.com.br/").expect("valid literal URL"),
            return_url: Url::parse("http://localhost:3000/api/checkout/success")
                .expect("valid literal URL"),
            latency: MockLatency::NONE,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable (or its default) with `FromStr`.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a millisecond duration.
fn parse_millis(key: &str, default: u64) -> Result<Duration, ConfigError> {
    parse_env::<u64>(key, &default.to_string()).map(Duration::from_millis)
}

/// Validate that a secret is long enough and not a placeholder.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_ADMIN_PASSWORD_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_ADMIN_PASSWORD_LENGTH,
                secret.len()
            ),
        ));
    }

    let lower = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

/// Compare two byte strings without short-circuiting on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0_u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
