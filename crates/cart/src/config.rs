//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `BASKET_STORAGE_DIR` - Directory backing the file storage area (default: .basket)
//! - `BASKET_STORAGE_KEY` - Storage key holding the cart (default: cart)
//! - `BASKET_CATALOG_URL` - URL of a `products.json` catalog document
//! - `BASKET_CATALOG_PATH` - Local catalog file, used when no URL is set (default: products.json)
//! - `BASKET_CATALOG_CACHE_TTL_SECS` - How long a fetched catalog is reused (default: 300)
//! - `BASKET_NOTICE_MS` - How long the "added to cart" notice stays visible (default: 3000)
//! - `BASKET_CURRENCY` - ISO 4217 code used for display (default: USD)
//! - `BASKET_BADGE_MODE` - `distinct` products or total `units` on the badge (default: distinct)

use std::path::PathBuf;
use std::time::Duration;

use basket_core::CurrencyCode;
use thiserror::Error;
use url::Url;

use crate::views::BadgeMode;

/// Default storage key for the persisted cart.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Default display time for the added-item notice, in milliseconds.
pub const DEFAULT_NOTICE_MS: u64 = 3000;

/// Default display time for the added-item notice.
pub const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(DEFAULT_NOTICE_MS);

/// Default time a fetched catalog document is reused.
pub const DEFAULT_CATALOG_TTL: Duration = Duration::from_secs(300);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where product descriptors are looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Fetch a JSON document over HTTP.
    Url(Url),
    /// Read a JSON document from disk.
    Path(PathBuf),
}

/// Cart session configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Directory for the file-backed storage area
    pub storage_dir: PathBuf,
    /// Key under which the cart blob is stored
    pub storage_key: String,
    /// Product catalog location
    pub catalog: CatalogSource,
    /// Catalog cache time-to-live
    pub catalog_ttl: Duration,
    /// Display duration of the added-item notice
    pub notice_duration: Duration,
    /// Currency used when formatting prices
    pub currency: CurrencyCode,
    /// What the count badge counts
    pub badge_mode: BadgeMode,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".basket"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            catalog: CatalogSource::Path(PathBuf::from("products.json")),
            catalog_ttl: DEFAULT_CATALOG_TTL,
            notice_duration: DEFAULT_NOTICE_DURATION,
            currency: CurrencyCode::default(),
            badge_mode: BadgeMode::default(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_dir = env("BASKET_STORAGE_DIR").map_or(defaults.storage_dir, PathBuf::from);
        let storage_key = get_env_or_default(&env, "BASKET_STORAGE_KEY", DEFAULT_STORAGE_KEY);
        if storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "BASKET_STORAGE_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let catalog = match env("BASKET_CATALOG_URL") {
            Some(raw) => CatalogSource::Url(Url::parse(&raw).map_err(|e| {
                ConfigError::InvalidEnvVar("BASKET_CATALOG_URL".to_string(), e.to_string())
            })?),
            None => env("BASKET_CATALOG_PATH")
                .map_or(defaults.catalog, |p| CatalogSource::Path(PathBuf::from(p))),
        };

        let catalog_ttl = Duration::from_secs(parse_env(
            &env,
            "BASKET_CATALOG_CACHE_TTL_SECS",
            DEFAULT_CATALOG_TTL.as_secs(),
        )?);
        let notice_duration =
            Duration::from_millis(parse_env(&env, "BASKET_NOTICE_MS", DEFAULT_NOTICE_MS)?);
        let currency = parse_env(&env, "BASKET_CURRENCY", defaults.currency)?;
        let badge_mode = parse_env(&env, "BASKET_BADGE_MODE", defaults.badge_mode)?;

        Ok(Self {
            storage_dir,
            storage_key,
            catalog,
            catalog_ttl,
            notice_duration,
            currency,
            badge_mode,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(env: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an optional environment variable, falling back to `default` when unset.
fn parse_env<T>(
    env: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
