//! Server configuration from environment variables.
//!
//! Every setting has a default; a missing variable is logged and falls back
//! to it, an unparsable one is an error.
//!
//! | Variable | Default |
//! |---|---|
//! | `DISH_SWIPE_PORT` | `8080` |
//! | `DISH_SWIPE_CATALOG` | `data/catalog.json` |
//! | `DISH_SWIPE_TOKENS` | `data/tokens.json` |
//! | `DISH_SWIPE_SESSION_TTL_SECS` | `3600` (`0` disables eviction) |
//! | `DISH_SWIPE_SWEEP_SECS` | `60` |
//! | `DISH_SWIPE_MATCH` | `name` |
//! | `DISH_SWIPE_BATCH_SIZE` | `10` |
//! | `DISH_SWIPE_MAX_SWIPES` | `30` |
//! | `DISH_SWIPE_MIN_REMAINING` | `5` |
//! | `DISH_SWIPE_RESULT_COUNT` | `3` |

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use scoring::IngredientMatch;
use session::SessionPolicy;
use tracing::info;

pub const PORT_VAR: &str = "DISH_SWIPE_PORT";
pub const CATALOG_VAR: &str = "DISH_SWIPE_CATALOG";
pub const TOKENS_VAR: &str = "DISH_SWIPE_TOKENS";
pub const SESSION_TTL_VAR: &str = "DISH_SWIPE_SESSION_TTL_SECS";
pub const SWEEP_VAR: &str = "DISH_SWIPE_SWEEP_SECS";
pub const MATCH_VAR: &str = "DISH_SWIPE_MATCH";
pub const BATCH_SIZE_VAR: &str = "DISH_SWIPE_BATCH_SIZE";
pub const MAX_SWIPES_VAR: &str = "DISH_SWIPE_MAX_SWIPES";
pub const MIN_REMAINING_VAR: &str = "DISH_SWIPE_MIN_REMAINING";
pub const RESULT_COUNT_VAR: &str = "DISH_SWIPE_RESULT_COUNT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub catalog_path: PathBuf,
    pub tokens_path: PathBuf,
    /// Idle sessions older than this are evicted; `None` keeps them forever
    pub session_ttl: Option<Duration>,
    pub sweep_interval: Duration,
    pub matching: IngredientMatch,
    pub policy: SessionPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            catalog_path: PathBuf::from("data/catalog.json"),
            tokens_path: PathBuf::from("data/tokens.json"),
            session_ttl: Some(Duration::from_secs(3600)),
            sweep_interval: Duration::from_secs(60),
            matching: IngredientMatch::ByName,
            policy: SessionPolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let ttl_secs: u64 = try_load(&lookup, SESSION_TTL_VAR, "3600")?;
        let sweep_secs: u64 = try_load(&lookup, SWEEP_VAR, "60")?;
        if sweep_secs == 0 {
            bail!("{SWEEP_VAR} must be at least 1 second");
        }

        let policy = SessionPolicy::default()
            .with_batch_size(try_load(&lookup, BATCH_SIZE_VAR, "10")?)
            .with_max_swipes(try_load(&lookup, MAX_SWIPES_VAR, "30")?)
            .with_min_remaining(try_load(&lookup, MIN_REMAINING_VAR, "5")?)
            .with_result_count(try_load(&lookup, RESULT_COUNT_VAR, "3")?);
        if policy.batch_size == 0 {
            bail!("{BATCH_SIZE_VAR} must be at least 1");
        }

        Ok(Self {
            port: try_load(&lookup, PORT_VAR, "8080")?,
            catalog_path: try_load(&lookup, CATALOG_VAR, "data/catalog.json")?,
            tokens_path: try_load(&lookup, TOKENS_VAR, "data/tokens.json")?,
            session_ttl: (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs)),
            sweep_interval: Duration::from_secs(sweep_secs),
            matching: try_load(&lookup, MATCH_VAR, "name")?,
            policy,
        })
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }

    pub fn with_tokens_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tokens_path = path.into();
        self
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T>
where
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim()
        .parse()
        .map_err(|e| anyhow!("Invalid {key} value '{raw}': {e}"))
}
