//! SDK configuration (layered: code > env).

use std::time::Duration;

use strum::{Display, EnumString};
use uuid::Uuid;

use crate::error::FoxdeliError;
use crate::transport::http::DEFAULT_TIMEOUT;

const PRODUCTION_TOKEN_URL: &str = "https://api.foxdeli.com/token";
const PRODUCTION_TRACKING_URL: &str = "https://api.foxdeli.com/tracking";
const STAGE_TOKEN_URL: &str = "https://api.stage.foxdeli.com/token";
const STAGE_TRACKING_URL: &str = "https://api.stage.foxdeli.com/tracking";

/// Which Foxdeli deployment to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Stage,
}

impl Environment {
    pub fn from_stage_flag(stage: bool) -> Self {
        if stage {
            Self::Stage
        } else {
            Self::Production
        }
    }

    pub fn token_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_TOKEN_URL,
            Self::Stage => STAGE_TOKEN_URL,
        }
    }

    pub fn tracking_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_TRACKING_URL,
            Self::Stage => STAGE_TRACKING_URL,
        }
    }
}

/// Configuration for [`crate::Foxdeli`].
///
/// # Example
/// ```
/// use foxdeli::config::{Environment, FoxdeliConfig};
///
/// let config = FoxdeliConfig::new()
///     .with_environment(Environment::Stage)
///     .with_timeout(std::time::Duration::from_secs(10));
/// assert_eq!(config.token_url(), "https://api.stage.foxdeli.com/token");
/// ```
#[derive(Debug, Clone, Default)]
pub struct FoxdeliConfig {
    pub environment: Environment,
    pub token_url: Option<String>,
    pub tracking_url: Option<String>,
    pub timeout: Option<Duration>,
    pub eshop_id: Option<Uuid>,
    pub market_id: Option<Uuid>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl FoxdeliConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables, reading `.env` first if present.
    ///
    /// Recognized: `FOXDELI_USERNAME`, `FOXDELI_PASSWORD`, `FOXDELI_STAGE`,
    /// `FOXDELI_TOKEN_URL`, `FOXDELI_TRACKING_URL`, `FOXDELI_TIMEOUT_SECS`,
    /// `FOXDELI_ESHOP_ID`, `FOXDELI_MARKET_ID`.
    pub fn from_env() -> Result<Self, FoxdeliError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` uses the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FoxdeliError> {
        let stage = match lookup("FOXDELI_STAGE") {
            Some(raw) => parse_bool("FOXDELI_STAGE", &raw)?,
            None => false,
        };
        let timeout = lookup("FOXDELI_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                    FoxdeliError::Configuration(format!(
                        "FOXDELI_TIMEOUT_SECS must be a whole number of seconds, got {raw:?}"
                    ))
                })
            })
            .transpose()?;
        Ok(Self {
            environment: Environment::from_stage_flag(stage),
            token_url: lookup("FOXDELI_TOKEN_URL"),
            tracking_url: lookup("FOXDELI_TRACKING_URL"),
            timeout,
            eshop_id: parse_uuid("FOXDELI_ESHOP_ID", lookup("FOXDELI_ESHOP_ID"))?,
            market_id: parse_uuid("FOXDELI_MARKET_ID", lookup("FOXDELI_MARKET_ID"))?,
            username: lookup("FOXDELI_USERNAME"),
            password: lookup("FOXDELI_PASSWORD"),
        })
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_stage(self, stage: bool) -> Self {
        self.with_environment(Environment::from_stage_flag(stage))
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    pub fn with_tracking_url(mut self, url: impl Into<String>) -> Self {
        self.tracking_url = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_eshop_id(mut self, eshop_id: Uuid) -> Self {
        self.eshop_id = Some(eshop_id);
        self
    }

    pub fn with_market_id(mut self, market_id: Uuid) -> Self {
        self.market_id = Some(market_id);
        self
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Token API base URL: explicit override, else the environment default.
    pub fn token_url(&self) -> &str {
        self.token_url
            .as_deref()
            .unwrap_or_else(|| self.environment.token_url())
    }

    /// Tracking API base URL: explicit override, else the environment default.
    pub fn tracking_url(&self) -> &str {
        self.tracking_url
            .as_deref()
            .unwrap_or_else(|| self.environment.tracking_url())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, FoxdeliError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(FoxdeliError::Configuration(format!(
            "{key} must be a boolean, got {raw:?}"
        ))),
    }
}

fn parse_uuid(key: &str, raw: Option<String>) -> Result<Option<Uuid>, FoxdeliError> {
    raw.map(|value| {
        Uuid::parse_str(value.trim())
            .map_err(|e| FoxdeliError::Configuration(format!("{key} is not a UUID: {e}")))
    })
    .transpose()
}
