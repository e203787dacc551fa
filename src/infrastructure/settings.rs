//! # Settings
//!
//! Runtime configuration loaded from defaults and the environment.
//!
//! Environment variables use the `ONSITE` prefix with `__` as the level
//! separator, e.g. `ONSITE__SERVER__PORT=8080` or
//! `ONSITE__DATABASE__URL=postgres://...`. Without a database URL the
//! server runs on in-memory repositories.

use crate::application::services::PricingConfig;
use config::{Config, ConfigError, Environment};
use rust_decimal::Decimal;
use serde::Deserialize;

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl ServerSettings {
    /// Returns the `host:port` bind string.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Pricing surcharge percentages.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingSettings {
    /// Out-of-hours premium in whole percent.
    pub ooh_premium_percent: u32,
    /// Platform fee in whole percent.
    pub platform_fee_percent: u32,
}

impl PricingSettings {
    /// Converts into the engine's pricing configuration.
    #[must_use]
    pub fn to_config(&self) -> PricingConfig {
        PricingConfig {
            ooh_premium_percent: Decimal::from(self.ooh_premium_percent),
            platform_fee_percent: Decimal::from(self.platform_fee_percent),
        }
    }
}

/// Database connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL; in-memory storage when absent.
    #[serde(default)]
    pub url: Option<String>,
    /// Connection pool size.
    pub max_connections: u32,
}

/// Full runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// HTTP listener settings.
    pub server: ServerSettings,
    /// Pricing percentages.
    pub pricing: PricingSettings,
    /// Database settings.
    pub database: DatabaseSettings,
}

impl Settings {
    /// Loads settings from defaults overridden by the environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when an override has the wrong shape or
    /// type.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("pricing.ooh_premium_percent", 25)?
            .set_default("pricing.platform_fee_percent", 15)?
            .set_default("database.max_connections", 5)?
            .add_source(Environment::with_prefix("ONSITE").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_environment() {
        let settings = Settings::load().unwrap();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.pricing.ooh_premium_percent, 25);
        assert_eq!(settings.pricing.platform_fee_percent, 15);
        assert!(settings.database.url.is_none());
    }

    #[test]
    fn pricing_settings_convert_to_config() {
        let config = PricingSettings {
            ooh_premium_percent: 25,
            platform_fee_percent: 15,
        }
        .to_config();
        assert_eq!(config.ooh_premium_percent, Decimal::from(25));
        assert_eq!(config.platform_fee_percent, Decimal::from(15));
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let server = ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 8080,
        };
        assert_eq!(server.bind_addr(), "127.0.0.1:8080");
    }
}
