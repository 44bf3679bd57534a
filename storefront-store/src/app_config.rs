use serde::Deserialize;
use std::env;
use storefront_shared::Currency;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub pricing: PricingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingConfig {
    /// Currency new orders are denominated in when none is given
    pub default_currency: Currency,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// JSON catalog loaded at startup
    #[serde(default)]
    pub seed_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directives; `RUST_LOG` wins when set
    pub filter: String,
}

const DEFAULT_FILTER: &str = "storefront_admin=info,storefront_store=info,storefront_order=info";

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from("config", &run_mode)
    }

    /// Layered load: built-in defaults, then `<dir>/default`, `<dir>/<run_mode>`,
    /// `<dir>/local` (all optional), then `STOREFRONT__*` environment variables.
    pub fn load_from(dir: &str, run_mode: &str) -> Result<Self, config::ConfigError> {
        let s = config::Config::builder()
            .set_default("pricing.default_currency", "INR")?
            .set_default("logging.filter", DEFAULT_FILTER)?
            .add_source(config::File::with_name(&format!("{}/default", dir)).required(false))
            .add_source(config::File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            // not checked in
            .add_source(config::File::with_name(&format!("{}/local", dir)).required(false))
            // e.g. `STOREFRONT__PRICING__DEFAULT_CURRENCY=USD`
            .add_source(config::Environment::with_prefix("STOREFRONT").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
