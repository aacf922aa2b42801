use std::env;

/// Default upstream for the GUS BDL (Bank Danych Lokalnych) statistics API.
pub const DEFAULT_BASE_URL: &str = "https://bdl.stat.gov.pl/api/v1";

/// Upstream and listener configuration, resolved once at startup.
///
/// Everything here is immutable for the process lifetime; handlers only
/// ever see it through the state they were built with.
#[derive(Debug, Clone)]
pub struct BdlConfig {
    pub base_url: String,
    pub default_lang: String,
    pub host: String,
    pub port: u16,
    pub environment: String,
}

impl BdlConfig {
    pub fn from_env() -> Self {
        BdlConfig {
            base_url: env::var("BDL_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            default_lang: env::var("BDL_DEFAULT_LANG").unwrap_or_else(|_| "pl".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }
}
