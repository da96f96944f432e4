use std::{net::SocketAddr, path::PathBuf};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;

#[cfg(feature = "logging")]
use tracing_subscriber::filter::LevelFilter;

/// Database configuration.
#[derive(Deserialize)]
pub struct Database {
    /// Database URL string.
    pub url: String,
}

/// HTTP server configuration.
#[derive(Deserialize)]
pub struct Server {
    /// Address, that HTTP server will listen on.
    pub address: SocketAddr,

    /// Origins allowed to send credentialed cross-origin requests.
    #[serde(default = "default_origins")]
    pub origins: Vec<String>,
}

fn default_origins() -> Vec<String> {
    vec![String::from("http://localhost:5173")]
}

/// Implementation of [`serde`]'s deserializer for [`FromStr`] types.
#[cfg(feature = "logging")]
fn deserialize_from_str<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: std::str::FromStr,
    T::Err: std::error::Error,
    D: serde::de::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    std::str::FromStr::from_str(&s).map_err(serde::de::Error::custom)
}

/// Logging configuration.
#[cfg(feature = "logging")]
#[derive(Deserialize)]
pub struct Logging {
    /// Log level.
    #[serde(deserialize_with = "deserialize_from_str")]
    pub level: LevelFilter,
}

#[cfg(feature = "logging")]
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: LevelFilter::WARN,
        }
    }
}

/// Session token configuration.
#[derive(Deserialize)]
pub struct Auth {
    /// Secret used to sign and verify session tokens.
    pub secret: String,

    /// Session token lifespan, in seconds.
    #[serde(default = "default_lifespan")]
    pub lifespan: u64,

    /// Mark the session cookie as `Secure`.
    ///
    /// Should be enabled in every deployment served over HTTPS.
    #[serde(default)]
    pub secure: bool,
}

fn default_lifespan() -> u64 {
    3600
}

/// Payment provider configuration.
#[derive(Deserialize)]
pub struct Payments {
    /// Payment provider secret key.
    pub key: String,

    /// Currency used for created payment intents.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Payment provider API base URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_currency() -> String {
    String::from("usd")
}

fn default_endpoint() -> String {
    String::from("https://api.stripe.com")
}

/// General configuration.
#[derive(Deserialize)]
pub struct Config {
    /// General database configuration.
    pub database: Database,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: Option<Server>,

    /// Logging configuration.
    #[cfg(feature = "logging")]
    #[serde(default)]
    pub logging: Logging,

    /// Session token configuration.
    pub auth: Auth,

    /// Payment provider configuration.
    ///
    /// Payment intent creation is disabled if this section is missing.
    #[serde(default)]
    pub payments: Option<Payments>,
}

impl Config {
    /// Create new config using default configuration file or environment variables.
    ///
    /// See [`Env`] for more details on how to use environment variables configuration.
    ///
    /// [`Env`]: figment::providers::Env
    pub fn new(path: Option<PathBuf>) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file(path.unwrap_or(PathBuf::from("Config.toml"))))
            .merge(Env::prefixed("CONFIG_").split("_"))
            .extract()
    }

    /// Create new config suitable for running unit tests.
    #[cfg(feature = "test-utils")]
    pub fn for_tests() -> Self {
        Self {
            database: Database {
                url: String::from("sqlite::memory:"),
            },
            server: Some(Server {
                address: "127.0.0.1:3000".parse().unwrap(),
                origins: default_origins(),
            }),
            #[cfg(feature = "logging")]
            logging: Logging::default(),
            auth: Auth {
                secret: String::from("test secret"),
                lifespan: default_lifespan(),
                secure: false,
            },
            payments: None,
        }
    }
}
