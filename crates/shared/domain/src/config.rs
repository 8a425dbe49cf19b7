use chrono_tz::Tz;
use serde::{Deserialize, Deserializer};
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level API configuration.
///
/// Optional capabilities are `Option` sections: leaving `database` out runs on the
/// in-memory engine, leaving `notifier` out disables outbound notifications.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub database: Option<DatabaseConfig>,
    pub notifier: Option<NotifierConfig>,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub security: SecurityConfig,
    pub contact: ContactConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(from = "ApiConfigInner")]
pub struct ApiConfig {
    inner: Arc<ApiConfigInner>,
}

impl From<ApiConfigInner> for ApiConfig {
    fn from(inner: ApiConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    /// Free-form deployment label reported by the health endpoint.
    pub environment: String,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// `SurrealDB` connection configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub credentials: Option<DatabaseCredentials>,
}

/// `SurrealDB` root credentials (not needed for unauthenticated engines like mem://).
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseCredentials {
    pub username: String,
    pub password: String,
}

/// Twilio WhatsApp credentials and routing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    pub account_sid: String,
    pub auth_token: String,
    /// Sender number registered with the WhatsApp channel.
    pub from_number: String,
    /// Destination number that receives new inquiry summaries.
    pub to_number: String,
    pub api_base: String,
    /// Time zone used to render submission times in the summary.
    pub timezone: Tz,
}

impl NotifierConfig {
    /// Returns the names of required settings that are still empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("account_sid", &self.account_sid),
            ("auth_token", &self.auth_token),
            ("from_number", &self.from_number),
            ("to_number", &self.to_number),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Allowed browser origins. An empty list allows any origin without credentials.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// A list, or a single comma separated string as set from the environment.
    #[serde(deserialize_with = "deserialize_comma_list")]
    pub allowed_origins: Vec<String>,
}

fn deserialize_comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrVec {
        Joined(String),
        List(Vec<String>),
    }

    Ok(match StringOrVec::deserialize(deserializer)? {
        StringOrVec::Joined(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect(),
        StringOrVec::List(list) => list,
    })
}

/// Location of the built front end.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub static_dir: PathBuf,
}

/// Request-origin handling.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Honour `X-Forwarded-For` when resolving the client address.
    pub trust_proxy: bool,
}

/// Contact form behaviour.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub require_phone: bool,
    pub rate_limit: RateLimitConfig,
}

/// Fixed-window submission limit per client address.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_secs: u64,
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 10000,
            environment: "development".to_owned(),
            ssl: None,
        }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mem://".to_owned(),
            namespace: "folio".to_owned(),
            database: "portfolio".to_owned(),
            credentials: None,
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
            to_number: String::new(),
            api_base: "https://api.twilio.com".to_owned(),
            timezone: chrono_tz::Asia::Kolkata,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { static_dir: PathBuf::from("frontend/dist") }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self { max_requests: 5, window_secs: 15 * 60 }
    }
}
