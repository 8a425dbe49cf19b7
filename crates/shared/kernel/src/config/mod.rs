use config::{Config, Environment, File, Map};
use folio_domain::constants::{ENV_PREFIX, HOSTING_PORT_VAR};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Custom error type for config loading.
#[folio_derive::folio_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// Layers, lowest priority first:
/// 1. **Base File**: `folio.{toml,yaml,json}` (or the given path). The file is optional;
///    every setting has a default.
/// 2. **Environment Overrides**: variables prefixed with `FOLIO__`, nested with double
///    underscores (`FOLIO__DATABASE__URL` maps to `database.url`).
///    Values stay text until deserialization, so numbers keep leading zeros in string
///    fields. `FOLIO__CORS__ALLOWED_ORIGINS` accepts a comma separated list.
/// 3. **Hosting Port**: the conventional `PORT` variable wins over `server.port`.
///
/// # Errors
/// Returns an error if a present file cannot be parsed or the merged values do not match
/// the structure of `T`.
///
/// # Example
/// ```rust
/// use folio_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_config_with(path, None)
}

/// Same as [`load_config`], reading variables from `vars` instead of the process
/// environment when given.
///
/// # Errors
/// See [`load_config`].
pub fn load_config_with<T>(
    path: Option<impl AsRef<Path>>,
    vars: Option<Map<String, String>>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(|| PathBuf::from("folio"), |p| p.as_ref().to_path_buf());

    let port = vars.as_ref().map_or_else(
        || std::env::var(HOSTING_PORT_VAR).ok(),
        |vars| vars.get(HOSTING_PORT_VAR).cloned(),
    );

    let environment = Environment::with_prefix(ENV_PREFIX).separator("__").source(vars);

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(false))
        .add_source(environment)
        .set_override_option("server.port", port)
        .context("Applying hosting port override")?;

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
