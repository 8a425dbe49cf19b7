pub use crate::config::load_config;
pub use crate::domain::config::ApiConfig;
pub use crate::safe_nanoid;
pub use crate::security::rate_limit::{RateDecision, RateLimiter};
pub use crate::security::resource::ResourceGuard;
#[cfg(feature = "server")]
pub use crate::server::{ApiState, ClientAddress, ClientMeta};
