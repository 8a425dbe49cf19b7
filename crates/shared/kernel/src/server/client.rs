use axum::extract::{ConnectInfo, FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use folio_domain::config::ApiConfig;
use std::convert::Infallible;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Resolved address of the caller, cached in request extensions once computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientAddress(pub IpAddr);

impl ClientAddress {
    /// Resolves the caller address for a request.
    ///
    /// Order: an already resolved [`ClientAddress`] extension, then the first
    /// `X-Forwarded-For` entry when `trust_proxy` is set, then the TCP peer from
    /// [`ConnectInfo`]. Falls back to the unspecified address when none is available.
    #[must_use]
    pub fn resolve(parts: &Parts, trust_proxy: bool) -> Self {
        if let Some(resolved) = parts.extensions.get::<Self>() {
            return *resolved;
        }

        trust_proxy
            .then(|| forwarded_for(&parts.headers))
            .flatten()
            .or_else(|| {
                parts.extensions.get::<ConnectInfo<SocketAddr>>().map(|info| info.0.ip())
            })
            .map_or(Self(IpAddr::V4(Ipv4Addr::UNSPECIFIED)), Self)
    }
}

fn forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|first| first.trim().parse().ok())
}

/// Origin details recorded alongside a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientMeta {
    pub ip: IpAddr,
    pub user_agent: Option<String>,
}

impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
    ApiConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = ApiConfig::from_ref(state);
        let ClientAddress(ip) = ClientAddress::resolve(parts, config.security.trust_proxy);
        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        Ok(Self { ip, user_agent })
    }
}
