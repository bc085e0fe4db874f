//! Region banner values. Purely presentational: nothing here routes traffic
//! or changes behavior.

use axum::http::{HeaderName, HeaderValue};
use headers::{Error as HeaderError, Header};

/// Origin region that marks a request as served through failover.
pub const FAILOVER_ORIGIN: &str = "eu-west-1";

pub static X_ORIGIN_REGION: HeaderName = HeaderName::from_static("x-origin-region");

/// `X-Origin-Region` request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XOriginRegion(pub String);

impl Header for XOriginRegion {
    fn name() -> &'static HeaderName {
        &X_ORIGIN_REGION
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, HeaderError>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        values
            .next()
            .and_then(|v| v.to_str().ok())
            .map(|s| XOriginRegion(s.trim().to_string()))
            .ok_or_else(HeaderError::invalid)
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        if let Ok(v) = HeaderValue::from_str(&self.0) {
            values.extend(std::iter::once(v));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionBanner {
    pub region: String,
    pub origin_region: String,
    /// Inbound header equals [`FAILOVER_ORIGIN`].
    pub is_failover: bool,
    /// Configured region name contains `west`. Independent of `is_failover`;
    /// the two can disagree.
    pub is_dr: bool,
}

impl RegionBanner {
    pub fn from_parts(region: Option<&str>, origin_region: Option<&str>) -> Self {
        let region = region.unwrap_or("unknown").to_string();
        let origin_region = origin_region.unwrap_or("direct").to_string();
        let is_failover = origin_region == FAILOVER_ORIGIN;
        let is_dr = region.contains("west");
        Self {
            region,
            origin_region,
            is_failover,
            is_dr,
        }
    }
}
