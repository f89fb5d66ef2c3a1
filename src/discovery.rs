//! Bridge discovery via the vendor's cloud endpoint.

use serde::{Deserialize, Serialize};

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

const DISCOVERY_URL: &str = "https://discovery.meethue.com/";

/// A Hue bridge known to the discovery service.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DiscoveredBridge {
    /// Bridge id reported by the discovery service
    pub id: String,
    /// LAN address the bridge is reachable at
    #[serde(rename = "internalipaddress")]
    pub internal_ip: String,
}

/// Discover Hue bridges through the vendor's cloud discovery endpoint.
///
/// Bridges phone home periodically; the endpoint lists every bridge seen
/// from the caller's public address. A bridge that never reached the cloud
/// cannot be found this way and must be configured by address instead.
///
/// # Examples
///
/// ```ignore
/// let bridges = discover_bridges().await?;
/// for bridge in bridges {
///     println!("  {} - {}", bridge.id, bridge.internal_ip);
/// }
/// ```
pub async fn discover_bridges() -> Result<Vec<DiscoveredBridge>> {
    let response = reqwest::get(DISCOVERY_URL)
        .await
        .map_err(|e| Error::http("discovery", e))?
        .error_for_status()
        .map_err(|e| Error::http("discovery", e))?;

    response
        .json::<Vec<DiscoveredBridge>>()
        .await
        .map_err(|e| Error::http("discovery decode", e))
}
