//! HTTP client for the bridge's CLIP v2 API.

use std::future::Future;
use std::time::Duration;

use log::info;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::config::Config;
use crate::discovery::discover_bridges;
use crate::errors::Error;
use crate::payload::{GroupedLightPut, LightPut};
use crate::resources::{DeviceGet, GroupedLightGet, LightGet, ResourceType, RoomGet};

type Result<T> = std::result::Result<T, Error>;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const APPLICATION_KEY_HEADER: &str = "hue-application-key";

/// Capability surface the resolver and toggle engine depend on.
///
/// Implementations return `Send` futures so they can be driven from any
/// handler task. Tests substitute an in-memory implementation.
pub trait BridgeClient {
    /// Fetch every room resource.
    fn get_rooms(&self) -> impl Future<Output = Result<Vec<RoomGet>>> + Send;

    /// Fetch every light resource.
    fn get_lights(&self) -> impl Future<Output = Result<Vec<LightGet>>> + Send;

    /// Fetch one device by id.
    fn get_device(&self, id: Uuid) -> impl Future<Output = Result<DeviceGet>> + Send;

    /// Fetch one grouped light by id.
    fn get_grouped_light(&self, id: Uuid) -> impl Future<Output = Result<GroupedLightGet>> + Send;

    /// Apply an update to one light.
    fn update_light(&self, id: Uuid, body: LightPut) -> impl Future<Output = Result<()>> + Send;

    /// Apply an update to one grouped light.
    fn update_grouped_light(
        &self,
        id: Uuid,
        body: GroupedLightPut,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Response envelope every v2 endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::Deserialize<'de>"))]
struct V2Reply<T> {
    #[serde(default)]
    data: Vec<T>,
    #[serde(default)]
    errors: Vec<V2Error>,
}

/// A single error entry in a v2 response envelope.
#[derive(Debug, Deserialize)]
struct V2Error {
    description: String,
}

/// A verified session against one bridge.
///
/// Created once at startup by [`HueClient::connect`] and cloned into every
/// request handler; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HueClient {
    http: reqwest::Client,
    base_url: String,
    application_key: String,
}

impl HueClient {
    /// Connect to the configured bridge, discovering one if no address is
    /// configured, and verify the session with a handshake read.
    ///
    /// Any failure here is fatal to startup: a service that cannot reach
    /// its bridge has nothing to serve.
    pub async fn connect(config: &Config) -> Result<Self> {
        let bridge_ip = config.hue_bridge_ip.trim();
        let address = if !bridge_ip.is_empty() {
            info!("Using bridge at {bridge_ip}");
            bridge_ip.to_string()
        } else {
            info!("Searching for bridge");
            let address = discover_bridges()
                .await?
                .into_iter()
                .next()
                .map(|bridge| bridge.internal_ip)
                .filter(|ip| !ip.is_empty())
                .ok_or(Error::NoBridgeFound)?;
            info!("Found hue bridge at {address}");
            address
        };

        let client = Self::with_address(&address, &config.hue_user)?;
        client.verify().await?;
        info!("Logged in at hue bridge");
        Ok(client)
    }

    /// Build an unverified client for the bridge at `address`.
    fn with_address(address: &str, application_key: &str) -> Result<Self> {
        // Bridges present a self-signed vendor certificate that never
        // verifies against a bare LAN address.
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| Error::http("client build", e))?;

        Ok(HueClient {
            http,
            base_url: format!("https://{address}"),
            application_key: application_key.to_string(),
        })
    }

    /// Handshake read proving the address and application key work.
    async fn verify(&self) -> Result<()> {
        self.get_resources::<serde_json::Value>(ResourceType::BridgeHome)
            .await
            .map(|_| ())
    }

    async fn get_resources<T: DeserializeOwned>(&self, rtype: ResourceType) -> Result<Vec<T>> {
        let action = format!("get {rtype}");
        let response = self
            .http
            .get(format!("{}/clip/v2/resource/{rtype}", self.base_url))
            .header(APPLICATION_KEY_HEADER, &self.application_key)
            .send()
            .await
            .map_err(|e| Error::http(&action, e))?;

        decode_reply(&action, response).await
    }

    async fn get_resource<T: DeserializeOwned>(&self, rtype: ResourceType, id: Uuid) -> Result<T> {
        let action = format!("get {rtype}");
        let response = self
            .http
            .get(format!("{}/clip/v2/resource/{rtype}/{id}", self.base_url))
            .header(APPLICATION_KEY_HEADER, &self.application_key)
            .send()
            .await
            .map_err(|e| Error::http(&action, e))?;

        decode_reply(&action, response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Api(format!("{rtype} {id} not in reply")))
    }

    async fn put_resource<B: serde::Serialize>(
        &self,
        rtype: ResourceType,
        id: Uuid,
        body: &B,
    ) -> Result<()> {
        let action = format!("update {rtype}");
        let response = self
            .http
            .put(format!("{}/clip/v2/resource/{rtype}/{id}", self.base_url))
            .header(APPLICATION_KEY_HEADER, &self.application_key)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::http(&action, e))?;

        decode_reply::<serde_json::Value>(&action, response)
            .await
            .map(|_| ())
    }
}

impl BridgeClient for HueClient {
    async fn get_rooms(&self) -> Result<Vec<RoomGet>> {
        self.get_resources(ResourceType::Room).await
    }

    async fn get_lights(&self) -> Result<Vec<LightGet>> {
        self.get_resources(ResourceType::Light).await
    }

    async fn get_device(&self, id: Uuid) -> Result<DeviceGet> {
        self.get_resource(ResourceType::Device, id).await
    }

    async fn get_grouped_light(&self, id: Uuid) -> Result<GroupedLightGet> {
        self.get_resource(ResourceType::GroupedLight, id).await
    }

    async fn update_light(&self, id: Uuid, body: LightPut) -> Result<()> {
        if !body.is_valid() {
            return Err(Error::NoAttribute);
        }
        self.put_resource(ResourceType::Light, id, &body).await
    }

    async fn update_grouped_light(&self, id: Uuid, body: GroupedLightPut) -> Result<()> {
        if !body.is_valid() {
            return Err(Error::NoAttribute);
        }
        self.put_resource(ResourceType::GroupedLight, id, &body)
            .await
    }
}

/// Unwrap a v2 envelope, turning bridge-reported errors into [`Error::Api`].
async fn decode_reply<T: DeserializeOwned>(
    action: &str,
    response: reqwest::Response,
) -> Result<Vec<T>> {
    let status = response.status();
    let reply: V2Reply<T> = match response.json().await {
        Ok(reply) => reply,
        // Error pages outside the envelope shape still carry the status.
        Err(_) if !status.is_success() => {
            return Err(Error::Api(format!("{action} returned status {status}")));
        }
        Err(err) => return Err(Error::http(action, err)),
    };

    if !reply.errors.is_empty() {
        return Err(Error::api(
            reply.errors.into_iter().map(|e| e.description).collect(),
        ));
    }
    if !status.is_success() {
        return Err(Error::Api(format!("{action} returned status {status}")));
    }
    Ok(reply.data)
}
