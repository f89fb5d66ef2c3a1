//! # hue_toggle_rs
//!
//! An HTTP toggle service for Philips Hue lights, backed by the bridge's
//! CLIP v2 REST API.
//!
//! This crate exposes **one-call toggle endpoints**: a single GET or POST flips
//! a light or a whole room between on and off. The server reads the current
//! state from the bridge and writes back the opposite, so callers never need to
//! track state themselves. It is meant to run on your LAN and be driven by
//! shortcuts or automation rules that can only fire a plain HTTP request.
//!
//! ## Quick Start
//!
//! ```ignore
//! use hue_toggle_rs::{Config, HueClient, LightingService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hue_toggle_rs::Error> {
//!     // Read config.json, find the bridge, and verify the application key
//!     let config = Config::load("config.json")?;
//!     let client = HueClient::connect(&config).await?;
//!
//!     let service = LightingService::new(client, config.restore_previous_light_state);
//!     hue_toggle_rs::server::serve(service, config.port()).await
//! }
//! ```
//!
//! ## Features
//!
//! - **Light Toggle**: flip a single light addressed by its legacy numeric id
//!   with [`LegacyLightId`]
//! - **Room Toggle**: flip every light in a room at once through the room's
//!   grouped light service
//! - **Turn-on Brightness**: lights come on at full [`Brightness`] unless the
//!   service is configured to keep the previous level
//! - **Listings**: JSON views of rooms and lights plus an HTML status page
//!   with ready-made toggle URLs
//! - **Discovery**: find the bridge on your network with [`discover_bridges`]
//!
//! ## Communication
//!
//! All communication with the bridge happens over HTTPS against the CLIP v2
//! resource API, authenticated with the `hue-application-key` header. Bridges
//! present a self-signed certificate, so certificate verification is skipped
//! for the bridge connection. An application key is created by pressing the
//! bridge's link button and registering through the v1 API.

mod client;
mod config;
mod discovery;
mod errors;
mod payload;
mod resolver;
mod resources;
pub mod server;
mod service;
mod toggle;
mod types;

#[cfg(test)]
mod testing;

// Re-export public API
pub use client::{BridgeClient, HueClient};
pub use config::Config;
pub use discovery::{DiscoveredBridge, discover_bridges};
pub use errors::Error;
pub use payload::{GroupedLightPut, LightPut};
pub use resolver::{Group, LightEntry, Resolver};
pub use resources::{
    DeviceGet, Dimming, GroupedLightGet, LightGet, Metadata, On, ResourceIdentifier, ResourceType,
    RoomGet,
};
pub use service::LightingService;
pub use toggle::ToggleEngine;
pub use types::{Brightness, LegacyLightId};
