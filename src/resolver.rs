//! Resolution of caller-facing identifiers onto bridge resources.

use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use serde::Serialize;
use uuid::Uuid;

use crate::client::BridgeClient;
use crate::errors::Error;
use crate::resources::{GroupedLightGet, LightGet, ResourceType, RoomGet};
use crate::types::LegacyLightId;

type Result<T> = std::result::Result<T, Error>;

/// A room and its lights, in listing form.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub lights: Vec<LightEntry>,
}

/// One light in a listing.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct LightEntry {
    pub name: String,
    pub id: LegacyLightId,
}

/// Maps room names and legacy light ids onto the bridge's resource graph.
///
/// Holds nothing besides the client; every lookup reads fresh resources.
#[derive(Debug, Clone)]
pub struct Resolver<C> {
    client: C,
}

impl<C: BridgeClient> Resolver<C> {
    pub fn new(client: C) -> Self {
        Resolver { client }
    }

    /// Find the light carrying the given legacy id.
    ///
    /// Lights whose `id_v1` cannot be mapped are skipped, never errors.
    pub async fn light_by_legacy_id(&self, id: LegacyLightId) -> Result<LightGet> {
        let lights = self.client.get_lights().await?;
        lights
            .into_iter()
            .find(|light| light.legacy_id() == Some(id))
            .ok_or(Error::LightNotFound(id))
    }

    /// Find the room with exactly the given name.
    pub async fn room_by_name(&self, name: &str) -> Result<RoomGet> {
        let rooms = self.client.get_rooms().await?;
        rooms
            .into_iter()
            .find(|room| room.name() == name)
            .ok_or_else(|| Error::room_not_found(name))
    }

    /// Fetch the grouped light behind an id obtained from a room, as a
    /// fresh read of its aggregate state.
    pub async fn grouped_light(&self, id: Uuid) -> Result<GroupedLightGet> {
        self.client.get_grouped_light(id).await
    }

    /// Collect the ids of every light in `room`: direct light children plus
    /// lights owned through a device child. Devices that fail to load are
    /// skipped.
    pub async fn member_light_ids(&self, room: &RoomGet) -> HashSet<Uuid> {
        let mut ids = HashSet::new();
        let mut device_ids = Vec::new();

        for child in &room.children {
            match child.rtype {
                ResourceType::Light => {
                    ids.insert(child.rid);
                }
                ResourceType::Device => device_ids.push(child.rid),
                _ => {}
            }
        }

        let devices = join_all(device_ids.into_iter().map(|id| self.client.get_device(id))).await;
        for device in devices.into_iter().flatten() {
            ids.extend(device.light_service_ids());
        }

        ids
    }

    /// Build the full room and light listing, rooms sorted by name and
    /// lights sorted by (name, id).
    ///
    /// Member lights that no longer resolve, or whose `id_v1` is not
    /// mappable, are dropped from the listing.
    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        let rooms = self.client.get_rooms().await?;
        let lights = self.client.get_lights().await?;
        let lights_by_id: HashMap<Uuid, &LightGet> =
            lights.iter().map(|light| (light.id, light)).collect();

        let mut groups = Vec::with_capacity(rooms.len());
        for room in &rooms {
            let mut entries = Vec::new();
            for light_id in self.member_light_ids(room).await {
                let Some(light) = lights_by_id.get(&light_id) else {
                    continue;
                };
                let Some(id) = light.legacy_id() else {
                    continue;
                };
                entries.push(LightEntry {
                    name: light.name().to_string(),
                    id,
                });
            }

            entries.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            groups.push(Group {
                name: room.name().to_string(),
                lights: entries,
            });
        }

        groups.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(groups)
    }
}
