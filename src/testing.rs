//! In-memory bridge fixtures shared by the unit tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::client::BridgeClient;
use crate::errors::Error;
use crate::payload::{GroupedLightPut, LightPut};
use crate::resources::{
    DeviceGet, GroupedLightGet, LightGet, Metadata, On, ResourceIdentifier, ResourceType, RoomGet,
};

type Result<T> = std::result::Result<T, Error>;

/// A bridge serving canned resources and recording every update.
///
/// Clones share the recorded updates, so a test can hand clones to the
/// code under test and still inspect what was written.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeBridge {
    rooms: Vec<RoomGet>,
    lights: Vec<LightGet>,
    devices: Vec<DeviceGet>,
    grouped_lights: Vec<GroupedLightGet>,
    failing_devices: HashSet<Uuid>,
    fail_rooms: bool,
    fail_lights: bool,
    reads: Arc<Mutex<usize>>,
    light_updates: Arc<Mutex<Vec<(Uuid, LightPut)>>>,
    grouped_updates: Arc<Mutex<Vec<(Uuid, GroupedLightPut)>>>,
}

impl FakeBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_room(mut self, room: RoomGet) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn with_light(mut self, light: LightGet) -> Self {
        self.lights.push(light);
        self
    }

    pub fn with_device(mut self, device: DeviceGet) -> Self {
        self.devices.push(device);
        self
    }

    pub fn with_grouped_light(mut self, grouped: GroupedLightGet) -> Self {
        self.grouped_lights.push(grouped);
        self
    }

    pub fn with_failing_device(mut self, id: Uuid) -> Self {
        self.failing_devices.insert(id);
        self
    }

    pub fn with_failing_rooms(mut self) -> Self {
        self.fail_rooms = true;
        self
    }

    pub fn with_failing_lights(mut self) -> Self {
        self.fail_lights = true;
        self
    }

    pub fn light_updates(&self) -> Vec<(Uuid, LightPut)> {
        self.light_updates.lock().unwrap().clone()
    }

    pub fn grouped_updates(&self) -> Vec<(Uuid, GroupedLightPut)> {
        self.grouped_updates.lock().unwrap().clone()
    }

    /// How many read calls the bridge has served.
    pub fn reads(&self) -> usize {
        *self.reads.lock().unwrap()
    }

    fn count_read(&self) {
        *self.reads.lock().unwrap() += 1;
    }
}

impl BridgeClient for FakeBridge {
    async fn get_rooms(&self) -> Result<Vec<RoomGet>> {
        self.count_read();
        if self.fail_rooms {
            return Err(Error::Api("rooms unavailable".to_string()));
        }
        Ok(self.rooms.clone())
    }

    async fn get_lights(&self) -> Result<Vec<LightGet>> {
        self.count_read();
        if self.fail_lights {
            return Err(Error::Api("lights unavailable".to_string()));
        }
        Ok(self.lights.clone())
    }

    async fn get_device(&self, id: Uuid) -> Result<DeviceGet> {
        self.count_read();
        if self.failing_devices.contains(&id) {
            return Err(Error::Api(format!("device {id} unreachable")));
        }
        self.devices
            .iter()
            .find(|device| device.id == id)
            .cloned()
            .ok_or_else(|| Error::Api(format!("device {id} not in reply")))
    }

    async fn get_grouped_light(&self, id: Uuid) -> Result<GroupedLightGet> {
        self.count_read();
        self.grouped_lights
            .iter()
            .find(|grouped| grouped.id == id)
            .cloned()
            .ok_or_else(|| Error::Api(format!("grouped_light {id} not in reply")))
    }

    async fn update_light(&self, id: Uuid, body: LightPut) -> Result<()> {
        if !body.is_valid() {
            return Err(Error::NoAttribute);
        }
        self.light_updates.lock().unwrap().push((id, body));
        Ok(())
    }

    async fn update_grouped_light(&self, id: Uuid, body: GroupedLightPut) -> Result<()> {
        if !body.is_valid() {
            return Err(Error::NoAttribute);
        }
        self.grouped_updates.lock().unwrap().push((id, body));
        Ok(())
    }
}

/// Deterministic uuid for fixture wiring.
pub(crate) fn uid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub(crate) fn light_ref(id: Uuid) -> ResourceIdentifier {
    ResourceIdentifier {
        rid: id,
        rtype: ResourceType::Light,
    }
}

pub(crate) fn device_ref(id: Uuid) -> ResourceIdentifier {
    ResourceIdentifier {
        rid: id,
        rtype: ResourceType::Device,
    }
}

pub(crate) fn grouped_ref(id: Uuid) -> ResourceIdentifier {
    ResourceIdentifier {
        rid: id,
        rtype: ResourceType::GroupedLight,
    }
}

pub(crate) fn light(id: Uuid, id_v1: Option<&str>, name: &str, on: bool) -> LightGet {
    LightGet {
        id,
        id_v1: id_v1.map(String::from),
        metadata: Some(Metadata {
            name: Some(name.to_string()),
        }),
        on: Some(On { on }),
        dimming: None,
    }
}

pub(crate) fn room(
    id: Uuid,
    name: &str,
    children: Vec<ResourceIdentifier>,
    services: Vec<ResourceIdentifier>,
) -> RoomGet {
    RoomGet {
        id,
        id_v1: None,
        children,
        services,
        metadata: Some(Metadata {
            name: Some(name.to_string()),
        }),
    }
}

pub(crate) fn device(id: Uuid, light_ids: Vec<Uuid>) -> DeviceGet {
    DeviceGet {
        id,
        services: light_ids.into_iter().map(light_ref).collect(),
    }
}

pub(crate) fn grouped_light(id: Uuid, on: bool) -> GroupedLightGet {
    GroupedLightGet {
        id,
        id_v1: None,
        on: Some(On { on }),
    }
}
