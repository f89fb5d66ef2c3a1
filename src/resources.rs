//! Resource types read from the bridge's CLIP v2 API.

use serde::{Deserialize, Serialize};
use strum_macros::Display;
use uuid::Uuid;

use crate::types::LegacyLightId;

/// Kinds of bridge resources this crate acts on.
///
/// The display form matches the path segment the v2 API uses for the
/// resource kind (e.g. `grouped_light`).
#[derive(Debug, Display, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResourceType {
    Light,
    Room,
    Device,
    GroupedLight,
    BridgeHome,
    /// Any resource kind this crate does not act on.
    #[serde(other)]
    Unknown,
}

/// Reference to another resource, as embedded in `children` and `services`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct ResourceIdentifier {
    pub rid: Uuid,
    pub rtype: ResourceType,
}

/// Human-facing metadata attached to most resources.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Metadata {
    #[serde(default)]
    pub name: Option<String>,
}

/// On/off state fragment, shared by reads and updates.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct On {
    pub on: bool,
}

/// Dimming state fragment, shared by reads and updates.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Dimming {
    pub brightness: f64,
}

/// A light resource as reported by the bridge.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LightGet {
    pub id: Uuid,
    #[serde(default)]
    pub id_v1: Option<String>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub on: Option<On>,
    #[serde(default)]
    pub dimming: Option<Dimming>,
}

impl LightGet {
    /// Display name, or an empty string when the bridge reports none.
    pub fn name(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|metadata| metadata.name.as_deref())
            .unwrap_or("")
    }

    /// Whether the light is currently on. Missing state counts as off.
    pub fn is_on(&self) -> bool {
        self.on.is_some_and(|on| on.on)
    }

    /// The legacy v1 id, when the bridge still reports a mappable one.
    pub fn legacy_id(&self) -> Option<LegacyLightId> {
        self.id_v1.as_deref().and_then(LegacyLightId::from_id_v1)
    }
}

/// A room resource as reported by the bridge.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RoomGet {
    pub id: Uuid,
    #[serde(default)]
    pub id_v1: Option<String>,
    #[serde(default)]
    pub children: Vec<ResourceIdentifier>,
    #[serde(default)]
    pub services: Vec<ResourceIdentifier>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl RoomGet {
    /// Display name, or an empty string when the bridge reports none.
    pub fn name(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|metadata| metadata.name.as_deref())
            .unwrap_or("")
    }

    /// The room's grouped light service, when it exposes one.
    pub fn grouped_light_id(&self) -> Option<Uuid> {
        self.services
            .iter()
            .find(|service| service.rtype == ResourceType::GroupedLight)
            .map(|service| service.rid)
    }
}

/// A device resource as reported by the bridge.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeviceGet {
    pub id: Uuid,
    #[serde(default)]
    pub services: Vec<ResourceIdentifier>,
}

impl DeviceGet {
    /// Ids of the light services this device exposes.
    pub fn light_service_ids(&self) -> Vec<Uuid> {
        self.services
            .iter()
            .filter(|service| service.rtype == ResourceType::Light)
            .map(|service| service.rid)
            .collect()
    }
}

/// A grouped light resource, switching all lights of a room as one unit.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GroupedLightGet {
    pub id: Uuid,
    #[serde(default)]
    pub id_v1: Option<String>,
    #[serde(default)]
    pub on: Option<On>,
}

impl GroupedLightGet {
    /// Whether any light in the group is currently on.
    pub fn is_on(&self) -> bool {
        self.on.is_some_and(|on| on.on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_light_from_json() {
        let light: LightGet = serde_json::from_value(json!({
            "id": "7f2a4e5b-1111-4222-8333-444455556666",
            "id_v1": "/lights/7",
            "type": "light",
            "metadata": { "name": "Desk", "archetype": "sultan_bulb" },
            "on": { "on": true },
            "dimming": { "brightness": 58.27, "min_dim_level": 0.2 }
        }))
        .unwrap();

        assert_eq!(light.name(), "Desk");
        assert!(light.is_on());
        assert_eq!(light.legacy_id().map(|id| id.value()), Some(7));
    }

    #[test]
    fn test_light_missing_state_counts_as_off() {
        let light: LightGet = serde_json::from_value(json!({
            "id": "7f2a4e5b-1111-4222-8333-444455556666"
        }))
        .unwrap();

        assert!(!light.is_on());
        assert_eq!(light.name(), "");
        assert_eq!(light.legacy_id(), None);
    }

    #[test]
    fn test_light_foreign_id_v1_is_not_mappable() {
        let light: LightGet = serde_json::from_value(json!({
            "id": "7f2a4e5b-1111-4222-8333-444455556666",
            "id_v1": "/groups/3"
        }))
        .unwrap();

        assert_eq!(light.legacy_id(), None);
    }

    #[test]
    fn test_room_grouped_light_service() {
        let room: RoomGet = serde_json::from_value(json!({
            "id": "aaaaaaaa-0000-4000-8000-000000000001",
            "metadata": { "name": "Kitchen" },
            "services": [
                { "rid": "bbbbbbbb-0000-4000-8000-000000000002", "rtype": "scene" },
                { "rid": "cccccccc-0000-4000-8000-000000000003", "rtype": "grouped_light" }
            ]
        }))
        .unwrap();

        assert_eq!(room.name(), "Kitchen");
        assert_eq!(
            room.grouped_light_id(),
            Some("cccccccc-0000-4000-8000-000000000003".parse().unwrap())
        );
    }

    #[test]
    fn test_room_without_grouped_light_service() {
        let room: RoomGet = serde_json::from_value(json!({
            "id": "aaaaaaaa-0000-4000-8000-000000000001",
            "services": []
        }))
        .unwrap();

        assert_eq!(room.grouped_light_id(), None);
    }

    #[test]
    fn test_unknown_resource_type_deserializes() {
        let reference: ResourceIdentifier = serde_json::from_value(json!({
            "rid": "dddddddd-0000-4000-8000-000000000004",
            "rtype": "zigbee_connectivity"
        }))
        .unwrap();

        assert_eq!(reference.rtype, ResourceType::Unknown);
    }

    #[test]
    fn test_resource_type_path_segment() {
        assert_eq!(ResourceType::GroupedLight.to_string(), "grouped_light");
        assert_eq!(ResourceType::BridgeHome.to_string(), "bridge_home");
    }

    #[test]
    fn test_device_light_services() {
        let device: DeviceGet = serde_json::from_value(json!({
            "id": "eeeeeeee-0000-4000-8000-000000000005",
            "services": [
                { "rid": "11111111-0000-4000-8000-000000000006", "rtype": "light" },
                { "rid": "22222222-0000-4000-8000-000000000007", "rtype": "device_power" },
                { "rid": "33333333-0000-4000-8000-000000000008", "rtype": "light" }
            ]
        }))
        .unwrap();

        let ids = device.light_service_ids();
        assert_eq!(ids.len(), 2);
    }
}
