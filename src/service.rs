//! Domain operations the HTTP layer calls.

use crate::client::BridgeClient;
use crate::errors::Error;
use crate::resolver::{Group, Resolver};
use crate::toggle::ToggleEngine;
use crate::types::LegacyLightId;

type Result<T> = std::result::Result<T, Error>;

/// Facade over a resolver and a toggle engine.
///
/// Built once at startup and cloned into every request handler.
#[derive(Debug, Clone)]
pub struct LightingService<C> {
    resolver: Resolver<C>,
    engine: ToggleEngine<C>,
}

impl<C: BridgeClient + Clone> LightingService<C> {
    pub fn new(client: C, restore_previous_light_state: bool) -> Self {
        LightingService {
            resolver: Resolver::new(client.clone()),
            engine: ToggleEngine::new(client, restore_previous_light_state),
        }
    }

    /// Toggle the light carrying the given legacy id.
    pub async fn toggle_light(&self, id: LegacyLightId) -> Result<()> {
        let light = self.resolver.light_by_legacy_id(id).await?;
        self.engine.toggle_light(&light).await
    }

    /// Toggle every light in the named room through its grouped light.
    pub async fn toggle_room(&self, name: &str) -> Result<()> {
        let room = self.resolver.room_by_name(name).await?;
        let grouped_id = room.grouped_light_id().ok_or(Error::NoGroupedLight)?;
        let grouped = self.resolver.grouped_light(grouped_id).await?;
        self.engine.toggle_grouped_light(&grouped).await
    }

    /// Full room and light listing, sorted for stable output.
    pub async fn groups(&self) -> Result<Vec<Group>> {
        self.resolver.list_groups().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::On;
    use crate::testing::{FakeBridge, grouped_light, grouped_ref, light, room, uid};

    #[tokio::test]
    async fn test_toggle_light_by_legacy_id() {
        let bridge = FakeBridge::new().with_light(light(uid(1), Some("/lights/7"), "Desk", true));
        let service = LightingService::new(bridge.clone(), false);

        service
            .toggle_light(LegacyLightId::create(7).unwrap())
            .await
            .unwrap();

        let updates = bridge.light_updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1.on, Some(On { on: false }));
    }

    #[tokio::test]
    async fn test_toggle_room_reads_grouped_state_fresh() {
        let bridge = FakeBridge::new()
            .with_room(room(uid(10), "Kitchen", vec![], vec![grouped_ref(uid(5))]))
            .with_grouped_light(grouped_light(uid(5), true));
        let service = LightingService::new(bridge.clone(), false);

        service.toggle_room("Kitchen").await.unwrap();

        let updates = bridge.grouped_updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].0, uid(5));
        assert_eq!(updates[0].1.on, Some(On { on: false }));
    }

    #[tokio::test]
    async fn test_toggle_room_without_grouped_light() {
        let bridge = FakeBridge::new().with_room(room(uid(10), "Kitchen", vec![], vec![]));
        let service = LightingService::new(bridge, false);

        let err = service.toggle_room("Kitchen").await.unwrap_err();
        assert_eq!(err.to_string(), "group has no grouped_light service");
    }

    #[tokio::test]
    async fn test_toggle_unknown_room_carries_the_name() {
        let bridge = FakeBridge::new().with_room(room(uid(10), "Bedroom", vec![], vec![]));
        let service = LightingService::new(bridge, false);

        let err = service.toggle_room("Kitchen").await.unwrap_err();
        assert_eq!(err.to_string(), "no room with name \"Kitchen\" found");
    }
}
