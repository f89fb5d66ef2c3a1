//! Toggle decisions: read the reported state, write the opposite.

use log::info;

use crate::client::BridgeClient;
use crate::errors::Error;
use crate::payload::{GroupedLightPut, LightPut};
use crate::resources::{GroupedLightGet, LightGet};
use crate::types::Brightness;

type Result<T> = std::result::Result<T, Error>;

/// Computes and writes the next state for a light or a grouped light.
///
/// Each call flips exactly the state observed at call time; concurrent
/// toggles of the same target race on the bridge and the last write wins.
#[derive(Debug, Clone)]
pub struct ToggleEngine<C> {
    client: C,
    restore_previous_light_state: bool,
}

impl<C: BridgeClient> ToggleEngine<C> {
    pub fn new(client: C, restore_previous_light_state: bool) -> Self {
        ToggleEngine {
            client,
            restore_previous_light_state,
        }
    }

    /// Flip one light based on its reported state.
    ///
    /// Turning on forces full brightness unless the restore policy is set.
    /// Turning off never touches brightness.
    pub async fn toggle_light(&self, light: &LightGet) -> Result<()> {
        if light.is_on() {
            let mut body = LightPut::new();
            body.on(false);
            self.client.update_light(light.id, body).await?;
            info!("Light found - toggled to off");
            return Ok(());
        }

        let mut body = LightPut::new();
        body.on(true);
        if !self.restore_previous_light_state {
            body.brightness(&Brightness::full());
        }
        self.client.update_light(light.id, body).await?;
        info!("Light found - toggled to on");
        Ok(())
    }

    /// Flip a grouped light based on its aggregate "any member on" state.
    pub async fn toggle_grouped_light(&self, grouped: &GroupedLightGet) -> Result<()> {
        if grouped.is_on() {
            let mut body = GroupedLightPut::new();
            body.on(false);
            self.client.update_grouped_light(grouped.id, body).await?;
            info!("Group found - any lights on toggling to off");
            return Ok(());
        }

        let mut body = GroupedLightPut::new();
        body.on(true);
        if !self.restore_previous_light_state {
            body.brightness(&Brightness::full());
        }
        self.client.update_grouped_light(grouped.id, body).await?;
        info!("Group found - all lights off toggling to on");
        Ok(())
    }
}
