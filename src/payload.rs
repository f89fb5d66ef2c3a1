//! Update payloads sent to the bridge.

use serde::{Deserialize, Serialize};

use crate::resources::{Dimming, On};
use crate::types::Brightness;

/// An update payload for a single light.
///
/// Payloads carry only the attributes that should change; everything left
/// unset keeps its current value on the bridge.
///
/// # Examples
///
/// ```
/// use hue_toggle_rs::{Brightness, LightPut};
///
/// let mut body = LightPut::new();
/// body.on(true);
/// body.brightness(&Brightness::full());
/// assert_eq!(body.is_valid(), true);
/// ```
#[serde_with::skip_serializing_none]
#[derive(Default, Debug, Serialize, Deserialize, Clone)]
pub struct LightPut {
    pub(crate) on: Option<On>,
    pub(crate) dimming: Option<Dimming>,
}

impl LightPut {
    /// Create a new empty payload.
    ///
    /// At least one attribute must be set for the payload to be valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_toggle_rs::LightPut;
    ///
    /// let body = LightPut::new();
    /// assert_eq!(body.is_valid(), false);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if this payload contains at least one attribute.
    pub fn is_valid(&self) -> bool {
        self.on.is_some() || self.dimming.is_some()
    }

    /// Set the on/off state.
    pub fn on(&mut self, on: bool) {
        self.on = Some(On { on });
    }

    /// Set the brightness level.
    pub fn brightness(&mut self, brightness: &Brightness) {
        self.dimming = Some(Dimming {
            brightness: brightness.value(),
        });
    }
}

/// An update payload for a grouped light, applied to every light it covers.
///
/// # Examples
///
/// ```
/// use hue_toggle_rs::GroupedLightPut;
///
/// let mut body = GroupedLightPut::new();
/// body.on(false);
/// assert_eq!(body.is_valid(), true);
/// ```
#[serde_with::skip_serializing_none]
#[derive(Default, Debug, Serialize, Deserialize, Clone)]
pub struct GroupedLightPut {
    pub(crate) on: Option<On>,
    pub(crate) dimming: Option<Dimming>,
}

impl GroupedLightPut {
    /// Create a new empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if this payload contains at least one attribute.
    pub fn is_valid(&self) -> bool {
        self.on.is_some() || self.dimming.is_some()
    }

    /// Set the on/off state.
    pub fn on(&mut self, on: bool) {
        self.on = Some(On { on });
    }

    /// Set the brightness level.
    pub fn brightness(&mut self, brightness: &Brightness) {
        self.dimming = Some(Dimming {
            brightness: brightness.value(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unset_attributes_are_omitted() {
        let mut body = LightPut::new();
        body.on(false);

        let wire = serde_json::to_value(&body).unwrap();
        assert_eq!(wire, json!({ "on": { "on": false } }));
    }

    #[test]
    fn test_on_with_brightness() {
        let mut body = LightPut::new();
        body.on(true);
        body.brightness(&Brightness::full());

        let wire = serde_json::to_value(&body).unwrap();
        assert_eq!(
            wire,
            json!({ "on": { "on": true }, "dimming": { "brightness": 100.0 } })
        );
    }

    #[test]
    fn test_grouped_payload_shape_matches_light_payload() {
        let mut body = GroupedLightPut::new();
        body.on(true);
        body.brightness(&Brightness::create(40.0).unwrap());

        let wire = serde_json::to_value(&body).unwrap();
        assert_eq!(
            wire,
            json!({ "on": { "on": true }, "dimming": { "brightness": 40.0 } })
        );
    }

    #[test]
    fn test_empty_payload_is_invalid() {
        assert!(!GroupedLightPut::new().is_valid());
    }
}
