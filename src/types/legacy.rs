//! Legacy (v1) light identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric light id carried over from the bridge's v1 API.
///
/// The v2 API addresses every resource by UUID but still reports the old
/// `/lights/{n}` path in the `id_v1` field. The numeric part is the only
/// light identifier exposed to HTTP callers. Ids are always positive.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct LegacyLightId {
    pub(crate) value: u64,
}

impl LegacyLightId {
    /// Create a new id with the given value.
    ///
    /// Returns `None` if value is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_toggle_rs::LegacyLightId;
    ///
    /// assert!(LegacyLightId::create(0).is_none());
    /// assert!(LegacyLightId::create(7).is_some());
    /// ```
    pub fn create(value: u64) -> Option<Self> {
        if value > 0 {
            Some(LegacyLightId { value })
        } else {
            None
        }
    }

    /// Get the numeric value.
    pub fn value(&self) -> u64 {
        self.value
    }

    /// Extract the numeric id from a v1 resource path.
    ///
    /// Returns `None` when the path is not a light path or its id part is
    /// not a positive integer. Resources without a usable `id_v1` are
    /// expected on newer bridges, so this is never an error by itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_toggle_rs::LegacyLightId;
    ///
    /// assert_eq!(LegacyLightId::from_id_v1("/lights/7").map(|id| id.value()), Some(7));
    /// assert!(LegacyLightId::from_id_v1("/groups/7").is_none());
    /// assert!(LegacyLightId::from_id_v1("/lights/").is_none());
    /// assert!(LegacyLightId::from_id_v1("/lights/abc").is_none());
    /// ```
    pub fn from_id_v1(path: &str) -> Option<Self> {
        let digits = path.strip_prefix("/lights/")?;
        digits.parse().ok().and_then(Self::create)
    }
}

impl fmt::Display for LegacyLightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for LegacyLightId {
    type Err = String;

    /// Parse from a decimal string (e.g., "7").
    fn from_str(s: &str) -> Result<Self, String> {
        s.parse::<u64>()
            .ok()
            .and_then(Self::create)
            .ok_or_else(|| "expected a positive integer".into())
    }
}
