//! Brightness control for Hue lights.

use serde::{Deserialize, Serialize};

/// Brightness percentage from 0 to 100.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Brightness {
    pub(crate) value: f64,
}

impl Brightness {
    const MIN: f64 = 0.0;
    const MAX: f64 = 100.0;

    /// Full brightness (100%), the level applied when a light turns on
    /// and the restore-previous-state policy is disabled.
    pub fn full() -> Self {
        Brightness { value: Self::MAX }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns None if value is outside valid range (0-100).
    pub fn create(value: f64) -> Option<Self> {
        if Self::is_valid(value) {
            Some(Brightness { value })
        } else {
            None
        }
    }

    fn is_valid(value: f64) -> bool {
        (Self::MIN..=Self::MAX).contains(&value)
    }
}
