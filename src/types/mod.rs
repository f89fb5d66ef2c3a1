//! Value types for light identifiers and control parameters.

mod brightness;
mod legacy;

pub use brightness::Brightness;
pub use legacy::LegacyLightId;
