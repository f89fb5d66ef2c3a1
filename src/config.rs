//! Runtime configuration loaded from disk.

use serde::{Deserialize, Serialize};

use crate::errors::Error;

type Result<T> = std::result::Result<T, Error>;

/// Runtime settings, read from a JSON file (`config.json` by default).
///
/// Every field may be omitted; [`Config::validate`] decides which ones are
/// actually required.
///
/// # Examples
///
/// ```
/// use hue_toggle_rs::Config;
///
/// let config: Config = serde_json::from_str(
///     r#"{ "hueUser": "app-key", "serverPort": 8080 }"#,
/// ).unwrap();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.hue_bridge_ip, "");
/// assert_eq!(config.restore_previous_light_state, false);
/// ```
#[derive(Default, Debug, Serialize, Deserialize, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Bridge address. Empty means discover one on the local network.
    pub hue_bridge_ip: String,
    /// Application key issued by the bridge at pairing time.
    pub hue_user: String,
    /// Port the HTTP server listens on.
    pub server_port: i64,
    /// When set, a light turning on resumes its previous brightness
    /// instead of being forced to 100%.
    pub restore_previous_light_state: bool,
}

impl Config {
    /// Read and validate configuration from disk.
    pub fn load(path: &str) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|err| Error::config_read(path, err))?;
        let config: Config =
            serde_json::from_str(&content).map_err(|err| Error::config_decode(path, err))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the required configuration fields.
    pub fn validate(&self) -> Result<()> {
        if self.hue_user.is_empty() {
            return Err(Error::MissingUser);
        }
        if !(1..=65535).contains(&self.server_port) {
            return Err(Error::PortOutOfRange);
        }
        Ok(())
    }

    /// Listen port as a socket-usable value. Meaningful only once
    /// [`Config::validate`] has passed.
    pub fn port(&self) -> u16 {
        self.server_port as u16
    }
}
