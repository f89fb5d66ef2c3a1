use crate::types::LegacyLightId;

/// All error types that can occur when resolving and toggling lights.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read the configuration file from disk.
    #[error("read config file {path:?}: {err:?}")]
    ConfigRead { path: String, err: std::io::Error },

    /// The configuration file is not valid JSON.
    #[error("decode config file {path:?}: {err:?}")]
    ConfigDecode {
        path: String,
        err: serde_json::Error,
    },

    /// No application key is configured.
    #[error("hueUser is required")]
    MissingUser,

    /// The configured listen port is outside the usable range.
    #[error("serverPort must be between 1 and 65535")]
    PortOutOfRange,

    /// Bridge discovery returned no usable bridge.
    #[error("discovered no bridge with a usable address")]
    NoBridgeFound,

    /// An HTTP request to the bridge (or the discovery endpoint) failed.
    #[error("http {action} error: {err:?}")]
    Http { action: String, err: reqwest::Error },

    /// The bridge answered with its own error descriptions.
    #[error("bridge api error: {0}")]
    Api(String),

    /// The requested room name is empty, too long, or contains a slash.
    #[error("given group name is not valid")]
    InvalidRoomName,

    /// The requested light id is not a positive integer.
    #[error("given light id is not valid")]
    InvalidLightId,

    /// No room with the given name exists on the bridge.
    #[error("no room with name {0:?} found")]
    RoomNotFound(String),

    /// No light carries the given legacy id.
    #[error("light with id {0} not found")]
    LightNotFound(LegacyLightId),

    /// The room exists but exposes no grouped light to switch.
    #[error("group has no grouped_light service")]
    NoGroupedLight,

    /// Attempted to send an update with no attributes set.
    #[error("invalid update; no attributes set")]
    NoAttribute,

    /// Failed to bind or serve the HTTP listener.
    #[error("server {action} error: {err:?}")]
    Server { action: String, err: std::io::Error },
}

impl Error {
    /// Create a new config read error
    pub fn config_read(path: &str, err: std::io::Error) -> Self {
        Error::ConfigRead {
            path: path.to_string(),
            err,
        }
    }

    /// Create a new config decode error
    pub fn config_decode(path: &str, err: serde_json::Error) -> Self {
        Error::ConfigDecode {
            path: path.to_string(),
            err,
        }
    }

    /// Create a new http error
    pub fn http(action: &str, err: reqwest::Error) -> Self {
        Error::Http {
            action: action.to_string(),
            err,
        }
    }

    /// Create a new bridge api error from the bridge's error descriptions
    pub fn api(descriptions: Vec<String>) -> Self {
        Error::Api(descriptions.join("; "))
    }

    /// Create a new room not found error
    pub fn room_not_found(name: &str) -> Self {
        Error::RoomNotFound(name.to_string())
    }

    /// Create a new server error
    pub fn server(action: &str, err: std::io::Error) -> Self {
        Error::Server {
            action: action.to_string(),
            err,
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
