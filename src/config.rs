use serde::Deserialize;

fn default_discovery() -> bool {
    true
}

fn default_discovery_interval_secs() -> u64 {
    60
}

/// Platform configuration as supplied by the host's config file
///
/// ```json
/// {
///     "name": "Blink System",
///     "username": "me@example.com",
///     "password": "PASSWORD",
///     "deviceId": "A made up device id",
///     "deviceName": "A made up device name"
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeConfig {
    /// Display name for the platform; also a component of every accessory uuid
    pub name: String,

    /// Blink account credentials, passed through to the gateway
    pub username: String,
    pub password: String,

    /// Device identity presented to the remote API
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub device_name: Option<String>,

    /// Run discovery periodically (false = startup-only)
    #[serde(default = "default_discovery")]
    pub discovery: bool,

    /// Seconds between periodic discovery cycles
    #[serde(default = "default_discovery_interval_secs")]
    pub discovery_interval_secs: u64,
}

impl BridgeConfig {
    /// Minimal config for a named platform
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            password: password.into(),
            device_id: None,
            device_name: None,
            discovery: default_discovery(),
            discovery_interval_secs: default_discovery_interval_secs(),
        }
    }
}
