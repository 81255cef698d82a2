use serde::{Deserialize, Deserializer};
use service_core::config as core_config;
use service_core::error::AppError;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BLINK1_SERVER_URL: &str = "http://blink1-server.blink1-server.svc.cluster.local";

/// Settings resolved once at startup from `PORT` and `BLINK1_SERVER_URL`.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_port", deserialize_with = "deserialize_port")]
    pub port: u16,
    #[serde(default = "default_blink1_server_url")]
    pub blink1_server_url: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Integer first, then range: `PORT=abc` and `PORT=70000` both fail before
/// anything binds.
fn deserialize_port<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u16, D::Error> {
    let raw = i64::deserialize(deserializer)?;
    u16::try_from(raw)
        .map_err(|_| serde::de::Error::custom(format!("port {} is out of range 0-65535", raw)))
}

fn default_blink1_server_url() -> String {
    DEFAULT_BLINK1_SERVER_URL.to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            blink1_server_url: DEFAULT_BLINK1_SERVER_URL.to_string(),
        }
    }
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        core_config::load::<Self>().map(Self::normalized)
    }

    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        core_config::from_vars::<Self, _, _, _>(vars).map(Self::normalized)
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.blink1_server_url.trim_end_matches('/').len();
        self.blink1_server_url.truncate(trimmed);
        self
    }
}
