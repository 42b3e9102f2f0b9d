//! Layered configuration: defaults, then a TOML file, then `ICESHARE_*` env vars.
//!
//! Nested keys use `__` in the environment, e.g. `ICESHARE_CRYPTO__ENCRYPTION_KEY`.

use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use iceshare_core::EnvelopeKind;
use iceshare_crypto::EncryptionKey;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

const CONFIG_DIR_NAME: &str = "iceshare";
const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "ICESHARE_";
const DEFAULT_BIND: &str = "127.0.0.1:3000";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub crypto: CryptoConfig,
    pub share: ShareConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address for the encrypt/decrypt endpoints.
    pub bind: String,
}

/// Key material. `Debug` never prints the key.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// 64 hex characters (32 bytes). Absent means the endpoints answer 500.
    pub encryption_key: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    pub envelope: EnvelopeKind,
    /// Origin of a remote encrypt/decrypt server, used when no key is held locally.
    pub endpoint: Option<String>,
    /// Base for generated share links.
    pub base_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

impl fmt::Debug for CryptoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoConfig")
            .field(
                "encryption_key",
                &self.encryption_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Config {
    /// Load from the default file location and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load with an optional explicit config file path.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        let config: Config = Self::figment(&config_file).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// The provider stack, exposed so callers can merge extra layers.
    pub fn figment(config_file: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;
        self.encryption_key()?;

        if let Some(endpoint) = &self.share.endpoint {
            let url = Url::parse(endpoint).map_err(|e| {
                Error::config_validation(format!("share.endpoint {endpoint:?}: {e}"))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(Error::config_validation(format!(
                    "share.endpoint must be http or https, got {}",
                    url.scheme()
                )));
            }
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server.bind.parse().map_err(|e| {
            Error::config_validation(format!("server.bind {:?}: {e}", self.server.bind))
        })
    }

    /// Parsed key, `None` when unset or blank.
    pub fn encryption_key(&self) -> Result<Option<EncryptionKey>> {
        match self.crypto.encryption_key.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(hex) => EncryptionKey::from_hex(hex)
                .map(Some)
                .map_err(|e| Error::config_validation(format!("crypto.encryption_key: {e}"))),
        }
    }

    /// Share link base, used verbatim; falls back to the local server address.
    pub fn share_base(&self) -> String {
        match &self.share.base_url {
            Some(base) => base.clone(),
            None => format!("http://{}", self.server.bind),
        }
    }
}
