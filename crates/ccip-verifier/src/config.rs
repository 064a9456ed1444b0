use std::fs;
use std::path::{Path, PathBuf};

use alloy_primitives::Bytes;
use anyhow::{Context, Result, anyhow};
use ccip_types::{ChainFamily, Lane, ProtocolVersion};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lanes whose messages this verifier can hash. One leaf hasher is built per lane.
    pub lanes: Vec<LaneConfig>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneConfig {
    /// Family of the destination chain, which decides the leaf layout.
    pub dest_family: ChainFamily,

    pub source_chain_selector: u64,

    pub dest_chain_selector: u64,

    /// On-ramp address on the source chain, hex encoded.
    pub on_ramp: Bytes,

    /// Protocol version of the lane's on-ramp and off-ramp.
    pub version: ProtocolVersion,
}

impl LaneConfig {
    pub fn lane(&self) -> Lane {
        Lane::new(
            self.source_chain_selector,
            self.dest_chain_selector,
            self.on_ramp.clone(),
            self.version,
        )
    }
}

impl Config {
    /// The default service home directory.
    pub const APP_HOME: &str = ".ccip-verify";
    /// The default configuration directory.
    pub const CONFIG_DIR: &str = "config";
    /// The default configuration file in YAML format.
    pub const CONFIG_FILE: &str = "config.yaml";

    /// Initializes the configuration directory under the user's home and writes a default config
    /// if missing.
    pub fn init() -> Result<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow!("cannot find home directory"))?
            .join(Self::APP_HOME);
        Self::init_in(&home_dir)
    }

    /// Initializes `home_dir` and returns the path of its config file.
    pub fn init_in(home_dir: &Path) -> Result<PathBuf> {
        let config_dir = home_dir.join(Self::CONFIG_DIR);
        fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join(Self::CONFIG_FILE);
        if !config_path.exists() {
            info!("creating default config at {config_path:?}");
            let yaml = serde_yaml::to_string(&Config::default())?;
            fs::write(&config_path, yaml)?;
        } else {
            info!("config file already exists at {config_path:?}");
        }

        Ok(config_path)
    }

    /// Returns the default application config path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow!("cannot find home directory"))?
            .join(Self::APP_HOME)
            .join(Self::CONFIG_DIR)
            .join(Self::CONFIG_FILE))
    }

    /// Loads the application config from the service home directory.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Err(anyhow!("config file not found at {}", config_path.display()));
        }

        info!("reading config file at {}", config_path.display());
        let config_yaml = fs::read_to_string(config_path).context("Failed to read config file from path")?;
        Self::from_yaml_str(&config_yaml)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse config")
    }
}
