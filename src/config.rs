use std::path::Path;
use serde::{Serialize, Deserialize};
use hocon::HoconLoader;
use log::info;

use crate::error::RingError;
use crate::hash_ring::{LookupMode, RingConfig, DEFAULT_REPLICAS, MAX_REPLICAS};
use crate::node::{Node, NodeList};
use crate::opt::Opt;

pub const DEFAULT_CONFIG_PATH: &str = "config/reference.conf";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RingSchema {
    pub replicas_per_weight: usize,
    pub legacy_lookup: bool,
}

impl Default for RingSchema {
    fn default() -> Self {
        RingSchema {
            replicas_per_weight: DEFAULT_REPLICAS,
            legacy_lookup: false,
        }
    }
}

/// Sample node set and key load for the reporting driver.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DriverSchema {
    pub node_count: usize,
    pub key_count: usize,
    pub base_address: String,
    pub port: u16,
    /// Explicit nodes; when empty, `node_count` nodes are generated from `base_address`.
    pub nodes: NodeList,
}

impl Default for DriverSchema {
    fn default() -> Self {
        DriverSchema {
            node_count: 10,
            key_count: 1_000,
            base_address: "172.18.1.".to_owned(),
            port: 8080,
            nodes: Vec::new(),
        }
    }
}

impl DriverSchema {
    pub fn sample_nodes(&self) -> NodeList {
        if !self.nodes.is_empty() {
            return self.nodes.clone();
        }

        (0..self.node_count)
            .map(|i| Node::new(
                i as u64,
                format!("{}{}", self.base_address, i),
                self.port,
                format!("host_{}", i),
                1,
            ))
            .collect()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ConfigSchema {
    pub ring: RingSchema,
    pub driver: DriverSchema,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub ring: RingConfig,
    pub driver: DriverSchema,
    pub dump: bool,
}

pub fn load(opt: &Opt) -> Result<Configuration, RingError> {
    info!("CLI Options {:?}", opt);

    let schema = match opt.configuration_path.as_ref() {
        Some(path) => load_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load_file(default_path)?
            } else {
                info!("no configuration at {:?}; using defaults", default_path);
                ConfigSchema::default()
            }
        }
    };

    resolve(opt, schema)
}

pub fn load_file<P: AsRef<Path>>(path: P) -> Result<ConfigSchema, RingError> {
    let path = path.as_ref();
    let schema: ConfigSchema = HoconLoader::new()
        .load_file(path)
        .and_then(|loader| loader.hocon())
        .and_then(|hocon| hocon.resolve())
        .map_err(|err| RingError::config_from_error(format!("loading {:?}", path), err))?;

    info!("HOCON {:?}: {:?}", path, schema);
    Ok(schema)
}

pub fn load_str(conf: &str) -> Result<ConfigSchema, RingError> {
    HoconLoader::new()
        .load_str(conf)
        .and_then(|loader| loader.hocon())
        .and_then(|hocon| hocon.resolve())
        .map_err(|err| RingError::config_from_error("parsing configuration", err))
}

/// Command-line values win over file values.
pub fn resolve(opt: &Opt, schema: ConfigSchema) -> Result<Configuration, RingError> {
    let replicas_per_weight = opt.replicas.unwrap_or(schema.ring.replicas_per_weight);
    if replicas_per_weight == 0 || replicas_per_weight > MAX_REPLICAS {
        return Err(RingError::config(format!(
            "replicas_per_weight must be within 1..={}, got {}",
            MAX_REPLICAS, replicas_per_weight,
        )));
    }

    let lookup = if opt.legacy_lookup || schema.ring.legacy_lookup {
        LookupMode::Legacy
    } else {
        LookupMode::Canonical
    };

    let mut driver = schema.driver;
    driver.node_count = opt.nodes.unwrap_or(driver.node_count);
    driver.key_count = opt.keys.unwrap_or(driver.key_count);

    info!("ring replicas_per_weight:{} lookup:{:?}", replicas_per_weight, lookup);
    Ok(Configuration {
        ring: RingConfig { replicas_per_weight, lookup },
        driver,
        dump: opt.dump,
    })
}
