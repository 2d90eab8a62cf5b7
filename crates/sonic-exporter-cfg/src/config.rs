//! CONFIG_DB connection settings
//!
//! SONiC describes its Redis instances in `database_config.json`:
//!
//! ```json
//! {
//!     "INSTANCES": {
//!         "redis": {
//!             "hostname": "127.0.0.1",
//!             "port": 6379,
//!             "unix_socket_path": "/var/run/redis/redis.sock"
//!         }
//!     },
//!     "DATABASES": {
//!         "CONFIG_DB": { "id": 4, "separator": "|", "instance": "redis" }
//!     },
//!     "VERSION": "1.0"
//! }
//! ```
//!
//! Only the instance hosting CONFIG_DB is of interest here.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{ExporterCfgError, ExporterCfgResult};

/// Default location of the SONiC database config
pub const DEFAULT_DB_CONFIG_PATH: &str = "/var/run/redis/sonic-db/database_config.json";

/// Name of the configuration database
pub const CONFIG_DB_NAME: &str = "CONFIG_DB";

/// Connection parameters for CONFIG_DB
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConnectionConfig {
    /// Redis host
    pub host: String,

    /// Redis port
    pub port: u16,

    /// Redis unix socket, preferred over TCP when set
    pub unix_socket_path: Option<String>,

    /// Redis database number for CONFIG_DB
    pub db_number: u32,
}

fn default_redis_host() -> String {
    "127.0.0.1".to_string()
}

fn default_redis_port() -> u16 {
    6379
}

fn default_config_db_number() -> u32 {
    4
}

impl Default for DbConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_redis_host(),
            port: default_redis_port(),
            unix_socket_path: None,
            db_number: default_config_db_number(),
        }
    }
}

impl DbConnectionConfig {
    /// Returns the Redis connection URL.
    pub fn redis_url(&self) -> String {
        match &self.unix_socket_path {
            Some(path) => format!("unix://{}?db={}", path, self.db_number),
            None => format!("redis://{}:{}/{}", self.host, self.port, self.db_number),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RedisInstance {
    #[serde(default = "default_redis_host")]
    hostname: String,
    #[serde(default = "default_redis_port")]
    port: u16,
    #[serde(default)]
    unix_socket_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DatabaseEntry {
    id: u32,
    instance: String,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfigFile {
    #[serde(rename = "INSTANCES")]
    instances: HashMap<String, RedisInstance>,
    #[serde(rename = "DATABASES")]
    databases: HashMap<String, DatabaseEntry>,
}

/// Resolves CONFIG_DB connection settings from a SONiC database config.
///
/// A missing file yields the defaults (local Redis on 6379, database 4);
/// a file that exists but cannot be parsed, or that does not place
/// CONFIG_DB on a known instance, is an error.
pub fn load_database_config(path: &Path) -> ExporterCfgResult<DbConnectionConfig> {
    let path_str = path.display().to_string();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path_str, "Database config not found, using defaults");
            return Ok(DbConnectionConfig::default());
        }
        Err(e) => return Err(ExporterCfgError::db_config(path_str, e.to_string())),
    };

    parse_database_config(&content)
        .map_err(|message| ExporterCfgError::db_config(path_str, message))
}

fn parse_database_config(content: &str) -> Result<DbConnectionConfig, String> {
    let file: DatabaseConfigFile = serde_json::from_str(content).map_err(|e| e.to_string())?;

    let db = file
        .databases
        .get(CONFIG_DB_NAME)
        .ok_or_else(|| format!("{} not defined", CONFIG_DB_NAME))?;

    let instance = file
        .instances
        .get(&db.instance)
        .ok_or_else(|| format!("{} refers to unknown instance '{}'", CONFIG_DB_NAME, db.instance))?;

    Ok(DbConnectionConfig {
        host: instance.hostname.clone(),
        port: instance.port,
        unix_socket_path: instance.unix_socket_path.clone(),
        db_number: db.id,
    })
}
