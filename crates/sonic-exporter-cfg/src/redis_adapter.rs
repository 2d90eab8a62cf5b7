//! Redis-backed CONFIG_DB access
//!
//! Rows live in hashes named `TABLE|key`. Writes use HSET so fields not
//! named in a request keep their values, matching `ConfigDBConnector.mod_entry`.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{debug, info};

use crate::config::DbConnectionConfig;
use crate::db::{decode_fields, encode_fields, ConfigDb, FieldValues};
use crate::error::{ExporterCfgError, ExporterCfgResult};
use crate::tables::{config_db_key, CONFIG_DB_SEPARATOR};

/// CONFIG_DB connection
#[derive(Clone)]
pub struct RedisConfigDb {
    config: DbConnectionConfig,
    connection: ConnectionManager,
}

impl std::fmt::Debug for RedisConfigDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisConfigDb")
            .field("url", &self.config.redis_url())
            .finish()
    }
}

impl RedisConfigDb {
    /// Connect using the given settings
    pub async fn connect(config: DbConnectionConfig) -> ExporterCfgResult<Self> {
        Self::connect_url(config.redis_url(), config).await
    }

    /// Connect to an explicit Redis URL
    pub async fn connect_url(
        url: impl Into<String>,
        config: DbConnectionConfig,
    ) -> ExporterCfgResult<Self> {
        let url = url.into();
        let client = redis::Client::open(url.as_str())
            .map_err(|e| ExporterCfgError::database("connect", format!("{}: {}", url, e)))?;

        let connection = client
            .get_connection_manager()
            .await
            .map_err(|e| ExporterCfgError::database("connect", format!("{}: {}", url, e)))?;

        debug!(url = %url, "Connected to CONFIG_DB");
        Ok(Self { config, connection })
    }

    /// Returns the connection settings.
    pub fn config(&self) -> &DbConnectionConfig {
        &self.config
    }
}

/// Strips `TABLE|` from a hash name, `None` for hashes of other tables
fn row_name<'a>(table: &str, redis_key: &'a str) -> Option<&'a str> {
    redis_key
        .strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(CONFIG_DB_SEPARATOR))
}

#[async_trait]
impl ConfigDb for RedisConfigDb {
    async fn mod_entry(
        &self,
        table: &str,
        key: &str,
        fields: &FieldValues,
    ) -> ExporterCfgResult<()> {
        let redis_key = config_db_key(table, key);
        let encoded = encode_fields(fields);
        let mut conn = self.connection.clone();

        let _: () = conn
            .hset_multiple(&redis_key, encoded.as_slice())
            .await
            .map_err(|e| ExporterCfgError::database("hset", e.to_string()))?;

        info!(key = %redis_key, ?fields, "Updated CONFIG_DB entry");
        Ok(())
    }

    async fn get_keys(&self, table: &str) -> ExporterCfgResult<BTreeSet<String>> {
        let pattern = format!("{}{}*", table, CONFIG_DB_SEPARATOR);
        let mut conn = self.connection.clone();

        let keys: Vec<String> = conn
            .keys(&pattern)
            .await
            .map_err(|e| ExporterCfgError::database("keys", e.to_string()))?;

        debug!(table, count = keys.len(), "Listed CONFIG_DB table");
        Ok(keys
            .iter()
            .filter_map(|k| row_name(table, k))
            .map(str::to_string)
            .collect())
    }

    async fn get_entry(
        &self,
        table: &str,
        key: &str,
    ) -> ExporterCfgResult<HashMap<String, String>> {
        let redis_key = config_db_key(table, key);
        let mut conn = self.connection.clone();

        let fields: HashMap<String, String> = conn
            .hgetall(&redis_key)
            .await
            .map_err(|e| ExporterCfgError::database("hgetall", e.to_string()))?;

        Ok(decode_fields(fields))
    }
}
