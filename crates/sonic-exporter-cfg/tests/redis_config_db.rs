//! CONFIG_DB access against a real Redis
//!
//! Starts Redis in a container and drives [`RedisConfigDb`] through the
//! exporter commands, checking the raw hashes it leaves behind.
//!
//! Run with: cargo test --test redis_config_db -- --ignored

use std::collections::{BTreeSet, HashMap};

use pretty_assertions::assert_eq;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use sonic_exporter_cfg::tables::{
    CFG_SONIC_EXPORTER_TABLE_NAME, CFG_VRF_TABLE_NAME, SONIC_EXPORTER_KEY,
};
use sonic_exporter_cfg::types::VrfBinding;
use sonic_exporter_cfg::{
    commands, field_values, ConfigDb, DbConnectionConfig, ExporterCfgError, RedisConfigDb,
};
use testcontainers::{
    core::{ContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage,
};

/// Redis container with a CONFIG_DB connection and a raw connection
/// on the same database
struct RedisConfigEnv {
    _container: ContainerAsync<GenericImage>,
    db: RedisConfigDb,
    raw: MultiplexedConnection,
}

impl RedisConfigEnv {
    async fn start() -> Result<Self, Box<dyn std::error::Error>> {
        let container = GenericImage::new("redis", "7-alpine")
            .with_exposed_port(ContainerPort::Tcp(6379))
            .with_wait_for(WaitFor::message_on_stdout("Ready to accept connections"))
            .start()
            .await?;

        let host = container.get_host().await?.to_string();
        let port = container.get_host_port_ipv4(6379).await?;
        let config = DbConnectionConfig {
            host,
            port,
            ..Default::default()
        };

        let raw = redis::Client::open(config.redis_url())?
            .get_multiplexed_async_connection()
            .await?;
        let db = RedisConfigDb::connect(config).await?;

        Ok(Self {
            _container: container,
            db,
            raw,
        })
    }

    async fn hgetall(&mut self, key: &str) -> HashMap<String, String> {
        self.raw.hgetall(key).await.unwrap()
    }

    async fn add_vrf(&mut self, name: &str) {
        let _: () = self
            .raw
            .hset(format!("VRF|{}", name), "NULL", "NULL")
            .await
            .unwrap();
    }
}

fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(f, v)| (f.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_mod_entry_keeps_other_fields() {
    let mut env = RedisConfigEnv::start().await.unwrap();
    let _: () = env
        .raw
        .hset_multiple(
            "SONIC_EXPORTER|default",
            &[("port", "9100"), ("scrape_interval", "15")],
        )
        .await
        .unwrap();

    env.db
        .mod_entry(
            CFG_SONIC_EXPORTER_TABLE_NAME,
            SONIC_EXPORTER_KEY,
            &field_values! { "vrf" => "mgmt" },
        )
        .await
        .unwrap();

    assert_eq!(
        env.hgetall("SONIC_EXPORTER|default").await,
        fields(&[("port", "9100"), ("scrape_interval", "15"), ("vrf", "mgmt")])
    );
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_get_keys_returns_row_names_of_one_table() {
    let mut env = RedisConfigEnv::start().await.unwrap();
    env.add_vrf("Vrf1").await;
    env.add_vrf("mgmt").await;
    let _: () = env
        .raw
        .hset("VRF_ROUTE_LEAK|Vrf1", "dst_vrf", "mgmt")
        .await
        .unwrap();
    let _: () = env
        .raw
        .hset("VLAN|Vlan100", "vlanid", "100")
        .await
        .unwrap();

    let keys = env.db.get_keys(CFG_VRF_TABLE_NAME).await.unwrap();

    let expected: BTreeSet<String> = ["Vrf1", "mgmt"].iter().map(|s| s.to_string()).collect();
    assert_eq!(keys, expected);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_empty_row_uses_null_placeholder() {
    let mut env = RedisConfigEnv::start().await.unwrap();

    env.db
        .mod_entry(CFG_VRF_TABLE_NAME, "Vrf1", &vec![])
        .await
        .unwrap();

    assert_eq!(env.hgetall("VRF|Vrf1").await, fields(&[("NULL", "NULL")]));
    assert!(env
        .db
        .get_entry(CFG_VRF_TABLE_NAME, "Vrf1")
        .await
        .unwrap()
        .is_empty());
    assert!(env
        .db
        .get_keys(CFG_VRF_TABLE_NAME)
        .await
        .unwrap()
        .contains("Vrf1"));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_get_entry_missing_row_is_empty() {
    let env = RedisConfigEnv::start().await.unwrap();

    let entry = env
        .db
        .get_entry(CFG_SONIC_EXPORTER_TABLE_NAME, SONIC_EXPORTER_KEY)
        .await
        .unwrap();
    assert!(entry.is_empty());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_exporter_commands_against_redis() {
    let mut env = RedisConfigEnv::start().await.unwrap();
    env.add_vrf("mgmt").await;

    commands::set_port(&env.db, 9100).await.unwrap();
    commands::set_vrf(&env.db, "mgmt").await.unwrap();
    assert_eq!(
        env.hgetall("SONIC_EXPORTER|default").await,
        fields(&[("port", "9100"), ("vrf", "mgmt")])
    );

    let err = commands::set_vrf(&env.db, "Vrf9").await.unwrap_err();
    assert!(matches!(err, ExporterCfgError::VrfNotFound { .. }));
    assert_eq!(
        env.hgetall("SONIC_EXPORTER|default").await,
        fields(&[("port", "9100"), ("vrf", "mgmt")])
    );

    commands::set_vrf(&env.db, "none").await.unwrap();
    assert_eq!(
        env.hgetall("SONIC_EXPORTER|default").await,
        fields(&[("port", "9100"), ("vrf", "")])
    );

    let config = commands::show_config(&env.db).await.unwrap();
    assert_eq!(config.port, 9100);
    assert_eq!(config.vrf, VrfBinding::Default);
}
