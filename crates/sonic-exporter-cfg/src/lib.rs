//! CONFIG_DB commands for the SONiC Prometheus exporter.
//!
//! The exporter reads its listening port and VRF from the CONFIG_DB row
//! `SONIC_EXPORTER|default`. This crate provides the `config sonic_exporter`
//! commands that write that row:
//!
//! - [`commands`]: `set_port`, `set_vrf` and `show_config`
//! - [`ConfigDb`]: the store capability the commands run against, with
//!   [`RedisConfigDb`] for a live switch and [`MemoryConfigDb`] for tests
//! - [`cli`]: the clap command group and its `register` hook
//!
//! # Example
//!
//! ```ignore
//! use sonic_exporter_cfg::{commands, DbConnectionConfig, RedisConfigDb};
//!
//! let db = RedisConfigDb::connect(DbConnectionConfig::default()).await?;
//! commands::set_port(&db, 9100).await?;
//! commands::set_vrf(&db, "mgmt").await?;
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod redis_adapter;
pub mod tables;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{load_database_config, DbConnectionConfig};
pub use db::{ConfigDb, FieldValue, FieldValues, MemoryConfigDb};
pub use error::{ExporterCfgError, ExporterCfgResult};
pub use redis_adapter::RedisConfigDb;
pub use types::{ExporterConfig, VrfBinding};
