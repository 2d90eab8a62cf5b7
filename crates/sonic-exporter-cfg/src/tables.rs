//! Database table name constants for the exporter commands

// CONFIG_DB tables
/// Exporter settings table in CONFIG_DB
pub const CFG_SONIC_EXPORTER_TABLE_NAME: &str = "SONIC_EXPORTER";

/// VRF table in CONFIG_DB (existence reference only)
pub const CFG_VRF_TABLE_NAME: &str = "VRF";

/// The single row of the exporter table
pub const SONIC_EXPORTER_KEY: &str = "default";

/// Separator between table name and key in CONFIG_DB
pub const CONFIG_DB_SEPARATOR: &str = "|";

/// Field name used to store an otherwise empty row
pub const NULL_FIELD: &str = "NULL";

/// Field names used in the SONIC_EXPORTER table
pub mod fields {
    /// Listening port field
    pub const PORT: &str = "port";

    /// Listening VRF field (empty means the default VRF)
    pub const VRF: &str = "vrf";
}

/// Builds the Redis key of a CONFIG_DB row (e.g. `SONIC_EXPORTER|default`)
pub fn config_db_key(table: &str, key: &str) -> String {
    format!("{}{}{}", table, CONFIG_DB_SEPARATOR, key)
}
