//! Type definitions for the exporter configuration record

use std::collections::HashMap;
use std::fmt;

use crate::error::{ExporterCfgError, ExporterCfgResult};
use crate::tables::fields;

/// Registered Prometheus exporter port, used when no port is configured
pub const DEFAULT_EXPORTER_PORT: u16 = 9893;

/// Operator keyword selecting the default VRF
pub const VRF_NONE: &str = "none";

/// VRF the exporter binds its listening socket to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VrfBinding {
    /// No VRF restriction, stored as an empty string
    Default,
    /// A VRF from the CONFIG_DB VRF table
    Named(String),
}

impl VrfBinding {
    /// Interprets an operator argument (`none` selects the default VRF)
    pub fn from_arg(vrf: &str) -> Self {
        if vrf == VRF_NONE {
            VrfBinding::Default
        } else {
            VrfBinding::Named(vrf.to_string())
        }
    }

    /// Interprets a stored `vrf` field (empty selects the default VRF)
    pub fn from_field(value: &str) -> Self {
        if value.is_empty() {
            VrfBinding::Default
        } else {
            VrfBinding::Named(value.to_string())
        }
    }

    /// Value written to the `vrf` field
    pub fn field_value(&self) -> &str {
        match self {
            VrfBinding::Default => "",
            VrfBinding::Named(name) => name,
        }
    }
}

impl fmt::Display for VrfBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VrfBinding::Default => f.write_str(VRF_NONE),
            VrfBinding::Named(name) => f.write_str(name),
        }
    }
}

/// Effective exporter settings derived from `SONIC_EXPORTER|default`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExporterConfig {
    /// TCP port the exporter listens on
    pub port: u16,
    /// VRF the listener is bound to
    pub vrf: VrfBinding,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_EXPORTER_PORT,
            vrf: VrfBinding::Default,
        }
    }
}

impl ExporterConfig {
    /// Create from database fields, applying defaults for absent fields
    pub fn from_fields(fields: &HashMap<String, String>) -> ExporterCfgResult<Self> {
        let mut config = Self::default();

        if let Some(port) = fields.get(fields::PORT) {
            config.port = port.parse::<u16>().map_err(|e| {
                ExporterCfgError::invalid_config(
                    fields::PORT,
                    format!("not a port number: {:?}: {}", port, e),
                )
            })?;
        }

        if let Some(vrf) = fields.get(fields::VRF) {
            config.vrf = VrfBinding::from_field(vrf);
        }

        Ok(config)
    }
}
