//! Exporter configuration operations
//!
//! Each operation takes the CONFIG_DB handle explicitly and performs at most
//! one read and one write of `SONIC_EXPORTER|default`.

use tracing::{debug, info, instrument};

use crate::db::ConfigDb;
use crate::error::{ExporterCfgError, ExporterCfgResult};
use crate::field_values;
use crate::tables::{
    fields, CFG_SONIC_EXPORTER_TABLE_NAME, CFG_VRF_TABLE_NAME, SONIC_EXPORTER_KEY,
};
use crate::types::{ExporterConfig, VrfBinding};

/// Set the port that the exporter is listening to.
///
/// The value is written as given; range checks are left to the exporter.
#[instrument(skip(db))]
pub async fn set_port<D>(db: &D, port: i64) -> ExporterCfgResult<()>
where
    D: ConfigDb + ?Sized,
{
    db.mod_entry(
        CFG_SONIC_EXPORTER_TABLE_NAME,
        SONIC_EXPORTER_KEY,
        &field_values! { fields::PORT => port },
    )
    .await?;

    info!("Exporter port set to {}", port);
    Ok(())
}

/// Set the VRF that the exporter is listening inside.
///
/// `none` selects the default VRF. Any other name must be present in the
/// CONFIG_DB VRF table, otherwise nothing is written.
#[instrument(skip(db))]
pub async fn set_vrf<D>(db: &D, vrf: &str) -> ExporterCfgResult<()>
where
    D: ConfigDb + ?Sized,
{
    let binding = VrfBinding::from_arg(vrf);

    if let VrfBinding::Named(name) = &binding {
        let vrfs = db.get_keys(CFG_VRF_TABLE_NAME).await?;
        debug!("{} VRFs defined", vrfs.len());
        if !vrfs.contains(name) {
            return Err(ExporterCfgError::vrf_not_found(name.as_str()));
        }
    }

    db.mod_entry(
        CFG_SONIC_EXPORTER_TABLE_NAME,
        SONIC_EXPORTER_KEY,
        &field_values! { fields::VRF => binding.field_value() },
    )
    .await?;

    info!("Exporter VRF set to {}", binding);
    Ok(())
}

/// Read the effective exporter configuration
#[instrument(skip(db))]
pub async fn show_config<D>(db: &D) -> ExporterCfgResult<ExporterConfig>
where
    D: ConfigDb + ?Sized,
{
    let entry = db
        .get_entry(CFG_SONIC_EXPORTER_TABLE_NAME, SONIC_EXPORTER_KEY)
        .await?;
    ExporterConfig::from_fields(&entry)
}
