use anyhow::Context;
use ranch_config::{Overrides, RanchConfig};

use crate::cli::GlobalFlags;

/// Load the layered config with command line overrides on top.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<RanchConfig> {
    let overrides = Overrides {
        backend: flags.backend,
        project_id: flags.project_id.clone(),
    };

    let config = RanchConfig::load_with_dotenv(flags.config.as_deref(), &overrides)
        .context("failed to load ranchcam configuration")?;

    tracing::debug!(
        backend = %config.warehouse.backend,
        project_id = %config.bigquery.project_id,
        "configuration loaded"
    );
    Ok(config)
}
