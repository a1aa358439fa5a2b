use ranch_core::ReportDocument;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `ranchcam --print-schema`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&ReportDocument::json_schema(), flags.format)
}
