//! Inspect command handler

use crate::cli::InspectArgs;
use crate::config::Config;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::manifest::RulesManifest;
use crate::output::{Inspection, OutputWriter};
use tracing::instrument;

/// Handle the inspect command
#[instrument(skip(_config, output), fields(rules = %args.rules.display()))]
pub fn handle_inspect(args: InspectArgs, _config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("inspect_command");

    let filter = RulesManifest::from_file(&args.rules)?.build_filter()?;

    output.info(&format!(
        "{} schema(s), {} operation binding(s)",
        filter.fragments().len(),
        filter.operations().len()
    ))?;
    output.inspection(&Inspection {
        schemas: filter.fragments(),
        operations: filter.operations(),
    })
}
