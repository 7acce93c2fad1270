//! Apply command handler

use super::utils::{read_document, render_document, target_format, write_file};
use crate::cli::ApplyArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::manifest::RulesManifest;
use crate::output::OutputWriter;
use rulemark_core::{DocumentFilter, OpenApiDocument};
use tracing::{debug, info, instrument, warn};

/// Handle the apply command
#[instrument(skip(_config, output), fields(document = %args.document.display(), rules = %args.rules.display()))]
pub fn handle_apply(args: ApplyArgs, _config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("apply_command", &format!("document: {}", args.document.display()));

    let filter = {
        let _manifest_timer = Timer::new("manifest_loading");
        RulesManifest::from_file(&args.rules)?.build_filter()?
    };
    info!(
        schemas = filter.fragments().len(),
        operations = filter.operations().len(),
        "Document filter ready"
    );

    output.info(&format!("Applying rules to {}", args.document.display()))?;
    let (value, input_format) = read_document(&args.document)?;
    let mut document = OpenApiDocument::from_value(value)?;
    debug!(format = ?input_format, "Document loaded");

    let report = {
        let _filter_timer = Timer::new("document_filter");
        filter.apply(&mut document)
    };

    for item in &report.skipped {
        warn!(%item, "Skipped");
    }
    info!(applied = report.applied, skipped = report.skipped.len(), "Rules applied");

    let (format, pretty) = target_format(output.format(), args.save_to.as_deref(), input_format);
    let rendered = render_document(document.as_value(), format, pretty)?;

    match &args.save_to {
        Some(path) => {
            write_file(path, &rendered)?;
            output.success(&format!("✓ Wrote {}", path.display()))?;
        }
        None => output.write(&rendered)?,
    }

    if args.report {
        output.section("Report")?;
        output.report(&report, args.save_to.is_none())?;
    } else if !report.is_complete() {
        output.warning(&format!(
            "{} configured item(s) were not found in the document; use --report for details",
            report.skipped.len()
        ))?;
    }

    if args.strict && !report.is_complete() {
        return Err(Error::Incomplete {
            skipped: report.skipped.len(),
        });
    }

    Ok(())
}
