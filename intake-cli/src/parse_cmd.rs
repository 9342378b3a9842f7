//! `intake parse`: select one file, wait for its extraction, report the panels.

use anyhow::{Result, bail};
use intake_core::{IntakeSettings, SUPPORTED_ISSUERS};
use intake_ingest::{IntakeController, StubExtractor};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::{candidate, render};

#[derive(Debug, Clone)]
pub struct ParseOptions<'a> {
    pub path: &'a Path,
    /// Declared MIME type; guessed from the extension when `None`.
    pub mime: Option<&'a str>,
    pub json: bool,
    pub delay: Duration,
}

/// Text mode writes the screen before and after extraction. JSON mode writes
/// only the result. A rejected file or failed extraction is an `Err`.
pub async fn run_parse<W: Write>(
    out: &mut W,
    opts: &ParseOptions<'_>,
    settings: IntakeSettings,
) -> Result<()> {
    let file = candidate::from_path(opts.path, opts.mime)?;
    let stub = StubExtractor::new(opts.delay);
    tracing::debug!(
        file = %file.name,
        mime_type = %file.mime_type,
        delay_ms = stub.delay().as_millis() as u64,
        "built candidate"
    );
    let mut controller = IntakeController::new(Arc::new(stub), settings);

    if !opts.json {
        write!(out, "{}", render::render_header())?;
        writeln!(out, "{}", render::render_issuers(&SUPPORTED_ISSUERS))?;
    }

    if let Err(err) = controller.select_file(file) {
        if !opts.json {
            writeln!(out, "{}", render::render_display(&controller.display()))?;
            write!(out, "{}", render::render_footer())?;
        }
        bail!("{}: {err}", opts.path.display());
    }

    if !opts.json {
        writeln!(out, "{}", render::render_display(&controller.display()))?;
    }

    controller.settle().await;

    let display = controller.display();
    match display.result() {
        Some(result) if opts.json => {
            writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
        }
        Some(_) => {
            writeln!(out, "{}", render::render_display(&display))?;
            write!(out, "{}", render::render_footer())?;
        }
        None => bail!(
            "{}: {}",
            opts.path.display(),
            display.error_message().unwrap_or("no result")
        ),
    }

    Ok(())
}
