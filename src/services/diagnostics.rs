use crate::domain::report::Report;
use crate::error::{TaggerError, Warning};
use indicatif::ProgressBar;
use std::io::{self, Write};

pub fn write_warning(out: &mut impl Write, warning: &Warning) -> io::Result<()> {
    writeln!(out, "WARNING: {}", warning.message)?;
    if let Some(detail) = &warning.detail {
        writeln!(out, "{}", detail)?;
    }
    Ok(())
}

/// `ERROR:` line for a fatal error, its cause chain, then any remote detail.
pub fn write_error(out: &mut impl Write, err: &anyhow::Error) -> io::Result<()> {
    writeln!(out, "ERROR: {}", err)?;
    for cause in err.chain().skip(1) {
        writeln!(out, "  caused by: {}", cause)?;
    }
    if let Some(detail) = err
        .chain()
        .find_map(|e| e.downcast_ref::<TaggerError>())
        .and_then(TaggerError::detail)
    {
        writeln!(out, "{}", detail)?;
    }
    Ok(())
}

/// Prints the warning to stderr (above the progress bar) and records it.
pub fn warn(report: &mut Report, progress: &ProgressBar, warning: Warning) {
    tracing::debug!(warning = %warning.message, "recoverable failure");
    progress.suspend(|| {
        let _ = write_warning(&mut io::stderr().lock(), &warning);
    });
    report.warnings.push(warning);
}
