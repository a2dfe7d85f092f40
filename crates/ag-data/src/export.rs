//! Ensemble export.
//!
//! Layout is one row per day and one column per path, preceded by a `day`
//! column:
//!
//! ```text
//! day,path_0,path_1,...
//! 0,7150,7150,...
//! 1,7162.4,7141.9,...
//! ```

use std::io::Write;
use std::path::Path;

use ag_core::{Error, Result};
use ag_methods::PathEnsemble;
use tracing::info;

fn csv_error(e: csv::Error) -> Error {
    if e.is_io_error() {
        Error::Io(e.to_string())
    } else {
        Error::Parse(e.to_string())
    }
}

/// Write `ensemble` as CSV to `writer`.
///
/// # Errors
/// [`Error::Io`] if the writer fails.
pub fn write_ensemble<W: Write>(writer: W, ensemble: &PathEnsemble) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let header = std::iter::once("day".to_string())
        .chain((0..ensemble.num_paths()).map(|i| format!("path_{i}")));
    wtr.write_record(header).map_err(csv_error)?;

    for t in 0..=ensemble.num_days() {
        let row = std::iter::once(t.to_string())
            .chain(ensemble.day(t).into_iter().map(|x| x.to_string()));
        wtr.write_record(row).map_err(csv_error)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `ensemble` to the file at `path`, replacing it if present.
///
/// # Errors
/// [`Error::Io`] if the file cannot be created or written.
pub fn save_ensemble<P: AsRef<Path>>(path: P, ensemble: &PathEnsemble) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)
        .map_err(|e| Error::Io(format!("cannot create {}: {e}", path.display())))?;
    write_ensemble(std::io::BufWriter::new(file), ensemble)?;
    info!(
        path = %path.display(),
        paths = ensemble.num_paths(),
        days = ensemble.num_days(),
        "saved ensemble"
    );
    Ok(())
}
