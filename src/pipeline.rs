use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde_json::Value;
use tracing::{info, warn};

use crate::config::Settings;
use crate::error::ExtractError;
use crate::sink::{write_csv, write_parquet};
use crate::walker::{walk_with_summary, WalkSummary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractReport {
    pub summary: WalkSummary,
    pub written: usize,
    pub output: PathBuf,
    pub parquet: Option<PathBuf>,
}

/// Load the whole export into memory. A missing file surfaces the
/// underlying I/O error.
pub fn load_export(path: &Path) -> Result<Value, ExtractError> {
    let raw = fs::read_to_string(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ExtractError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read the export, flatten every review edge and write the CSV (plus the
/// Parquet mirror when configured).
pub fn run(settings: &Settings) -> Result<ExtractReport, ExtractError> {
    let start = Instant::now();
    let input = settings.input_path();
    let output = settings.output_path();

    info!(input = %input.display(), "loading review export");
    let export = load_export(&input)?;

    let (records, summary) = walk_with_summary(&export);
    if summary.records == 0 {
        warn!(operations = summary.operations, "export contained no review edges");
    }

    let written = write_csv(&output, &records)?;

    let parquet = settings.parquet_path();
    if let Some(path) = &parquet {
        write_parquet(path, &records)?;
    }

    info!(
        operations = summary.operations,
        businesses = summary.businesses,
        records = written,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "extraction complete"
    );

    Ok(ExtractReport {
        summary,
        written,
        output,
        parquet,
    })
}
