//! Writers for flattened review records.

use std::fs::{self, File};
use std::path::Path;

use arrow2::array::{Array, MutableUtf8Array, Utf8Array};
use arrow2::chunk::Chunk;
use arrow2::datatypes::{DataType, Field, Schema};
use arrow2::io::parquet::write::{
    transverse, CompressionOptions, Encoding, FileWriter, RowGroupIterator, Version, WriteOptions,
};
use csv::{Terminator, WriterBuilder};
use tracing::{debug, info};

use crate::error::ExtractError;
use crate::walker::{ReviewRecord, CSV_HEADER};

static WRITE_OPTIONS: WriteOptions = WriteOptions {
    write_statistics: true,
    compression: CompressionOptions::Uncompressed,
    version: Version::V2,
    data_pagesize_limit: None,
};

fn ensure_parent(path: &Path) -> Result<(), ExtractError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|source| ExtractError::Create {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Write `records` as CSV with a fixed header. The header is written even
/// when there are no records. Returns the number of rows written.
pub fn write_csv(path: &Path, records: &[ReviewRecord]) -> Result<usize, ExtractError> {
    ensure_parent(path)?;

    let csv_err = |source| ExtractError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_path(path)
        .map_err(csv_err)?;

    writer.write_record(CSV_HEADER).map_err(csv_err)?;
    for record in records {
        writer.serialize(record).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| ExtractError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), rows = records.len(), "csv written");
    Ok(records.len())
}

fn review_schema() -> Schema {
    Schema::from(
        CSV_HEADER
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, false))
            .collect::<Vec<_>>(),
    )
}

fn to_chunk(records: &[ReviewRecord]) -> Result<Chunk<Box<dyn Array>>, arrow2::error::Error> {
    macro_rules! build_utf8 {
        ($name:ident) => {{
            let mut col = MutableUtf8Array::<i32>::with_capacity(records.len());
            for r in records {
                col.push(Some(r.$name.as_str()));
            }
            let array: Utf8Array<i32> = col.into();
            Box::new(array) as Box<dyn Array>
        }};
    }

    Chunk::try_new(vec![
        build_utf8!(business_name),
        build_utf8!(business_alias),
        build_utf8!(total_reviews),
        build_utf8!(author),
        build_utf8!(rating),
        build_utf8!(date),
        build_utf8!(text),
    ])
}

/// Mirror the CSV output as a single-row-group Parquet file.
pub fn write_parquet(path: &Path, records: &[ReviewRecord]) -> Result<usize, ExtractError> {
    ensure_parent(path)?;

    let parquet_err = |source| ExtractError::Parquet {
        path: path.to_path_buf(),
        source,
    };

    let schema = review_schema();
    let chunk = to_chunk(records).map_err(parquet_err)?;

    let encodings: Vec<Vec<Encoding>> = schema
        .fields
        .iter()
        .map(|f| transverse(&f.data_type, |_| Encoding::Plain))
        .collect();

    let row_groups = RowGroupIterator::try_new(
        vec![Ok(chunk)].into_iter(),
        &schema,
        WRITE_OPTIONS,
        encodings,
    )
    .map_err(parquet_err)?;

    let file = File::create(path).map_err(|source| ExtractError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = FileWriter::try_new(file, schema, WRITE_OPTIONS).map_err(parquet_err)?;
    for group in row_groups {
        writer.write(group.map_err(parquet_err)?).map_err(parquet_err)?;
    }
    let size = writer.end(None).map_err(parquet_err)?;

    info!(path = %path.display(), rows = records.len(), bytes = size, "parquet written");
    Ok(records.len())
}
