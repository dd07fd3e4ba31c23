use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray, Int32Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{address_column, AddressCatalog, Artifacts, ColumnSchema};
use crate::config::ArtifactConfig;
use crate::error::ArtifactError;
use crate::predict::ModelArtifact;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and validate the model, column list, and address list.
///
/// Every path is checked for existence first so a single error can name all
/// missing files. Nothing is parsed unless all three are present.
pub fn load_artifacts(config: &ArtifactConfig) -> Result<Artifacts, ArtifactError> {
    let model_path = config.model_path();
    let columns_path = config.columns_path();
    let addresses_path = config.addresses_path();

    let missing: Vec<PathBuf> = [&model_path, &columns_path, &addresses_path]
        .into_iter()
        .filter(|p| !p.is_file())
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(ArtifactError::Missing(missing));
    }

    let schema = load_string_list(&columns_path)
        .and_then(ColumnSchema::new)
        .map_err(invalid(&columns_path))?;

    let catalog = load_string_list(&addresses_path)
        .map(AddressCatalog::new)
        .map_err(invalid(&addresses_path))?;

    let model = load_model(&model_path)
        .and_then(|m| m.validate(&schema).map(|()| m))
        .map_err(invalid(&model_path))?;

    for address in untrained_addresses(&schema, &catalog) {
        log::warn!(
            "Address '{address}' has no '{}' column in the model schema; it will be encoded as baseline",
            address_column(address)
        );
    }

    Ok(Artifacts {
        model,
        schema,
        catalog,
    })
}

/// Catalog addresses whose one-hot column the model never saw.
pub fn untrained_addresses<'a>(
    schema: &ColumnSchema,
    catalog: &'a AddressCatalog,
) -> Vec<&'a str> {
    catalog
        .addresses()
        .iter()
        .filter(|a| !schema.contains(&address_column(a)))
        .map(String::as_str)
        .collect()
}

fn invalid(path: &Path) -> impl FnOnce(anyhow::Error) -> ArtifactError {
    let path = path.to_path_buf();
    move |cause| ArtifactError::Invalid { path, cause }
}

/// Read a JSON-serialized [`ModelArtifact`].
pub fn load_model(path: &Path) -> Result<ModelArtifact> {
    let text = std::fs::read_to_string(path).context("reading model file")?;
    serde_json::from_str(&text).context("parsing model JSON")
}

/// Load a list of strings from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – top-level array: `["Area", "Room", ...]`
/// * `.csv`     – header row, values in the first column
/// * `.parquet` – values in the first column
pub fn load_string_list(path: &Path) -> Result<Vec<String>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        "csv" => load_csv(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Numbers are stringified so numeric category codes survive.
fn load_json(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let items = root
        .as_array()
        .context("Expected top-level JSON array")?;

    items
        .iter()
        .enumerate()
        .map(|(i, v)| match v {
            JsonValue::String(s) => Ok(s.clone()),
            JsonValue::Number(n) => Ok(n.to_string()),
            other => bail!("Item {i} is not a string: {other}"),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    reader.headers().context("reading CSV headers")?;

    let mut values = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let value = record
            .get(0)
            .with_context(|| format!("CSV row {row_no} is empty"))?;
        values.push(value.to_string());
    }
    Ok(values)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Reads the first column of every record batch.
///
/// Works with files written by both **Pandas** (`Series.to_frame().to_parquet()`)
/// and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Vec<String>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut values = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        if batch.num_columns() == 0 {
            bail!("Parquet file has no columns");
        }
        let col = batch.column(0);
        for row in 0..batch.num_rows() {
            let value = extract_string(col, row).with_context(|| format!("Row {row}"))?;
            values.push(value);
        }
    }

    Ok(values)
}

// -- Parquet / Arrow helpers --

/// Read one cell as a string; nulls are rejected.
fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row).to_string())
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row).to_string())
        }
        other => bail!("Expected a string or integer column, got {other:?}"),
    }
}
