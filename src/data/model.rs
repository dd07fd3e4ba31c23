use std::collections::HashSet;
use std::fmt;

use anyhow::{bail, Result};

use crate::predict::ModelArtifact;

/// Prefix joined with an address string to name its one-hot column.
pub const ADDRESS_PREFIX: &str = "Address_";

/// Name of the one-hot column for `address`.
pub fn address_column(address: &str) -> String {
    format!("{ADDRESS_PREFIX}{address}")
}

// ---------------------------------------------------------------------------
// ColumnSchema – the model's input layout
// ---------------------------------------------------------------------------

/// Ordered feature-column names captured when the model was trained.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchema {
    columns: Vec<String>,
    lookup: HashSet<String>,
}

impl ColumnSchema {
    /// Build a schema, rejecting empty lists and duplicate names.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        if columns.is_empty() {
            bail!("column list is empty");
        }
        let mut lookup = HashSet::with_capacity(columns.len());
        for col in &columns {
            if !lookup.insert(col.clone()) {
                bail!("duplicate column '{col}'");
            }
        }
        Ok(Self { columns, lookup })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn contains(&self, column: &str) -> bool {
        self.lookup.contains(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ---------------------------------------------------------------------------
// AddressCatalog – valid neighborhoods
// ---------------------------------------------------------------------------

/// Address strings offered in the selector, in artifact order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressCatalog {
    addresses: Vec<String>,
}

impl AddressCatalog {
    /// Build a catalog, keeping the first occurrence of each address.
    pub fn new(addresses: Vec<String>) -> Self {
        let mut seen = HashSet::with_capacity(addresses.len());
        let addresses = addresses
            .into_iter()
            .filter(|a| seen.insert(a.clone()))
            .collect();
        Self { addresses }
    }

    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    pub fn first(&self) -> Option<&str> {
        self.addresses.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FeatureVector – one encoded row
// ---------------------------------------------------------------------------

/// A single encoded row whose columns follow a [`ColumnSchema`] exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub(crate) fn from_parts(columns: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values in column order, ready for the model.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }

    /// `(column, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Artifacts – everything loaded at startup
// ---------------------------------------------------------------------------

/// The read-only context built once at startup and passed explicitly to
/// encoding and prediction.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub model: ModelArtifact,
    pub schema: ColumnSchema,
    pub catalog: AddressCatalog,
}

impl fmt::Display for Artifacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} model, {} columns, {} addresses",
            self.model.kind(),
            self.schema.len(),
            self.catalog.len()
        )
    }
}
