//! Snapshot support for learned values
//!
//! A [`Snapshot`] carries named numeric arrays (the value table, the
//! eligibility trace) for later restoration. The file helpers use JSON
//! as a convenience encoding; callers that need a different format can
//! serialize the snapshot themselves, it is a plain serde value.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::Context;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Versioned container of named numeric arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    arrays: BTreeMap<String, Array2<f64>>,
}

impl Snapshot {
    pub const VERSION: u32 = 1;

    /// Create an empty snapshot
    pub fn new() -> Self {
        Self {
            version: Self::VERSION,
            arrays: BTreeMap::new(),
        }
    }

    /// Insert or replace a named array
    pub fn insert(&mut self, name: &str, array: Array2<f64>) {
        self.arrays.insert(name.to_string(), array);
    }

    /// Look up a named array
    pub fn get(&self, name: &str) -> Option<&Array2<f64>> {
        self.arrays.get(name)
    }

    /// Look up a named array, requiring an exact shape.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingArray`] when the name is absent and
    /// [`Error::ShapeMismatch`] when the stored shape differs.
    pub fn get_with_shape(&self, name: &str, shape: (usize, usize)) -> Result<&Array2<f64>> {
        let array = self.arrays.get(name).ok_or_else(|| Error::MissingArray {
            name: name.to_string(),
        })?;
        if array.dim() != shape {
            return Err(Error::ShapeMismatch {
                name: name.to_string(),
                got: array.shape().to_vec(),
                expected: vec![shape.0, shape.1],
            });
        }
        Ok(array)
    }

    /// Names of the stored arrays, in stable order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.arrays.keys().map(String::as_str)
    }

    /// Save the snapshot to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create file: {}", path.as_ref().display()))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, self).context("Failed to serialize snapshot")?;
        Ok(())
    }

    /// Load a snapshot from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).context("Failed to deserialize snapshot")
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new()
    }
}
