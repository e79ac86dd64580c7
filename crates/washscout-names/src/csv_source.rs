//! Reference registries loaded from a CSV export with a `Company Name`
//! column, cached per file path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::NamesError;
use crate::registry::ReferenceRegistry;

const NAME_COLUMN: &str = "company name";

/// Builds each CSV-backed registry at most once per path.
#[derive(Debug, Default)]
pub struct RegistryCache {
    loaded: Mutex<HashMap<PathBuf, Arc<ReferenceRegistry>>>,
}

impl RegistryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the registry for `path`, reading the file on first use only.
    ///
    /// A file without a `Company Name` column yields an empty registry.
    ///
    /// # Errors
    ///
    /// Returns [`NamesError::Io`] if the file cannot be read and
    /// [`NamesError::Csv`] if its rows cannot be parsed.
    pub async fn load(&self, path: &Path) -> Result<Arc<ReferenceRegistry>, NamesError> {
        let mut loaded = self.loaded.lock().await;
        if let Some(registry) = loaded.get(path) {
            return Ok(Arc::clone(registry));
        }

        let bytes = tokio::fs::read(path).await.map_err(|source| NamesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let names = company_names(&bytes).map_err(|source| NamesError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        let registry = match names {
            Some(names) => ReferenceRegistry::from_names(names),
            None => {
                tracing::warn!(
                    path = %path.display(),
                    "reference CSV has no 'Company Name' column; using an empty registry"
                );
                ReferenceRegistry::default()
            }
        };
        tracing::info!(path = %path.display(), names = registry.len(), "loaded reference registry");

        let registry = Arc::new(registry);
        loaded.insert(path.to_path_buf(), Arc::clone(&registry));
        Ok(registry)
    }
}

/// Values of the `Company Name` column, or `None` when the column is absent.
/// Cells are decoded lossily since exports are often Windows-1252.
fn company_names(bytes: &[u8]) -> Result<Option<Vec<String>>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.byte_headers()?.clone();
    let Some(column) = headers
        .iter()
        .position(|h| String::from_utf8_lossy(h).trim().eq_ignore_ascii_case(NAME_COLUMN))
    else {
        return Ok(None);
    };

    let mut names = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        if let Some(cell) = record.get(column) {
            names.push(String::from_utf8_lossy(cell).into_owned());
        }
    }
    Ok(Some(names))
}
