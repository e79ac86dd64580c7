//! On-disk cache of satellite tiles and place photos.
//!
//! Layout under the cache root:
//!
//! ```text
//! satellite_images/{place_id}.jpg
//! place_images/{origin}/{found}/photo_{n}.jpg      n = 1, 2, ...
//! ```
//!
//! A file on disk is a cache hit and is never downloaded again. Files are
//! written to a temporary name and renamed into place, so readers never see
//! a partial image. Downloads for the same key are serialised by a per-key
//! async mutex.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tokio::sync::Mutex;
use washscout_core::{GeoPoint, RetryPolicy};

use crate::client::ImageSource;
use crate::error::MapsError;

const SATELLITE_DIR: &str = "satellite_images";
const PHOTO_DIR: &str = "place_images";
const UNNAMED_SEGMENT: &str = "unnamed";

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid regex"));

/// Replaces each run of non-alphanumeric characters with one `_` and trims
/// leading and trailing underscores.
#[must_use]
pub fn sanitize_path_segment(name: &str) -> String {
    NON_ALPHANUMERIC
        .replace_all(name, "_")
        .trim_matches('_')
        .to_string()
}

fn segment(name: &str) -> String {
    let cleaned = sanitize_path_segment(name);
    if cleaned.is_empty() {
        UNNAMED_SEGMENT.to_string()
    } else {
        cleaned
    }
}

pub struct AssetCache {
    root: PathBuf,
    source: Arc<dyn ImageSource>,
    retry: RetryPolicy,
    locks: Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl AssetCache {
    pub fn new(root: impl Into<PathBuf>, source: Arc<dyn ImageSource>, retry: RetryPolicy) -> Self {
        Self {
            root: root.into(),
            source,
            retry,
            locks: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn satellite_path(&self, place_id: &str) -> PathBuf {
        self.root
            .join(SATELLITE_DIR)
            .join(format!("{}.jpg", segment(place_id)))
    }

    /// The cached satellite tile for `place_id`, if present.
    pub async fn get_satellite(&self, place_id: &str) -> Option<PathBuf> {
        let path = self.satellite_path(place_id);
        is_file(&path).await.then_some(path)
    }

    /// Returns the cached tile or downloads it. `None` once retries are
    /// exhausted or the file cannot be written.
    pub async fn fetch_satellite(&self, place_id: &str, center: GeoPoint) -> Option<PathBuf> {
        let path = self.satellite_path(place_id);
        let lock = self.key_lock(&path).await;
        let fetched = {
            let _guard = lock.lock().await;
            self.download_satellite(place_id, center, path.clone()).await
        };
        self.release_lock(&path, lock).await;
        fetched
    }

    async fn download_satellite(
        &self,
        place_id: &str,
        center: GeoPoint,
        path: PathBuf,
    ) -> Option<PathBuf> {
        if is_file(&path).await {
            tracing::debug!(place_id, "satellite tile cache hit");
            return Some(path);
        }

        let bytes = match self
            .retry
            .run("staticmap", || self.source.satellite_tile(center))
            .await
        {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(place_id, error = %e, "satellite tile unavailable");
                return None;
            }
        };

        match write_atomic(&path, &bytes).await {
            Ok(()) => {
                tracing::info!(place_id, path = %path.display(), "saved satellite tile");
                Some(path)
            }
            Err(e) => {
                tracing::warn!(place_id, error = %e, "failed to store satellite tile");
                None
            }
        }
    }

    #[must_use]
    pub fn photo_dir(&self, origin: &str, found: &str) -> PathBuf {
        self.root
            .join(PHOTO_DIR)
            .join(segment(origin))
            .join(segment(found))
    }

    /// Cached photos for the pair, ordered by photo index.
    pub async fn get_photos(&self, origin: &str, found: &str) -> Vec<PathBuf> {
        list_photos(&self.photo_dir(origin, found)).await
    }

    /// Downloads every photo in `refs` that is not already on disk.
    ///
    /// When the files on disk already cover `refs`, no network call is made.
    /// A photo that still fails after retries is skipped.
    pub async fn fetch_photos(&self, origin: &str, found: &str, refs: &[String]) -> Vec<PathBuf> {
        let dir = self.photo_dir(origin, found);
        let lock = self.key_lock(&dir).await;
        let photos = {
            let _guard = lock.lock().await;
            self.download_photos(found, refs, &dir).await
        };
        self.release_lock(&dir, lock).await;
        photos
    }

    async fn download_photos(&self, found: &str, refs: &[String], dir: &Path) -> Vec<PathBuf> {
        let existing = list_photos(dir).await;
        if existing.len() >= refs.len() {
            return existing;
        }

        for (index, photo_ref) in refs.iter().enumerate() {
            let path = dir.join(photo_file_name(index + 1));
            if is_file(&path).await {
                continue;
            }
            let bytes = match self
                .retry
                .run("photo media", || self.source.photo_media(photo_ref))
                .await
            {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!(found, index = index + 1, error = %e, "skipping place photo");
                    continue;
                }
            };
            if let Err(e) = write_atomic(&path, &bytes).await {
                tracing::warn!(found, index = index + 1, error = %e, "failed to store place photo");
            }
        }

        let photos = list_photos(dir).await;
        tracing::debug!(found, photos = photos.len(), "place photos ready");
        photos
    }

    /// Looks up the place's photo references and downloads what is missing.
    /// Falls back to the photos already on disk if the lookup fails.
    pub async fn ensure_photos(&self, origin: &str, found: &str, place_id: &str) -> Vec<PathBuf> {
        match self
            .retry
            .run("place photos", || self.source.photo_references(place_id))
            .await
        {
            Ok(refs) => self.fetch_photos(origin, found, &refs).await,
            Err(e) => {
                tracing::warn!(place_id, error = %e, "photo lookup failed; using cached photos");
                self.get_photos(origin, found).await
            }
        }
    }

    async fn key_lock(&self, key: &Path) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        Arc::clone(locks.entry(key.to_path_buf()).or_default())
    }

    /// Drops the key's lock entry once no other task holds or waits on it.
    async fn release_lock(&self, key: &Path, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().await;
        drop(lock);
        if locks.get(key).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(key);
        }
    }
}

fn photo_file_name(index: usize) -> String {
    format!("photo_{index}.jpg")
}

/// Parses `photo_{n}.jpg` into `n`.
fn photo_index(file_name: &str) -> Option<usize> {
    file_name
        .strip_prefix("photo_")?
        .strip_suffix(".jpg")?
        .parse()
        .ok()
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|m| m.is_file())
}

async fn list_photos(dir: &Path) -> Vec<PathBuf> {
    let Ok(mut entries) = tokio::fs::read_dir(dir).await else {
        return Vec::new();
    };

    let mut photos = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let name = entry.file_name();
        let Some(index) = name.to_str().and_then(photo_index) else {
            continue;
        };
        if entry.file_type().await.is_ok_and(|t| t.is_file()) {
            photos.push((index, entry.path()));
        }
    }
    photos.sort_by_key(|(index, _)| *index);
    photos.into_iter().map(|(_, path)| path).collect()
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), MapsError> {
    let io_err = |source| MapsError::Io {
        path: path.to_path_buf(),
        source,
    };

    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    tokio::fs::create_dir_all(parent).await.map_err(io_err)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = parent.join(format!(".{file_name}.{:016x}.tmp", rand::random::<u64>()));

    if let Err(e) = tokio::fs::write(&tmp, bytes).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(io_err(e));
    }
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(io_err(e));
    }
    Ok(())
}

#[cfg(test)]
#[path = "assets_test.rs"]
mod tests;
