//! Image-based classification and loading of cached images for it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine as _;

use crate::error::ClassifyError;

/// Place photos sent alongside the satellite tile.
pub const MAX_PLACE_PHOTOS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisionLabel {
    Competitor,
    NotCompetitor,
}

impl VisionLabel {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let cleaned = raw
            .trim()
            .trim_matches(|c: char| c == '.' || c == '"')
            .to_lowercase();
        match cleaned.as_str() {
            "competitor" => Some(Self::Competitor),
            "not a competitor" | "not competitor" => Some(Self::NotCompetitor),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Competitor => "Competitor",
            Self::NotCompetitor => "Not a Competitor",
        }
    }
}

impl std::fmt::Display for VisionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisionResult {
    pub label: VisionLabel,
    pub raw_label: String,
    pub justification: Option<String>,
}

/// One image, read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub path: PathBuf,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ImageInput {
    /// `data:` URL with base64 payload.
    #[must_use]
    pub fn data_url(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{encoded}", self.mime_type)
    }
}

/// Classifies a location from its satellite tile and place photos.
#[async_trait]
pub trait VisionClassifier: Send + Sync {
    /// `images` is ordered satellite first, then place photos.
    async fn classify_images(&self, images: &[ImageInput]) -> Result<VisionResult, ClassifyError>;
}

fn mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

async fn read_image(path: &Path) -> Result<Option<ImageInput>, ClassifyError> {
    let Some(mime_type) = mime_type(path) else {
        return Ok(None);
    };
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ClassifyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(ImageInput {
        path: path.to_path_buf(),
        mime_type,
        bytes,
    }))
}

/// Reads the satellite tile (if any) followed by at most
/// [`MAX_PLACE_PHOTOS`] photos. Unreadable or non-image files are skipped.
pub async fn load_images(satellite: Option<&Path>, photos: &[PathBuf]) -> Vec<ImageInput> {
    let paths = satellite
        .into_iter()
        .chain(photos.iter().take(MAX_PLACE_PHOTOS).map(PathBuf::as_path));

    let mut images = Vec::new();
    for path in paths {
        match read_image(path).await {
            Ok(Some(image)) => images.push(image),
            Ok(None) => {
                tracing::warn!(path = %path.display(), "not a supported image type; skipping");
            }
            Err(e) => tracing::warn!(error = %e, "skipping unreadable image"),
        }
    }
    images
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn parses_vision_labels() {
        assert_eq!(VisionLabel::parse("Competitor"), Some(VisionLabel::Competitor));
        assert_eq!(
            VisionLabel::parse("Not a Competitor"),
            Some(VisionLabel::NotCompetitor)
        );
        assert_eq!(VisionLabel::parse("Can't say"), None);
    }

    #[test]
    fn data_url_is_base64() {
        let image = ImageInput {
            path: PathBuf::from("photo_1.jpg"),
            mime_type: "image/jpeg",
            bytes: b"hi".to_vec(),
        };
        assert_eq!(image.data_url(), "data:image/jpeg;base64,aGk=");
    }

    #[tokio::test]
    async fn satellite_comes_first_and_photos_are_capped() {
        let dir = tempfile::tempdir().unwrap();
        let satellite = write(&dir, "abc.jpg", b"sat");
        let photos: Vec<_> = (1..=12)
            .map(|i| write(&dir, &format!("photo_{i}.jpg"), b"photo"))
            .collect();

        let images = load_images(Some(&satellite), &photos).await;

        assert_eq!(images.len(), 1 + MAX_PLACE_PHOTOS);
        assert_eq!(images[0].bytes, b"sat");
        assert_eq!(images[1].path, photos[0]);
        assert_eq!(images[9].path, photos[8]);
    }

    #[tokio::test]
    async fn missing_and_unsupported_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let notes = write(&dir, "notes.txt", b"text");
        let photo = write(&dir, "photo_1.PNG", b"png");
        let missing = dir.path().join("photo_2.jpg");

        let images = load_images(None, &[notes, photo.clone(), missing]).await;

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].path, photo);
        assert_eq!(images[0].mime_type, "image/png");
    }

    #[tokio::test]
    async fn nothing_to_load() {
        assert!(load_images(None, &[]).await.is_empty());
    }
}
