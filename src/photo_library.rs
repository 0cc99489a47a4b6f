use anyhow::{bail, Context, Result};
use ignore::WalkBuilder;
use image::codecs::jpeg::JpegEncoder;
use image::ImageReader;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

use crate::constants::{THUMBNAIL_JPEG_QUALITY, THUMBNAIL_SIZE};
use crate::itinerary::Itinerary;

// Must match the decoders enabled on the `image` dependency.
const SUPPORTED_FORMATS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Local photo directory backing `local` photo references.
#[derive(Debug, Clone)]
pub struct PhotoLibrary {
    root: PathBuf,
    files: BTreeSet<String>,
}

impl PhotoLibrary {
    /// Index every supported image below `root`, skipping hidden entries.
    pub fn scan<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            bail!("Photos directory not found: {}", root.display());
        }

        let files: BTreeSet<String> = WalkBuilder::new(&root)
            .hidden(true)
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .filter(|e| is_supported(e.path()))
            .filter_map(|e| {
                e.path()
                    .strip_prefix(&root)
                    .ok()
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
            })
            .collect();

        info!(root = %root.display(), count = files.len(), "Indexed local photos");
        Ok(Self { root, files })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, relative: &str) -> bool {
        self.files.contains(relative.trim_start_matches('/'))
    }

    /// `local` references in the itinerary that have no file in the library.
    pub fn missing_references(&self, itinerary: &Itinerary) -> Vec<String> {
        let hero = itinerary.hero.iter();
        let photos = itinerary.days().iter().flat_map(|d| d.photos.iter());

        let mut missing: Vec<String> = hero
            .chain(photos)
            .filter_map(|p| p.local.as_deref())
            .filter(|path| !self.contains(path))
            .map(str::to_string)
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }

    /// Absolute path for a relative reference, refusing anything that leaves the root.
    pub fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let relative = Path::new(relative.trim_start_matches('/'));
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || !self.contains(&relative.to_string_lossy().replace('\\', "/")) {
            return None;
        }
        Some(self.root.join(relative))
    }

    /// JPEG thumbnail scaled to fit `THUMBNAIL_SIZE`, aspect ratio preserved.
    pub fn thumbnail(&self, relative: &str) -> Result<Vec<u8>> {
        let path = self
            .resolve(relative)
            .with_context(|| format!("Photo not in library: {}", relative))?;
        create_thumbnail_in_memory(&path, THUMBNAIL_SIZE)
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| SUPPORTED_FORMATS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Decode `path`, scale it to fit a `size`×`size` box and encode as JPEG.
pub fn create_thumbnail_in_memory(path: &Path, size: u32) -> Result<Vec<u8>> {
    let img = ImageReader::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?
        .with_guessed_format()?
        .decode()
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    // Only shrink; small images are served at their own size
    let scaled = if img.width() > size || img.height() > size {
        img.resize(size, size, image::imageops::FilterType::Triangle)
    } else {
        img
    };

    let rgb = scaled.to_rgb8();
    let mut jpeg_data = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg_data, THUMBNAIL_JPEG_QUALITY)
        .encode_image(&rgb)
        .context("Failed to encode thumbnail")?;

    debug!(
        path = %path.display(),
        width = rgb.width(),
        height = rgb.height(),
        bytes = jpeg_data.len(),
        "Created thumbnail"
    );
    Ok(jpeg_data)
}
