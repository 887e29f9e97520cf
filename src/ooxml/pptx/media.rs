//! Picture payload storage.
//!
//! Pictures embedded in slides are written out through an [`ImageStore`] so
//! the rendered markup can reference them by relative path. Two stores are
//! provided: one that writes to a directory and one that keeps everything in
//! memory.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Default path prefix under which markup references stored images.
pub const DEFAULT_IMAGE_PREFIX: &str = "images";

/// Sink for extracted picture payloads.
///
/// Slides may be extracted on several threads at once, so stores take `&self`
/// and must be `Sync`.
pub trait ImageStore: Send + Sync {
    /// Store `data` as `file_name` and return the relative path markup
    /// should use to reference it.
    fn put(&self, file_name: &str, data: &[u8]) -> io::Result<String>;
}

/// Writes images into a directory.
///
/// `DirImageStore::new("out/images")` writes `out/images/slide1_img2.png`
/// and reports `images/slide1_img2.png`.
#[derive(Debug, Clone)]
pub struct DirImageStore {
    root: PathBuf,
    prefix: String,
}

impl DirImageStore {
    /// Create a store rooted at `root` with the default `images` prefix.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            prefix: DEFAULT_IMAGE_PREFIX.to_string(),
        }
    }

    /// Set the path prefix used in returned references.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageStore for DirImageStore {
    fn put(&self, file_name: &str, data: &[u8]) -> io::Result<String> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.root.join(file_name), data)?;
        Ok(join_reference(&self.prefix, file_name))
    }
}

/// Keeps images in memory, keyed by file name.
#[derive(Debug)]
pub struct MemoryImageStore {
    prefix: String,
    images: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_IMAGE_PREFIX.to_string(),
            images: Mutex::new(BTreeMap::new()),
        }
    }

    /// Set the path prefix used in returned references.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Get a copy of a stored image.
    pub fn get(&self, file_name: &str) -> Option<Vec<u8>> {
        self.images.lock().get(file_name).cloned()
    }

    /// Stored file names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.images.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.images.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.lock().is_empty()
    }

    /// Consume the store and return every image.
    pub fn into_inner(self) -> BTreeMap<String, Vec<u8>> {
        self.images.into_inner()
    }
}

impl Default for MemoryImageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageStore for MemoryImageStore {
    fn put(&self, file_name: &str, data: &[u8]) -> io::Result<String> {
        self.images.lock().insert(file_name.to_string(), data.to_vec());
        Ok(join_reference(&self.prefix, file_name))
    }
}

fn join_reference(prefix: &str, file_name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", prefix, file_name)
    }
}

/// File extension used for an extracted picture.
///
/// Lower-cases the part extension and spells JPEG as `jpg`.
pub fn image_extension(part_ext: &str) -> String {
    let ext = part_ext.to_ascii_lowercase();
    match ext.as_str() {
        "jpeg" => "jpg".to_string(),
        "" => "bin".to_string(),
        _ => ext,
    }
}

/// Intrinsic pixel size of an encoded picture, if it can be decoded.
///
/// Only the header is read. Vector formats such as EMF/WMF report `None`.
#[cfg(feature = "imgconv")]
pub fn image_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(io::Cursor::new(data))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

#[cfg(not(feature = "imgconv"))]
pub fn image_dimensions(_data: &[u8]) -> Option<(u32, u32)> {
    None
}
