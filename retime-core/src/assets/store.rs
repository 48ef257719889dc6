use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;
use image::RgbaImage;

use crate::{
    assets::decode,
    foundation::error::{RetimeError, RetimeResult},
    retime::frame::{Frame, frames_from_images},
};

/// Source of named frame images.
///
/// All IO happens in [`ImageStore::load`]; the retiming core only clones buffers it already holds.
pub trait ImageStore {
    /// Load and decode the image called `name`.
    fn load(&self, name: &str) -> RetimeResult<RgbaImage>;

    /// Deep copy of `image`.
    fn copy(&self, image: &RgbaImage) -> RgbaImage {
        image.clone()
    }

    /// `(width, height)` in pixels.
    fn dimensions(&self, image: &RgbaImage) -> (u32, u32) {
        image.dimensions()
    }
}

/// Images read from files below a root directory.
#[derive(Clone, Debug)]
pub struct DirImageStore {
    root: PathBuf,
}

impl DirImageStore {
    /// Store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory names are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ImageStore for DirImageStore {
    fn load(&self, name: &str) -> RetimeResult<RgbaImage> {
        let norm = normalize_rel_path(name)?;
        let path = self.root.join(Path::new(&norm));
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read frame image from '{}'", path.display()))?;
        decode::decode_frame(&bytes)
    }
}

/// Images held in memory, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct MemoryImageStore {
    images: HashMap<String, RgbaImage>,
}

impl MemoryImageStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace `name`.
    pub fn insert(&mut self, name: impl Into<String>, image: RgbaImage) {
        self.images.insert(name.into(), image);
    }
}

impl ImageStore for MemoryImageStore {
    fn load(&self, name: &str) -> RetimeResult<RgbaImage> {
        self.images
            .get(name)
            .cloned()
            .ok_or_else(|| RetimeError::validation(format!("unknown frame image '{name}'")))
    }
}

/// Name of frame `index` under `pattern` (`{index}` placeholder).
pub fn frame_name(pattern: &str, index: usize) -> String {
    pattern.replace("{index}", &index.to_string())
}

/// Load frames `0..count` named by `pattern` as an identity sequence.
///
/// Every frame must exist and all frames must share the first frame's dimensions.
#[tracing::instrument(skip(store))]
pub fn load_sequence(
    store: &dyn ImageStore,
    pattern: &str,
    count: usize,
) -> RetimeResult<Vec<Frame>> {
    if count == 0 {
        return Err(RetimeError::validation("frame count must be > 0"));
    }
    if !pattern.contains("{index}") {
        return Err(RetimeError::validation(format!(
            "frame pattern '{pattern}' must contain '{{index}}'"
        )));
    }

    let mut images = Vec::with_capacity(count);
    let mut expected = None;
    for i in 0..count {
        let name = frame_name(pattern, i);
        let img = store.load(&name)?;
        let dims = store.dimensions(&img);
        match expected {
            None => expected = Some(dims),
            Some(first) if first != dims => {
                return Err(RetimeError::validation(format!(
                    "frame '{name}' is {}x{}, expected {}x{}",
                    dims.0, dims.1, first.0, first.1
                )));
            }
            Some(_) => {}
        }
        images.push(img);
    }

    tracing::debug!(count, "frame sequence loaded");
    Ok(frames_from_images(images))
}

/// Normalize and validate store-relative image names.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> RetimeResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(RetimeError::validation("frame paths must be relative"));
    }
    if s.is_empty() {
        return Err(RetimeError::validation("frame path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(RetimeError::validation("frame paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(RetimeError::validation(
            "frame path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
