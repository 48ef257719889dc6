use image::RgbaImage;

use crate::foundation::math::Fnv1a64;

#[derive(Clone, Debug, PartialEq)]
/// One timeline slot: a fixed position plus the content currently shown there.
pub struct Frame {
    index: usize,
    pub(crate) src_index: usize,
    pub(crate) delta: i32,
    pub(crate) overwritten: bool,
    pub(crate) image: RgbaImage,
}

impl Frame {
    /// Identity frame at `index` owning `image`.
    pub fn new(index: usize, image: RgbaImage) -> Self {
        Self {
            index,
            src_index: index,
            delta: 0,
            overwritten: false,
            image,
        }
    }

    /// Fixed timeline position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Source frame whose content currently occupies this slot.
    pub fn src_index(&self) -> usize {
        self.src_index
    }

    /// Instruction value that produced the current content (`0` for untouched slots).
    pub fn delta(&self) -> i32 {
        self.delta
    }

    /// `true` once the retiming walk has assigned this slot.
    pub fn is_overwritten(&self) -> bool {
        self.overwritten
    }

    /// Pixel content.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Fresh identity slot with a deep copy of this frame's image.
    pub fn identity_copy(&self) -> Self {
        Self::new(self.index, self.image.clone())
    }
}

/// Number images `0..n` as an identity sequence.
pub fn frames_from_images(images: Vec<RgbaImage>) -> Vec<Frame> {
    images
        .into_iter()
        .enumerate()
        .map(|(i, img)| Frame::new(i, img))
        .collect()
}

/// Destination list that starts content-identical to `src`.
pub fn identity_copies(src: &[Frame]) -> Vec<Frame> {
    src.iter().map(Frame::identity_copy).collect()
}

/// Stable 64-bit hash over provenance and pixel content of a sequence.
pub fn fingerprint_frames(frames: &[Frame]) -> u64 {
    let mut h = Fnv1a64::new_default();
    h.write_u64(frames.len() as u64);
    for f in frames {
        h.write_u64(f.index as u64);
        h.write_u64(f.src_index as u64);
        h.write_i64(i64::from(f.delta));
        h.write_u8(u8::from(f.overwritten));
        let (w, height) = f.image.dimensions();
        h.write_u64((u64::from(w) << 32) | u64::from(height));
        h.write_bytes(f.image.as_raw());
    }
    h.finish()
}

/// One-line `src/index/delta` dump per slot, `*` marking overwritten slots.
pub fn provenance_line(frames: &[Frame]) -> String {
    let mut out = String::with_capacity(frames.len() * 10);
    for f in frames {
        out.push_str(&format!("{}/{}/{}", f.src_index, f.index, f.delta));
        out.push_str(if f.overwritten { "* #" } else { " #" });
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/retime/frame.rs"]
mod tests;
