use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::RetimeResult;

/// Decode encoded image bytes into straight-alpha RGBA8.
pub fn decode_frame(bytes: &[u8]) -> RetimeResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode frame image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Encode a frame as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> RetimeResult<Vec<u8>> {
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .context("encode frame as png")?;
    Ok(out.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
