//! Reading QR content back out of a picture of a code.
//!
//! The decoded text is re-encoded by [`QrCodeSource`](crate::source::QrCodeSource),
//! so the plate always carries a clean symbol whatever the photo looked like.

use std::path::Path;

use anyhow::{anyhow, bail, Context};
use image::GrayImage;
use tracing::debug;

/// Decodes the first readable QR symbol in the image file at `path`.
pub fn read_qr_image(path: &Path) -> anyhow::Result<String> {
    let luma = image::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?
        .into_luma8();

    decode_luma(&luma).with_context(|| format!("Unable to read a QR code from {}", path.display()))
}

/// Decodes the first readable QR symbol in a greyscale image.
pub fn decode_luma(luma: &GrayImage) -> anyhow::Result<String> {
    let (width, height) = luma.dimensions();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        width as usize,
        height as usize,
        |x, y| luma.get_pixel(x as u32, y as u32).0[0],
    );

    let grids = prepared.detect_grids();
    debug!(width, height, candidates = grids.len(), "scanned image for QR symbols");

    let mut last_error = None;
    for grid in &grids {
        match grid.decode() {
            Ok((_, content)) => return Ok(content),
            Err(e) => last_error = Some(e),
        }
    }

    match last_error {
        Some(e) => Err(anyhow!("QR symbol found but could not be decoded: {e:?}")),
        None => bail!("no QR symbol found in image"),
    }
}
