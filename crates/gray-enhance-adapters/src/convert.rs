//! Conversion between decoded rasters and pixel matrices.

use anyhow::{bail, Context, Result};
use gray_enhance_core::PixelMatrix;
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};

/// Largest depth representable by 8-bit grayscale.
const LUMA8_DEPTH: usize = 1 << 8;
/// Largest depth representable by 16-bit grayscale.
const LUMA16_DEPTH: usize = 1 << 16;

/// Maps `sample` from `[0, from - 1]` onto `[0, to - 1]`, rounding half up.
fn rescale(sample: u128, from: usize, to: usize) -> u128 {
    if from == to {
        return sample;
    }
    let (from_top, to_top) = ((from - 1) as u128, (to - 1) as u128);
    (sample * to_top + from_top / 2) / from_top
}

/// Converts any decoded image to a grayscale matrix.
///
/// Depths up to 256 read 8-bit luminance; larger depths read 16-bit
/// luminance. Samples are rescaled onto `[0, depth - 1]`.
///
/// # Errors
///
/// Returns an error if the image has a zero dimension, `depth < 2`, or the
/// depth does not fit a `u32` pixel.
pub fn matrix_from_image(image: &DynamicImage, depth: usize) -> Result<PixelMatrix> {
    let (width, height, samples, source_depth): (u32, u32, Vec<u32>, usize) =
        if depth <= LUMA8_DEPTH {
            let luma = image.to_luma8();
            let (w, h) = luma.dimensions();
            (w, h, luma.into_raw().into_iter().map(u32::from).collect(), LUMA8_DEPTH)
        } else {
            let luma = image.to_luma16();
            let (w, h) = luma.dimensions();
            (w, h, luma.into_raw().into_iter().map(u32::from).collect(), LUMA16_DEPTH)
        };
    if depth < 2 {
        bail!("color depth must be at least 2, got {depth}");
    }
    let data = samples
        .into_iter()
        .map(|s| u32::try_from(rescale(u128::from(s), source_depth, depth)))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("color depth {depth} does not fit a pixel"))?;
    Ok(PixelMatrix::new(
        width as usize,
        height as usize,
        depth,
        data,
    )?)
}

/// Converts a matrix back into a grayscale image.
///
/// Pixels are rescaled onto 8-bit samples for depths up to 256 and onto
/// 16-bit samples up to 65536.
///
/// # Errors
///
/// Returns an error if the depth exceeds 16-bit grayscale or a pixel lies
/// outside `[0, depth - 1]`.
pub fn matrix_to_image(matrix: &PixelMatrix) -> Result<DynamicImage> {
    let width = u32::try_from(matrix.width())?;
    let height = u32::try_from(matrix.height())?;
    let depth = matrix.depth();
    if depth > LUMA16_DEPTH {
        bail!("color depth {depth} exceeds 16-bit grayscale");
    }
    matrix.check_range()?;

    let target = if depth <= LUMA8_DEPTH {
        LUMA8_DEPTH
    } else {
        LUMA16_DEPTH
    };
    let samples = matrix
        .pixels()
        .iter()
        .map(|&v| rescale(u128::from(v), depth, target));

    if target == LUMA8_DEPTH {
        let raw = samples.map(u8::try_from).collect::<Result<Vec<_>, _>>()?;
        let Some(buffer) = GrayImage::from_raw(width, height, raw) else {
            bail!("pixel buffer does not match {width}x{height}");
        };
        Ok(DynamicImage::ImageLuma8(buffer))
    } else {
        let raw = samples.map(u16::try_from).collect::<Result<Vec<_>, _>>()?;
        let Some(buffer) = ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(width, height, raw) else {
            bail!("pixel buffer does not match {width}x{height}");
        };
        Ok(DynamicImage::ImageLuma16(buffer))
    }
}
