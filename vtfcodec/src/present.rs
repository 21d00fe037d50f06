//! Preview helpers: alpha flattening and netpbm (P6) emission.
//!
//! Both operate on the canonical RGBA8888 buffer only and produce
//! top-to-bottom, row-major RGB. With a background colour the alpha
//! channel is composited away; without one it is simply dropped (no
//! premultiplication is assumed).

use crate::error::FormatError;
use crate::parallel::for_each_row;

#[inline]
fn composite(px: &[u8], bg: [u8; 3], out: &mut [u8]) {
    let a = px[3] as f32 / 255.0;
    let inv = 1.0 - a;
    out[0] = (px[0] as f32 * a + bg[0] as f32 * inv) as u8;
    out[1] = (px[1] as f32 * a + bg[1] as f32 * inv) as u8;
    out[2] = (px[2] as f32 * a + bg[2] as f32 * inv) as u8;
}

fn flatten_rows(pixels: &[u8], dst: &mut [u8], width: usize, background: Option<[u8; 3]>) {
    for_each_row(dst, 3 * width, |y, out_row| {
        let src_row = &pixels[4 * width * y..4 * width * (y + 1)];
        for (out, px) in out_row.chunks_exact_mut(3).zip(src_row.chunks_exact(4)) {
            match background {
                Some(bg) => composite(px, bg, out),
                None => out.copy_from_slice(&px[0..3]),
            }
        }
    });
}

/// Strip or composite away the alpha channel into a caller-owned
/// `3·width·height` RGB buffer.
///
/// With `background` set, each pixel becomes `src·a + bg·(1−a)` with
/// `a = A/255`, truncated per channel; otherwise RGB passes through and
/// alpha is discarded.
///
/// # Errors
///
/// [`FormatError::InvalidArgument`] if either span length is wrong.
pub fn alpha_flatten(
    pixels: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    background: Option<[u8; 3]>,
) -> Result<(), FormatError> {
    if pixels.len() != 4 * width * height {
        return Err(FormatError::InvalidArgument(format!(
            "canonical buffer is {} bytes, {width}x{height} RGBA needs {}",
            pixels.len(),
            4 * width * height
        )));
    }
    if dst.len() != 3 * width * height {
        return Err(FormatError::InvalidArgument(format!(
            "RGB buffer is {} bytes, {width}x{height} needs {}",
            dst.len(),
            3 * width * height
        )));
    }

    flatten_rows(pixels, dst, width, background);
    Ok(())
}

/// Render the canonical buffer as a binary netpbm (P6) byte stream.
///
/// The output is the exact header `P6 <width> <height> 255\n` followed by
/// `3·width·height` RGB bytes with no trailing newline. Alpha handling
/// matches [`alpha_flatten`].
///
/// # Errors
///
/// [`FormatError::InvalidArgument`] if `pixels` does not hold
/// `4·width·height` bytes.
pub fn ppm(
    pixels: &[u8],
    width: usize,
    height: usize,
    background: Option<[u8; 3]>,
) -> Result<Vec<u8>, FormatError> {
    if pixels.len() != 4 * width * height {
        return Err(FormatError::InvalidArgument(format!(
            "canonical buffer is {} bytes, {width}x{height} RGBA needs {}",
            pixels.len(),
            4 * width * height
        )));
    }

    let header = format!("P6 {width} {height} 255\n");
    let mut out = vec![0u8; header.len() + 3 * width * height];
    out[..header.len()].copy_from_slice(header.as_bytes());
    flatten_rows(pixels, &mut out[header.len()..], width, background);
    Ok(out)
}
