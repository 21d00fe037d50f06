//! Mipmap reduction for canonical RGBA8888 buffers.
//!
//! Each target dimension must equal the source dimension or exactly half
//! of it; this covers every step of a power-of-two mipmap chain, including
//! the non-square tail where only one axis still shrinks. The four source
//! samples for an output pixel collapse onto each other along any axis
//! that is not being halved, so the bilinear filter degenerates cleanly to
//! a 1-D average or the identity.

use tracing::trace;

use crate::error::FormatError;
use crate::parallel::for_each_row;

/// Sample-selection mode for [`scale_down`].
///
/// The four corner modes pick one pixel of each 2×2 group; `Bilinear`
/// averages all four with truncating division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MipFilter {
    UpperLeft = 0,
    UpperRight = 1,
    LowerLeft = 2,
    LowerRight = 3,
    Bilinear = 4,
}

impl MipFilter {
    /// Look up a filter by its wire index.
    ///
    /// # Errors
    ///
    /// [`FormatError::InvalidArgument`] for indices above 4.
    pub fn from_index(index: usize) -> Result<MipFilter, FormatError> {
        match index {
            0 => Ok(MipFilter::UpperLeft),
            1 => Ok(MipFilter::UpperRight),
            2 => Ok(MipFilter::LowerLeft),
            3 => Ok(MipFilter::LowerRight),
            4 => Ok(MipFilter::Bilinear),
            _ => Err(FormatError::InvalidArgument(format!(
                "filter index {index}"
            ))),
        }
    }
}

fn check_axis(name: &str, src: usize, dst: usize) -> Result<(), FormatError> {
    if dst == src || dst * 2 == src {
        Ok(())
    } else {
        Err(FormatError::InvalidArgument(format!(
            "{name} {src} -> {dst}: target must equal the source dimension or half of it"
        )))
    }
}

/// Reduce `src` (`src_w`×`src_h` RGBA pixels) into `dst`
/// (`dst_w`×`dst_h`), halving either axis, both, or neither.
///
/// With equal dimensions every filter mode is the identity.
///
/// # Errors
///
/// [`FormatError::InvalidArgument`] for a dimension ratio other than 1 or
/// ½, or span lengths that do not match the dimensions.
pub fn scale_down(
    filter: MipFilter,
    src_w: usize,
    src_h: usize,
    dst_w: usize,
    dst_h: usize,
    src: &[u8],
    dst: &mut [u8],
) -> Result<(), FormatError> {
    check_axis("width", src_w, dst_w)?;
    check_axis("height", src_h, dst_h)?;
    if src.len() != 4 * src_w * src_h {
        return Err(FormatError::InvalidArgument(format!(
            "source buffer is {} bytes, {src_w}x{src_h} RGBA needs {}",
            src.len(),
            4 * src_w * src_h
        )));
    }
    if dst.len() != 4 * dst_w * dst_h {
        return Err(FormatError::InvalidArgument(format!(
            "target buffer is {} bytes, {dst_w}x{dst_h} RGBA needs {}",
            dst.len(),
            4 * dst_w * dst_h
        )));
    }

    trace!(?filter, src_w, src_h, dst_w, dst_h, "scaling down");

    // Per-axis strides, in pixels, into the source grid. Along an axis
    // that keeps its size the second sample offset degenerates to zero.
    let (horiz_off, per_col) = if dst_w != src_w { (4, 2) } else { (0, 1) };
    let (vert_off, per_row) = if dst_h != src_h {
        (4 * per_col * dst_w, 2 * per_col * dst_w)
    } else {
        (0, per_col * dst_w)
    };

    for_each_row(dst, 4 * dst_w, |y, out_row| {
        for (x, out) in out_row.chunks_exact_mut(4).enumerate() {
            let base = 4 * (per_row * y + per_col * x);
            match filter {
                MipFilter::UpperLeft => out.copy_from_slice(&src[base..base + 4]),
                MipFilter::UpperRight => {
                    let o = base + horiz_off;
                    out.copy_from_slice(&src[o..o + 4]);
                }
                MipFilter::LowerLeft => {
                    let o = base + vert_off;
                    out.copy_from_slice(&src[o..o + 4]);
                }
                MipFilter::LowerRight => {
                    let o = base + vert_off + horiz_off;
                    out.copy_from_slice(&src[o..o + 4]);
                }
                MipFilter::Bilinear => {
                    for c in 0..4 {
                        let sum = src[base + c] as u16
                            + src[base + horiz_off + c] as u16
                            + src[base + vert_off + c] as u16
                            + src[base + vert_off + horiz_off + c] as u16;
                        out[c] = (sum / 4) as u8;
                    }
                }
            }
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_index() {
        assert_eq!(MipFilter::from_index(0), Ok(MipFilter::UpperLeft));
        assert_eq!(MipFilter::from_index(4), Ok(MipFilter::Bilinear));
        assert!(matches!(
            MipFilter::from_index(5),
            Err(FormatError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_non_half_ratio() {
        let src = [0u8; 4 * 6 * 4];
        let mut dst = [0u8; 4 * 2 * 4];
        let err = scale_down(MipFilter::Bilinear, 6, 4, 2, 4, &src, &mut dst).unwrap_err();
        assert!(matches!(err, FormatError::InvalidArgument(_)));
    }

    #[test]
    fn test_rejects_wrong_span_length() {
        let src = [0u8; 4 * 4 * 4];
        let mut dst = [0u8; 7];
        let err = scale_down(MipFilter::Bilinear, 4, 4, 2, 2, &src, &mut dst).unwrap_err();
        assert!(matches!(err, FormatError::InvalidArgument(_)));
    }

    #[test]
    fn test_equal_dimensions_is_identity_for_all_filters() {
        let src: Vec<u8> = (0..4 * 3 * 2).map(|i| i as u8).collect();
        for filter in [
            MipFilter::UpperLeft,
            MipFilter::UpperRight,
            MipFilter::LowerLeft,
            MipFilter::LowerRight,
            MipFilter::Bilinear,
        ] {
            let mut dst = vec![0u8; src.len()];
            scale_down(filter, 3, 2, 3, 2, &src, &mut dst).unwrap();
            assert_eq!(dst, src, "{filter:?}");
        }
    }

    #[test]
    fn test_bilinear_2x2_to_1x1_floor_average() {
        let src = [
            10u8, 20, 30, 40, // A
            30, 40, 50, 60, // B
            50, 60, 70, 80, // C
            70, 80, 90, 100, // D
        ];
        let mut dst = [0u8; 4];
        scale_down(MipFilter::Bilinear, 2, 2, 1, 1, &src, &mut dst).unwrap();
        assert_eq!(dst, [40, 50, 60, 70]);
    }

    #[test]
    fn test_bilinear_truncates() {
        // Sums 1+2+3+1 = 7, 7/4 = 1 remainder 3: truncated.
        let src = [
            1u8, 0, 0, 255, //
            2, 0, 0, 255, //
            3, 0, 0, 255, //
            1, 0, 0, 255,
        ];
        let mut dst = [0u8; 4];
        scale_down(MipFilter::Bilinear, 2, 2, 1, 1, &src, &mut dst).unwrap();
        assert_eq!(dst[0], 1);
    }

    #[test]
    fn test_nearest_corners_4x4_to_2x2() {
        // Each 2x2 group gets distinct corner values in the red channel.
        let mut src = [0u8; 4 * 16];
        for y in 0..4 {
            for x in 0..4 {
                let px = 4 * (y * 4 + x);
                src[px] = (10 * (y * 4 + x)) as u8;
                src[px + 3] = 255;
            }
        }

        let mut dst = [0u8; 4 * 4];
        scale_down(MipFilter::UpperLeft, 4, 4, 2, 2, &src, &mut dst).unwrap();
        assert_eq!([dst[0], dst[4], dst[8], dst[12]], [0, 20, 80, 100]);

        scale_down(MipFilter::UpperRight, 4, 4, 2, 2, &src, &mut dst).unwrap();
        assert_eq!([dst[0], dst[4], dst[8], dst[12]], [10, 30, 90, 110]);

        scale_down(MipFilter::LowerLeft, 4, 4, 2, 2, &src, &mut dst).unwrap();
        assert_eq!([dst[0], dst[4], dst[8], dst[12]], [40, 60, 120, 140]);

        scale_down(MipFilter::LowerRight, 4, 4, 2, 2, &src, &mut dst).unwrap();
        assert_eq!([dst[0], dst[4], dst[8], dst[12]], [50, 70, 130, 150]);
    }

    #[test]
    fn test_single_axis_halving_averages_pairs() {
        // 4x1 -> 2x1: horizontal pairs only.
        let src = [
            10u8, 0, 0, 255, //
            20, 0, 0, 255, //
            100, 0, 0, 255, //
            200, 0, 0, 255,
        ];
        let mut dst = [0u8; 8];
        scale_down(MipFilter::Bilinear, 4, 1, 2, 1, &src, &mut dst).unwrap();
        assert_eq!(dst[0], 15);
        assert_eq!(dst[4], 150);

        // 1x4 -> 1x2: vertical pairs.
        let mut dst = [0u8; 8];
        scale_down(MipFilter::Bilinear, 1, 4, 1, 2, &src, &mut dst).unwrap();
        assert_eq!(dst[0], 15);
        assert_eq!(dst[4], 150);
    }

    #[test]
    fn test_preserves_alpha_channel() {
        let src = [
            0u8, 0, 0, 100, //
            0, 0, 0, 102, //
            0, 0, 0, 104, //
            0, 0, 0, 106,
        ];
        let mut dst = [0u8; 4];
        scale_down(MipFilter::Bilinear, 2, 2, 1, 1, &src, &mut dst).unwrap();
        assert_eq!(dst[3], 103);
    }
}
