//! Static-partition parallel fan-out for per-pixel work.
//!
//! The pixel range is split into one contiguous chunk per worker before any
//! work starts; rayon only decides which thread runs which chunk. The output
//! is therefore a pure function of the input regardless of worker count or
//! schedule, and because chunk boundaries always land on whole pixels, no
//! two workers ever write the same output byte.
//!
//! Small images skip the thread pool entirely and produce byte-identical
//! results on the calling thread.

use rayon::prelude::*;

/// Images below this many pixels are processed serially.
pub(crate) const PARALLEL_THRESHOLD: usize = 64 * 64;

/// Run `op` once per pixel over zipped destination/source spans.
///
/// `dst_bpp` and `src_bpp` are the per-pixel byte strides of the two spans;
/// the span lengths must describe the same pixel count.
pub(crate) fn for_each_pixel<F>(dst: &mut [u8], src: &[u8], dst_bpp: usize, src_bpp: usize, op: F)
where
    F: Fn(&mut [u8], &[u8]) + Sync,
{
    debug_assert_eq!(dst.len() % dst_bpp, 0);
    debug_assert_eq!(src.len() % src_bpp, 0);
    debug_assert_eq!(dst.len() / dst_bpp, src.len() / src_bpp);

    let pixels = dst.len() / dst_bpp;
    if pixels < PARALLEL_THRESHOLD {
        for (d, s) in dst.chunks_exact_mut(dst_bpp).zip(src.chunks_exact(src_bpp)) {
            op(d, s);
        }
        return;
    }

    let chunk = pixels.div_ceil(rayon::current_num_threads()).max(1);
    dst.par_chunks_mut(chunk * dst_bpp)
        .zip(src.par_chunks(chunk * src_bpp))
        .for_each(|(d, s)| {
            for (dp, sp) in d.chunks_exact_mut(dst_bpp).zip(s.chunks_exact(src_bpp)) {
                op(dp, sp);
            }
        });
}

/// Run `op` once per fixed-size row of `buf`, passing the row index.
///
/// Rows are grouped into one contiguous band per worker, mirroring the
/// per-pixel partitioning above.
pub(crate) fn for_each_row<F>(buf: &mut [u8], row_bytes: usize, op: F)
where
    F: Fn(usize, &mut [u8]) + Sync,
{
    if buf.is_empty() {
        return;
    }
    debug_assert_eq!(buf.len() % row_bytes, 0);

    let rows = buf.len() / row_bytes;
    if rows * row_bytes < PARALLEL_THRESHOLD * 4 {
        for (y, row) in buf.chunks_exact_mut(row_bytes).enumerate() {
            op(y, row);
        }
        return;
    }

    let band = rows.div_ceil(rayon::current_num_threads()).max(1);
    buf.par_chunks_mut(band * row_bytes)
        .enumerate()
        .for_each(|(i, rows)| {
            for (j, row) in rows.chunks_exact_mut(row_bytes).enumerate() {
                op(i * band + j, row);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_each_pixel_serial_small() {
        let src = [1u8, 2, 3, 4, 5, 6];
        let mut dst = [0u8; 4];
        // 3-byte source pixels to 2-byte destination pixels
        for_each_pixel(&mut dst, &src, 2, 3, |d, s| {
            d[0] = s[0];
            d[1] = s[2];
        });
        assert_eq!(dst, [1, 3, 4, 6]);
    }

    #[test]
    fn test_for_each_pixel_matches_serial_above_threshold() {
        let pixels = PARALLEL_THRESHOLD * 2 + 17;
        let src: Vec<u8> = (0..pixels * 4).map(|i| (i % 251) as u8).collect();

        let mut parallel = vec![0u8; pixels * 4];
        for_each_pixel(&mut parallel, &src, 4, 4, |d, s| {
            d.copy_from_slice(s);
            d.swap(0, 2);
        });

        let mut serial = vec![0u8; pixels * 4];
        for (d, s) in serial.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
            d.copy_from_slice(s);
            d.swap(0, 2);
        }

        assert_eq!(parallel, serial);
    }

    #[test]
    fn test_for_each_row_indices() {
        let mut buf = vec![0u8; 8 * 4];
        for_each_row(&mut buf, 8, |y, row| {
            for b in row {
                *b = y as u8;
            }
        });
        assert_eq!(&buf[0..8], &[0; 8]);
        assert_eq!(&buf[24..32], &[3; 8]);
    }

    #[test]
    fn test_for_each_row_matches_serial_above_threshold() {
        let rows = 1024;
        let row_bytes = 64;
        let mut parallel = vec![0u8; rows * row_bytes];
        for_each_row(&mut parallel, row_bytes, |y, row| {
            for (x, b) in row.iter_mut().enumerate() {
                *b = ((x * 7 + y * 13) % 256) as u8;
            }
        });

        let mut serial = vec![0u8; rows * row_bytes];
        for (y, row) in serial.chunks_exact_mut(row_bytes).enumerate() {
            for (x, b) in row.iter_mut().enumerate() {
                *b = ((x * 7 + y * 13) % 256) as u8;
            }
        }

        assert_eq!(parallel, serial);
    }
}
