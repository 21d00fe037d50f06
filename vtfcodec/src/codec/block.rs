//! Codec entry points for the block-compressed formats.
//!
//! These forward whole images to the adapter in [`crate::bcn`]. Images with
//! either dimension under four pixels have no complete block: the encoder
//! leaves the output untouched and the decoder fills the canonical buffer
//! with opaque black, which keeps the tail of a mipmap chain well-defined.

use crate::bcn::{self, BlockFormat, CompressParams};

/// Smallest dimension a block codec will touch.
const MIN_BLOCK_DIM: usize = 4;

fn fill_opaque_black(dst: &mut [u8]) {
    for px in dst.chunks_exact_mut(4) {
        px[0] = 0;
        px[1] = 0;
        px[2] = 0;
        px[3] = 255;
    }
}

fn load_blocks(
    format: BlockFormat,
    force_opaque: bool,
    dst: &mut [u8],
    src: &[u8],
    width: usize,
    height: usize,
) {
    if width < MIN_BLOCK_DIM || height < MIN_BLOCK_DIM {
        fill_opaque_black(dst);
        return;
    }
    bcn::decompress(format, src, width, height, force_opaque, dst);
}

fn save_blocks(
    format: BlockFormat,
    force_opaque: bool,
    dst: &mut [u8],
    src: &[u8],
    width: usize,
    height: usize,
) {
    if width < MIN_BLOCK_DIM || height < MIN_BLOCK_DIM {
        return;
    }
    let params = CompressParams {
        force_opaque,
        ..CompressParams::default()
    };
    bcn::compress(format, src, width, height, params, dst);
}

pub(crate) fn load_dxt1(dst: &mut [u8], src: &[u8], width: usize, height: usize) {
    load_blocks(BlockFormat::Dxt1, true, dst, src, width, height);
}

pub(crate) fn save_dxt1(dst: &mut [u8], src: &[u8], width: usize, height: usize) {
    save_blocks(BlockFormat::Dxt1, true, dst, src, width, height);
}

pub(crate) fn load_dxt1_onebitalpha(dst: &mut [u8], src: &[u8], width: usize, height: usize) {
    load_blocks(BlockFormat::Dxt1, false, dst, src, width, height);
}

pub(crate) fn save_dxt1_onebitalpha(dst: &mut [u8], src: &[u8], width: usize, height: usize) {
    save_blocks(BlockFormat::Dxt1, false, dst, src, width, height);
}

pub(crate) fn load_dxt3(dst: &mut [u8], src: &[u8], width: usize, height: usize) {
    load_blocks(BlockFormat::Dxt3, false, dst, src, width, height);
}

pub(crate) fn save_dxt3(dst: &mut [u8], src: &[u8], width: usize, height: usize) {
    save_blocks(BlockFormat::Dxt3, false, dst, src, width, height);
}

pub(crate) fn load_dxt5(dst: &mut [u8], src: &[u8], width: usize, height: usize) {
    load_blocks(BlockFormat::Dxt5, false, dst, src, width, height);
}

pub(crate) fn save_dxt5(dst: &mut [u8], src: &[u8], width: usize, height: usize) {
    save_blocks(BlockFormat::Dxt5, false, dst, src, width, height);
}

pub(crate) fn load_ati2n(dst: &mut [u8], src: &[u8], width: usize, height: usize) {
    load_blocks(BlockFormat::Bc5, false, dst, src, width, height);
}

pub(crate) fn save_ati2n(dst: &mut [u8], src: &[u8], width: usize, height: usize) {
    save_blocks(BlockFormat::Bc5, false, dst, src, width, height);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_block_decode_fills_opaque_black() {
        let mut decoded = [0xAAu8; 2 * 2 * 4];
        load_dxt1(&mut decoded, &[0u8; 8], 2, 2);
        for px in decoded.chunks_exact(4) {
            assert_eq!(px, &[0, 0, 0, 255]);
        }

        let mut decoded = [0xAAu8; 2 * 8 * 4];
        load_dxt5(&mut decoded, &[0u8; 2 * 16], 2, 8);
        for px in decoded.chunks_exact(4) {
            assert_eq!(px, &[0, 0, 0, 255]);
        }
    }

    #[test]
    fn test_sub_block_encode_writes_nothing() {
        // The 2x2 mip level still owns one block's worth of bytes, but the
        // encoder must leave them untouched.
        let canonical = [0x55u8; 2 * 2 * 4];

        let mut encoded = [0x77u8; 8];
        save_dxt1(&mut encoded, &canonical, 2, 2);
        assert_eq!(encoded, [0x77u8; 8]);

        let mut encoded = [0x77u8; 16];
        save_dxt5(&mut encoded, &canonical, 2, 2);
        assert_eq!(encoded, [0x77u8; 16]);

        let mut encoded = [0x77u8; 16];
        save_ati2n(&mut encoded, &canonical, 2, 2);
        assert_eq!(encoded, [0x77u8; 16]);
    }

    #[test]
    fn test_dxt1_decode_is_opaque() {
        // A punch-through block (c0 <= c1, all indices 3) would decode to
        // transparent black under the one-bit-alpha rules; plain DXT1
        // forces it opaque.
        let block = [0u8, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF];
        let mut decoded = [0u8; 64];
        load_dxt1(&mut decoded, &block, 4, 4);
        for px in decoded.chunks_exact(4) {
            assert_eq!(px[3], 255);
        }

        let mut decoded_1bit = [0xAAu8; 64];
        load_dxt1_onebitalpha(&mut decoded_1bit, &block, 4, 4);
        for px in decoded_1bit.chunks_exact(4) {
            assert_eq!(px[3], 0);
        }
    }

    #[test]
    fn test_dxt5_roundtrip_solid_color() {
        let canonical = [[255u8, 255, 255, 128]; 16].concat();
        let mut encoded = [0u8; 16];
        save_dxt5(&mut encoded, &canonical, 4, 4);

        let mut decoded = [0u8; 64];
        load_dxt5(&mut decoded, &encoded, 4, 4);
        for px in decoded.chunks_exact(4) {
            assert_eq!(&px[0..3], &[255, 255, 255]);
            assert_eq!(px[3], 128);
        }
    }

    #[test]
    fn test_ati2n_roundtrip_keeps_two_channels() {
        let canonical = [[48u8, 192, 77, 3]; 16].concat();
        let mut encoded = [0u8; 16];
        save_ati2n(&mut encoded, &canonical, 4, 4);

        let mut decoded = [0u8; 64];
        load_ati2n(&mut decoded, &encoded, 4, 4);
        for px in decoded.chunks_exact(4) {
            assert_eq!(px[0], 48);
            assert_eq!(px[1], 192);
            assert_eq!(px[2], 0);
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn test_non_multiple_of_four_dimensions() {
        // 6x6 needs 2x2 blocks; the codec masks the padding pixels.
        let canonical = vec![200u8; 6 * 6 * 4];
        let mut encoded = vec![0u8; 2 * 2 * 8];
        save_dxt1(&mut encoded, &canonical, 6, 6);

        let mut decoded = vec![0u8; 6 * 6 * 4];
        load_dxt1(&mut decoded, &encoded, 6, 6);
        for px in decoded.chunks_exact(4) {
            assert_eq!(px[3], 255);
        }
    }
}
