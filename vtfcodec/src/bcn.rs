//! Adapter over the external block-compression codec.
//!
//! The DXT/BCn families are delegated to [`texpresso`], which carries the
//! libsquish fitting algorithms (range fit, cluster fit, iterative cluster
//! fit). This module only maps formats and options and normalizes the
//! decoded output; it never reimplements block fitting.
//!
//! Whole images are compressed and decompressed in one call. Inputs whose
//! dimensions are not multiples of four are padded per block by the codec
//! itself; sub-4×4 short-circuiting is the caller's concern (see
//! [`crate::codec::block`]).

use texpresso::{Algorithm, Format, Params, COLOUR_WEIGHTS_PERCEPTUAL};

/// Block-compressed formats the codec can produce and consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockFormat {
    /// BC1: two 565 endpoints + 2-bit indices, 8 bytes per 4×4 block.
    Dxt1,
    /// BC2: BC1 colour + 4-bit explicit alpha, 16 bytes per block.
    Dxt3,
    /// BC3: BC1 colour + interpolated alpha, 16 bytes per block.
    Dxt5,
    /// ATI2N: two interpolated-alpha blocks carrying R and G, 16 bytes.
    Bc5,
}

impl BlockFormat {
    /// Compressed size of one 4×4 block in bytes.
    pub fn block_bytes(self) -> usize {
        match self {
            BlockFormat::Dxt1 => 8,
            BlockFormat::Dxt3 | BlockFormat::Dxt5 | BlockFormat::Bc5 => 16,
        }
    }

    fn backend(self) -> Format {
        match self {
            BlockFormat::Dxt1 => Format::Bc1,
            BlockFormat::Dxt3 => Format::Bc2,
            BlockFormat::Dxt5 => Format::Bc3,
            BlockFormat::Bc5 => Format::Bc5,
        }
    }
}

/// Endpoint-fitting effort, forwarded to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitQuality {
    /// Fast bounding-box fit.
    Range,
    /// Least-squares cluster fit (the backend default).
    #[default]
    Cluster,
    /// Cluster fit rerun until it stops improving.
    IterativeCluster,
}

impl FitQuality {
    fn backend(self) -> Algorithm {
        match self {
            FitQuality::Range => Algorithm::RangeFit,
            FitQuality::Cluster => Algorithm::ClusterFit,
            FitQuality::IterativeCluster => Algorithm::IterativeClusterFit,
        }
    }
}

/// Compression options.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompressParams {
    /// Endpoint-fitting effort.
    pub quality: FitQuality,
    /// Weigh colours by their alpha during fitting (useful for textures
    /// rendered with alpha blending).
    pub weigh_colour_by_alpha: bool,
    /// Treat every source pixel as opaque. For [`BlockFormat::Dxt1`] this
    /// keeps the encoder out of punch-through (3-colour + transparent)
    /// mode.
    pub force_opaque: bool,
}

impl CompressParams {
    fn backend(self) -> Params {
        Params {
            algorithm: self.quality.backend(),
            weights: COLOUR_WEIGHTS_PERCEPTUAL,
            weigh_colour_by_alpha: self.weigh_colour_by_alpha,
        }
    }
}

/// Compress `width`×`height` RGBA pixels into `out`.
///
/// `out` must hold exactly `ceil(w/4)·ceil(h/4)·block_bytes` bytes.
pub fn compress(
    format: BlockFormat,
    rgba: &[u8],
    width: usize,
    height: usize,
    params: CompressParams,
    out: &mut [u8],
) {
    if params.force_opaque && format == BlockFormat::Dxt1 {
        // BC1 reserves punch-through for A < 128; substitute an opaque copy
        // so those pixels keep their colour.
        let mut opaque = rgba.to_vec();
        for px in opaque.chunks_exact_mut(4) {
            px[3] = 255;
        }
        format
            .backend()
            .compress(&opaque, width, height, params.backend(), out);
    } else {
        format
            .backend()
            .compress(rgba, width, height, params.backend(), out);
    }
}

/// Decompress `blocks` into `width`×`height` RGBA pixels.
///
/// With `force_opaque` set, every decoded pixel gets A=255 (the DXT1
/// contract, where punch-through black is not representable). BC5 output is
/// normalized to `[r, g, 0, 255]` so the result does not depend on how the
/// backend fills the unused channels.
pub fn decompress(
    format: BlockFormat,
    blocks: &[u8],
    width: usize,
    height: usize,
    force_opaque: bool,
    out: &mut [u8],
) {
    format.backend().decompress(blocks, width, height, out);

    match format {
        BlockFormat::Bc5 => {
            for px in out.chunks_exact_mut(4) {
                px[2] = 0;
                px[3] = 255;
            }
        }
        _ if force_opaque => {
            for px in out.chunks_exact_mut(4) {
                px[3] = 255;
            }
        }
        _ => {}
    }
}

/// Compressed size of a `width`×`height` image in the given format.
pub fn compressed_size(format: BlockFormat, width: usize, height: usize) -> usize {
    width.div_ceil(4) * height.div_ceil(4) * format.block_bytes()
}
