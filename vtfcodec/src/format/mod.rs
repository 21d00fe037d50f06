//! VTF pixel-format tags and their size arithmetic.
//!
//! The tag indices are defined by the container format and shared with
//! every consumer of the library; they are stable and must never be
//! reordered. [`registry`] holds the codec dispatch table keyed by these
//! tags and the startup cross-check that guards against the two
//! enumerations drifting apart.

pub mod registry;

use std::fmt;

/// A VTF on-disk pixel encoding.
///
/// The discriminants are the container's format indices. Some formats are
/// registered by name only and have no codec (`P8`, the 16-bit HDR pair,
/// `NONE`, `ATI1N`); [`registry::load`] and [`registry::save`] report those
/// as unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ImageFormat {
    Rgba8888 = 0,
    Abgr8888 = 1,
    Rgb888 = 2,
    Bgr888 = 3,
    Rgb565 = 4,
    I8 = 5,
    Ia88 = 6,
    P8 = 7,
    A8 = 8,
    Rgb888Bluescreen = 9,
    Bgr888Bluescreen = 10,
    Argb8888 = 11,
    Bgra8888 = 12,
    Dxt1 = 13,
    Dxt3 = 14,
    Dxt5 = 15,
    Bgrx8888 = 16,
    Bgr565 = 17,
    Bgrx5551 = 18,
    Bgra4444 = 19,
    Dxt1Onebitalpha = 20,
    Bgra5551 = 21,
    Uv88 = 22,
    Uvwq8888 = 23,
    Rgba16161616F = 24,
    Rgba16161616 = 25,
    Uvlx8888 = 26,
    None = 27,
    Ati1N = 28,
    Ati2N = 29,
}

/// Number of registered format tags.
pub const FORMAT_COUNT: usize = 30;

impl ImageFormat {
    /// Every format in tag order.
    pub const ALL: [ImageFormat; FORMAT_COUNT] = [
        ImageFormat::Rgba8888,
        ImageFormat::Abgr8888,
        ImageFormat::Rgb888,
        ImageFormat::Bgr888,
        ImageFormat::Rgb565,
        ImageFormat::I8,
        ImageFormat::Ia88,
        ImageFormat::P8,
        ImageFormat::A8,
        ImageFormat::Rgb888Bluescreen,
        ImageFormat::Bgr888Bluescreen,
        ImageFormat::Argb8888,
        ImageFormat::Bgra8888,
        ImageFormat::Dxt1,
        ImageFormat::Dxt3,
        ImageFormat::Dxt5,
        ImageFormat::Bgrx8888,
        ImageFormat::Bgr565,
        ImageFormat::Bgrx5551,
        ImageFormat::Bgra4444,
        ImageFormat::Dxt1Onebitalpha,
        ImageFormat::Bgra5551,
        ImageFormat::Uv88,
        ImageFormat::Uvwq8888,
        ImageFormat::Rgba16161616F,
        ImageFormat::Rgba16161616,
        ImageFormat::Uvlx8888,
        ImageFormat::None,
        ImageFormat::Ati1N,
        ImageFormat::Ati2N,
    ];

    /// Look up a format by its stable tag index.
    pub fn from_index(index: usize) -> Option<ImageFormat> {
        ImageFormat::ALL.get(index).copied()
    }

    /// The format's stable tag index.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The container's ASCII name for this format.
    pub fn name(self) -> &'static str {
        registry::entry(self).name
    }

    /// Bytes per pixel for the per-pixel encodings, `None` for the
    /// block-compressed ones (and for `NONE`, which has no payload).
    pub fn bytes_per_pixel(self) -> Option<usize> {
        match self {
            ImageFormat::Rgba8888
            | ImageFormat::Abgr8888
            | ImageFormat::Argb8888
            | ImageFormat::Bgra8888
            | ImageFormat::Bgrx8888
            | ImageFormat::Uvwq8888
            | ImageFormat::Uvlx8888 => Some(4),
            ImageFormat::Rgb888
            | ImageFormat::Bgr888
            | ImageFormat::Rgb888Bluescreen
            | ImageFormat::Bgr888Bluescreen => Some(3),
            ImageFormat::Rgb565
            | ImageFormat::Bgr565
            | ImageFormat::Bgrx5551
            | ImageFormat::Bgra4444
            | ImageFormat::Bgra5551
            | ImageFormat::Ia88
            | ImageFormat::Uv88 => Some(2),
            ImageFormat::I8 | ImageFormat::P8 | ImageFormat::A8 => Some(1),
            ImageFormat::Rgba16161616F | ImageFormat::Rgba16161616 => Some(8),
            ImageFormat::Dxt1
            | ImageFormat::Dxt3
            | ImageFormat::Dxt5
            | ImageFormat::Dxt1Onebitalpha
            | ImageFormat::Ati1N
            | ImageFormat::Ati2N
            | ImageFormat::None => Option::None,
        }
    }

    /// Compressed bytes per 4×4 block, `None` for per-pixel formats.
    pub fn block_bytes(self) -> Option<usize> {
        match self {
            ImageFormat::Dxt1 | ImageFormat::Dxt1Onebitalpha | ImageFormat::Ati1N => Some(8),
            ImageFormat::Dxt3 | ImageFormat::Dxt5 | ImageFormat::Ati2N => Some(16),
            _ => Option::None,
        }
    }

    /// Whether this is one of the 4×4 block-compressed families.
    pub fn is_block_compressed(self) -> bool {
        self.block_bytes().is_some()
    }

    /// Exact byte length of the encoded buffer for a `width`×`height`
    /// image, the size contract for [`registry::load`] and
    /// [`registry::save`].
    pub fn encoded_size(self, width: usize, height: usize) -> usize {
        match self.block_bytes() {
            Some(block) => width.div_ceil(4) * height.div_ceil(4) * block,
            Option::None => self.bytes_per_pixel().unwrap_or(0) * width * height,
        }
    }

    /// Whether the registry can decode this format.
    pub fn supports_load(self) -> bool {
        registry::entry(self).load.is_some()
    }

    /// Whether the registry can encode this format.
    pub fn supports_save(self) -> bool {
        registry::entry(self).save.is_some()
    }

    /// Whether the registry has codecs for both directions.
    pub fn is_supported(self) -> bool {
        self.supports_load() && self.supports_save()
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
