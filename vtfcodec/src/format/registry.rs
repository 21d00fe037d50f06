//! Codec dispatch table and the public `load`/`save` entry points.
//!
//! The table is a fixed array indexed by format tag, built once as a
//! `static` and read-only thereafter; dispatch needs no synchronization.
//! Formats the library cannot code carry a `None` in the relevant slot
//! rather than a stub, so an unsupported request can never silently
//! succeed.

use tracing::{debug, trace};

use crate::codec::{block, bluescreen, bytewise, channel, packed, CodecFn};
use crate::error::FormatError;
use crate::format::{ImageFormat, FORMAT_COUNT};

/// One dispatch-table slot.
pub(crate) struct FormatEntry {
    /// The container's name for this tag, cross-checked at startup.
    pub(crate) name: &'static str,
    pub(crate) load: Option<CodecFn>,
    pub(crate) save: Option<CodecFn>,
}

/// Dispatch table, indexed by format tag. Order must match the
/// [`ImageFormat`] discriminants exactly; `validate_formats` exists to
/// catch the caller's enumeration drifting, and the tests below pin this
/// table against the enum.
static FORMAT_TABLE: [FormatEntry; FORMAT_COUNT] = [
    FormatEntry {
        name: "RGBA8888",
        load: Some(bytewise::copy_rgba),
        save: Some(bytewise::copy_rgba),
    },
    FormatEntry {
        name: "ABGR8888",
        load: Some(bytewise::swap_abgr8888),
        save: Some(bytewise::swap_abgr8888),
    },
    FormatEntry {
        name: "RGB888",
        load: Some(bytewise::load_rgb888),
        save: Some(bytewise::save_rgb888),
    },
    FormatEntry {
        name: "BGR888",
        load: Some(bytewise::load_bgr888),
        save: Some(bytewise::save_bgr888),
    },
    FormatEntry {
        name: "RGB565",
        load: Some(packed::load_rgb565),
        save: Some(packed::save_rgb565),
    },
    FormatEntry {
        name: "I8",
        load: Some(channel::load_i8),
        save: Some(channel::save_i8),
    },
    FormatEntry {
        name: "IA88",
        load: Some(channel::load_ia88),
        save: Some(channel::save_ia88),
    },
    FormatEntry {
        name: "P8",
        load: None,
        save: None,
    },
    FormatEntry {
        name: "A8",
        load: Some(channel::load_a8),
        save: Some(channel::save_a8),
    },
    FormatEntry {
        name: "RGB888_BLUESCREEN",
        load: Some(bluescreen::load_rgb888_bluescreen),
        save: Some(bluescreen::save_rgb888_bluescreen),
    },
    FormatEntry {
        name: "BGR888_BLUESCREEN",
        load: Some(bluescreen::load_bgr888_bluescreen),
        save: Some(bluescreen::save_bgr888_bluescreen),
    },
    FormatEntry {
        name: "ARGB8888",
        load: Some(bytewise::load_argb8888),
        save: Some(bytewise::save_argb8888),
    },
    FormatEntry {
        name: "BGRA8888",
        load: Some(bytewise::swap_bgra8888),
        save: Some(bytewise::swap_bgra8888),
    },
    FormatEntry {
        name: "DXT1",
        load: Some(block::load_dxt1),
        save: Some(block::save_dxt1),
    },
    FormatEntry {
        name: "DXT3",
        load: Some(block::load_dxt3),
        save: Some(block::save_dxt3),
    },
    FormatEntry {
        name: "DXT5",
        load: Some(block::load_dxt5),
        save: Some(block::save_dxt5),
    },
    FormatEntry {
        name: "BGRX8888",
        load: Some(bytewise::load_bgrx8888),
        save: Some(bytewise::save_bgrx8888),
    },
    FormatEntry {
        name: "BGR565",
        load: Some(packed::load_bgr565),
        save: Some(packed::save_bgr565),
    },
    FormatEntry {
        name: "BGRX5551",
        load: Some(packed::load_bgrx5551),
        save: Some(packed::save_bgrx5551),
    },
    FormatEntry {
        name: "BGRA4444",
        load: Some(packed::load_bgra4444),
        save: Some(packed::save_bgra4444),
    },
    FormatEntry {
        name: "DXT1_ONEBITALPHA",
        load: Some(block::load_dxt1_onebitalpha),
        save: Some(block::save_dxt1_onebitalpha),
    },
    FormatEntry {
        name: "BGRA5551",
        load: Some(packed::load_bgra5551),
        save: Some(packed::save_bgra5551),
    },
    FormatEntry {
        name: "UV88",
        load: Some(channel::load_uv88),
        save: Some(channel::save_uv88),
    },
    FormatEntry {
        name: "UVWQ8888",
        load: Some(bytewise::copy_rgba),
        save: Some(bytewise::copy_rgba),
    },
    FormatEntry {
        name: "RGBA16161616F",
        load: None,
        save: None,
    },
    FormatEntry {
        name: "RGBA16161616",
        load: None,
        save: None,
    },
    FormatEntry {
        name: "UVLX8888",
        load: Some(bytewise::copy_rgba),
        save: Some(bytewise::copy_rgba),
    },
    FormatEntry {
        name: "NONE",
        load: None,
        save: None,
    },
    FormatEntry {
        name: "ATI1N",
        load: None,
        save: None,
    },
    FormatEntry {
        name: "ATI2N",
        load: Some(block::load_ati2n),
        save: Some(block::save_ati2n),
    },
];

pub(crate) fn entry(format: ImageFormat) -> &'static FormatEntry {
    &FORMAT_TABLE[format.index()]
}

/// Cross-check the caller's `(index, name)` enumeration against the
/// dispatch table.
///
/// Called once at startup by the container layer with its own format
/// enumeration. Any disagreement means the two enumerations have drifted
/// and initialization must halt.
///
/// # Errors
///
/// [`FormatError::InitializationMismatch`] if the count, an index or a
/// name differs from the table.
pub fn validate_formats(supplied: &[(usize, &str)]) -> Result<(), FormatError> {
    if supplied.len() != FORMAT_COUNT {
        return Err(FormatError::InitializationMismatch(format!(
            "expected {FORMAT_COUNT} formats, caller supplied {}",
            supplied.len()
        )));
    }

    for &(index, name) in supplied {
        let Some(entry) = FORMAT_TABLE.get(index) else {
            return Err(FormatError::InitializationMismatch(format!(
                "index {index} is out of range"
            )));
        };
        if entry.name != name {
            return Err(FormatError::InitializationMismatch(format!(
                "index {index}: registry has {}, caller has {name}",
                entry.name
            )));
        }
    }

    debug!(formats = FORMAT_COUNT, "format enumeration validated");
    Ok(())
}

fn check_canonical(len: usize, width: usize, height: usize) -> Result<(), FormatError> {
    let expected = 4 * width * height;
    if len != expected {
        return Err(FormatError::InvalidArgument(format!(
            "canonical buffer is {len} bytes, {width}x{height} RGBA needs {expected}"
        )));
    }
    Ok(())
}

fn check_encoded(
    format: ImageFormat,
    len: usize,
    width: usize,
    height: usize,
) -> Result<(), FormatError> {
    let expected = format.encoded_size(width, height);
    if len != expected {
        return Err(FormatError::InvalidArgument(format!(
            "encoded buffer is {len} bytes, {width}x{height} {format} needs {expected}"
        )));
    }
    Ok(())
}

/// Decode `src` into `dst`, a canonical RGBA8888 buffer of exactly
/// `4·width·height` bytes.
///
/// Formats without an alpha channel fill A=255. The spans must not alias.
///
/// # Errors
///
/// [`FormatError::Unsupported`] if the format has no decoder;
/// [`FormatError::InvalidArgument`] if either span length is wrong.
pub fn load(
    format: ImageFormat,
    dst: &mut [u8],
    src: &[u8],
    width: usize,
    height: usize,
) -> Result<(), FormatError> {
    let entry = entry(format);
    let Some(codec) = entry.load else {
        return Err(FormatError::Unsupported(entry.name.to_string()));
    };
    check_canonical(dst.len(), width, height)?;
    check_encoded(format, src.len(), width, height)?;

    trace!(format = entry.name, width, height, "decoding");
    codec(dst, src, width, height);
    Ok(())
}

/// Encode `src`, a canonical RGBA8888 buffer, into `dst`, which must hold
/// exactly [`ImageFormat::encoded_size`] bytes.
///
/// The spans must not alias.
///
/// # Errors
///
/// [`FormatError::Unsupported`] if the format has no encoder;
/// [`FormatError::InvalidArgument`] if either span length is wrong.
pub fn save(
    format: ImageFormat,
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
) -> Result<(), FormatError> {
    let entry = entry(format);
    let Some(codec) = entry.save else {
        return Err(FormatError::Unsupported(entry.name.to_string()));
    };
    check_canonical(src.len(), width, height)?;
    check_encoded(format, dst.len(), width, height)?;

    trace!(format = entry.name, width, height, "encoding");
    codec(dst, src, width, height);
    Ok(())
}
