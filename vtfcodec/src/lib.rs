//! # vtfcodec
//!
//! Pixel-format codecs for Valve Texture Format (VTF) image data: the
//! bidirectional converters between a canonical in-memory RGBA8888 buffer
//! and each of the on-disk pixel encodings the container uses, plus
//! mipmap reduction and preview helpers.
//!
//! The container parser, mipmap chain layout and file I/O live with the
//! caller; this crate only ever sees a format tag, dimensions and two
//! non-overlapping byte spans, and is stateless and reentrant.
//!
//! # Features
//!
//! - **Per-pixel formats**: channel shuffles (BGRA, ABGR, BGRX, ...),
//!   packed 565/5551/4444, intensity/alpha, UV tangent maps and the
//!   chroma-keyed "bluescreen" RGB pair
//! - **Block compression**: DXT1 (with and without one-bit alpha), DXT3,
//!   DXT5 and ATI2N/BC5 via the `texpresso` fitting algorithms
//! - **Mipmap reduction**: exact-half downscaling with nearest or
//!   truncating-average filters
//! - **Previews**: alpha flattening and binary netpbm (P6) emission
//!
//! Per-pixel work fans out across CPU threads with a static, deterministic
//! partition; output bytes never depend on thread count or schedule.
//!
//! # Example
//!
//! ```
//! use vtfcodec::{load, save, ImageFormat};
//!
//! let canonical = vec![0u8; 4 * 16 * 16];
//! let mut encoded = vec![0u8; ImageFormat::Dxt5.encoded_size(16, 16)];
//! save(ImageFormat::Dxt5, &canonical, &mut encoded, 16, 16).unwrap();
//!
//! let mut decoded = vec![0u8; 4 * 16 * 16];
//! load(ImageFormat::Dxt5, &mut decoded, &encoded, 16, 16).unwrap();
//! ```

pub mod bcn;
pub mod error;
pub mod format;
pub mod mipmap;
pub mod present;

mod bits;
mod codec;
mod parallel;

pub use error::FormatError;
pub use format::registry::{load, save, validate_formats};
pub use format::{ImageFormat, FORMAT_COUNT};
pub use mipmap::{scale_down, MipFilter};
pub use present::{alpha_flatten, ppm};

/// Version of the vtfcodec library.
///
/// Defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
