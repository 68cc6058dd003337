//! # zentiff
//!
//! Uncompressed grayscale TIFF encoder for 32-bit samples.
//!
//! Two in-memory buffer types — [`Gray32Buffer`] (unsigned integer
//! samples) and [`GrayF32Buffer`] (IEEE-float samples) — plus a baseline
//! TIFF serializer that writes them out as a single uncompressed
//! little-endian strip with the matching SampleFormat field (1 or 3).
//!
//! ## Shared sub-views
//!
//! [`Gray32Buffer::sub_image`] returns a view over the same backing
//! storage, restricted to a sub-rectangle: writes through the view are
//! visible through the parent and vice versa. Out-of-bounds pixel access
//! never panics — reads return the zero color, writes are ignored.
//!
//! ## Non-Goals
//!
//! - Decoding TIFF files
//! - Compressed strips, tiled layouts, color-mapped images
//! - Multi-page files — the encoder writes exactly one IFD
//!
//! ## Usage
//!
//! ```
//! use zentiff::{EncodeRequest, GrayF32, GrayF32Buffer, Rect, Unstoppable};
//!
//! let img = GrayF32Buffer::new(Rect::new(0, 0, 4, 4));
//! img.set(1, 2, GrayF32::new(0.25));
//!
//! let bytes = EncodeRequest::new().encode(&img, Unstoppable)?;
//! assert_eq!(&bytes[..2], b"II");
//! # Ok::<(), zentiff::TiffError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod buffer;
mod color;
mod encode;
mod error;
mod geom;
mod limits;

mod tiff;

// Re-exports
pub use buffer::{Gray32Buffer, GrayF32Buffer, GraySource};
pub use color::{Gray32, GrayF32, luma16};
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::TiffError;
pub use geom::{Point, Rect};
pub use limits::Limits;
pub use tiff::GrayImage;
