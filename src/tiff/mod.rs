//! Baseline TIFF writer: little-endian, single uncompressed strip.
//!
//! Produces the minimal single-page layout: 8-byte header, raster data as
//! one strip starting at byte 8, then the Image File Directory describing
//! it. See TIFF 6.0 for the field definitions (tags on p. 28-41).

mod encode;
mod ifd;

pub(crate) use encode::encode;

use crate::buffer::{Gray32Buffer, GrayF32Buffer};
use crate::geom::Rect;

// Tags.
pub(crate) const TAG_IMAGE_WIDTH: u16 = 256;
pub(crate) const TAG_IMAGE_LENGTH: u16 = 257;
pub(crate) const TAG_BITS_PER_SAMPLE: u16 = 258;
pub(crate) const TAG_COMPRESSION: u16 = 259;
pub(crate) const TAG_PHOTOMETRIC_INTERPRETATION: u16 = 262;
pub(crate) const TAG_STRIP_OFFSETS: u16 = 273;
pub(crate) const TAG_SAMPLES_PER_PIXEL: u16 = 277;
pub(crate) const TAG_ROWS_PER_STRIP: u16 = 278;
pub(crate) const TAG_STRIP_BYTE_COUNTS: u16 = 279;
pub(crate) const TAG_X_RESOLUTION: u16 = 282;
pub(crate) const TAG_Y_RESOLUTION: u16 = 283;
pub(crate) const TAG_RESOLUTION_UNIT: u16 = 296;
pub(crate) const TAG_SAMPLE_FORMAT: u16 = 339;

// Compression field values.
pub(crate) const COMPRESSION_NONE: u32 = 1;

// PhotometricInterpretation field values.
pub(crate) const PHOTOMETRIC_BLACK_IS_ZERO: u32 = 1;

// SampleFormat field values.
pub(crate) const SAMPLE_FORMAT_UINT: u32 = 1;
pub(crate) const SAMPLE_FORMAT_IEEE_FP: u32 = 3;

/// A grayscale image to encode, one variant per supported sample format.
///
/// This is a closed set: pixel sources the encoder cannot serialize are
/// unrepresentable, so there is no fallback branch to fall through.
#[derive(Clone, Copy, Debug)]
pub enum GrayImage<'a> {
    /// 32-bit unsigned integer samples (SampleFormat = 1).
    Unsigned(&'a Gray32Buffer),
    /// 32-bit IEEE-float samples (SampleFormat = 3).
    Float(&'a GrayF32Buffer),
}

impl<'a> From<&'a Gray32Buffer> for GrayImage<'a> {
    fn from(buf: &'a Gray32Buffer) -> Self {
        GrayImage::Unsigned(buf)
    }
}

impl<'a> From<&'a GrayF32Buffer> for GrayImage<'a> {
    fn from(buf: &'a GrayF32Buffer) -> Self {
        GrayImage::Float(buf)
    }
}

impl GrayImage<'_> {
    /// The image's bounds rectangle.
    pub fn bounds(&self) -> Rect {
        match self {
            GrayImage::Unsigned(buf) => buf.bounds(),
            GrayImage::Float(buf) => buf.bounds(),
        }
    }

    pub(crate) fn stride(&self) -> usize {
        match self {
            GrayImage::Unsigned(buf) => buf.stride(),
            GrayImage::Float(buf) => buf.stride(),
        }
    }

    /// Raw sample bits at the row-major offset `i` within the view.
    pub(crate) fn raw_sample(&self, i: usize) -> u32 {
        match self {
            GrayImage::Unsigned(buf) => buf.raw_sample(i),
            GrayImage::Float(buf) => buf.raw_sample(i),
        }
    }

    pub(crate) fn sample_format(&self) -> u32 {
        match self {
            GrayImage::Unsigned(_) => SAMPLE_FORMAT_UINT,
            GrayImage::Float(_) => SAMPLE_FORMAT_IEEE_FP,
        }
    }
}
