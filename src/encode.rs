//! Encode entry point.

use alloc::vec::Vec;
use enough::Stop;

use crate::error::TiffError;
use crate::limits::Limits;
use crate::tiff::{self, GrayImage};

/// A TIFF encode operation.
///
/// The output is always a little-endian baseline TIFF with a single
/// uncompressed strip; the sample format field follows the buffer type
/// being encoded.
///
/// ```
/// use zentiff::{EncodeRequest, Gray32, Gray32Buffer, Rect, Unstoppable};
///
/// let img = Gray32Buffer::new(Rect::new(0, 0, 2, 1));
/// img.set(0, 0, Gray32::new(1));
/// img.set(1, 0, Gray32::new(0xFFFF_FFFF));
///
/// let bytes = EncodeRequest::new().encode(&img, Unstoppable)?;
/// assert_eq!(&bytes[..4], b"II\x2A\x00");
/// # Ok::<(), zentiff::TiffError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct EncodeRequest<'a> {
    limits: Option<&'a Limits>,
}

impl<'a> EncodeRequest<'a> {
    pub fn new() -> Self {
        Self { limits: None }
    }

    /// Enforce resource limits during encoding.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Serialize `image` to an owned byte vector.
    ///
    /// Accepts `&Gray32Buffer` or `&GrayF32Buffer` (or an explicit
    /// [`GrayImage`]). Zero-sized images are valid and produce a minimal
    /// file with an empty strip.
    pub fn encode<'i>(
        &self,
        image: impl Into<GrayImage<'i>>,
        stop: impl Stop,
    ) -> Result<Vec<u8>, TiffError> {
        // The horizontal predictor stays off: without compression a
        // predicted strip buys nothing and baseline readers expect
        // absolute sample values.
        tiff::encode(image.into(), self.limits, false, &stop)
    }
}
