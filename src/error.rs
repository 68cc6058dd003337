use alloc::string::String;
use enough::StopReason;

/// Errors from TIFF encoding and buffer construction.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TiffError {
    /// Dimensions overflow the raster size arithmetic or the IFD's
    /// 16-bit width/length fields.
    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} samples, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for TiffError {
    fn from(r: StopReason) -> Self {
        TiffError::Cancelled(r)
    }
}
