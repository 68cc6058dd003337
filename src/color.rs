//! Single-channel grayscale color values and RGBA→luma conversion.

/// A 32-bit unsigned grayscale sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Gray32 {
    pub y: u32,
}

impl Gray32 {
    pub const fn new(y: u32) -> Self {
        Self { y }
    }

    /// Reduce a 16-bit-range RGBA color to grayscale. Alpha is discarded.
    pub fn from_rgba16(r: u16, g: u16, b: u16, _a: u16) -> Self {
        Self { y: luma16(r, g, b) }
    }
}

/// A 32-bit IEEE-float grayscale sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GrayF32 {
    pub y: f32,
}

impl GrayF32 {
    pub const fn new(y: f32) -> Self {
        Self { y }
    }

    /// Reduce a 16-bit-range RGBA color to grayscale. Alpha is discarded.
    pub fn from_rgba16(r: u16, g: u16, b: u16, _a: u16) -> Self {
        Self {
            y: luma16(r, g, b) as f32,
        }
    }
}

// ITU-R luma weights 0.299/0.587/0.114 (the JFIF coefficients) as 32-bit
// fixed point. The three coefficients sum to 2^32 - 1.
const LUMA_R: u64 = 1_284_195_221;
const LUMA_G: u64 = 2_521_145_802;
const LUMA_B: u64 = 489_626_272;

/// Weighted luma of a 16-bit-range RGB triple.
///
/// Fixed-point multiply-accumulate with a rounding bias; integer
/// arithmetic only, so the result is fully deterministic and stays in the
/// 16-bit range of its inputs.
pub fn luma16(r: u16, g: u16, b: u16) -> u32 {
    ((LUMA_R * u64::from(r) + LUMA_G * u64::from(g) + LUMA_B * u64::from(b) + (1 << 31)) >> 32)
        as u32
}

#[cfg(feature = "rgb")]
impl From<rgb::RGBA<u16>> for Gray32 {
    fn from(c: rgb::RGBA<u16>) -> Self {
        Self::from_rgba16(c.r, c.g, c.b, c.a)
    }
}

#[cfg(feature = "rgb")]
impl From<rgb::RGBA<u16>> for GrayF32 {
    fn from(c: rgb::RGBA<u16>) -> Self {
        Self::from_rgba16(c.r, c.g, c.b, c.a)
    }
}
