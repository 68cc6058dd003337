//! In-memory grayscale pixel buffers with shared sub-views.
//!
//! Both buffer types hold a flat array of 32-bit samples, a stride (in
//! samples), and a bounds rectangle. Sample storage is reference-counted
//! with interior mutability, so a [`Gray32Buffer::sub_image`] view aliases
//! the parent: writes through either side are visible through both. The
//! buffers are single-threaded (`!Send`); callers that need cross-thread
//! images should copy out via the `imgref` interop.
//!
//! Out-of-bounds access never panics: reads return the zero color and
//! writes are ignored.

use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::color::{Gray32, GrayF32};
use crate::error::TiffError;
use crate::geom::Rect;

/// Read side of the 2-D grayscale image contract.
///
/// Both buffer types implement this, so they can be handed to any consumer
/// that only needs bounds and per-pixel reads.
pub trait GraySource {
    /// The valid pixel-address range.
    fn bounds(&self) -> Rect;

    /// Raw 32-bit sample at `(x, y)`; zero outside [`Self::bounds`].
    ///
    /// For float buffers this is the IEEE-754 bit pattern.
    fn sample(&self, x: i32, y: i32) -> u32;
}

type Samples = Rc<[Cell<u32>]>;

fn zeroed(len: usize) -> Samples {
    Rc::from(vec![Cell::new(0u32); len])
}

fn zeroed_for(rect: Rect) -> Samples {
    // Saturate so a rect whose area exceeds usize fails the allocation
    // outright instead of wrapping to a buffer shorter than its bounds.
    let len = (rect.width() as usize).saturating_mul(rect.height() as usize);
    zeroed(len)
}

fn sized(rect: Rect) -> Result<usize, TiffError> {
    (rect.width() as usize)
        .checked_mul(rect.height() as usize)
        .ok_or(TiffError::DimensionsTooLarge {
            width: rect.width(),
            height: rect.height(),
        })
}

/// An in-memory image of 32-bit unsigned grayscale samples.
///
/// The sample for pixel `(x, y)` lives at index
/// `(y - bounds.min.y) * stride + (x - bounds.min.x)` of the (possibly
/// shared) backing array, relative to this view's base offset.
#[derive(Clone, Debug)]
pub struct Gray32Buffer {
    samples: Samples,
    /// Index of `rect.min` in `samples`. Non-zero only for sub-views.
    base: usize,
    stride: usize,
    rect: Rect,
}

impl Gray32Buffer {
    /// A zero-filled buffer covering `rect`, with stride = width.
    pub fn new(rect: Rect) -> Self {
        Self {
            samples: zeroed_for(rect),
            base: 0,
            stride: rect.width() as usize,
            rect,
        }
    }

    /// A buffer covering `rect` backed by `samples` in row-major order.
    ///
    /// Returns [`TiffError::BufferTooSmall`] when fewer than
    /// `width * height` samples are supplied; extra samples are kept but
    /// never addressed.
    pub fn from_samples(rect: Rect, samples: Vec<u32>) -> Result<Self, TiffError> {
        let needed = sized(rect)?;
        if samples.len() < needed {
            return Err(TiffError::BufferTooSmall {
                needed,
                actual: samples.len(),
            });
        }
        Ok(Self {
            samples: samples.into_iter().map(Cell::new).collect(),
            base: 0,
            stride: rect.width() as usize,
            rect,
        })
    }

    /// The buffer's bounds rectangle.
    pub fn bounds(&self) -> Rect {
        self.rect
    }

    /// Samples between the starts of consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Grayscale images carry no alpha channel.
    pub fn is_opaque(&self) -> bool {
        true
    }

    /// Index of the sample for `(x, y)` in the backing array.
    ///
    /// Only meaningful for coordinates inside [`Self::bounds`].
    pub fn pix_offset(&self, x: i32, y: i32) -> usize {
        self.base
            + (y - self.rect.min.y) as usize * self.stride
            + (x - self.rect.min.x) as usize
    }

    /// The color at `(x, y)`, or the zero color outside the bounds.
    pub fn get(&self, x: i32, y: i32) -> Gray32 {
        if !self.rect.contains(x, y) {
            return Gray32::default();
        }
        Gray32::new(self.samples[self.pix_offset(x, y)].get())
    }

    /// Store `c` at `(x, y)`; ignored outside the bounds.
    pub fn set(&self, x: i32, y: i32, c: Gray32) {
        if !self.rect.contains(x, y) {
            return;
        }
        self.samples[self.pix_offset(x, y)].set(c.y);
    }

    /// The portion of the buffer visible through `r`.
    ///
    /// The returned buffer shares sample storage with `self`: writes on
    /// either side are visible through both. When `r` does not overlap
    /// the bounds, the result is a detached empty buffer.
    pub fn sub_image(&self, r: Rect) -> Gray32Buffer {
        let r = r.intersect(self.rect);
        if r.is_empty() {
            return Gray32Buffer {
                samples: Rc::from(Vec::new()),
                base: 0,
                stride: 0,
                rect: Rect::ZERO,
            };
        }
        Gray32Buffer {
            samples: Rc::clone(&self.samples),
            base: self.pix_offset(r.min.x, r.min.y),
            stride: self.stride,
            rect: r,
        }
    }

    /// Raw sample at the row-major offset `i` relative to this view.
    pub(crate) fn raw_sample(&self, i: usize) -> u32 {
        self.samples[self.base + i].get()
    }

    /// Copy out into a tightly packed `ImgVec` (stride = width).
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<u32> {
        let w = self.rect.width() as usize;
        let h = self.rect.height() as usize;
        let mut buf = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                buf.push(self.raw_sample(y * self.stride + x));
            }
        }
        imgref::ImgVec::new(buf, w, h)
    }

    /// A buffer with bounds `(0, 0)..(w, h)` holding a copy of `img`.
    #[cfg(feature = "imgref")]
    pub fn from_imgref(img: imgref::ImgRef<'_, u32>) -> Self {
        let rect = Rect::new(0, 0, img.width() as i32, img.height() as i32);
        let buf = Self::new(rect);
        for (y, row) in img.rows().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                buf.set(x as i32, y as i32, Gray32::new(v));
            }
        }
        buf
    }
}

impl GraySource for Gray32Buffer {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn sample(&self, x: i32, y: i32) -> u32 {
        self.get(x, y).y
    }
}

/// An in-memory image of 32-bit IEEE-float grayscale samples.
///
/// Identical in layout to [`Gray32Buffer`]; samples are stored as bit
/// patterns and interpreted as `f32` at the get/set boundary, so encode
/// and sub-view behavior is bit-exact.
#[derive(Clone, Debug)]
pub struct GrayF32Buffer {
    samples: Samples,
    base: usize,
    stride: usize,
    rect: Rect,
}

impl GrayF32Buffer {
    /// A zero-filled buffer covering `rect`, with stride = width.
    pub fn new(rect: Rect) -> Self {
        Self {
            samples: zeroed_for(rect),
            base: 0,
            stride: rect.width() as usize,
            rect,
        }
    }

    /// A buffer covering `rect` backed by `samples` in row-major order.
    pub fn from_samples(rect: Rect, samples: Vec<f32>) -> Result<Self, TiffError> {
        let needed = sized(rect)?;
        if samples.len() < needed {
            return Err(TiffError::BufferTooSmall {
                needed,
                actual: samples.len(),
            });
        }
        Ok(Self {
            samples: samples
                .into_iter()
                .map(|v| Cell::new(v.to_bits()))
                .collect(),
            base: 0,
            stride: rect.width() as usize,
            rect,
        })
    }

    /// The buffer's bounds rectangle.
    pub fn bounds(&self) -> Rect {
        self.rect
    }

    /// Samples between the starts of consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Grayscale images carry no alpha channel.
    pub fn is_opaque(&self) -> bool {
        true
    }

    /// Index of the sample for `(x, y)` in the backing array.
    ///
    /// Only meaningful for coordinates inside [`Self::bounds`].
    pub fn pix_offset(&self, x: i32, y: i32) -> usize {
        self.base
            + (y - self.rect.min.y) as usize * self.stride
            + (x - self.rect.min.x) as usize
    }

    /// The color at `(x, y)`, or the zero color outside the bounds.
    pub fn get(&self, x: i32, y: i32) -> GrayF32 {
        if !self.rect.contains(x, y) {
            return GrayF32::default();
        }
        GrayF32::new(f32::from_bits(self.samples[self.pix_offset(x, y)].get()))
    }

    /// Store `c` at `(x, y)`; ignored outside the bounds.
    pub fn set(&self, x: i32, y: i32, c: GrayF32) {
        if !self.rect.contains(x, y) {
            return;
        }
        self.samples[self.pix_offset(x, y)].set(c.y.to_bits());
    }

    /// The portion of the buffer visible through `r`; shares storage.
    pub fn sub_image(&self, r: Rect) -> GrayF32Buffer {
        let r = r.intersect(self.rect);
        if r.is_empty() {
            return GrayF32Buffer {
                samples: Rc::from(Vec::new()),
                base: 0,
                stride: 0,
                rect: Rect::ZERO,
            };
        }
        GrayF32Buffer {
            samples: Rc::clone(&self.samples),
            base: self.pix_offset(r.min.x, r.min.y),
            stride: self.stride,
            rect: r,
        }
    }

    /// Raw sample bits at the row-major offset `i` relative to this view.
    pub(crate) fn raw_sample(&self, i: usize) -> u32 {
        self.samples[self.base + i].get()
    }

    /// Copy out into a tightly packed `ImgVec` (stride = width).
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<f32> {
        let w = self.rect.width() as usize;
        let h = self.rect.height() as usize;
        let mut buf = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                buf.push(f32::from_bits(self.raw_sample(y * self.stride + x)));
            }
        }
        imgref::ImgVec::new(buf, w, h)
    }

    /// A buffer with bounds `(0, 0)..(w, h)` holding a copy of `img`.
    #[cfg(feature = "imgref")]
    pub fn from_imgref(img: imgref::ImgRef<'_, f32>) -> Self {
        let rect = Rect::new(0, 0, img.width() as i32, img.height() as i32);
        let buf = Self::new(rect);
        for (y, row) in img.rows().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                buf.set(x as i32, y as i32, GrayF32::new(v));
            }
        }
        buf
    }
}

impl GraySource for GrayF32Buffer {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn sample(&self, x: i32, y: i32) -> u32 {
        self.get(x, y).y.to_bits()
    }
}
