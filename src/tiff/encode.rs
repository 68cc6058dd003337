//! Three-phase TIFF serializer: header, raster strip, directory.

use alloc::vec;
use alloc::vec::Vec;
use enough::Stop;

use super::ifd::{self, ENTRY_LEN, IfdEntry};
use super::{
    COMPRESSION_NONE, GrayImage, PHOTOMETRIC_BLACK_IS_ZERO, TAG_BITS_PER_SAMPLE, TAG_COMPRESSION,
    TAG_IMAGE_LENGTH, TAG_IMAGE_WIDTH, TAG_PHOTOMETRIC_INTERPRETATION, TAG_RESOLUTION_UNIT,
    TAG_ROWS_PER_STRIP, TAG_SAMPLE_FORMAT, TAG_SAMPLES_PER_PIXEL, TAG_STRIP_BYTE_COUNTS,
    TAG_STRIP_OFFSETS, TAG_X_RESOLUTION, TAG_Y_RESOLUTION,
};
use crate::error::TiffError;
use crate::limits::Limits;

/// Bytes of header preceding the strip; also the strip's file offset.
const HEADER_LEN: usize = 8;

/// Entries in the directory of every emitted file.
const DIRECTORY_ENTRIES: usize = 13;

/// Bytes following the raster: entry count, the fixed-size entry table,
/// the next-IFD terminator, and the two rational payloads in the value
/// region.
const DIRECTORY_LEN: usize = 6 + DIRECTORY_ENTRIES * ENTRY_LEN + 16;

/// Validated byte layout of one output file.
struct Layout {
    image_len: usize,
    ifd_offset: usize,
    /// Total file size, directory and value region included.
    total: usize,
}

/// Size the output for `width`×`height` 4-byte samples.
///
/// Every file position is a 32-bit field. The largest positions are the
/// value-region pointers near the end of the file, so the whole file
/// must fit in 32 bits, not just the IFD offset.
fn plan(width: u32, height: u32) -> Result<Layout, TiffError> {
    // ImageWidth and ImageLength are written as SHORT fields; reject
    // dimensions they cannot hold rather than truncating.
    if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
        return Err(TiffError::DimensionsTooLarge { width, height });
    }
    // Dimensions are bounded above, so u64 arithmetic cannot overflow.
    let image_len = u64::from(width) * u64::from(height) * 4;
    let ifd_offset = image_len + HEADER_LEN as u64;
    let total = ifd_offset + DIRECTORY_LEN as u64;
    if u32::try_from(total).is_err() {
        return Err(TiffError::DimensionsTooLarge { width, height });
    }
    Ok(Layout {
        image_len: image_len as usize,
        ifd_offset: ifd_offset as usize,
        total: total as usize,
    })
}

/// Serialize `image` as a little-endian baseline TIFF.
///
/// `predictor` selects horizontal differencing inside the strip. It is an
/// internal capability: without compression a predicted strip buys
/// nothing and baseline readers expect absolute values, so the public
/// entry point always passes `false`.
pub(crate) fn encode(
    image: GrayImage<'_>,
    limits: Option<&Limits>,
    predictor: bool,
    stop: &dyn Stop,
) -> Result<Vec<u8>, TiffError> {
    let bounds = image.bounds();
    let width = bounds.width();
    let height = bounds.height();

    let layout = plan(width, height)?;
    if let Some(limits) = limits {
        limits.check(width, height)?;
        limits.check_memory(layout.total)?;
    }
    stop.check()?;

    let mut out = Vec::with_capacity(layout.total);

    // Header: byte-order marker, version, offset of the IFD.
    out.extend_from_slice(b"II\x2A\x00");
    out.extend_from_slice(&(layout.ifd_offset as u32).to_le_bytes());

    write_strip(&mut out, &image, width as usize, height as usize, predictor, stop)?;
    let Layout {
        image_len,
        ifd_offset,
        ..
    } = layout;

    let entries = vec![
        IfdEntry::short(TAG_IMAGE_WIDTH, &[width]),
        IfdEntry::short(TAG_IMAGE_LENGTH, &[height]),
        IfdEntry::short(TAG_BITS_PER_SAMPLE, &[32]),
        IfdEntry::short(TAG_COMPRESSION, &[COMPRESSION_NONE]),
        IfdEntry::short(TAG_PHOTOMETRIC_INTERPRETATION, &[PHOTOMETRIC_BLACK_IS_ZERO]),
        IfdEntry::long(TAG_STRIP_OFFSETS, &[HEADER_LEN as u32]),
        IfdEntry::short(TAG_SAMPLES_PER_PIXEL, &[1]),
        IfdEntry::short(TAG_ROWS_PER_STRIP, &[height]),
        IfdEntry::long(TAG_STRIP_BYTE_COUNTS, &[image_len as u32]),
        IfdEntry::short(TAG_SAMPLE_FORMAT, &[image.sample_format()]),
        // The buffer model does not track resolution; write the
        // customary 72 dpi placeholder.
        IfdEntry::rational(TAG_X_RESOLUTION, 72, 1),
        IfdEntry::rational(TAG_Y_RESOLUTION, 72, 1),
        IfdEntry::short(TAG_RESOLUTION_UNIT, &[2]),
    ];
    debug_assert_eq!(entries.len(), DIRECTORY_ENTRIES);
    ifd::write_ifd(&mut out, ifd_offset, entries);

    Ok(out)
}

/// Append the raster as one strip: row-major 32-bit little-endian
/// samples, tightly packed regardless of the in-memory stride.
fn write_strip(
    out: &mut Vec<u8>,
    image: &GrayImage<'_>,
    w: usize,
    h: usize,
    predictor: bool,
    stop: &dyn Stop,
) -> Result<(), TiffError> {
    let stride = image.stride();
    for y in 0..h {
        if y % 16 == 0 {
            stop.check()?;
        }
        let row = y * stride;
        let mut prev = 0u32;
        for x in 0..w {
            let mut v = image.raw_sample(row + x);
            if predictor {
                let absolute = v;
                v = v.wrapping_sub(prev);
                prev = absolute;
            }
            out.extend_from_slice(&v.to_le_bytes());
        }
    }
    Ok(())
}
