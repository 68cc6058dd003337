//! Image File Directory construction and serialization.

use alloc::vec::Vec;

/// Length of one fixed-size IFD entry in bytes.
pub(crate) const ENTRY_LEN: usize = 12;

/// IFD field data types (TIFF 6.0, p. 15).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub(crate) enum DataType {
    // Byte and Ascii are valid field types no current entry uses.
    #[allow(dead_code)]
    Byte = 1,
    #[allow(dead_code)]
    Ascii = 2,
    Short = 3,
    Long = 4,
    Rational = 5,
}

impl DataType {
    /// Serialized length of one value of this type.
    fn value_len(self) -> usize {
        match self {
            DataType::Byte | DataType::Ascii => 1,
            DataType::Short => 2,
            DataType::Long => 4,
            DataType::Rational => 8,
        }
    }
}

/// One directory entry. `data` holds the values widened to `u32`;
/// rational values come in numerator/denominator pairs.
#[derive(Clone, Debug)]
pub(crate) struct IfdEntry {
    pub tag: u16,
    pub datatype: DataType,
    pub data: Vec<u32>,
}

impl IfdEntry {
    pub fn short(tag: u16, values: &[u32]) -> Self {
        Self {
            tag,
            datatype: DataType::Short,
            data: values.to_vec(),
        }
    }

    pub fn long(tag: u16, values: &[u32]) -> Self {
        Self {
            tag,
            datatype: DataType::Long,
            data: values.to_vec(),
        }
    }

    pub fn rational(tag: u16, numerator: u32, denominator: u32) -> Self {
        Self {
            tag,
            datatype: DataType::Rational,
            data: [numerator, denominator].to_vec(),
        }
    }

    /// The value count stored in the entry header. Rational values are
    /// counted as pairs.
    fn count(&self) -> u32 {
        let n = self.data.len() as u32;
        if self.datatype == DataType::Rational {
            n / 2
        } else {
            n
        }
    }

    /// Serialized payload length in bytes.
    fn byte_len(&self) -> usize {
        self.count() as usize * self.datatype.value_len()
    }

    fn put_data(&self, out: &mut Vec<u8>) {
        for &d in &self.data {
            match self.datatype {
                DataType::Byte | DataType::Ascii => out.push(d as u8),
                DataType::Short => out.extend_from_slice(&(d as u16).to_le_bytes()),
                DataType::Long | DataType::Rational => out.extend_from_slice(&d.to_le_bytes()),
            }
        }
    }
}

/// Serialize the directory at `ifd_offset` into `out`.
///
/// Entries are sorted into ascending tag order first (a hard format
/// requirement). Payloads longer than 4 bytes go into a value region
/// placed after the zero next-IFD terminator, with the inline field
/// replaced by the absolute file offset of the payload.
///
/// The caller must have validated that the directory *and* its value
/// region fit in 32-bit file offsets; the value-region pointers are the
/// last positions in the file.
pub(crate) fn write_ifd(out: &mut Vec<u8>, ifd_offset: usize, mut entries: Vec<IfdEntry>) {
    entries.sort_by_key(|e| e.tag);

    // Overflow values land after the entry table, the 2-byte count and
    // the 4-byte next-IFD terminator.
    let pointer_base = ifd_offset + ENTRY_LEN * entries.len() + 6;
    let mut overflow: Vec<u8> = Vec::new();

    out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for ent in &entries {
        out.extend_from_slice(&ent.tag.to_le_bytes());
        out.extend_from_slice(&(ent.datatype as u16).to_le_bytes());
        out.extend_from_slice(&ent.count().to_le_bytes());
        if ent.byte_len() <= 4 {
            let start = out.len();
            ent.put_data(out);
            out.resize(start + 4, 0);
        } else {
            let pointer = (pointer_base + overflow.len()) as u32;
            out.extend_from_slice(&pointer.to_le_bytes());
            ent.put_data(&mut overflow);
        }
    }
    // Offset of the next IFD; zero marks a single-page file.
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&overflow);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn le16(b: &[u8], off: usize) -> u16 {
        u16::from_le_bytes([b[off], b[off + 1]])
    }

    fn le32(b: &[u8], off: usize) -> u32 {
        u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
    }

    #[test]
    fn entries_are_sorted_by_tag() {
        let entries = vec![
            IfdEntry::short(296, &[2]),
            IfdEntry::short(256, &[4]),
            IfdEntry::long(273, &[8]),
        ];
        let mut out = Vec::new();
        write_ifd(&mut out, 0, entries);

        assert_eq!(le16(&out, 0), 3);
        let tags: Vec<u16> = (0..3).map(|i| le16(&out, 2 + i * ENTRY_LEN)).collect();
        assert_eq!(tags, [256, 273, 296]);
    }

    #[test]
    fn short_value_is_inline_and_padded() {
        let mut out = Vec::new();
        write_ifd(&mut out, 100, vec![IfdEntry::short(256, &[7])]);

        // tag, type, count, then the value left-aligned in 4 bytes.
        assert_eq!(le16(&out, 2), 256);
        assert_eq!(le16(&out, 4), DataType::Short as u16);
        assert_eq!(le32(&out, 6), 1);
        assert_eq!(&out[10..14], &[7, 0, 0, 0]);
        // Next-IFD terminator, no overflow region.
        assert_eq!(le32(&out, 14), 0);
        assert_eq!(out.len(), 18);
    }

    #[test]
    fn rational_goes_to_overflow_region() {
        let ifd_offset = 50;
        let mut out = Vec::new();
        write_ifd(&mut out, ifd_offset, vec![IfdEntry::rational(282, 72, 1)]);

        assert_eq!(le32(&out, 6), 1); // one rational = one pair
        let pointer = le32(&out, 10) as usize;
        assert_eq!(pointer, ifd_offset + ENTRY_LEN + 6);
        // The payload sits right after the terminator, at the position
        // the pointer claims relative to the directory start.
        let local = pointer - ifd_offset;
        assert_eq!(le32(&out, local), 72);
        assert_eq!(le32(&out, local + 4), 1);
    }

    #[test]
    fn pointer_is_exact_near_the_top_of_the_offset_range() {
        // Directories written close to the 4 GiB ceiling still produce
        // value-region pointers without any 32-bit wraparound.
        let ifd_offset = 4_000_000_000usize;
        let mut out = Vec::new();
        write_ifd(&mut out, ifd_offset, vec![IfdEntry::rational(282, 72, 1)]);

        let pointer = le32(&out, 10) as usize;
        assert_eq!(pointer, ifd_offset + ENTRY_LEN + 6);
        let local = pointer - ifd_offset;
        assert_eq!(le32(&out, local), 72);
        assert_eq!(le32(&out, local + 4), 1);
    }

    #[test]
    fn multi_short_payload_over_four_bytes_overflows() {
        let mut out = Vec::new();
        write_ifd(&mut out, 0, vec![IfdEntry::short(258, &[8, 8, 8])]);

        assert_eq!(le32(&out, 6), 3);
        let pointer = le32(&out, 10) as usize;
        assert_eq!(pointer, ENTRY_LEN + 6);
        assert_eq!(le16(&out, pointer), 8);
        assert_eq!(le16(&out, pointer + 2), 8);
        assert_eq!(le16(&out, pointer + 4), 8);
    }
}
