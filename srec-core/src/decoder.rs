//! Record decoding (strict mode)

use crate::constants::{
    RecordKind, CHECKSUM_SIZE, LENGTH_FIELD_LEN, MARKER_LEN, MIN_LINE_LEN,
};
use crate::error::FormatError;
use crate::types::Record;
use alloc::vec;
use bytes::Bytes;

/// Decode one text line into a record
///
/// Layout of a line:
/// 1. Marker (2 chars): "S0".."S9"
/// 2. Length (2 hex chars): byte count of address + data + checksum
/// 3. Address (0, 4, 6 or 8 hex chars, big-endian, width fixed by the kind)
/// 4. Data (2 hex chars per byte)
/// 5. Checksum (2 hex chars)
///
/// Hex digits are accepted in either case. The line must not carry a
/// terminator. The checksum is not validated here; call [`Record::verify`].
pub fn decode_record(line: &str) -> Result<Record, FormatError> {
    decode_record_bytes(line.as_bytes())
}

/// Decode one line given as raw bytes
///
/// The input need not be valid UTF-8.
pub fn decode_record_bytes(line: &[u8]) -> Result<Record, FormatError> {
    if line.len() < MARKER_LEN {
        return Err(FormatError::LineTooShort {
            expected: MIN_LINE_LEN,
            actual: line.len(),
        });
    }

    let kind = RecordKind::from_marker(&line[..MARKER_LEN])
        .ok_or(FormatError::UnknownKind([line[0], line[1]]))?;

    if line.len() < MARKER_LEN + LENGTH_FIELD_LEN {
        return Err(FormatError::LineTooShort {
            expected: MIN_LINE_LEN,
            actual: line.len(),
        });
    }

    let mut length = [0u8; 1];
    decode_hex(line, MARKER_LEN, &mut length)?;
    let length = length[0];

    let width = kind.address_width();
    let minimum = width + CHECKSUM_SIZE;
    if (length as usize) < minimum {
        return Err(FormatError::LengthUnderflow {
            length,
            minimum: minimum as u8,
        });
    }

    let expected = line_len(length as usize);
    if line.len() < expected {
        return Err(FormatError::LineTooShort {
            expected,
            actual: line.len(),
        });
    }
    if line.len() > expected {
        return Err(FormatError::TrailingCharacters {
            expected,
            actual: line.len(),
        });
    }

    // Address: right-aligned into four big-endian bytes
    let mut pos = MARKER_LEN + LENGTH_FIELD_LEN;
    let mut address = [0u8; 4];
    decode_hex(line, pos, &mut address[4 - width..])?;
    pos += width * 2;

    let data_len = length as usize - minimum;
    let mut data = vec![0u8; data_len];
    decode_hex(line, pos, &mut data)?;
    pos += data_len * 2;

    let mut checksum = [0u8; 1];
    decode_hex(line, pos, &mut checksum)?;

    Ok(Record::new(
        kind,
        length,
        u32::from_be_bytes(address),
        Bytes::from(data),
        checksum[0],
    ))
}

/// Total characters in a line declaring `length`
pub fn line_len(length: usize) -> usize {
    MARKER_LEN + LENGTH_FIELD_LEN + length * 2
}

/// Decode `out.len()` bytes of hex starting at character `offset`
fn decode_hex(line: &[u8], offset: usize, out: &mut [u8]) -> Result<(), FormatError> {
    let end = offset + out.len() * 2;
    let src = line.get(offset..end).ok_or(FormatError::LineTooShort {
        expected: end,
        actual: line.len(),
    })?;

    hex::decode_to_slice(src, out).map_err(|e| match e {
        hex::FromHexError::InvalidHexCharacter { index, .. } => FormatError::MalformedHex {
            offset: offset + index,
        },
        _ => FormatError::MalformedHex { offset },
    })
}
