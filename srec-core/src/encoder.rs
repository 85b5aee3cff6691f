//! Record encoding and construction

use crate::constants::{AddressWidth, RecordKind, CHECKSUM_SIZE};
use crate::decoder::line_len;
use crate::error::FormatError;
use crate::types::{compute_checksum, Record};
use alloc::string::String;
use bytes::Bytes;

#[cfg(feature = "std")]
use std::io::{self, Write};

/// Render a record as its canonical text line
///
/// The line is laid out as:
/// 1. Marker: "S0".."S9"
/// 2. Length (2 hex digits)
/// 3. Address (width-many digit pairs, big-endian, zero-padded; none for S4-S6)
/// 4. Data (2 hex digits per byte)
/// 5. Checksum (2 hex digits)
///
/// All digits are upper-case and no terminator is appended. Fields are
/// rendered as stored: address bits above the kind's width are dropped, and
/// `length`/`checksum` are not recomputed.
pub fn encode_record(record: &Record) -> String {
    let width = record.kind.address_width();
    let mut out = String::with_capacity(line_len(width + record.data.len() + CHECKSUM_SIZE));

    out.push_str(record.kind.marker());
    out.push_str(&hex::encode_upper([record.length]));
    out.push_str(&hex::encode_upper(&record.address.to_be_bytes()[4 - width..]));
    out.push_str(&hex::encode_upper(&record.data));
    out.push_str(&hex::encode_upper([record.checksum]));

    out
}

/// Render several records, each followed by `ending`
pub fn encode_records<'a, I>(records: I, ending: LineEnding) -> String
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut out = String::new();
    for record in records {
        out.push_str(&encode_record(record));
        out.push_str(ending.as_str());
    }
    out
}

/// Build a well-formed record with computed length and checksum
///
/// `address` must fit within the kind's address width; kinds without an
/// address field only accept 0. The payload must leave the length byte at
/// or below 255.
pub fn build_with_address(
    kind: RecordKind,
    address: u32,
    data: impl Into<Bytes>,
) -> Result<Record, FormatError> {
    let data = data.into();
    let width = kind.address_width();

    if address > kind.max_address() {
        return Err(FormatError::AddressOverflow { address, width });
    }

    let max = kind.max_data_len();
    if data.len() > max {
        return Err(FormatError::PayloadTooLarge {
            len: data.len(),
            max,
        });
    }

    let length = (width + data.len() + CHECKSUM_SIZE) as u8;
    let checksum = compute_checksum(length, address, &data);

    Ok(Record::new(kind, length, address, data, checksum))
}

/// Header record (S0) at address 0 carrying `text`
pub fn build_header(text: impl AsRef<[u8]>) -> Result<Record, FormatError> {
    build_with_address(
        RecordKind::S0,
        0,
        Bytes::copy_from_slice(text.as_ref()),
    )
}

/// Data record (S1, S2 or S3) for the given address width
pub fn build_data(
    width: AddressWidth,
    address: u32,
    data: impl Into<Bytes>,
) -> Result<Record, FormatError> {
    build_with_address(width.data_kind(), address, data)
}

/// Record count: S5 for counts up to 0xFFFF, S6 up to 0xFF_FFFF
///
/// The count travels as big-endian data bytes. Larger counts fail with
/// [`FormatError::PayloadTooLarge`] since they would need a fourth byte.
pub fn build_count(count: u32) -> Result<Record, FormatError> {
    let bytes = count.to_be_bytes();
    if count <= 0xFFFF {
        build_with_address(RecordKind::S5, 0, Bytes::copy_from_slice(&bytes[2..]))
    } else if count <= 0xFF_FFFF {
        build_with_address(RecordKind::S6, 0, Bytes::copy_from_slice(&bytes[1..]))
    } else {
        Err(FormatError::PayloadTooLarge { len: 4, max: 3 })
    }
}

/// Termination record (S9, S8 or S7) carrying the entry address
pub fn build_termination(width: AddressWidth, entry: u32) -> Result<Record, FormatError> {
    build_with_address(width.termination_kind(), entry, Bytes::new())
}

/// Builder for constructing records field by field
pub struct RecordBuilder {
    kind: RecordKind,
    address: u32,
    data: Bytes,
}

impl RecordBuilder {
    /// Create a new record builder
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            address: 0,
            data: Bytes::new(),
        }
    }

    /// Set the address
    pub fn address(mut self, address: u32) -> Self {
        self.address = address;
        self
    }

    /// Set the data payload
    pub fn data(mut self, data: impl Into<Bytes>) -> Self {
        self.data = data.into();
        self
    }

    /// Build the record struct
    pub fn build(self) -> Result<Record, FormatError> {
        build_with_address(self.kind, self.address, self.data)
    }

    /// Build and render the record
    pub fn encode(self) -> Result<String, FormatError> {
        self.build().map(|record| encode_record(&record))
    }
}

/// Line terminator used when writing records out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// Terminator text
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Line sink writing one rendered record per line
#[cfg(feature = "std")]
pub struct RecordWriter<W: Write> {
    inner: W,
    ending: LineEnding,
    written: usize,
}

#[cfg(feature = "std")]
impl<W: Write> RecordWriter<W> {
    /// Wrap a writer using `\n` terminators
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            ending: LineEnding::Lf,
            written: 0,
        }
    }

    /// Set the line terminator
    pub fn line_ending(mut self, ending: LineEnding) -> Self {
        self.ending = ending;
        self
    }

    /// Write one record followed by the terminator
    pub fn write_record(&mut self, record: &Record) -> io::Result<()> {
        self.inner.write_all(encode_record(record).as_bytes())?;
        self.inner.write_all(self.ending.as_str().as_bytes())?;
        self.written += 1;
        Ok(())
    }

    /// Write every record in order
    pub fn write_all<'a, I>(&mut self, records: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Number of records written so far
    pub fn records_written(&self) -> usize {
        self.written
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// Flush and return the underlying writer
    pub fn into_inner(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
