//! Core types for S-records

use crate::constants::{RecordKind, CHECKSUM_SIZE};
use crate::error::FormatError;
use alloc::string::String;
use bytes::Bytes;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// One decoded or constructed S-record line
///
/// Fields are public so a record can be assembled by hand; the builders in
/// [`crate::encoder`] keep `length` and `checksum` consistent automatically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Record kind from the marker
    pub kind: RecordKind,

    /// Declared byte count of address + data + checksum
    pub length: u8,

    /// Address; only the low `kind.address_width()` bytes are significant
    pub address: u32,

    /// Data payload
    pub data: Bytes,

    /// Checksum byte as carried on the line
    pub checksum: u8,
}

impl Record {
    /// Create a record from raw field values without any checks
    pub fn new(kind: RecordKind, length: u8, address: u32, data: Bytes, checksum: u8) -> Self {
        Self {
            kind,
            length,
            address,
            data,
            checksum,
        }
    }

    /// Decode a record from one text line
    pub fn decode(line: &str) -> Result<Self, FormatError> {
        crate::decoder::decode_record(line)
    }

    /// Render the canonical text line (upper-case hex, no terminator)
    pub fn encode(&self) -> String {
        crate::encoder::encode_record(self)
    }

    /// Compute the checksum from length, address and data
    pub fn compute_checksum(&self) -> u8 {
        compute_checksum(self.length, self.address, &self.data)
    }

    /// Whether the carried checksum matches the computed one
    pub fn verify(&self) -> bool {
        self.checksum == self.compute_checksum()
    }

    /// Length the fields imply: address width + data + checksum byte
    pub fn expected_length(&self) -> usize {
        self.kind.address_width() + self.data.len() + CHECKSUM_SIZE
    }

    /// Check the length invariant and the address range
    ///
    /// A length mismatch is reported as the error decoding this record's
    /// rendered line would produce.
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.address > self.kind.max_address() {
            return Err(FormatError::AddressOverflow {
                address: self.address,
                width: self.kind.address_width(),
            });
        }

        let max = self.kind.max_data_len();
        if self.data.len() > max {
            return Err(FormatError::PayloadTooLarge {
                len: self.data.len(),
                max,
            });
        }

        let minimum = (self.kind.address_width() + CHECKSUM_SIZE) as u8;
        if self.length < minimum {
            return Err(FormatError::LengthUnderflow {
                length: self.length,
                minimum,
            });
        }

        let expected = self.expected_length();
        let declared = self.length as usize;
        if declared > expected {
            return Err(FormatError::LineTooShort {
                expected: crate::decoder::line_len(declared),
                actual: crate::decoder::line_len(expected),
            });
        }
        if declared < expected {
            return Err(FormatError::TrailingCharacters {
                expected: crate::decoder::line_len(declared),
                actual: crate::decoder::line_len(expected),
            });
        }

        Ok(())
    }

    /// Count carried by an S5/S6 record, read big-endian from its data
    pub fn count_value(&self) -> Option<u32> {
        if !self.kind.is_count() || self.data.is_empty() || self.data.len() > 4 {
            return None;
        }
        Some(self.data.iter().fold(0u32, |acc, &b| (acc << 8) | b as u32))
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Record {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

/// One's complement of the mod-256 sum of length, all four address bytes
/// and every data byte
pub fn compute_checksum(length: u8, address: u32, data: &[u8]) -> u8 {
    let sum = address
        .to_be_bytes()
        .iter()
        .chain(data)
        .fold(length, |acc, &b| acc.wrapping_add(b));
    !sum
}
