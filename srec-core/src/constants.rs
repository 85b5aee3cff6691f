//! Constants and limits for the S-record line format

use serde::{Deserialize, Serialize};

/// Leading character of every record marker
pub const MARKER_PREFIX: u8 = b'S';

/// Number of characters in a record marker ("S0".."S9")
pub const MARKER_LEN: usize = 2;

/// Number of hex characters in the length field
pub const LENGTH_FIELD_LEN: usize = 2;

/// Number of hex characters in the checksum field
pub const CHECKSUM_FIELD_LEN: usize = 2;

/// Shortest possible line: marker + length + checksum, no address, no data
pub const MIN_LINE_LEN: usize = MARKER_LEN + LENGTH_FIELD_LEN + CHECKSUM_FIELD_LEN;

/// Largest value the one-byte length field can declare
pub const MAX_LENGTH: usize = u8::MAX as usize;

/// Bytes the checksum contributes to the length field
pub const CHECKSUM_SIZE: usize = 1;

/// Address width in bytes for each kind, indexed by the kind's digit
///
/// Kinds 4, 5 and 6 carry no address field; kind 4 is reserved and the
/// count kinds 5 and 6 keep their count inside the data field.
pub const ADDRESS_WIDTHS: [usize; 10] = [2, 2, 3, 4, 0, 0, 0, 4, 3, 2];

/// Record kind, one per two-character marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordKind {
    /// Header record (16-bit address, usually zero)
    S0,
    /// Data record with a 16-bit address
    S1,
    /// Data record with a 24-bit address
    S2,
    /// Data record with a 32-bit address
    S3,
    /// Reserved
    S4,
    /// 16-bit record count
    S5,
    /// 24-bit record count
    S6,
    /// Termination record with a 32-bit entry address
    S7,
    /// Termination record with a 24-bit entry address
    S8,
    /// Termination record with a 16-bit entry address
    S9,
}

impl RecordKind {
    /// All kinds in marker order
    pub const ALL: [RecordKind; 10] = [
        RecordKind::S0,
        RecordKind::S1,
        RecordKind::S2,
        RecordKind::S3,
        RecordKind::S4,
        RecordKind::S5,
        RecordKind::S6,
        RecordKind::S7,
        RecordKind::S8,
        RecordKind::S9,
    ];

    /// Digit following the `S` in the marker
    pub const fn digit(&self) -> u8 {
        *self as u8
    }

    /// Kind for a marker digit (0-9)
    pub const fn from_digit(digit: u8) -> Option<Self> {
        if digit < 10 {
            Some(Self::ALL[digit as usize])
        } else {
            None
        }
    }

    /// Parse a two-byte marker such as `b"S1"`
    ///
    /// The `S` is accepted in either case, matching the case-insensitive
    /// treatment of the hex fields.
    pub fn from_marker(marker: &[u8]) -> Option<Self> {
        match marker {
            [s, d] if s.eq_ignore_ascii_case(&MARKER_PREFIX) && d.is_ascii_digit() => {
                Self::from_digit(d - b'0')
            }
            _ => None,
        }
    }

    /// Canonical marker text
    pub const fn marker(&self) -> &'static str {
        match self {
            RecordKind::S0 => "S0",
            RecordKind::S1 => "S1",
            RecordKind::S2 => "S2",
            RecordKind::S3 => "S3",
            RecordKind::S4 => "S4",
            RecordKind::S5 => "S5",
            RecordKind::S6 => "S6",
            RecordKind::S7 => "S7",
            RecordKind::S8 => "S8",
            RecordKind::S9 => "S9",
        }
    }

    /// Address field width in bytes (0, 2, 3 or 4)
    pub const fn address_width(&self) -> usize {
        ADDRESS_WIDTHS[*self as usize]
    }

    /// Largest address this kind can encode
    pub const fn max_address(&self) -> u32 {
        match self.address_width() {
            0 => 0,
            4 => u32::MAX,
            w => (1u32 << (w as u32 * 8)) - 1,
        }
    }

    /// Largest data payload this kind can carry within a one-byte length
    pub const fn max_data_len(&self) -> usize {
        MAX_LENGTH - self.address_width() - CHECKSUM_SIZE
    }

    /// Header record (S0)
    pub const fn is_header(&self) -> bool {
        matches!(self, RecordKind::S0)
    }

    /// Data record (S1, S2, S3)
    pub const fn is_data(&self) -> bool {
        matches!(self, RecordKind::S1 | RecordKind::S2 | RecordKind::S3)
    }

    /// Reserved kind (S4)
    pub const fn is_reserved(&self) -> bool {
        matches!(self, RecordKind::S4)
    }

    /// Record count (S5, S6)
    pub const fn is_count(&self) -> bool {
        matches!(self, RecordKind::S5 | RecordKind::S6)
    }

    /// Termination record (S7, S8, S9)
    pub const fn is_termination(&self) -> bool {
        matches!(self, RecordKind::S7 | RecordKind::S8 | RecordKind::S9)
    }
}

impl core::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.marker())
    }
}

/// Address width family shared by a data kind and its termination kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressWidth {
    /// 16-bit addresses (S1 data, S9 termination)
    Bits16,
    /// 24-bit addresses (S2 data, S8 termination)
    Bits24,
    /// 32-bit addresses (S3 data, S7 termination)
    Bits32,
}

impl AddressWidth {
    /// Data record kind for this width
    pub const fn data_kind(&self) -> RecordKind {
        match self {
            AddressWidth::Bits16 => RecordKind::S1,
            AddressWidth::Bits24 => RecordKind::S2,
            AddressWidth::Bits32 => RecordKind::S3,
        }
    }

    /// Termination record kind for this width
    pub const fn termination_kind(&self) -> RecordKind {
        match self {
            AddressWidth::Bits16 => RecordKind::S9,
            AddressWidth::Bits24 => RecordKind::S8,
            AddressWidth::Bits32 => RecordKind::S7,
        }
    }

    /// Width in bytes
    pub const fn bytes(&self) -> usize {
        self.data_kind().address_width()
    }

    /// Smallest width that can hold `address`
    pub const fn for_address(address: u32) -> Self {
        if address <= 0xFFFF {
            AddressWidth::Bits16
        } else if address <= 0xFF_FFFF {
            AddressWidth::Bits24
        } else {
            AddressWidth::Bits32
        }
    }
}
