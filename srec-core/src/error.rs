//! Error types for S-record operations

/// Errors that can occur while decoding or building a record
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Marker is not one of "S0".."S9"
    #[cfg_attr(feature = "std", error("Unknown record kind: {0:?}"))]
    UnknownKind([u8; 2]),

    /// Non-hex character where a hex digit pair was expected
    #[cfg_attr(feature = "std", error("Malformed hex at character {offset}"))]
    MalformedHex {
        /// Character offset of the offending digit pair within the line.
        offset: usize,
    },

    /// Declared length cannot cover the address field and checksum
    #[cfg_attr(feature = "std", error("Length {length} is below the minimum {minimum} for this kind"))]
    LengthUnderflow {
        /// The declared length byte.
        length: u8,
        /// Address width plus the checksum byte.
        minimum: u8,
    },

    /// Line ends before all declared fields are consumed
    #[cfg_attr(feature = "std", error("Line too short: expected {expected} characters, got {actual}"))]
    LineTooShort {
        /// The number of characters the declared fields require.
        expected: usize,
        /// The number of characters actually present.
        actual: usize,
    },

    /// Characters remain after the checksum field
    #[cfg_attr(feature = "std", error("Trailing characters: expected {expected} characters, got {actual}"))]
    TrailingCharacters {
        /// The number of characters the declared fields require.
        expected: usize,
        /// The number of characters actually present.
        actual: usize,
    },

    /// Address does not fit the kind's address width
    #[cfg_attr(feature = "std", error("Address {address:#x} does not fit in {width} bytes"))]
    AddressOverflow {
        /// The rejected address.
        address: u32,
        /// The kind's address width in bytes.
        width: usize,
    },

    /// Payload would push the length field past 255
    #[cfg_attr(feature = "std", error("Payload size {len} exceeds maximum {max}"))]
    PayloadTooLarge {
        /// The rejected payload length.
        len: usize,
        /// The largest payload the kind accepts.
        max: usize,
    },
}

/// Errors reported while pulling records from a line source
#[cfg(feature = "std")]
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The underlying source failed to produce a line
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line was read but did not decode
    #[error("Line {line}: {source}")]
    Format {
        /// 1-based line number within the source.
        line: usize,
        /// The decode failure.
        #[source]
        source: FormatError,
    },
}

#[cfg(feature = "std")]
impl ScanError {
    /// The source itself failed; retrying the source may help
    pub fn is_io(&self) -> bool {
        matches!(self, ScanError::Io(_))
    }

    /// The line was bad; the caller may skip it and keep going
    pub fn is_format(&self) -> bool {
        matches!(self, ScanError::Format { .. })
    }

    /// Decode failure, if this is one
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            ScanError::Format { source, .. } => Some(source),
            ScanError::Io(_) => None,
        }
    }
}
