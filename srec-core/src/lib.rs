//! # srec-core
//!
//! Decoding and encoding of Motorola S-record lines: the hex text format used
//! to carry firmware images, one checksummed record per line.
//!
//! ## Modules
//!
//! - `constants`: Record kinds, the address-width table and format limits
//! - `types`: The `Record` model and checksum computation
//! - `decoder`: Strict line decoding
//! - `encoder`: Line rendering, record builders and the line writer
//! - `scanner`: Streaming line scanner and whole-buffer scanning
//! - `error`: Decode, build and scan errors

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod constants;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use constants::{AddressWidth, RecordKind};
pub use decoder::decode_record;
pub use encoder::{build_with_address, encode_record, RecordBuilder};
pub use error::FormatError;
#[cfg(feature = "std")]
pub use error::ScanError;
#[cfg(feature = "std")]
pub use scanner::Scanner;
pub use types::Record;

/// Result type alias for record operations
pub type Result<T> = core::result::Result<T, FormatError>;
