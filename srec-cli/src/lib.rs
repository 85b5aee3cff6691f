//! Library entry for srec-cli used by integration tests and embedding.

pub mod commands;

use anyhow::{Context, Result};
use srec_core::constants::AddressWidth;
use std::fs;
use std::io::{self, Read};

// Re-export commands for convenience
pub use commands::*;

/// Address layout for packed output
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Layout {
    /// 16-bit addresses (S1 data, S9 termination)
    S19,
    /// 24-bit addresses (S2 data, S8 termination)
    S28,
    /// 32-bit addresses (S3 data, S7 termination)
    S37,
}

impl From<Layout> for AddressWidth {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::S19 => AddressWidth::Bits16,
            Layout::S28 => AddressWidth::Bits24,
            Layout::S37 => AddressWidth::Bits32,
        }
    }
}

/// Parse a decimal or `0x`-prefixed hex address
pub fn parse_address(s: &str) -> std::result::Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid address '{}': {}", s, e))
}

/// Read a whole input file, or stdin when `input` is `-`
pub fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        fs::read(input).with_context(|| format!("Failed to read input file: {}", input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("0x08000000"), Ok(0x0800_0000));
        assert_eq!(parse_address("0X1c"), Ok(0x1C));
        assert_eq!(parse_address("4096"), Ok(4096));
        assert!(parse_address("0xZZ").is_err());
        assert!(parse_address("-1").is_err());
    }
}
