//! Fuzzing entry points for srec-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_decoder

pub fn fuzz_decode(data: &[u8]) {
    use srec_core::decoder::decode_record_bytes;

    // Try to decode - should never panic; anything that decodes must re-encode losslessly
    if let Ok(record) = decode_record_bytes(data) {
        let line = record.encode();
        assert_eq!(line.len(), data.len());
        assert!(line.eq_ignore_ascii_case(std::str::from_utf8(data).unwrap_or_default()));
    }
}

pub fn fuzz_scan(data: &[u8]) {
    use srec_core::scanner::{scan_lines, Scanner};

    // Try to scan - should never panic
    let _ = scan_lines(data);
    for _ in Scanner::new(data) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzz_decode_empty() {
        fuzz_decode(&[]);
    }

    #[test]
    fn test_fuzz_decode_random() {
        fuzz_decode(&[0x53, 0x31, 0xFF, 0x00]);
    }

    #[test]
    fn test_fuzz_decode_valid_lowercase() {
        fuzz_decode(b"s9030000fc");
    }

    #[test]
    fn test_fuzz_scan_empty() {
        fuzz_scan(&[]);
    }

    #[test]
    fn test_fuzz_scan_random() {
        fuzz_scan(&[0xFF; 1024]);
    }
}
