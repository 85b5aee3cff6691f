//! Line scanning: streaming record reader and whole-buffer scan

use crate::decoder::decode_record_bytes;
use crate::types::Record;
use alloc::vec::Vec;

#[cfg(feature = "std")]
use crate::decoder::decode_record;
#[cfg(feature = "std")]
use crate::error::ScanError;
#[cfg(feature = "std")]
use std::io::{self, BufRead};

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Minimal sequential line source
///
/// Each call yields the next line without its terminator, `None` once the
/// source is exhausted, or the read failure.
#[cfg(feature = "std")]
pub trait LineSource {
    /// Pull the next line
    fn next_line(&mut self) -> Option<io::Result<String>>;
}

/// Line source over any buffered reader
///
/// Lines end at `\n`; a trailing `\r` is dropped and a final line without
/// a terminator is still returned. Bytes that are not UTF-8 are replaced,
/// so they surface as decode failures rather than read failures.
#[cfg(feature = "std")]
pub struct ReadLines<R> {
    reader: R,
    buf: Vec<u8>,
}

#[cfg(feature = "std")]
impl<R: BufRead> ReadLines<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    /// Return the wrapped reader
    pub fn into_inner(self) -> R {
        self.reader
    }
}

#[cfg(feature = "std")]
impl<R: BufRead> LineSource for ReadLines<R> {
    fn next_line(&mut self) -> Option<io::Result<String>> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => Some(Ok(String::from_utf8_lossy(trim_terminator(&self.buf)).into_owned())),
            Err(e) => Some(Err(e)),
        }
    }
}

/// Line source over an in-memory sequence of lines
#[cfg(feature = "std")]
pub struct IterLines<I>(I);

#[cfg(feature = "std")]
impl<I> IterLines<I> {
    /// Wrap an iterator of lines
    pub fn new(lines: I) -> Self {
        Self(lines)
    }
}

#[cfg(feature = "std")]
impl<I, S> LineSource for IterLines<I>
where
    I: Iterator<Item = S>,
    S: Into<String>,
{
    fn next_line(&mut self) -> Option<io::Result<String>> {
        self.0.next().map(|line| Ok(line.into()))
    }
}

#[cfg(feature = "std")]
impl<B: BufRead> LineSource for io::Lines<B> {
    fn next_line(&mut self) -> Option<io::Result<String>> {
        self.next()
    }
}

/// Lazy, forward-only record reader
///
/// Each [`advance`](Scanner::advance) pulls exactly one line (or skips blank
/// ones when asked to) and decodes it. The scanner holds at most one decoded
/// record. A source failure ends the scan.
#[cfg(feature = "std")]
pub struct Scanner<S> {
    source: S,
    current: Option<Record>,
    line: usize,
    exhausted: bool,
    skip_blank: bool,
}

#[cfg(feature = "std")]
impl<R: BufRead> Scanner<ReadLines<R>> {
    /// Scan lines from a buffered reader
    pub fn new(reader: R) -> Self {
        Self::from_source(ReadLines::new(reader))
    }
}

#[cfg(feature = "std")]
impl<S: LineSource> Scanner<S> {
    /// Scan lines from any line source
    pub fn from_source(source: S) -> Self {
        Self {
            source,
            current: None,
            line: 0,
            exhausted: false,
            skip_blank: false,
        }
    }

    /// Skip empty or whitespace-only lines instead of reporting them
    pub fn skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank = skip;
        self
    }

    /// Pull and decode the next line
    ///
    /// - `Ok(true)`: a record was decoded and is available from [`current`](Self::current)
    /// - `Ok(false)`: the source is exhausted
    /// - `Err(ScanError::Io)`: the source failed; later calls return `Ok(false)`
    /// - `Err(ScanError::Format)`: the line did not decode; the caller may advance past it
    pub fn advance(&mut self) -> Result<bool, ScanError> {
        self.current = None;

        if self.exhausted {
            return Ok(false);
        }

        loop {
            let line = match self.source.next_line() {
                None => {
                    self.exhausted = true;
                    #[cfg(feature = "logging")]
                    debug!("Source exhausted after {} lines", self.line);
                    return Ok(false);
                }
                Some(Err(e)) => {
                    self.exhausted = true;
                    #[cfg(feature = "logging")]
                    warn!("Read failure after line {}: {}", self.line, e);
                    return Err(ScanError::Io(e));
                }
                Some(Ok(line)) => line,
            };

            self.line += 1;

            if self.skip_blank && line.trim().is_empty() {
                continue;
            }

            return match decode_record(&line) {
                Ok(record) => {
                    #[cfg(feature = "logging")]
                    debug!(
                        "Decoded {} record at line {} (address {:#x}, {} data bytes)",
                        record.kind,
                        self.line,
                        record.address,
                        record.data.len()
                    );
                    self.current = Some(record);
                    Ok(true)
                }
                Err(source) => {
                    #[cfg(feature = "logging")]
                    warn!("Failed to decode line {}: {}", self.line, source);
                    Err(ScanError::Format {
                        line: self.line,
                        source,
                    })
                }
            };
        }
    }

    /// Record from the most recent successful [`advance`](Self::advance)
    ///
    /// `None` before the first success and after any call that did not
    /// decode a record.
    pub fn current(&self) -> Option<&Record> {
        self.current.as_ref()
    }

    /// 1-based number of the last line pulled from the source
    pub fn line_number(&self) -> usize {
        self.line
    }

    /// Whether the source has been exhausted or has failed
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Return the wrapped line source
    pub fn into_inner(self) -> S {
        self.source
    }
}

#[cfg(feature = "std")]
impl<S: LineSource> Iterator for Scanner<S> {
    type Item = Result<Record, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(true) => self.current.clone().map(Ok),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// A record found at a specific line of a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedRecord {
    /// 1-based line number
    pub line: usize,

    /// Byte offset of the line start
    pub offset: usize,

    /// The decoded record
    pub record: Record,
}

/// Scan statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Total bytes scanned
    pub bytes_scanned: usize,

    /// Lines seen, blank ones included
    pub lines_scanned: usize,

    /// Empty or whitespace-only lines
    pub blank_lines: usize,

    /// Lines that decoded into a record
    pub records_decoded: usize,

    /// Non-blank lines that failed to decode
    pub decode_failures: usize,

    /// Decoded records whose checksum does not verify
    pub checksum_failures: usize,
}

impl ScanStats {
    /// Share of non-blank lines that decoded, as a percentage
    pub fn decode_rate(&self) -> f64 {
        let candidates = self.lines_scanned - self.blank_lines;
        if candidates == 0 {
            0.0
        } else {
            (self.records_decoded as f64 / candidates as f64) * 100.0
        }
    }
}

/// Decode every line of a buffer, skipping blank lines and lines that fail
///
/// Checksums are not checked; see [`scan_lines_with_stats`] for counts.
pub fn scan_lines(data: &[u8]) -> Vec<LocatedRecord> {
    scan_lines_with_stats(data).0
}

/// Decode every line of a buffer and collect statistics
pub fn scan_lines_with_stats(data: &[u8]) -> (Vec<LocatedRecord>, ScanStats) {
    let mut stats = ScanStats {
        bytes_scanned: data.len(),
        ..Default::default()
    };
    let mut results = Vec::new();

    #[cfg(feature = "logging")]
    debug!("Starting line scan of {} bytes", data.len());

    for (index, (offset, line)) in split_lines(data).enumerate() {
        let line_number = index + 1;
        stats.lines_scanned += 1;

        if line.iter().all(u8::is_ascii_whitespace) {
            stats.blank_lines += 1;
            continue;
        }

        match decode_record_bytes(line) {
            Ok(record) => {
                if !record.verify() {
                    stats.checksum_failures += 1;
                    #[cfg(feature = "logging")]
                    warn!(
                        "Checksum mismatch at line {}: carried {:02X}, computed {:02X}",
                        line_number,
                        record.checksum,
                        record.compute_checksum()
                    );
                }
                results.push(LocatedRecord {
                    line: line_number,
                    offset,
                    record,
                });
            }
            Err(_e) => {
                stats.decode_failures += 1;
                #[cfg(feature = "logging")]
                warn!("Failed to decode line {} at offset {}: {:?}", line_number, offset, _e);
            }
        }
    }

    stats.records_decoded = results.len();

    #[cfg(feature = "logging")]
    debug!(
        "Scan complete: {} records from {} lines",
        stats.records_decoded, stats.lines_scanned
    );

    (results, stats)
}

/// Split a buffer into `(offset, line)` pairs without terminators
fn split_lines(data: &[u8]) -> impl Iterator<Item = (usize, &[u8])> {
    let mut pos = 0;
    core::iter::from_fn(move || {
        if pos >= data.len() {
            return None;
        }
        let start = pos;
        let end = match memchr::memchr(b'\n', &data[start..]) {
            Some(rel) => start + rel,
            None => data.len(),
        };
        pos = end + 1;
        Some((start, trim_terminator(&data[start..end])))
    })
}

/// Drop a trailing `\n` and then a trailing `\r`
fn trim_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
