use anyhow::{bail, Context, Result};
use colored::*;
use srec_core::{scanner::Scanner, ScanError};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use tracing::{info, warn};

/// Outcome of checking every line of an input
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    /// Lines that decoded with a matching checksum
    pub valid: usize,
    /// Lines that did not decode, with the reason
    pub malformed: Vec<(usize, String)>,
    /// Lines that decoded but whose checksum does not match
    pub bad_checksums: Vec<usize>,
}

impl VerifyReport {
    /// No malformed lines and no checksum mismatches
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty() && self.bad_checksums.is_empty()
    }
}

/// Stream a reader through the scanner and verify every record
///
/// Malformed lines are recorded and skipped; a read failure aborts.
pub fn check<R: BufRead>(reader: R) -> Result<VerifyReport> {
    let mut scanner = Scanner::new(reader).skip_blank_lines(true);
    let mut report = VerifyReport::default();

    loop {
        match scanner.advance() {
            Ok(true) => {
                let line = scanner.line_number();
                match scanner.current() {
                    Some(record) if record.verify() => report.valid += 1,
                    Some(record) => {
                        warn!(
                            "Checksum mismatch on line {}: carried {:02X}, computed {:02X}",
                            line,
                            record.checksum,
                            record.compute_checksum()
                        );
                        report.bad_checksums.push(line);
                    }
                    None => {}
                }
            }
            Ok(false) => break,
            Err(ScanError::Format { line, source }) => {
                warn!("Line {} is malformed: {}", line, source);
                report.malformed.push((line, source.to_string()));
            }
            Err(ScanError::Io(e)) => {
                return Err(e).with_context(|| {
                    format!("Read failure after line {}", scanner.line_number())
                });
            }
        }
    }

    Ok(report)
}

pub fn execute(input: &str, strict: bool) -> Result<()> {
    info!("Verifying file: {}", input);

    let report = if input == "-" {
        check(io::stdin().lock())?
    } else {
        let file =
            File::open(input).with_context(|| format!("Failed to read input file: {}", input))?;
        check(BufReader::new(file))?
    };

    println!("\n=== Verification Results ===");
    println!("Valid records:      {}", report.valid.to_string().green());

    if report.malformed.is_empty() {
        println!("Malformed lines:    0");
    } else {
        println!("Malformed lines:    {}", report.malformed.len().to_string().red());
        for (line, reason) in &report.malformed {
            println!("  line {}: {}", line, reason);
        }
    }

    if report.bad_checksums.is_empty() {
        println!("Checksum failures:  0");
    } else {
        println!(
            "Checksum failures:  {}",
            report.bad_checksums.len().to_string().red()
        );
        for line in &report.bad_checksums {
            println!("  line {}", line);
        }
    }

    println!("\n=== Summary ===");
    if report.is_clean() && report.valid > 0 {
        println!("{} All records valid", "✓".green());
    } else if report.valid == 0 && report.is_clean() {
        println!("{} No records found", "!".yellow());
    } else {
        println!("{} File contains invalid records", "✗".red());
        if strict {
            bail!(
                "{} malformed lines, {} checksum failures",
                report.malformed.len(),
                report.bad_checksums.len()
            );
        }
    }

    Ok(())
}
