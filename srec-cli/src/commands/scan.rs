use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use srec_core::{scanner::scan_lines_with_stats, RecordKind};
use std::fs;
use tracing::info;

#[derive(Serialize, Deserialize)]
struct DecodedRecord {
    line: usize,
    offset: usize,
    kind: RecordKind,
    length: u8,
    address: u32,
    data: String,
    checksum: u8,
    checksum_ok: bool,
}

pub fn execute(input: &str, output: Option<&str>, stats_only: bool) -> Result<()> {
    info!("Scanning file: {}", input);

    let data = crate::read_input(input)?;

    info!("File size: {} bytes", data.len());

    let (located, stats) = scan_lines_with_stats(&data);

    // Print statistics
    println!("\n=== Scan Results ===");
    println!("Bytes scanned:     {} bytes", stats.bytes_scanned);
    println!("Lines scanned:     {}", stats.lines_scanned);
    println!("Blank lines:       {}", stats.blank_lines);
    println!("Records decoded:   {}", stats.records_decoded);
    println!("Decode failures:   {}", stats.decode_failures);
    println!("Checksum failures: {}", stats.checksum_failures);
    println!("Decode rate:       {:.2}%", stats.decode_rate());
    println!();

    if stats_only {
        return Ok(());
    }

    // Convert to JSON-friendly format
    let decoded: Vec<DecodedRecord> = located
        .iter()
        .map(|lr| DecodedRecord {
            line: lr.line,
            offset: lr.offset,
            kind: lr.record.kind,
            length: lr.record.length,
            address: lr.record.address,
            data: hex::encode_upper(&lr.record.data),
            checksum: lr.record.checksum,
            checksum_ok: lr.record.verify(),
        })
        .collect();

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&decoded)
            .with_context(|| "Failed to serialize decoded records")?;

        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Decoded records written to: {}", output_path);
    } else {
        println!("=== Decoded Records ===");
        for record in &decoded {
            println!(
                "Line {}: {} @ {:#x}, {} data bytes",
                record.line,
                record.kind,
                record.address,
                record.data.len() / 2
            );
        }
    }

    Ok(())
}
