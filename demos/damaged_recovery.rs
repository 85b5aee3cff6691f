//! Example demonstrating how decode and checksum failures surface

use bytes::Bytes;
use srec_core::{
    constants::AddressWidth,
    encoder::{build_data, encode_records, LineEnding},
    scanner::{scan_lines_with_stats, Scanner},
    ScanError,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("S-record Damaged Data Example\n");

    // Step 1: Create a clean file with 10 records
    println!("Step 1: Creating 10 records...");
    let mut records = Vec::new();
    for i in 0..10u32 {
        let payload = format!("sensor block {:02}", i);
        records.push(build_data(AddressWidth::Bits16, i * 0x20, Bytes::from(payload))?);
    }
    let mut lines: Vec<String> = encode_records(&records, LineEnding::Lf)
        .lines()
        .map(str::to_owned)
        .collect();

    // Step 2: Simulate damage
    println!("Step 2: Simulating damage...");
    lines[2].truncate(20);
    println!("Truncated line 3");
    lines[5].replace_range(10..12, "ZZ");
    println!("Put non-hex characters into line 6");
    let last = lines[8].len() - 2;
    lines[8].replace_range(last.., "00");
    println!("Overwrote the checksum of line 9\n");

    let text = lines.join("\n");

    // Step 3: Stream through, telling source failures from bad lines
    println!("Step 3: Streaming records...");
    for result in Scanner::new(text.as_bytes()) {
        match result {
            Ok(record) if record.verify() => println!("  ok    {}", record.encode()),
            Ok(record) => println!("  bad checksum at {:#06x}", record.address),
            Err(ScanError::Format { line, source }) => println!("  line {}: {}", line, source),
            Err(ScanError::Io(e)) => return Err(e.into()),
        }
    }

    // Step 4: Summary
    let (_, stats) = scan_lines_with_stats(text.as_bytes());
    println!("\n=== Scan Results ===");
    println!("Lines scanned:     {}", stats.lines_scanned);
    println!("Records decoded:   {}", stats.records_decoded);
    println!("Decode failures:   {}", stats.decode_failures);
    println!("Checksum failures: {}", stats.checksum_failures);
    println!("Decode rate:       {:.2}%", stats.decode_rate());

    Ok(())
}
