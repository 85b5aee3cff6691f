//! Basic encoding example

use bytes::Bytes;
use srec_core::{
    constants::AddressWidth,
    encoder::{build_count, build_data, build_header, build_termination, RecordWriter},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("S-record Basic Encoding Example\n");

    let image = b"Hello from a tiny firmware image, split across a few records.";
    let base = 0x0800_0000;

    let file = std::fs::File::create("example_output.s37")?;
    let mut writer = RecordWriter::new(std::io::BufWriter::new(file));

    writer.write_record(&build_header(b"example")?)?;

    let mut data_records = 0;
    for (i, chunk) in image.chunks(16).enumerate() {
        let address = base + (i * 16) as u32;
        let record = build_data(AddressWidth::Bits32, address, Bytes::copy_from_slice(chunk))?;
        println!("{}", record);
        writer.write_record(&record)?;
        data_records += 1;
    }

    writer.write_record(&build_count(data_records)?)?;
    writer.write_record(&build_termination(AddressWidth::Bits32, base)?)?;

    let written = writer.records_written();
    writer.into_inner()?;

    println!("\nWrote {} records to example_output.s37", written);
    println!("Use 'srec scan --input example_output.s37' to read it back");

    Ok(())
}
