use crate::Layout;
use anyhow::{bail, Context, Result};
use bytes::Bytes;
use srec_core::{
    constants::AddressWidth,
    encoder::{build_count, build_data, build_header, build_termination, LineEnding, RecordWriter},
};
use std::fs::File;
use std::io::BufWriter;
use tracing::{info, warn};

/// Options for `srec pack`
#[derive(Debug, Clone)]
pub struct PackOptions {
    /// Address layout of data and termination records
    pub layout: Layout,
    /// Load address of the first input byte
    pub address: u32,
    /// Data bytes per record
    pub record_size: usize,
    /// Text for the S0 header record; none means no header
    pub header: Option<String>,
    /// Use CRLF line endings
    pub crlf: bool,
}

impl Default for PackOptions {
    fn default() -> Self {
        Self {
            layout: Layout::S19,
            address: 0,
            record_size: 32,
            header: None,
            crlf: false,
        }
    }
}

pub fn execute(input: &str, output: &str, options: &PackOptions) -> Result<()> {
    info!("Packing {} into {}", input, output);

    let data = crate::read_input(input)?;
    let width = AddressWidth::from(options.layout);
    let kind = width.data_kind();

    if options.record_size == 0 || options.record_size > kind.max_data_len() {
        bail!(
            "Record size {} is out of range for {} records (1..={})",
            options.record_size,
            kind,
            kind.max_data_len()
        );
    }

    // Last byte must still be addressable
    if !data.is_empty() {
        let last = options.address as u64 + data.len() as u64 - 1;
        if last > kind.max_address() as u64 {
            bail!(
                "Image of {} bytes at {:#x} does not fit {:?} addresses",
                data.len(),
                options.address,
                options.layout
            );
        }
    }

    let file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output))?;
    let ending = if options.crlf {
        LineEnding::CrLf
    } else {
        LineEnding::Lf
    };
    let mut writer = RecordWriter::new(BufWriter::new(file)).line_ending(ending);

    if let Some(text) = &options.header {
        let header = build_header(text.as_bytes())
            .with_context(|| format!("Header text is too long ({} bytes)", text.len()))?;
        writer.write_record(&header)?;
    }

    let mut data_records: u32 = 0;
    for (i, chunk) in data.chunks(options.record_size).enumerate() {
        let address = options.address + (i * options.record_size) as u32;
        let record = build_data(width, address, Bytes::copy_from_slice(chunk))
            .with_context(|| format!("Failed to build record at {:#x}", address))?;
        writer.write_record(&record)?;
        data_records += 1;
    }

    match build_count(data_records) {
        Ok(count) => writer.write_record(&count)?,
        Err(e) => warn!("Skipping count record for {} data records: {}", data_records, e),
    }

    let termination = build_termination(width, options.address)
        .with_context(|| "Failed to build termination record")?;
    writer.write_record(&termination)?;

    let written = writer.records_written();
    writer
        .into_inner()
        .with_context(|| format!("Failed to write output file: {}", output))?;

    info!(
        "Successfully packed {} bytes into {} records ({} data)",
        data.len(),
        written,
        data_records
    );

    Ok(())
}
