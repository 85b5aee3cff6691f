use anyhow::Result;
use clap::{Parser, Subcommand};
use srec_cli::{commands, parse_address, Layout};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "srec")]
#[command(about = "srec - Inspect and produce Motorola S-record files", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack a binary file into S-records
    Pack {
        /// Input binary file
        #[arg(short, long)]
        input: String,

        /// Output S-record file
        #[arg(short, long)]
        output: String,

        /// Address layout
        #[arg(long, value_enum, default_value = "s19")]
        layout: Layout,

        /// Load address of the first byte (decimal or 0x-prefixed hex)
        #[arg(long, default_value = "0", value_parser = parse_address)]
        address: u32,

        /// Data bytes per record
        #[arg(long, default_value = "32")]
        record_size: usize,

        /// Text for the S0 header record
        #[arg(long)]
        header: Option<String>,

        /// Terminate lines with CRLF instead of LF
        #[arg(long)]
        crlf: bool,
    },

    /// Decode every line of a file and report statistics
    Scan {
        /// Input file to scan
        #[arg(short, long)]
        input: String,

        /// Output JSON file for decoded records
        #[arg(short, long)]
        output: Option<String>,

        /// Show statistics only
        #[arg(long)]
        stats_only: bool,
    },

    /// Verify line format and checksums
    Verify {
        /// Input file to verify ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Fail when any line is malformed or has a bad checksum
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Pack {
            input,
            output,
            layout,
            address,
            record_size,
            header,
            crlf,
        } => commands::pack::execute(
            &input,
            &output,
            &commands::pack::PackOptions {
                layout,
                address,
                record_size,
                header,
                crlf,
            },
        ),

        Commands::Scan {
            input,
            output,
            stats_only,
        } => commands::scan::execute(&input, output.as_deref(), stats_only),

        Commands::Verify { input, strict } => commands::verify::execute(&input, strict),
    }
}
