//! wavflac CLI
//!
//! Command-line front end for the WAV to FLAC transcoder.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wavflac_lib::format::wav::WavReader;
use wavflac_lib::{encode, init, Config};

#[derive(Parser)]
#[command(name = "wavflac")]
#[command(about = "Lossless WAV to FLAC transcoder", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transcode a WAV file to FLAC
    Encode {
        /// Input WAV file path
        input: PathBuf,

        /// Output FLAC file path
        output: PathBuf,
    },

    /// Show information about a WAV file
    Info {
        /// Input WAV file path
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init(Config {
        verbose: cli.verbose,
        debug: cli.debug,
    })?;

    match cli.command {
        Commands::Encode { input, output } => {
            encode(&input, &output)?;
            println!("Wrote {}", output.display());
        }
        Commands::Info { input } => {
            let reader = WavReader::open(&input)?;
            let header = reader.header();

            println!("Input: {}", input.display());
            println!("  Sample rate:     {} Hz", header.sample_rate);
            println!("  Channels:        {}", header.channels);
            println!("  Bits per sample: {}", header.bits_per_sample);
            println!("  Payload offset:  {}", header.payload_start());
            println!("  Frames:          {}", header.total_frames);
            println!("  Duration:        {:.2}s", header.duration_seconds());
        }
    }

    Ok(())
}
