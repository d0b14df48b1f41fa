//! mib - inspect and load Merlin MIB detector files.

mod report;

use anyhow::{Context, Result};
use clap::Parser;
use humansize::{format_size, DECIMAL};
use mib_core::{LoadOptions, ScanShape};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use report::FrameStats;

#[derive(Parser, Debug)]
#[command(name = "mib")]
#[command(author, version, about = "Inspect and load Merlin MIB detector files", long_about = None)]
struct Args {
    /// MIB file to read
    path: PathBuf,

    /// Scan shape: a frame count ("16") or a grid ("256,256")
    #[arg(short, long, default_value = "1,1")]
    shape: ScanShape,

    /// Byte offset of the first record
    #[arg(short, long, default_value_t = 0)]
    offset: u64,

    /// Flat index of the frame to summarise
    #[arg(short, long, default_value_t = 0)]
    frame: usize,

    /// Only print the header summary, without mapping the frames
    #[arg(long, default_value_t = false)]
    info: bool,

    /// Read the file into memory and load it as a buffer instead of mapping it
    #[arg(long, default_value_t = false)]
    buffer: bool,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    run(&args)
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    if args.info {
        let summary = mib_io::inspect(args.path.as_path(), args.offset)
            .with_context(|| format!("Failed to read MIB header: {}", args.path.display()))?;
        println!("{summary}");
        println!("\tFile size: {}", format_size(summary.source_size, DECIMAL));
        return Ok(());
    }

    let options = LoadOptions::new(args.shape).with_byte_offset(args.offset);

    if args.buffer {
        let bytes = std::fs::read(&args.path)
            .with_context(|| format!("Failed to read file: {}", args.path.display()))?;
        debug!(len = bytes.len(), "Read MIB file into memory");
        let mib = mib_io::load_buffer(&bytes, &options)
            .with_context(|| format!("Failed to load MIB buffer from {}", args.path.display()))?;
        report(&mib, args.frame)
    } else {
        let mib = mib_io::load_file(&args.path, &options)
            .with_context(|| format!("Failed to load MIB file: {}", args.path.display()))?;
        report(&mib, args.frame)
    }
}

fn report(mib: &mib_io::MibData<'_>, frame: usize) -> Result<()> {
    let summary = mib.summary();
    println!("{summary}");
    println!("\tFile size: {}", format_size(summary.source_size, DECIMAL));

    let frames = mib.frames()?;
    println!("\nArray shape: {:?}", frames.shape());

    let decoded = frames.frame(frame).with_context(|| {
        format!(
            "Frame {frame} is outside the {} loaded frames",
            frames.frame_count()
        )
    })?;
    match FrameStats::from_frame(&decoded) {
        Some(stats) => println!("Frame {frame}: {stats}"),
        None => println!("Frame {frame} is empty"),
    }

    Ok(())
}
