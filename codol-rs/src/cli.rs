//! Root CLI structure for codol-rs

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// CODOL asset extractor.
///
/// Given an archive path, bulk-extracts every entry it resolves. Given no
/// arguments, opens an interactive shell mirroring the live-process rip
/// commands.
#[derive(Parser)]
#[command(name = "codol-rs")]
#[command(about = "Command-line tools for Call of Duty: Online asset archives", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// `.ifs` archive file, or a directory of `.ifs` archives, to bulk-extract
    pub archive: Option<PathBuf>,

    /// Output image container, accepted for command-line parity; no pixel
    /// transcoding is performed here, payloads are written as decoded
    #[arg(value_enum, default_value = "dds")]
    pub format: ImageFormat,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Image container named on the bulk-extract command line.
#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ImageFormat {
    /// DirectDraw Surface container.
    Dds,
    /// Portable Network Graphics container.
    Png,
}
