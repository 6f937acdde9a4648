//! Command-line argument definitions for the Vizier CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, export strategy and
//! format selection, and logging verbosity.

use clap::{Parser, ValueEnum};

/// Which export strategy to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportStrategy {
    /// Pick automatically from the rendered scene's composition.
    #[default]
    Smart,
    /// Vector-serialize: requires a sole vector drawing.
    Vector,
    /// Direct rasterization of the live scene.
    Raster,
    /// Isolated-clone rasterization with transient state stripped.
    Clone,
}

/// Output artifact format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

/// Command-line arguments for the Vizier diagram tool.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram description (JSON)
    #[arg(help = "Path to the input description file")]
    pub input: String,

    /// Path to the output file; defaults to a timestamped
    /// `visualization-<unix-time>.<ext>` in the working directory
    #[arg(short, long)]
    pub output: Option<String>,

    /// Export strategy
    #[arg(short, long, value_enum, default_value = "smart")]
    pub strategy: ExportStrategy,

    /// Output format
    #[arg(short, long, value_enum, default_value = "png")]
    pub format: OutputFormat,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
