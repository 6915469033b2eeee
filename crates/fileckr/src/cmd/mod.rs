use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use fileckr_frame::{AspectBounds, Compression, FrameConfig, HeaderLayout, Sizing};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod inspect;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a regular file into a PNG.
    Encode(EncodeArgs),
    /// Decode a fileckr PNG back into a regular file.
    Decode(DecodeArgs),
    /// Print the header and canvas facts of a fileckr PNG.
    Inspect(InspectArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args),
        Command::Decode(args) => decode::run(args),
        Command::Inspect(args) => inspect::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct LayoutArgs {
    /// Use the size-only header written by early releases.
    #[arg(long, env = "FILECKR_LEGACY")]
    pub legacy: bool,
}

impl LayoutArgs {
    pub fn layout(&self) -> HeaderLayout {
        if self.legacy {
            HeaderLayout::LENGTH_ONLY
        } else {
            HeaderLayout::STANDARD
        }
    }
}

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
pub enum CompressionArg {
    Fast,
    Default,
    #[default]
    Best,
}

impl From<CompressionArg> for Compression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Fast => Compression::Fast,
            CompressionArg::Default => Compression::Default,
            CompressionArg::Best => Compression::Best,
        }
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// File to encode.
    pub input: PathBuf,
    /// PNG to write.
    pub output: PathBuf,
    #[command(flatten)]
    pub layout: LayoutArgs,
    /// PNG compression effort.
    #[arg(long, value_enum, default_value = "best", env = "FILECKR_COMPRESSION")]
    pub compression: CompressionArg,
    /// Largest accepted height / width ratio (integer division).
    #[arg(long, default_value_t = fileckr_dims::DEFAULT_MAX_RATIO, env = "FILECKR_MAX_RATIO")]
    pub max_ratio: u64,
    /// Smallest accepted canvas side, in pixels.
    #[arg(long, default_value_t = fileckr_dims::DEFAULT_MIN_SIDE, env = "FILECKR_MIN_SIDE")]
    pub min_side: u64,
}

impl EncodeArgs {
    pub fn frame_config(&self) -> FrameConfig {
        let compression = self.compression.into();
        if self.layout.legacy {
            return FrameConfig {
                compression,
                ..FrameConfig::legacy()
            };
        }
        FrameConfig {
            layout: HeaderLayout::STANDARD,
            sizing: Sizing::Nice(AspectBounds::new(self.max_ratio, self.min_side)),
            compression,
        }
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// PNG to decode.
    pub input: PathBuf,
    /// File to write.
    pub output: PathBuf,
    #[command(flatten)]
    pub layout: LayoutArgs,
    /// Leave the output file's permissions alone.
    #[arg(long)]
    pub no_mode: bool,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// PNG to inspect.
    pub input: PathBuf,
    #[command(flatten)]
    pub layout: LayoutArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
