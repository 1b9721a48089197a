//! Command line arguments.
//!
//! Uses clap derive for parsing, help text (`--help`) and validation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rawtri_core::raw::ExportOptions;

/// rawtri command line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "rawtri",
    about = "Export polygon meshes as indexless RAW triangle streams",
    long_about = "Export polygon meshes as indexless RAW triangle streams.\n\n\
        A RAW stream is a little-endian u32 record count followed by one\n\
        44-byte record (position, normal, color, uv as f32) per triangle\n\
        corner.\n\
        \n\
        EXAMPLES:\n\
          # Export every node of a glTF scene\n\
          rawtri export model.glb -o model.raw\n\
        \n\
          # Write a generated sphere\n\
          rawtri primitive sphere -o sphere.raw --segments 64 --rings 32\n\
        \n\
          # Show the first records of a stream\n\
          rawtri inspect model.raw --records 6",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export a glTF 2.0 document (.glb or .gltf with embedded data).
    Export(ExportArgs),
    /// Export a generated shape.
    Primitive(PrimitiveArgs),
    /// Print a summary of a RAW stream.
    Inspect(InspectArgs),
}

/// Flags shared by every exporting subcommand.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ExportFlags {
    /// Export stored geometry without evaluating modifiers (morph targets).
    #[arg(long)]
    pub no_modifiers: bool,

    /// Keep quads as 4-record groups instead of splitting them.
    #[arg(long)]
    pub no_triangulate: bool,
}

impl ExportFlags {
    /// Map the flags onto export options.
    pub fn options(&self) -> ExportOptions {
        ExportOptions::default()
            .with_apply_modifiers(!self.no_modifiers)
            .with_triangulate(!self.no_triangulate)
    }
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Input glTF document.
    pub input: PathBuf,

    /// Output RAW file.
    #[arg(short, long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub flags: ExportFlags,
}

/// Generated shape selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shape {
    /// Single quad on the XY plane.
    Quad,
    /// Axis-aligned cube.
    Cube,
    /// UV sphere.
    Sphere,
}

#[derive(Args, Debug)]
pub struct PrimitiveArgs {
    /// Shape to generate.
    #[arg(value_enum)]
    pub shape: Shape,

    /// Output RAW file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Half extent of the quad or cube, or radius of the sphere.
    #[arg(long, default_value = "1.0")]
    pub size: f32,

    /// Sphere segments around the equator.
    #[arg(long, default_value = "32", value_parser = clap::value_parser!(u32).range(3..))]
    pub segments: u32,

    /// Sphere rings from pole to pole.
    #[arg(long, default_value = "16", value_parser = clap::value_parser!(u32).range(2..))]
    pub rings: u32,

    /// Keep quads as 4-record groups instead of splitting them.
    #[arg(long)]
    pub no_triangulate: bool,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// RAW file to read.
    pub file: PathBuf,

    /// Number of leading records to print.
    #[arg(long, default_value = "0")]
    pub records: usize,
}
