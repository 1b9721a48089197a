//! # rawtri application
//!
//! Command line front end over [`rawtri_core`]: parses arguments, runs the
//! selected subcommand and reports fatal errors.
//!
//! # Example
//!
//! ```ignore
//! use clap::Parser;
//! use rawtri_app::{run, Cli};
//!
//! fn main() {
//!     if let Err(err) = run(Cli::parse()) {
//!         log::error!("{err}");
//!         std::process::exit(1);
//!     }
//! }
//! ```

mod args;
mod commands;
mod error;

pub use args::{Cli, Command, ExportArgs, ExportFlags, InspectArgs, PrimitiveArgs, Shape};
pub use error::AppError;

/// Run one parsed command line.
pub fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Export(args) => {
            let summary = commands::export(&args)?;
            log::info!(
                "Wrote {} ({} records, {} objects skipped)",
                args.output.display(),
                summary.records,
                summary.objects_skipped
            );
        }
        Command::Primitive(args) => {
            let summary = commands::primitive(&args)?;
            log::info!(
                "Wrote {} ({} records)",
                args.output.display(),
                summary.records
            );
        }
        Command::Inspect(args) => {
            print!("{}", commands::inspect(&args)?);
        }
    }
    Ok(())
}
