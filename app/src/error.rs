//! Errors surfaced by the command line front end.

use std::path::PathBuf;

use rawtri_core::gltf::GltfError;
use rawtri_core::raw::RawError;
use thiserror::Error;

/// A fatal command failure; the process exits non-zero.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot load {}: {source}", .path.display())]
    Load { path: PathBuf, source: GltfError },
    #[error("{}: {source}", .path.display())]
    Raw { path: PathBuf, source: RawError },
}
