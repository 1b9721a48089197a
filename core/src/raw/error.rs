//! Error types for RAW export and import.

use thiserror::Error;

use crate::mesh::MeshError;
use crate::scene::ModifierError;

/// Why an object's mesh snapshot could not be obtained.
///
/// Never fatal to an export: the object is skipped and the next one is
/// processed.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("object carries no mesh data")]
    NoMeshData,
    #[error("object references mesh {index}, which does not exist")]
    MissingMesh { index: usize },
    #[error("invalid mesh: {0}")]
    InvalidMesh(#[from] MeshError),
    #[error("modifier evaluation failed: {0}")]
    Modifier(#[from] ModifierError),
}

/// Errors that abort writing or reading a RAW stream.
#[derive(Error, Debug)]
pub enum RawError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} records do not fit the 32-bit record count")]
    TooManyRecords(usize),
    #[error("stream truncated: header announces {expected} records, found {actual}")]
    Truncated { expected: u32, actual: u32 },
    #[error("{0} unexpected bytes after the last record")]
    TrailingData(usize),
}
