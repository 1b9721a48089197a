//! Error types for glTF loading.

use thiserror::Error;

/// Errors that can occur during glTF loading.
#[derive(Error, Debug)]
pub enum GltfError {
    /// Failed to parse the glTF document.
    #[error("glTF parse error: {0}")]
    Parse(#[from] gltf_dep::Error),
    /// A triangle primitive is missing position data.
    #[error("mesh {mesh} primitive {primitive} has no POSITION attribute")]
    MissingPositions {
        /// Mesh index in the glTF document.
        mesh: usize,
        /// Primitive index within the mesh.
        primitive: usize,
    },
    /// Error resolving buffer data.
    #[error("buffer error: {0}")]
    Buffer(String),
    /// The document defines no scene.
    #[error("document contains no scene")]
    NoScene,
}
