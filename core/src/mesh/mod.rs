//! CPU-side polygon mesh types and generators.
//!
//! This module provides the mesh snapshot the exporter reads:
//!
//! - [`PolyMesh`] - Vertex positions/normals plus an ordered polygon list
//! - [`Polygon`] - Ordered corner → vertex index references
//! - [`ColorLayer`] / [`UvLayer`] - Optional per-corner attribute layers
//! - [`MeshError`] - Structural validation failures
//! - Generators for common shapes (quad, cube, sphere)

mod data;
pub mod generators;
mod layers;

pub use data::{MeshError, PolyMesh, Polygon};
pub use layers::{ColorLayer, UvLayer, MAX_COLOR_SLOTS};
