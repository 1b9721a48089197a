//! # rawtri core
//!
//! Converts polygon meshes into the RAW indexless triangle stream: a
//! little-endian record count followed by 44-byte position/normal/color/uv
//! records, one per emitted triangle corner.
//!
//! - [`mesh`] - the polygon mesh model and shape generators
//! - [`scene`] - an in-memory host with node transforms, modifiers and selection
//! - [`raw`] - triangulation, attribute resolution, stream writer and reader
//! - [`gltf`] - loads glTF 2.0 documents into a scene (feature `gltf`)

#[cfg(feature = "gltf")]
pub mod gltf;
pub mod math;
pub mod mesh;
pub mod raw;
pub mod scene;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version; call once after the logger is installed.
pub fn init() {
    log::info!("rawtri core v{} initialized", VERSION);
}
