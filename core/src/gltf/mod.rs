//! glTF 2.0 host adapter.
//!
//! Loads `.gltf`/`.glb` documents into a [`Scene`] whose selected objects can
//! be exported with [`crate::raw`]. Only embedded data is supported: the GLB
//! binary chunk and base64 data URIs.
//!
//! - Each glTF mesh becomes one [`PolyMesh`](crate::mesh::PolyMesh) holding
//!   all of its `Triangles` primitives; other topologies are skipped.
//! - Missing normals are computed from the triangles.
//! - `COLOR_0` and `TEXCOORD_0` become the color and UV layers when every
//!   merged primitive has them.
//! - Morph targets become a [`Modifier::Morph`](crate::scene::Modifier) on the
//!   nodes using the mesh, so applying modifiers exports the morphed shape.
//!
//! # Example
//!
//! ```ignore
//! use rawtri_core::gltf::load_gltf;
//! use rawtri_core::raw::ExportOptions;
//!
//! let data = std::fs::read("model.glb").unwrap();
//! let scene = load_gltf(&data).unwrap();
//! let mut out = std::fs::File::create("model.raw").unwrap();
//! scene.export(&ExportOptions::default(), &mut out).unwrap();
//! ```

mod error;
mod loader;
#[cfg(test)]
mod tests;

pub use error::GltfError;

use crate::scene::Scene;

/// Load the default scene (or the first scene) of a glTF document.
///
/// Every node of the returned scene is selected.
pub fn load_gltf(data: &[u8]) -> Result<Scene, GltfError> {
    let gltf = gltf_dep::Gltf::from_slice(data)?;
    let blob = gltf.blob.clone();

    let buffers = loader::resolve_buffers(&gltf.document, blob)?;
    let ctx = loader::LoadContext::new(gltf.document, buffers);

    let meshes = ctx.load_meshes()?;
    let scene = ctx.load_scene(meshes)?;

    log::info!(
        "Loaded glTF scene '{}': {} root nodes, {} meshes",
        scene.name.as_deref().unwrap_or("unnamed"),
        scene.nodes.len(),
        scene.meshes.len()
    );

    Ok(scene)
}
