//! In-memory scene host for the exporter.
//!
//! These types can be produced by any loader (see [`crate::gltf`]) or built
//! programmatically.
//!
//! - [`Scene`] - Nodes and the meshes they reference
//! - [`SceneNode`] - A node in the scene tree
//! - [`NodeTransform`] - TRS transform using plain arrays
//! - [`Modifier`] - Procedural changes evaluated when modifiers are applied
//! - [`SelectedObject`] - A selected node, exportable through [`crate::raw`]

mod modifier;
mod selection;
mod types;

pub use modifier::{apply_modifiers, Modifier, ModifierError, MorphTarget};
pub use selection::SelectedObject;
pub use types::{NodeTransform, Scene, SceneNode};
