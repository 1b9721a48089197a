//! Scene graph data types.
//!
//! Transforms are stored as plain arrays (`[f32; 3]`, `[f32; 4]`) and only
//! turned into nalgebra matrices when world transforms are computed.

use std::io::Write;

use crate::math::{mat4_from_scale_rotation_translation, quat_from_array, Mat4, Vec3};
use crate::mesh::PolyMesh;
use crate::raw::{export_objects, ExportOptions, ExportSummary, RawError};

use super::modifier::Modifier;
use super::selection::SelectedObject;

/// Node transform decomposed into translation, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    /// Translation [x, y, z].
    pub translation: [f32; 3],
    /// Rotation quaternion [x, y, z, w].
    pub rotation: [f32; 4],
    /// Scale [x, y, z].
    pub scale: [f32; 3],
}

impl NodeTransform {
    /// Identity transform: no translation, identity rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: [0.0, 0.0, 0.0],
        rotation: [0.0, 0.0, 0.0, 1.0],
        scale: [1.0, 1.0, 1.0],
    };

    /// Returns this transform with a different translation.
    #[must_use]
    pub const fn with_translation(mut self, translation: [f32; 3]) -> Self {
        self.translation = translation;
        self
    }

    /// Returns this transform with a different rotation.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: [f32; 4]) -> Self {
        self.rotation = rotation;
        self
    }

    /// Returns this transform with a different scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: [f32; 3]) -> Self {
        self.scale = scale;
        self
    }

    /// Local matrix (T * R * S).
    pub fn to_matrix(&self) -> Mat4 {
        mat4_from_scale_rotation_translation(
            Vec3::from(self.scale),
            quat_from_array(self.rotation),
            Vec3::from(self.translation),
        )
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A node in a scene graph tree.
///
/// A node may reference one mesh of the owning [`Scene`] by index and carry
/// a modifier stack that is evaluated when modifiers are applied at export.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Node name, if any.
    pub name: Option<String>,
    /// Local transform relative to parent.
    pub transform: NodeTransform,
    /// Index into [`Scene::meshes`], if the node carries a mesh.
    pub mesh: Option<usize>,
    /// Modifiers, evaluated in order.
    pub modifiers: Vec<Modifier>,
    /// Whether the node takes part in an export.
    pub selected: bool,
    /// Child nodes forming the sub-tree.
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Creates a new unselected node with identity transform and no mesh.
    pub fn new() -> Self {
        Self {
            name: None,
            transform: NodeTransform::IDENTITY,
            mesh: None,
            modifiers: Vec::new(),
            selected: false,
            children: Vec::new(),
        }
    }

    /// Set the node name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: NodeTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the mesh index.
    #[must_use]
    pub fn with_mesh(mut self, mesh: usize) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Append a modifier to the stack.
    #[must_use]
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Set the selection flag.
    #[must_use]
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Set the child nodes.
    #[must_use]
    pub fn with_children(mut self, children: Vec<SceneNode>) -> Self {
        self.children = children;
        self
    }

    /// Select or deselect this node and its whole sub-tree.
    pub fn select_recursive(&mut self, selected: bool) {
        self.selected = selected;
        for child in &mut self.children {
            child.select_recursive(selected);
        }
    }
}

impl Default for SceneNode {
    fn default() -> Self {
        Self::new()
    }
}

/// A scene: a forest of nodes and the meshes they reference.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Scene name, if any.
    pub name: Option<String>,
    /// Root nodes of the scene.
    pub nodes: Vec<SceneNode>,
    /// All meshes referenced by nodes in this scene.
    pub meshes: Vec<PolyMesh>,
}

impl Scene {
    /// Creates a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scene name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the root nodes.
    #[must_use]
    pub fn with_nodes(mut self, nodes: Vec<SceneNode>) -> Self {
        self.nodes = nodes;
        self
    }

    /// Set the meshes.
    #[must_use]
    pub fn with_meshes(mut self, meshes: Vec<PolyMesh>) -> Self {
        self.meshes = meshes;
        self
    }

    /// Add a mesh and return its index.
    pub fn add_mesh(&mut self, mesh: PolyMesh) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    /// Add a root node.
    pub fn add_node(&mut self, node: SceneNode) {
        self.nodes.push(node);
    }

    /// Select or deselect every node.
    pub fn select_all(&mut self, selected: bool) {
        for node in &mut self.nodes {
            node.select_recursive(selected);
        }
    }

    /// Selected nodes in depth-first pre-order, with their world transforms.
    ///
    /// A node's world matrix is its parent's world matrix times its local
    /// matrix. Unselected parents still contribute their transform.
    pub fn selected_objects(&self) -> Vec<SelectedObject<'_>> {
        let mut out = Vec::new();
        for node in &self.nodes {
            self.collect_selected(node, &Mat4::identity(), &mut out);
        }
        out
    }

    fn collect_selected<'a>(
        &'a self,
        node: &'a SceneNode,
        parent: &Mat4,
        out: &mut Vec<SelectedObject<'a>>,
    ) {
        let world = parent * node.transform.to_matrix();
        if node.selected {
            out.push(SelectedObject::new(node, &self.meshes, world));
        }
        for child in &node.children {
            self.collect_selected(child, &world, out);
        }
    }

    /// Export the selected nodes to `dest`.
    pub fn export<W: Write + ?Sized>(
        &self,
        options: &ExportOptions,
        dest: &mut W,
    ) -> Result<ExportSummary, RawError> {
        log::debug!(
            "Exporting scene '{}'",
            self.name.as_deref().unwrap_or("unnamed")
        );
        export_objects(self.selected_objects(), options, dest)
    }
}
