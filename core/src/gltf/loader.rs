//! Internal glTF loading logic.
//!
//! The [`LoadContext`] holds the parsed document and its resolved buffer
//! data while meshes and the node tree are converted.

use crate::mesh::{ColorLayer, PolyMesh, Polygon, UvLayer};
use crate::raw::{DEFAULT_COLOR, DEFAULT_UV};
use crate::scene::{Modifier, MorphTarget, NodeTransform, Scene, SceneNode};

use super::error::GltfError;

/// A converted glTF mesh with its morph targets kept apart from the base
/// geometry.
pub(crate) struct LoadedMesh {
    mesh: PolyMesh,
    targets: Vec<MorphTarget>,
    default_weights: Vec<f32>,
}

/// Geometry of one triangle primitive.
struct PrimitiveData {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    triangles: Vec<[u32; 3]>,
    colors: Option<Vec<[f32; 3]>>,
    uvs: Option<Vec<[f32; 2]>>,
    targets: Vec<MorphTarget>,
}

/// Internal loading context that holds resolved data during loading.
pub(crate) struct LoadContext {
    /// The parsed glTF document.
    document: gltf_dep::Document,
    /// Resolved buffer data (one Vec<u8> per glTF buffer).
    buffers: Vec<Vec<u8>>,
}

impl LoadContext {
    /// Create a new LoadContext from parsed glTF data.
    pub fn new(document: gltf_dep::Document, buffers: Vec<Vec<u8>>) -> Self {
        Self { document, buffers }
    }

    /// Load every glTF mesh as one [`PolyMesh`], in document order.
    ///
    /// All `Triangles` primitives of a mesh are merged; other topologies are
    /// skipped.
    pub fn load_meshes(&self) -> Result<Vec<LoadedMesh>, GltfError> {
        let mut result = Vec::new();

        for (mesh_idx, mesh) in self.document.meshes().enumerate() {
            let mut primitives = Vec::new();

            for (prim_idx, primitive) in mesh.primitives().enumerate() {
                if primitive.mode() != gltf_dep::mesh::Mode::Triangles {
                    log::warn!(
                        "Skipping mesh {} primitive {}: {:?} topology is not supported",
                        mesh_idx,
                        prim_idx,
                        primitive.mode()
                    );
                    continue;
                }
                primitives.push(self.read_primitive(&primitive, mesh_idx, prim_idx)?);
            }

            let default_weights = mesh.weights().map(<[f32]>::to_vec).unwrap_or_default();
            let mut loaded = merge_primitives(&primitives);
            if let Some(name) = mesh.name() {
                loaded.mesh = loaded.mesh.with_label(name);
            }
            loaded.default_weights = default_weights;

            log::debug!(
                "Loaded mesh {} ({} primitives): {} vertices, {} polygons, {} morph targets",
                mesh_idx,
                primitives.len(),
                loaded.mesh.vertex_count(),
                loaded.mesh.polygon_count(),
                loaded.targets.len()
            );
            result.push(loaded);
        }

        Ok(result)
    }

    fn read_primitive(
        &self,
        primitive: &gltf_dep::Primitive<'_>,
        mesh: usize,
        prim: usize,
    ) -> Result<PrimitiveData, GltfError> {
        let reader = primitive.reader(|buffer| self.buffers.get(buffer.index()).map(Vec::as_slice));

        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .ok_or(GltfError::MissingPositions {
                mesh,
                primitive: prim,
            })?
            .collect();

        let triangles: Vec<[u32; 3]> = match reader.read_indices() {
            Some(indices) => indices
                .into_u32()
                .collect::<Vec<_>>()
                .chunks_exact(3)
                .map(|t| [t[0], t[1], t[2]])
                .collect(),
            None => (0..positions.len() as u32 / 3)
                .map(|t| [3 * t, 3 * t + 1, 3 * t + 2])
                .collect(),
        };

        let normals = match reader.read_normals() {
            Some(normals) => normals.collect(),
            None => {
                log::debug!("Mesh {} primitive {} has no normals, computing them", mesh, prim);
                let mut scratch = PolyMesh::new()
                    .with_vertices(positions.clone(), Vec::new())
                    .with_polygons(triangles.iter().map(|t| Polygon::new(*t)).collect());
                scratch.compute_normals();
                scratch.normals().to_vec()
            }
        };

        let colors = reader.read_colors(0).map(|c| c.into_rgb_f32().collect());
        let uvs = reader.read_tex_coords(0).map(|t| t.into_f32().collect());

        let targets = reader
            .read_morph_targets()
            .map(|(positions, normals, _tangents)| MorphTarget {
                positions: positions.map(Iterator::collect),
                normals: normals.map(Iterator::collect),
            })
            .collect();

        Ok(PrimitiveData {
            positions,
            normals,
            triangles,
            colors,
            uvs,
            targets,
        })
    }

    /// Load the default scene (or the first one) as a [`Scene`].
    ///
    /// Every node is selected. Meshes with morph targets get a
    /// [`Modifier::Morph`] using the node's weights, falling back to the
    /// mesh's default weights.
    pub fn load_scene(&self, meshes: Vec<LoadedMesh>) -> Result<Scene, GltfError> {
        let scene = self
            .document
            .default_scene()
            .or_else(|| self.document.scenes().next())
            .ok_or(GltfError::NoScene)?;

        let nodes = scene.nodes().map(|n| load_node(&n, &meshes)).collect();

        let mut result = Scene::new()
            .with_nodes(nodes)
            .with_meshes(meshes.into_iter().map(|m| m.mesh).collect());
        if let Some(name) = scene.name() {
            result = result.with_name(name);
        }
        Ok(result)
    }
}

/// Recursively convert a node and its children.
fn load_node(node: &gltf_dep::Node<'_>, meshes: &[LoadedMesh]) -> SceneNode {
    let (translation, rotation, scale) = node.transform().decomposed();

    let mut result = SceneNode::new()
        .with_transform(NodeTransform {
            translation,
            rotation,
            scale,
        })
        .with_selected(true)
        .with_children(node.children().map(|c| load_node(&c, meshes)).collect());
    if let Some(name) = node.name() {
        result = result.with_name(name);
    }

    if let Some(mesh) = node.mesh() {
        result = result.with_mesh(mesh.index());
        if let Some(loaded) = meshes.get(mesh.index()) {
            if !loaded.targets.is_empty() {
                let weights = node
                    .weights()
                    .map(<[f32]>::to_vec)
                    .filter(|w| !w.is_empty())
                    .unwrap_or_else(|| default_weights(loaded));
                result = result.with_modifier(Modifier::Morph {
                    targets: loaded.targets.clone(),
                    weights,
                });
            }
        }
    }

    result
}

fn default_weights(loaded: &LoadedMesh) -> Vec<f32> {
    if loaded.default_weights.is_empty() {
        vec![0.0; loaded.targets.len()]
    } else {
        loaded.default_weights.clone()
    }
}

/// Merge triangle primitives into one mesh.
///
/// Color and UV layers are only built when every primitive carries them.
fn merge_primitives(primitives: &[PrimitiveData]) -> LoadedMesh {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut polygons = Vec::new();
    let mut vertex_colors = Vec::new();
    let mut vertex_uvs = Vec::new();

    for prim in primitives {
        let base = positions.len() as u32;
        positions.extend_from_slice(&prim.positions);
        normals.extend_from_slice(&prim.normals);
        polygons.extend(
            prim.triangles
                .iter()
                .map(|t| Polygon::new([t[0] + base, t[1] + base, t[2] + base])),
        );
        if let Some(colors) = &prim.colors {
            vertex_colors.extend_from_slice(colors);
        }
        if let Some(uvs) = &prim.uvs {
            vertex_uvs.extend_from_slice(uvs);
        }
    }

    let has_colors = !primitives.is_empty() && primitives.iter().all(|p| p.colors.is_some());
    let has_uvs = !primitives.is_empty() && primitives.iter().all(|p| p.uvs.is_some());

    let color_layer = has_colors.then(|| {
        ColorLayer::from_polygons(
            polygons
                .iter()
                .map(|p: &Polygon| {
                    p.vertices
                        .iter()
                        .map(|&v| vertex_colors.get(v as usize).copied().unwrap_or(DEFAULT_COLOR))
                        .collect()
                })
                .collect(),
        )
        .with_name("COLOR_0")
    });

    let uv_layer = has_uvs.then(|| {
        let mut layer = UvLayer::new().with_name("TEXCOORD_0");
        for polygon in &polygons {
            let corners: Vec<[f32; 2]> = polygon
                .vertices
                .iter()
                .map(|&v| vertex_uvs.get(v as usize).copied().unwrap_or(DEFAULT_UV))
                .collect();
            layer.push_polygon(&corners);
        }
        layer
    });

    let mut mesh = PolyMesh::new()
        .with_vertices(positions, normals)
        .with_polygons(polygons);
    if let Some(layer) = color_layer {
        mesh = mesh.with_color_layer(layer);
    }
    if let Some(layer) = uv_layer {
        mesh = mesh.with_uv_layer(layer);
    }

    LoadedMesh {
        mesh,
        targets: merge_targets(primitives),
        default_weights: Vec::new(),
    }
}

fn merge_targets(primitives: &[PrimitiveData]) -> Vec<MorphTarget> {
    let count = primitives.iter().map(|p| p.targets.len()).max().unwrap_or(0);
    (0..count)
        .map(|t| MorphTarget {
            positions: merge_deltas(primitives, t, |target| target.positions.as_deref()),
            normals: merge_deltas(primitives, t, |target| target.normals.as_deref()),
        })
        .collect()
}

/// Concatenate one target's deltas across primitives, zero-filling
/// primitives that lack them.
fn merge_deltas(
    primitives: &[PrimitiveData],
    target: usize,
    pick: impl Fn(&MorphTarget) -> Option<&[[f32; 3]]>,
) -> Option<Vec<[f32; 3]>> {
    if !primitives
        .iter()
        .any(|p| p.targets.get(target).and_then(&pick).is_some())
    {
        return None;
    }

    let mut out = Vec::new();
    for prim in primitives {
        match prim.targets.get(target).and_then(&pick) {
            Some(deltas) if deltas.len() == prim.positions.len() => out.extend_from_slice(deltas),
            _ => out.resize(out.len() + prim.positions.len(), [0.0; 3]),
        }
    }
    Some(out)
}

/// Parse a data URI (e.g., `data:application/octet-stream;base64,...`) and
/// return the decoded bytes.
fn parse_data_uri(uri: &str) -> Option<Vec<u8>> {
    let rest = uri.strip_prefix("data:")?;
    let (_, encoded) = rest.split_once(";base64,")?;
    base64_decode(encoded)
}

/// Minimal standard-alphabet base64 decoder for embedded buffers.
fn base64_decode(input: &str) -> Option<Vec<u8>> {
    fn sextet(c: u8) -> Option<u8> {
        match c {
            b'A'..=b'Z' => Some(c - b'A'),
            b'a'..=b'z' => Some(c - b'a' + 26),
            b'0'..=b'9' => Some(c - b'0' + 52),
            b'+' => Some(62),
            b'/' => Some(63),
            _ => None,
        }
    }

    let input: Vec<u8> = input.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    let mut out = Vec::with_capacity(input.len() / 4 * 3);

    for chunk in input.chunks(4) {
        let pad = chunk.iter().filter(|&&b| b == b'=').count();
        let mut word = 0u32;
        for (i, &byte) in chunk.iter().enumerate() {
            let value = if byte == b'=' { 0 } else { sextet(byte)? };
            word |= u32::from(value) << (18 - 6 * i);
        }
        let bytes = word.to_be_bytes();
        let keep = (chunk.len() * 6 / 8).min(3 - pad.min(2));
        out.extend_from_slice(&bytes[1..1 + keep]);
    }

    Some(out)
}

/// Resolve all buffer data from the glTF document.
///
/// For binary glTF (.glb), the `Bin` buffer is the embedded blob. Data URIs
/// are decoded; external files are not supported.
pub(crate) fn resolve_buffers(
    document: &gltf_dep::Document,
    blob: Option<Vec<u8>>,
) -> Result<Vec<Vec<u8>>, GltfError> {
    let mut buffers = Vec::new();

    for buffer in document.buffers() {
        match buffer.source() {
            gltf_dep::buffer::Source::Bin => {
                let data = blob.as_ref().ok_or_else(|| {
                    GltfError::Buffer("binary buffer referenced but no blob present".into())
                })?;
                buffers.push(data.clone());
            }
            gltf_dep::buffer::Source::Uri(uri) => {
                let data = parse_data_uri(uri).ok_or_else(|| {
                    GltfError::Buffer(format!("external buffer URIs not supported: {uri}"))
                })?;
                buffers.push(data);
            }
        }
    }

    Ok(buffers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_decode() {
        assert_eq!(base64_decode("SGVsbG8gV29ybGQ=").unwrap(), b"Hello World");
        assert_eq!(base64_decode("YQ==").unwrap(), b"a");
        assert_eq!(base64_decode("YWJj").unwrap(), b"abc");
        assert!(base64_decode("Y*==").is_none());
    }

    #[test]
    fn test_parse_data_uri() {
        let uri = "data:application/octet-stream;base64,AQID";
        assert_eq!(parse_data_uri(uri).unwrap(), vec![1, 2, 3]);
        assert!(parse_data_uri("file://some/path").is_none());
    }

    fn primitive(n: u32, colors: bool) -> PrimitiveData {
        PrimitiveData {
            positions: vec![[0.0; 3]; 3 * n as usize],
            normals: vec![[0.0, 0.0, 1.0]; 3 * n as usize],
            triangles: (0..n).map(|t| [3 * t, 3 * t + 1, 3 * t + 2]).collect(),
            colors: colors.then(|| vec![[1.0, 0.0, 0.0]; 3 * n as usize]),
            uvs: None,
            targets: Vec::new(),
        }
    }

    #[test]
    fn test_merge_offsets_indices_and_drops_partial_layers() {
        let merged = merge_primitives(&[primitive(1, true), primitive(2, false)]);
        assert_eq!(merged.mesh.vertex_count(), 9);
        assert_eq!(merged.mesh.polygon_count(), 3);
        assert_eq!(merged.mesh.polygons()[1].vertices, vec![3, 4, 5]);
        assert!(merged.mesh.color_layer().is_none());
        assert!(merged.mesh.validate().is_ok());

        let merged = merge_primitives(&[primitive(1, true)]);
        let colors = merged.mesh.color_layer().unwrap();
        assert_eq!(colors.color(0, 3), Some([1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_merge_targets_zero_fills_missing_primitives() {
        let mut first = primitive(1, false);
        first.targets.push(MorphTarget {
            positions: Some(vec![[0.0, 1.0, 0.0]; 3]),
            normals: None,
        });
        let merged = merge_primitives(&[first, primitive(1, false)]);
        assert_eq!(merged.targets.len(), 1);
        let deltas = merged.targets[0].positions.as_ref().unwrap();
        assert_eq!(deltas.len(), 6);
        assert_eq!(deltas[0], [0.0, 1.0, 0.0]);
        assert_eq!(deltas[5], [0.0; 3]);
        assert!(merged.targets[0].normals.is_none());
    }
}
