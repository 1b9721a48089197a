//! End-to-end tests for RAW export.
//!
//! Parameterized using `rstest` over triangulation settings and object
//! mixes.

use std::cell::Cell;
use std::fs;

use rawtri_core::math::WorldTransform;
use rawtri_core::mesh::generators::{generate_cube, generate_quad, generate_uv_sphere};
use rawtri_core::mesh::{ColorLayer, PolyMesh, Polygon};
use rawtri_core::raw::{
    build_export_buffer, encoded_len, export_objects, export_to_path, read_raw, triangulate,
    ExportObject, ExportOptions, MeshSnapshot, OutputRecord, RawError, SnapshotError,
    DEFAULT_COLOR, DEFAULT_UV, HEADER_SIZE, RECORD_SIZE,
};
use rawtri_core::scene::{NodeTransform, Scene, SceneNode};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Test objects
// ---------------------------------------------------------------------------

/// Mesh handed out as a temporary snapshot, counting acquisitions and
/// releases.
struct Tracked {
    name: &'static str,
    mesh: Option<PolyMesh>,
    transform: WorldTransform,
    temporary: bool,
    acquired: Cell<usize>,
    released: Cell<usize>,
}

impl Tracked {
    fn new(name: &'static str, mesh: Option<PolyMesh>) -> Self {
        Self {
            name,
            mesh,
            transform: WorldTransform::identity(),
            temporary: true,
            acquired: Cell::new(0),
            released: Cell::new(0),
        }
    }

    fn borrowed(mut self) -> Self {
        self.temporary = false;
        self
    }
}

impl ExportObject for Tracked {
    fn name(&self) -> &str {
        self.name
    }

    fn world_transform(&self) -> WorldTransform {
        self.transform
    }

    fn acquire_mesh(&self, _apply_modifiers: bool) -> Result<MeshSnapshot<'_>, SnapshotError> {
        let mesh = self.mesh.as_ref().ok_or(SnapshotError::NoMeshData)?;
        self.acquired.set(self.acquired.get() + 1);
        if self.temporary {
            Ok(MeshSnapshot::Temporary(mesh.clone()))
        } else {
            Ok(MeshSnapshot::Borrowed(mesh))
        }
    }

    fn release_mesh(&self, _mesh: PolyMesh) {
        self.released.set(self.released.get() + 1);
    }
}

fn unit_quad() -> PolyMesh {
    PolyMesh::new()
        .with_vertices(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0.0, 0.0, 1.0]; 4],
        )
        .with_polygons(vec![Polygon::new([0, 1, 2, 3])])
}

fn triangle_at(x: f32) -> PolyMesh {
    PolyMesh::new()
        .with_vertices(
            vec![[x, 0.0, 0.0], [x + 1.0, 0.0, 0.0], [x, 1.0, 0.0]],
            vec![[0.0, 0.0, 1.0]; 3],
        )
        .with_polygons(vec![Polygon::new([0, 1, 2])])
}

fn broken_mesh() -> PolyMesh {
    triangle_at(0.0).with_polygons(vec![Polygon::new([0, 1, 42])])
}

fn floats(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}

// ---------------------------------------------------------------------------
// Triangulation table
// ---------------------------------------------------------------------------

#[rstest]
#[case::triangle_split(3, true, vec![vec![0, 1, 2]])]
#[case::triangle_no_split(3, false, vec![vec![0, 1, 2]])]
#[case::quad_split(4, true, vec![vec![0, 1, 2], vec![3, 0, 2]])]
#[case::quad_no_split(4, false, vec![vec![0, 1, 2, 3]])]
#[case::pentagon(5, true, vec![vec![0, 1, 2, 3, 4]])]
fn test_triangulation_table(
    #[case] corners: usize,
    #[case] split: bool,
    #[case] expected: Vec<Vec<usize>>,
) {
    assert_eq!(triangulate(corners, split), expected);
}

// ---------------------------------------------------------------------------
// Stream layout
// ---------------------------------------------------------------------------

#[test]
fn test_single_quad_end_to_end_bytes() {
    let objects = [Tracked::new("quad", Some(unit_quad()))];
    let mut out = Vec::new();
    let summary = export_objects(&objects, &ExportOptions::default(), &mut out).unwrap();

    assert_eq!(out.len(), 268);
    assert_eq!(&out[..4], &[0x06, 0x00, 0x00, 0x00]);
    assert_eq!(summary.records, 6);
    assert_eq!(summary.bytes_written, 268);

    let positions: [[f32; 3]; 4] = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ];
    for (record, corner) in out[HEADER_SIZE..]
        .chunks_exact(RECORD_SIZE)
        .zip([0usize, 1, 2, 3, 0, 2])
    {
        let f = floats(record);
        assert_eq!(f[0..3], positions[corner]);
        assert_eq!(f[3..6], [0.0, 0.0, 1.0]);
        assert_eq!(f[6..9], DEFAULT_COLOR);
        assert_eq!(f[9..11], DEFAULT_UV);
    }
}

#[rstest]
#[case::quad(generate_quad(1.0, 0.5), true)]
#[case::quad_untriangulated(generate_quad(1.0, 0.5), false)]
#[case::cube(generate_cube(2.0), true)]
#[case::sphere(generate_uv_sphere(1.0, 12, 6), true)]
#[case::sphere_untriangulated(generate_uv_sphere(1.0, 12, 6), false)]
fn test_header_matches_record_count(#[case] mesh: PolyMesh, #[case] split: bool) {
    let objects = [Tracked::new("mesh", Some(mesh))];
    let options = ExportOptions::default().with_triangulate(split);

    let mut out = Vec::new();
    let summary = export_objects(&objects, &options, &mut out).unwrap();

    let count = u32::from_le_bytes([out[0], out[1], out[2], out[3]]) as usize;
    assert_eq!(count, summary.records);
    assert_eq!(out.len(), encoded_len(count));
    assert_eq!(out.len(), 4 + 44 * count);
}

// ---------------------------------------------------------------------------
// Attribute resolution
// ---------------------------------------------------------------------------

#[rstest]
#[case::split(true)]
#[case::no_split(false)]
fn test_missing_layers_use_defaults(#[case] split: bool) {
    let objects = [Tracked::new("quad", Some(unit_quad()))];
    let options = ExportOptions::default().with_triangulate(split);
    let (buffer, _) = build_export_buffer(&objects, &options);

    assert!(!buffer.is_empty());
    for record in &buffer {
        assert_eq!(record.color, [0.5, 0.5, 0.5]);
        assert_eq!(record.uv, [0.0, 0.0]);
    }
}

#[test]
fn test_color_slots_follow_corner_position() {
    let colors = ColorLayer::from_polygons(vec![vec![
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 1.0, 1.0],
    ]]);
    let objects = [Tracked::new("quad", Some(unit_quad().with_color_layer(colors)))];
    let (buffer, _) = build_export_buffer(&objects, &ExportOptions::default());

    let colors: Vec<[f32; 3]> = buffer.iter().map(|r| r.color).collect();
    assert_eq!(
        colors,
        vec![
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
        ]
    );
}

#[test]
fn test_identity_transform_keeps_vertex_data_exactly() {
    let mesh = triangle_at(0.125).with_vertices(
        vec![[0.125, -7.5, 3.25], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        vec![[0.0, 0.0, 2.0], [0.3, 0.4, 0.0], [0.0, -1.0, 0.0]],
    );
    let objects = [Tracked::new("tri", Some(mesh.clone()))];
    let (buffer, _) = build_export_buffer(&objects, &ExportOptions::default());

    for (record, v) in buffer.iter().zip(0..3) {
        assert_eq!(record.position, mesh.positions()[v]);
        assert_eq!(record.normal, mesh.normals()[v]);
    }
}

#[test]
fn test_non_uniform_scale_normals_are_not_renormalized() {
    let mut scene = Scene::new();
    let mesh = scene.add_mesh(generate_quad(1.0, 1.0));
    scene.add_node(
        SceneNode::new()
            .with_mesh(mesh)
            .with_selected(true)
            .with_transform(NodeTransform::IDENTITY.with_scale([1.0, 1.0, 5.0])),
    );

    let (buffer, _) = build_export_buffer(scene.selected_objects(), &ExportOptions::default());
    for record in &buffer {
        assert_eq!(record.normal, [0.0, 0.0, 1.0]);
    }
}

// ---------------------------------------------------------------------------
// Skipping and snapshot lifetime
// ---------------------------------------------------------------------------

#[rstest]
#[case::no_mesh(None)]
#[case::invalid_mesh(Some(broken_mesh()))]
fn test_skipped_object_keeps_order_of_others(#[case] bad_mesh: Option<PolyMesh>) {
    let with_bad = [
        Tracked::new("a", Some(triangle_at(0.0))),
        Tracked::new("bad", bad_mesh),
        Tracked::new("b", Some(triangle_at(5.0))),
    ];
    let without_bad = [
        Tracked::new("a", Some(triangle_at(0.0))),
        Tracked::new("b", Some(triangle_at(5.0))),
    ];

    let (buffer, stats) = build_export_buffer(&with_bad, &ExportOptions::default());
    let (expected, _) = build_export_buffer(&without_bad, &ExportOptions::default());

    assert_eq!(stats.objects_skipped, 1);
    assert_eq!(stats.objects_exported, 2);
    assert_eq!(buffer, expected);
    let xs: Vec<f32> = buffer.iter().map(|r: &OutputRecord| r.position[0]).collect();
    assert_eq!(xs, vec![0.0, 1.0, 0.0, 5.0, 6.0, 5.0]);
}

#[rstest]
#[case::valid(Some(triangle_at(0.0)), 1, 1)]
#[case::invalid(Some(broken_mesh()), 1, 1)]
#[case::unavailable(None, 0, 0)]
fn test_temporary_snapshot_released_on_every_path(
    #[case] mesh: Option<PolyMesh>,
    #[case] acquired: usize,
    #[case] released: usize,
) {
    let objects = [Tracked::new("obj", mesh), Tracked::new("next", Some(triangle_at(1.0)))];
    let _ = build_export_buffer(&objects, &ExportOptions::default());

    assert_eq!(objects[0].acquired.get(), acquired);
    assert_eq!(objects[0].released.get(), released);
    assert_eq!(objects[1].released.get(), 1);
}

#[test]
fn test_borrowed_snapshot_is_never_released() {
    let objects = [Tracked::new("obj", Some(triangle_at(0.0))).borrowed()];
    let _ = build_export_buffer(&objects, &ExportOptions::default());
    assert_eq!(objects[0].acquired.get(), 1);
    assert_eq!(objects[0].released.get(), 0);
}

// ---------------------------------------------------------------------------
// File output
// ---------------------------------------------------------------------------

#[test]
fn test_export_to_path_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cube.raw");

    let objects = [Tracked::new("cube", Some(generate_cube(1.0)))];
    let summary = export_to_path(&objects, &ExportOptions::default(), &path).unwrap();

    let metadata = fs::metadata(&path).unwrap();
    assert_eq!(metadata.len(), summary.bytes_written);

    let mut file = fs::File::open(&path).unwrap();
    let mesh = read_raw(&mut file).unwrap();
    assert_eq!(mesh.len(), 36);
    assert_eq!(mesh.triangle_count(), 12);
}

#[test]
fn test_export_to_unwritable_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let objects = [Tracked::new("cube", Some(generate_cube(1.0)))];

    let err = export_to_path(&objects, &ExportOptions::default(), dir.path()).unwrap_err();
    assert!(matches!(err, RawError::Io(_)));
}
