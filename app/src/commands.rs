//! Subcommand implementations.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use rawtri_core::gltf::load_gltf;
use rawtri_core::mesh::generators::{generate_cube, generate_quad, generate_uv_sphere};
use rawtri_core::mesh::PolyMesh;
use rawtri_core::raw::{export_to_path, read_raw, ExportOptions, ExportSummary, RawMesh};
use rawtri_core::scene::{Scene, SceneNode};

use crate::args::{ExportArgs, InspectArgs, PrimitiveArgs, Shape};
use crate::error::AppError;

/// `rawtri export`: load a glTF document and export all of its nodes.
pub fn export(args: &ExportArgs) -> Result<ExportSummary, AppError> {
    let data = fs::read(&args.input).map_err(|source| AppError::Read {
        path: args.input.clone(),
        source,
    })?;
    let scene = load_gltf(&data).map_err(|source| AppError::Load {
        path: args.input.clone(),
        source,
    })?;

    write_scene(&scene, &args.flags.options(), &args.output)
}

/// `rawtri primitive`: export a generated shape.
pub fn primitive(args: &PrimitiveArgs) -> Result<ExportSummary, AppError> {
    let mesh = build_shape(args.shape, args.size, args.segments, args.rings);
    log::debug!(
        "Generated {:?}: {} vertices, {} polygons",
        args.shape,
        mesh.vertex_count(),
        mesh.polygon_count()
    );

    let mut scene = Scene::new();
    let index = scene.add_mesh(mesh);
    scene.add_node(
        SceneNode::new()
            .with_name(format!("{:?}", args.shape).to_lowercase())
            .with_mesh(index)
            .with_selected(true),
    );

    let options = ExportOptions::default().with_triangulate(!args.no_triangulate);
    write_scene(&scene, &options, &args.output)
}

/// `rawtri inspect`: decode a stream and describe it.
pub fn inspect(args: &InspectArgs) -> Result<String, AppError> {
    let file = File::open(&args.file).map_err(|source| AppError::Read {
        path: args.file.clone(),
        source,
    })?;
    let mesh = read_raw(&mut BufReader::new(file)).map_err(|source| AppError::Raw {
        path: args.file.clone(),
        source,
    })?;

    Ok(describe(&mesh, args.records))
}

fn build_shape(shape: Shape, size: f32, segments: u32, rings: u32) -> PolyMesh {
    match shape {
        Shape::Quad => generate_quad(size, size),
        Shape::Cube => generate_cube(size),
        Shape::Sphere => generate_uv_sphere(size, segments, rings),
    }
}

fn write_scene(
    scene: &Scene,
    options: &ExportOptions,
    output: &Path,
) -> Result<ExportSummary, AppError> {
    export_to_path(scene.selected_objects(), options, output).map_err(|source| AppError::Raw {
        path: output.to_path_buf(),
        source,
    })
}

/// Human-readable summary of a decoded stream.
fn describe(mesh: &RawMesh, records: usize) -> String {
    let mut text = format!(
        "records: {}\ntriangles: {}{}\n",
        mesh.len(),
        mesh.triangle_count(),
        if mesh.len() % 3 == 0 {
            ""
        } else {
            " (records do not form whole triangles)"
        }
    );

    if let Some((min, max)) = bounds(mesh) {
        text.push_str(&format!(
            "bounds: [{:.4}, {:.4}, {:.4}] .. [{:.4}, {:.4}, {:.4}]\n",
            min[0], min[1], min[2], max[0], max[1], max[2]
        ));
    }

    for (i, r) in mesh.records().iter().take(records).enumerate() {
        text.push_str(&format!(
            "{i:>6}: p {:?} n {:?} c {:?} uv {:?}\n",
            r.position, r.normal, r.color, r.uv
        ));
    }

    text
}

fn bounds(mesh: &RawMesh) -> Option<([f32; 3], [f32; 3])> {
    let mut records = mesh.records().iter();
    let first = records.next()?.position;
    Some(records.fold((first, first), |(mut min, mut max), r| {
        for axis in 0..3 {
            min[axis] = min[axis].min(r.position[axis]);
            max[axis] = max[axis].max(r.position[axis]);
        }
        (min, max)
    }))
}
