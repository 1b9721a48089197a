//! Indexless binary triangle stream ("RAW") export and import.
//!
//! Each exported polygon corner becomes one fixed-size record. The stream
//! is a little-endian `u32` record count followed by the records:
//!
//! | field    | floats | bytes |
//! |----------|--------|-------|
//! | position | 3      | 12    |
//! | normal   | 3      | 12    |
//! | color    | 3      | 12    |
//! | uv       | 2      | 8     |
//!
//! # Example
//!
//! ```rust
//! use rawtri_core::mesh::generators::generate_quad;
//! use rawtri_core::raw::{export_objects, read_raw, ExportOptions};
//! use rawtri_core::scene::{Scene, SceneNode};
//!
//! let mut scene = Scene::new().with_name("demo");
//! let mesh = scene.add_mesh(generate_quad(1.0, 1.0));
//! scene.add_node(SceneNode::new().with_name("quad").with_mesh(mesh).with_selected(true));
//!
//! let mut bytes = Vec::new();
//! let summary = export_objects(scene.selected_objects(), &ExportOptions::default(), &mut bytes)
//!     .unwrap();
//! assert_eq!(summary.records, 6);
//! assert_eq!(bytes.len(), 4 + 6 * 44);
//!
//! let decoded = read_raw(&mut bytes.as_slice()).unwrap();
//! assert_eq!(decoded.triangle_count(), 2);
//! ```

mod buffer;
mod error;
mod export;
mod reader;
mod record;
mod resolve;
mod source;
mod triangulate;
mod writer;

pub use buffer::ExportBuffer;
pub use error::{RawError, SnapshotError};
pub use export::{
    build_export_buffer, export_objects, export_to_path, ExportOptions, ExportStats,
    ExportSummary,
};
pub use reader::{read_raw, RawMesh};
pub use record::{encoded_len, OutputRecord, DEFAULT_COLOR, DEFAULT_UV, HEADER_SIZE, RECORD_SIZE};
pub use resolve::{AttributeResolver, CornerRef};
pub use source::{ExportObject, MeshSnapshot, ScopedSnapshot};
pub use triangulate::{emitted_corner_count, triangulate, CornerGroup, QUAD_SPLIT};
pub use writer::write_raw;
