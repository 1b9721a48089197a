//! Export orchestration: objects → buffer → stream.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::buffer::ExportBuffer;
use super::error::RawError;
use super::resolve::{AttributeResolver, CornerRef};
use super::source::{ExportObject, ScopedSnapshot};
use super::triangulate::{emitted_corner_count, triangulate};
use super::writer::write_raw;

/// Options for one export call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Export modifier-evaluated geometry instead of the stored mesh.
    pub apply_modifiers: bool,
    /// Split 4-corner polygons into two triangles.
    pub triangulate: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            apply_modifiers: true,
            triangulate: true,
        }
    }
}

impl ExportOptions {
    /// Set whether modifiers are applied.
    #[must_use]
    pub fn with_apply_modifiers(mut self, apply_modifiers: bool) -> Self {
        self.apply_modifiers = apply_modifiers;
        self
    }

    /// Set whether quads are split.
    #[must_use]
    pub fn with_triangulate(mut self, triangulate: bool) -> Self {
        self.triangulate = triangulate;
        self
    }
}

/// Counters collected while building a buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub objects_exported: usize,
    pub objects_skipped: usize,
    pub polygons: usize,
}

/// Result of a completed export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub objects_exported: usize,
    pub objects_skipped: usize,
    pub polygons: usize,
    pub records: usize,
    pub bytes_written: u64,
}

/// Resolve every object into records, in object → polygon → corner order.
///
/// Objects whose mesh cannot be acquired, or whose mesh fails validation,
/// are skipped with a warning. Their snapshot is released before the next
/// object is read.
pub fn build_export_buffer<I>(objects: I, options: &ExportOptions) -> (ExportBuffer, ExportStats)
where
    I: IntoIterator,
    I::Item: ExportObject,
{
    let mut buffer = ExportBuffer::new();
    let mut stats = ExportStats::default();
    let mut oversized = 0usize;

    for object in objects {
        let snapshot = match ScopedSnapshot::acquire(&object, options.apply_modifiers) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::warn!("Skipping '{}': {}", object.name(), err);
                stats.objects_skipped += 1;
                continue;
            }
        };

        if let Err(err) = snapshot.validate() {
            log::warn!("Skipping '{}': invalid mesh: {}", object.name(), err);
            stats.objects_skipped += 1;
            continue;
        }

        let transform = object.world_transform();
        let resolver = AttributeResolver::new(&snapshot, &transform);
        let before = buffer.len();

        buffer.reserve(
            snapshot
                .polygons()
                .iter()
                .map(|p| emitted_corner_count(p.corner_count(), options.triangulate))
                .sum(),
        );

        for (polygon_index, polygon) in snapshot.polygons().iter().enumerate() {
            if polygon.corner_count() > 4 {
                oversized += 1;
            }
            for group in triangulate(polygon.corner_count(), options.triangulate) {
                log::trace!("Polygon {} group {:?}", polygon_index, group);
                buffer.extend(group.into_iter().map(|corner| {
                    resolver.resolve(CornerRef {
                        polygon: polygon_index,
                        corner,
                        vertex: polygon.vertices[corner],
                    })
                }));
            }
        }

        log::debug!(
            "Exported '{}': {} polygons, {} records ({} snapshot)",
            object.name(),
            snapshot.polygon_count(),
            buffer.len() - before,
            if snapshot.is_temporary() {
                "temporary"
            } else {
                "borrowed"
            }
        );
        stats.objects_exported += 1;
        stats.polygons += snapshot.polygon_count();
    }

    if oversized > 0 {
        log::warn!(
            "{} polygons have more than 4 corners and were emitted untriangulated",
            oversized
        );
    }
    if !buffer.is_triangle_list() {
        log::warn!(
            "{} records do not form whole triangles; consumers expecting a triangle list will misread the stream",
            buffer.len()
        );
    }

    (buffer, stats)
}

/// Export `objects` to `dest`.
///
/// The whole buffer is built first and written with a single
/// [`write_raw`] call. Skipped objects are not an error; write failures
/// are.
pub fn export_objects<I, W>(
    objects: I,
    options: &ExportOptions,
    dest: &mut W,
) -> Result<ExportSummary, RawError>
where
    I: IntoIterator,
    I::Item: ExportObject,
    W: Write + ?Sized,
{
    let (buffer, stats) = build_export_buffer(objects, options);
    let bytes_written = write_raw(dest, &buffer)?;

    let summary = ExportSummary {
        objects_exported: stats.objects_exported,
        objects_skipped: stats.objects_skipped,
        polygons: stats.polygons,
        records: buffer.len(),
        bytes_written,
    };

    log::info!(
        "Exported {} objects ({} skipped): {} polygons, {} records, {} bytes",
        summary.objects_exported,
        summary.objects_skipped,
        summary.polygons,
        summary.records,
        summary.bytes_written
    );

    Ok(summary)
}

/// Export `objects` to a file, creating or truncating it.
///
/// A failure partway through leaves a partial file behind.
pub fn export_to_path<I, P>(
    objects: I,
    options: &ExportOptions,
    path: P,
) -> Result<ExportSummary, RawError>
where
    I: IntoIterator,
    I::Item: ExportObject,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    log::debug!("Writing RAW stream to {}", path.display());

    let mut writer = BufWriter::new(File::create(path)?);
    let summary = export_objects(objects, options, &mut writer)?;
    writer.flush()?;

    Ok(summary)
}
