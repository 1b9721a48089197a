//! RAW stream decoding.
//!
//! The inverse of [`write_raw`](super::write_raw), used to inspect exported
//! files and to hand them to renderers as flat attribute arrays.

use std::io::Read;

use super::error::RawError;
use super::record::{OutputRecord, HEADER_SIZE, RECORD_SIZE};

/// A decoded RAW stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMesh {
    records: Vec<OutputRecord>,
}

impl RawMesh {
    /// Records in stream order.
    pub fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    /// Number of records (corners).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the stream held no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of whole triangles the records form.
    pub fn triangle_count(&self) -> usize {
        self.records.len() / 3
    }

    /// Positions flattened as `[x, y, z, x, y, z, ...]`.
    pub fn positions_f32(&self) -> Vec<f32> {
        self.records.iter().flat_map(|r| r.position).collect()
    }

    /// Normals flattened as `[x, y, z, ...]`.
    pub fn normals_f32(&self) -> Vec<f32> {
        self.records.iter().flat_map(|r| r.normal).collect()
    }

    /// Colors flattened as `[r, g, b, ...]`.
    pub fn colors_f32(&self) -> Vec<f32> {
        self.records.iter().flat_map(|r| r.color).collect()
    }

    /// UVs flattened as `[u, v, ...]`.
    pub fn uvs_f32(&self) -> Vec<f32> {
        self.records.iter().flat_map(|r| r.uv).collect()
    }
}

/// Read a whole RAW stream.
///
/// The stream must contain exactly as many records as its header
/// announces.
pub fn read_raw<R: Read + ?Sized>(src: &mut R) -> Result<RawMesh, RawError> {
    let mut header = [0u8; HEADER_SIZE];
    src.read_exact(&mut header)?;
    let expected = u32::from_le_bytes(header);

    let mut data = Vec::new();
    src.read_to_end(&mut data)?;

    let available = data.len() / RECORD_SIZE;
    if (available as u64) < u64::from(expected) {
        return Err(RawError::Truncated {
            expected,
            actual: available as u32,
        });
    }

    let used = expected as usize * RECORD_SIZE;
    if data.len() > used {
        return Err(RawError::TrailingData(data.len() - used));
    }

    let records = data
        .chunks_exact(RECORD_SIZE)
        .map(|chunk| {
            let mut bytes = [0u8; RECORD_SIZE];
            bytes.copy_from_slice(chunk);
            OutputRecord::from_le_bytes(&bytes)
        })
        .collect();

    log::debug!("Read RAW stream with {} records", expected);

    Ok(RawMesh { records })
}
