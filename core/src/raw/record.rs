//! The fixed-size record emitted for every triangle corner.

use static_assertions::const_assert_eq;

/// Size of the little-endian `u32` record count at the start of a stream.
pub const HEADER_SIZE: usize = 4;

/// Size of one encoded record: 11 little-endian `f32` values.
pub const RECORD_SIZE: usize = 44;

/// Color written when the mesh has no color layer or the slot is missing.
pub const DEFAULT_COLOR: [f32; 3] = [0.5, 0.5, 0.5];

/// UV written when the mesh has no UV layer or the block is too short.
pub const DEFAULT_UV: [f32; 2] = [0.0, 0.0];

/// Position, normal, color and UV of one emitted triangle corner.
///
/// Field order matches the on-disk order, and the struct has no padding,
/// so a slice of records can be viewed as bytes on little-endian targets.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OutputRecord {
    /// World-space position.
    pub position: [f32; 3],
    /// World-space normal (rotated, never renormalised).
    pub normal: [f32; 3],
    /// RGB color.
    pub color: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

const_assert_eq!(std::mem::size_of::<OutputRecord>(), RECORD_SIZE);

impl OutputRecord {
    /// The 11 floats in stream order.
    pub fn to_floats(&self) -> [f32; 11] {
        let [px, py, pz] = self.position;
        let [nx, ny, nz] = self.normal;
        let [r, g, b] = self.color;
        let [u, v] = self.uv;
        [px, py, pz, nx, ny, nz, r, g, b, u, v]
    }

    /// Rebuild a record from 11 floats in stream order.
    pub fn from_floats(f: [f32; 11]) -> Self {
        Self {
            position: [f[0], f[1], f[2]],
            normal: [f[3], f[4], f[5]],
            color: [f[6], f[7], f[8]],
            uv: [f[9], f[10]],
        }
    }

    /// Little-endian encoding of this record.
    pub fn to_le_bytes(&self) -> [u8; RECORD_SIZE] {
        let mut out = [0u8; RECORD_SIZE];
        for (chunk, value) in out.chunks_exact_mut(4).zip(self.to_floats()) {
            chunk.copy_from_slice(&value.to_le_bytes());
        }
        out
    }

    /// Decode a record from its little-endian encoding.
    pub fn from_le_bytes(bytes: &[u8; RECORD_SIZE]) -> Self {
        let mut floats = [0f32; 11];
        for (value, chunk) in floats.iter_mut().zip(bytes.chunks_exact(4)) {
            *value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self::from_floats(floats)
    }
}

/// Total stream length for `record_count` records.
pub const fn encoded_len(record_count: usize) -> usize {
    HEADER_SIZE + RECORD_SIZE * record_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_byte_order() {
        let record = OutputRecord {
            position: [1.0, 2.0, 3.0],
            normal: [4.0, 5.0, 6.0],
            color: [7.0, 8.0, 9.0],
            uv: [10.0, 11.0],
        };
        let bytes = record.to_le_bytes();
        for (i, chunk) in bytes.chunks_exact(4).enumerate() {
            assert_eq!(chunk, &((i + 1) as f32).to_le_bytes());
        }
        assert_eq!(OutputRecord::from_le_bytes(&bytes), record);
    }

    #[test]
    fn test_encoded_len() {
        assert_eq!(encoded_len(0), 4);
        assert_eq!(encoded_len(6), 268);
    }
}
