//! RAW stream encoding.
//!
//! Layout: a little-endian `u32` record count, then every record as 11
//! little-endian `f32` values (position, normal, color, uv). No padding,
//! no footer.

use std::io::Write;

use super::buffer::ExportBuffer;
use super::error::RawError;
use super::record::{encoded_len, OutputRecord};

/// Write `buffer` to `dest` and return the number of bytes written.
///
/// The record count is checked before anything is written. Bytes go
/// straight to `dest`; wrap it in a `BufWriter` if it is unbuffered. A
/// write error partway through leaves whatever was already written.
pub fn write_raw<W: Write + ?Sized>(dest: &mut W, buffer: &ExportBuffer) -> Result<u64, RawError> {
    let count = u32::try_from(buffer.len()).map_err(|_| RawError::TooManyRecords(buffer.len()))?;

    dest.write_all(&count.to_le_bytes())?;
    write_records(dest, buffer.records())?;

    Ok(encoded_len(buffer.len()) as u64)
}

#[cfg(target_endian = "little")]
fn write_records<W: Write + ?Sized>(dest: &mut W, records: &[OutputRecord]) -> std::io::Result<()> {
    // In-memory layout already equals the stream layout.
    dest.write_all(bytemuck::cast_slice(records))
}

#[cfg(not(target_endian = "little"))]
fn write_records<W: Write + ?Sized>(dest: &mut W, records: &[OutputRecord]) -> std::io::Result<()> {
    for record in records {
        dest.write_all(&record.to_le_bytes())?;
    }
    Ok(())
}
