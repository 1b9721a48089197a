//! Append-only record accumulation for one export call.

use super::record::OutputRecord;

/// Records in emission order: object → polygon → triangulated corner.
///
/// Records are never reordered or deduplicated once pushed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportBuffer {
    records: Vec<OutputRecord>,
}

impl ExportBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Append one record.
    #[inline]
    pub fn push(&mut self, record: OutputRecord) {
        self.records.push(record);
    }

    /// Reserve room for `additional` more records.
    pub fn reserve(&mut self, additional: usize) {
        self.records.reserve(additional);
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no record has been pushed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in order.
    #[inline]
    pub fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    /// Iterate over records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, OutputRecord> {
        self.records.iter()
    }

    /// Whether consecutive triples of records form whole triangles.
    ///
    /// False when a pass-through quad or n-gon was emitted.
    pub fn is_triangle_list(&self) -> bool {
        self.records.len() % 3 == 0
    }
}

impl<'a> IntoIterator for &'a ExportBuffer {
    type Item = &'a OutputRecord;
    type IntoIter = std::slice::Iter<'a, OutputRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<OutputRecord> for ExportBuffer {
    fn extend<I: IntoIterator<Item = OutputRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}
