//! Polygon → corner group decomposition.
//!
//! A group is a list of corner positions within the polygon; each group is
//! emitted as consecutive records. Only 4-corner polygons are ever split,
//! along the fixed diagonal between corners 0 and 2. Anything else passes
//! through as a single group of all corners in their given order, which
//! only forms a triangle when the polygon has exactly 3 corners.

/// Corner positions emitted for one triangle (or pass-through polygon).
pub type CornerGroup = Vec<usize>;

/// The two triangles a split quad is emitted as.
pub const QUAD_SPLIT: [[usize; 3]; 2] = [[0, 1, 2], [3, 0, 2]];

/// Decompose a polygon with `corner_count` corners into corner groups.
///
/// `split_quads` only affects 4-corner polygons.
pub fn triangulate(corner_count: usize, split_quads: bool) -> Vec<CornerGroup> {
    if corner_count == 4 && split_quads {
        QUAD_SPLIT.iter().map(|group| group.to_vec()).collect()
    } else {
        vec![(0..corner_count).collect()]
    }
}

/// Number of records [`triangulate`] will emit for such a polygon.
pub fn emitted_corner_count(corner_count: usize, split_quads: bool) -> usize {
    if corner_count == 4 && split_quads {
        6
    } else {
        corner_count
    }
}
