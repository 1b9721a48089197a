//! Per-corner attribute layers.
//!
//! Layers store one value per polygon corner rather than per vertex, so a
//! vertex shared by several polygons can carry a different color or UV in
//! each of them. Lookups never fail: a missing polygon or slot is `None`
//! and the caller substitutes its default.

/// Highest 1-based color slot a polygon can carry.
pub const MAX_COLOR_SLOTS: usize = 4;

/// An RGB color layer addressed by polygon and 1-based corner slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorLayer {
    /// Layer name, if any.
    pub name: Option<String>,
    polygons: Vec<Vec<[f32; 3]>>,
}

impl ColorLayer {
    /// Creates an empty color layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a layer from per-polygon corner colors.
    pub fn from_polygons(polygons: Vec<Vec<[f32; 3]>>) -> Self {
        Self {
            name: None,
            polygons,
        }
    }

    /// Set the layer name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append the corner colors of the next polygon.
    pub fn push_polygon(&mut self, colors: Vec<[f32; 3]>) {
        self.polygons.push(colors);
    }

    /// Number of polygons with color data.
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Color stored for `polygon` at 1-based `slot`.
    ///
    /// Slot 0 and slots above [`MAX_COLOR_SLOTS`] are never available,
    /// even if the polygon stores more colors.
    pub fn color(&self, polygon: usize, slot: usize) -> Option<[f32; 3]> {
        if slot == 0 || slot > MAX_COLOR_SLOTS {
            return None;
        }
        self.polygons.get(polygon)?.get(slot - 1).copied()
    }
}

/// A UV layer storing one flat `u0 v0 u1 v1 ...` block per polygon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UvLayer {
    /// Layer name, if any.
    pub name: Option<String>,
    polygons: Vec<Vec<f32>>,
}

impl UvLayer {
    /// Creates an empty UV layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a layer from per-polygon flat UV blocks.
    pub fn from_polygons(polygons: Vec<Vec<f32>>) -> Self {
        Self {
            name: None,
            polygons,
        }
    }

    /// Set the layer name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append the UV block of the next polygon from per-corner pairs.
    pub fn push_polygon(&mut self, uvs: &[[f32; 2]]) {
        self.polygons.push(uvs.iter().flatten().copied().collect());
    }

    /// Number of polygons with UV data.
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Raw UV block of a polygon.
    pub fn block(&self, polygon: usize) -> Option<&[f32]> {
        self.polygons.get(polygon).map(Vec::as_slice)
    }

    /// UV pair at offset `2 * corner` inside the polygon's block.
    pub fn uv(&self, polygon: usize, corner: usize) -> Option<[f32; 2]> {
        let block = self.block(polygon)?;
        let start = corner.checked_mul(2)?;
        match block.get(start..start + 2)? {
            [u, v] => Some([*u, *v]),
            _ => None,
        }
    }
}
