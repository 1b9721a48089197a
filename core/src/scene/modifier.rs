//! Procedural mesh modifiers evaluated at export time.

use thiserror::Error;

use crate::mesh::PolyMesh;

/// Errors raised while evaluating a modifier stack.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModifierError {
    #[error("morph has {targets} targets but {weights} weights")]
    WeightCountMismatch { targets: usize, weights: usize },
    #[error("morph target {target} has {actual} entries, mesh has {expected} vertices")]
    TargetLengthMismatch {
        target: usize,
        expected: usize,
        actual: usize,
    },
}

/// Per-vertex displacements of one morph target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MorphTarget {
    /// Position deltas, one per vertex.
    pub positions: Option<Vec<[f32; 3]>>,
    /// Normal deltas, one per vertex.
    pub normals: Option<Vec<[f32; 3]>>,
}

/// A modifier on a scene node.
#[derive(Debug, Clone, PartialEq)]
pub enum Modifier {
    /// Weighted blend of morph target deltas onto the base mesh.
    Morph {
        targets: Vec<MorphTarget>,
        weights: Vec<f32>,
    },
    /// Offset every vertex along its normal.
    Displace { strength: f32 },
}

impl Modifier {
    /// Evaluate this modifier on `mesh` in place.
    pub fn apply(&self, mesh: &mut PolyMesh) -> Result<(), ModifierError> {
        match self {
            Self::Morph { targets, weights } => apply_morph(mesh, targets, weights),
            Self::Displace { strength } => {
                let normals = mesh.normals().to_vec();
                for (p, n) in mesh.positions_mut().iter_mut().zip(normals) {
                    for axis in 0..3 {
                        p[axis] += n[axis] * strength;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Evaluate `modifiers` on `mesh` in stack order.
pub fn apply_modifiers(mesh: &mut PolyMesh, modifiers: &[Modifier]) -> Result<(), ModifierError> {
    modifiers.iter().try_for_each(|m| m.apply(mesh))
}

fn apply_morph(
    mesh: &mut PolyMesh,
    targets: &[MorphTarget],
    weights: &[f32],
) -> Result<(), ModifierError> {
    if targets.len() != weights.len() {
        return Err(ModifierError::WeightCountMismatch {
            targets: targets.len(),
            weights: weights.len(),
        });
    }

    let expected = mesh.vertex_count();
    for (index, target) in targets.iter().enumerate() {
        let lengths = [
            target.positions.as_ref().map(Vec::len),
            target.normals.as_ref().map(Vec::len),
        ];
        if let Some(actual) = lengths.into_iter().flatten().find(|&len| len != expected) {
            return Err(ModifierError::TargetLengthMismatch {
                target: index,
                expected,
                actual,
            });
        }
    }

    for (target, &weight) in targets.iter().zip(weights) {
        if weight == 0.0 {
            continue;
        }
        if let Some(deltas) = &target.positions {
            blend(mesh.positions_mut(), deltas, weight);
        }
        if let Some(deltas) = &target.normals {
            blend(mesh.normals_mut(), deltas, weight);
        }
    }

    Ok(())
}

fn blend(values: &mut [[f32; 3]], deltas: &[[f32; 3]], weight: f32) {
    for (v, d) in values.iter_mut().zip(deltas) {
        for axis in 0..3 {
            v[axis] += d[axis] * weight;
        }
    }
}
