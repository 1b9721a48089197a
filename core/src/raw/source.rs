//! The interface a host exposes to the exporter.
//!
//! A host (an in-memory [`Scene`](crate::scene::Scene), a loaded glTF
//! document, an editor) implements [`ExportObject`] for whatever it calls
//! an object. The exporter only ever sees that trait.

use std::ops::Deref;

use crate::math::WorldTransform;
use crate::mesh::PolyMesh;

use super::error::SnapshotError;

/// A mesh snapshot: either the object's own data or a temporary built for
/// this export (for example with modifiers evaluated).
#[derive(Debug)]
pub enum MeshSnapshot<'a> {
    /// The object's stored mesh, read in place.
    Borrowed(&'a PolyMesh),
    /// A mesh created for this export; handed back through
    /// [`ExportObject::release_mesh`] when the object is done.
    Temporary(PolyMesh),
}

impl MeshSnapshot<'_> {
    /// Whether this snapshot was created for the export.
    pub fn is_temporary(&self) -> bool {
        matches!(self, Self::Temporary(_))
    }
}

impl Deref for MeshSnapshot<'_> {
    type Target = PolyMesh;

    fn deref(&self) -> &PolyMesh {
        match self {
            Self::Borrowed(mesh) => mesh,
            Self::Temporary(mesh) => mesh,
        }
    }
}

/// One exportable object of a host.
pub trait ExportObject {
    /// Name used in log messages.
    fn name(&self) -> &str;

    /// Local-to-world placement of the object.
    fn world_transform(&self) -> WorldTransform;

    /// Obtain the mesh to export.
    ///
    /// With `apply_modifiers` the host should evaluate whatever procedural
    /// changes it keeps on the object and return a
    /// [`MeshSnapshot::Temporary`].
    fn acquire_mesh(&self, apply_modifiers: bool) -> Result<MeshSnapshot<'_>, SnapshotError>;

    /// Take back a temporary snapshot once the exporter is done with it.
    fn release_mesh(&self, mesh: PolyMesh) {
        drop(mesh);
    }
}

impl<T: ExportObject + ?Sized> ExportObject for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn world_transform(&self) -> WorldTransform {
        (**self).world_transform()
    }

    fn acquire_mesh(&self, apply_modifiers: bool) -> Result<MeshSnapshot<'_>, SnapshotError> {
        (**self).acquire_mesh(apply_modifiers)
    }

    fn release_mesh(&self, mesh: PolyMesh) {
        (**self).release_mesh(mesh)
    }
}

impl<T: ExportObject + ?Sized> ExportObject for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn world_transform(&self) -> WorldTransform {
        (**self).world_transform()
    }

    fn acquire_mesh(&self, apply_modifiers: bool) -> Result<MeshSnapshot<'_>, SnapshotError> {
        (**self).acquire_mesh(apply_modifiers)
    }

    fn release_mesh(&self, mesh: PolyMesh) {
        (**self).release_mesh(mesh)
    }
}

/// Guard that owns a snapshot for the duration of one object's export.
///
/// Temporary snapshots are returned through [`ExportObject::release_mesh`]
/// when the guard is dropped, whichever way the object's processing ends.
pub struct ScopedSnapshot<'a, O: ExportObject + ?Sized> {
    object: &'a O,
    snapshot: Option<MeshSnapshot<'a>>,
}

impl<'a, O: ExportObject + ?Sized> ScopedSnapshot<'a, O> {
    /// Acquire the object's mesh.
    pub fn acquire(object: &'a O, apply_modifiers: bool) -> Result<Self, SnapshotError> {
        let snapshot = object.acquire_mesh(apply_modifiers)?;
        Ok(Self {
            object,
            snapshot: Some(snapshot),
        })
    }

    /// Whether the held snapshot is temporary.
    pub fn is_temporary(&self) -> bool {
        self.snapshot
            .as_ref()
            .is_some_and(MeshSnapshot::is_temporary)
    }
}

impl<O: ExportObject + ?Sized> Deref for ScopedSnapshot<'_, O> {
    type Target = PolyMesh;

    fn deref(&self) -> &PolyMesh {
        match &self.snapshot {
            Some(snapshot) => snapshot,
            None => unreachable!("snapshot is only taken in drop"),
        }
    }
}

impl<O: ExportObject + ?Sized> Drop for ScopedSnapshot<'_, O> {
    fn drop(&mut self) {
        if let Some(MeshSnapshot::Temporary(mesh)) = self.snapshot.take() {
            log::debug!("Releasing temporary mesh of '{}'", self.object.name());
            self.object.release_mesh(mesh);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Counting {
        mesh: PolyMesh,
        released: Cell<usize>,
    }

    impl ExportObject for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        fn world_transform(&self) -> WorldTransform {
            WorldTransform::identity()
        }

        fn acquire_mesh(&self, apply_modifiers: bool) -> Result<MeshSnapshot<'_>, SnapshotError> {
            if apply_modifiers {
                Ok(MeshSnapshot::Temporary(self.mesh.clone()))
            } else {
                Ok(MeshSnapshot::Borrowed(&self.mesh))
            }
        }

        fn release_mesh(&self, _mesh: PolyMesh) {
            self.released.set(self.released.get() + 1);
        }
    }

    fn counting() -> Counting {
        Counting {
            mesh: crate::mesh::generators::generate_quad(1.0, 1.0),
            released: Cell::new(0),
        }
    }

    #[test]
    fn test_temporary_snapshot_released_on_drop() {
        let object = counting();
        {
            let guard = ScopedSnapshot::acquire(&object, true).unwrap();
            assert!(guard.is_temporary());
            assert_eq!(guard.polygon_count(), 1);
            assert_eq!(object.released.get(), 0);
        }
        assert_eq!(object.released.get(), 1);
    }

    #[test]
    fn test_borrowed_snapshot_is_not_released() {
        let object = counting();
        {
            let guard = ScopedSnapshot::acquire(&object, false).unwrap();
            assert!(!guard.is_temporary());
        }
        assert_eq!(object.released.get(), 0);
    }
}
