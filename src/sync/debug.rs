use tracing::debug;

use crate::rendering::{BasicMaterial, BoxGeometry, Color, Mesh, MeshId, SceneGraph};
use crate::sync::SyncError;
use crate::utils::math::{Dimension, Orientation, Position};
use crate::world::{PhysicsBackend, PhysicsError};

/// Accent color of debug meshes, distinct from any solid box color in use
pub const DEBUG_COLOR: Color = Color::LIME;

/// Wireframe copy of a collider, posed once when the collider is created.
///
/// The mesh is not refreshed on later ticks: it marks where the collider
/// started, not where it is now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugOverlay {
    mesh: MeshId,
    position: Position,
    rotation: Orientation,
}

impl DebugOverlay {
    /// Reads the collider pose right now and attaches a wireframe box there
    pub fn spawn<W: PhysicsBackend>(
        world: &W,
        handle: W::Handle,
        dimension: Dimension,
        scene: &mut SceneGraph,
    ) -> Result<Self, SyncError> {
        let not_found = || PhysicsError::ColliderNotFound {
            handle: format!("{:?}", handle),
        };
        let position = world.translation(handle).ok_or_else(not_found)?;
        let rotation = world.rotation(handle).ok_or_else(not_found)?;

        let mut mesh = Mesh::new(
            BoxGeometry::from_half_extents(dimension),
            BasicMaterial::wireframe(DEBUG_COLOR),
        );
        mesh.set_position(position);
        mesh.set_quaternion(rotation);
        let id = scene.add(mesh);

        debug!("Debug overlay {} for {:?} at {}", id, handle, position);
        Ok(Self {
            mesh: id,
            position,
            rotation,
        })
    }

    pub fn mesh_id(&self) -> MeshId {
        self.mesh
    }

    /// Pose captured when the overlay was spawned
    pub fn snapshot(&self) -> (Position, Orientation) {
        (self.position, self.rotation)
    }
}
