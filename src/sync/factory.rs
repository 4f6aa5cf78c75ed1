use tracing::debug;

use crate::rendering::{BasicMaterial, BoxGeometry, Color, Mesh, SceneGraph};
use crate::sync::{DebugOverlay, SyncError};
use crate::utils::math::{Dimension, Orientation, OrientationComponents, Position};
use crate::world::{BodyKind, CuboidDesc, PhysicsBackend};

/// Result of creating a collider: its handle plus the debug overlay, if any
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBox<H> {
    pub handle: H,
    pub debug: Option<DebugOverlay>,
}

/// Builds matching physics and visual boxes from one set of half-extents
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeFactory {
    debug_overlay: bool,
    body: BodyKind,
}

impl ShapeFactory {
    pub fn new(debug_overlay: bool) -> Self {
        Self {
            debug_overlay,
            body: BodyKind::Fixed,
        }
    }

    pub fn with_body(mut self, body: BodyKind) -> Self {
        self.body = body;
        self
    }

    /// Solid box of full size `2 * dimension`, not attached to any scene
    pub fn create_visual_box(&self, dimension: Dimension, color: Color) -> Mesh {
        Mesh::new(
            BoxGeometry::from_half_extents(dimension),
            BasicMaterial::solid(color),
        )
    }

    /// Registers a cuboid collider in `world`. Without an orientation the
    /// collider keeps the engine's identity rotation.
    ///
    /// With the debug overlay enabled, a wireframe snapshot of the new
    /// collider is attached to `scene` before returning.
    ///
    /// If the rotation or the overlay fails after the cuboid was created, the
    /// collider stays in `world` and the error is returned; removing it is up
    /// to the owner of the world.
    pub fn create_physics_box<W: PhysicsBackend>(
        &self,
        world: &mut W,
        scene: &mut SceneGraph,
        dimension: Dimension,
        position: Position,
        orientation: Option<Orientation>,
    ) -> Result<PhysicsBox<W::Handle>, SyncError> {
        let handle = world.create_cuboid(CuboidDesc {
            half_extents: dimension,
            translation: position,
            body: self.body,
        })?;

        if let Some(rotation) = orientation {
            world.set_rotation(handle, rotation)?;
            debug!("Initial rotation {} applied to {:?}", rotation, handle);
        }

        let debug = if self.debug_overlay {
            Some(DebugOverlay::spawn(world, handle, dimension, scene)?)
        } else {
            None
        };

        Ok(PhysicsBox { handle, debug })
    }

    /// Same as [`create_physics_box`](Self::create_physics_box) for
    /// loosely typed quaternion input. A partial set of components fails
    /// before anything is created.
    pub fn create_physics_box_from_components<W: PhysicsBackend>(
        &self,
        world: &mut W,
        scene: &mut SceneGraph,
        dimension: Dimension,
        position: Position,
        components: OrientationComponents,
    ) -> Result<PhysicsBox<W::Handle>, SyncError> {
        let orientation = components.resolve()?;
        self.create_physics_box(world, scene, dimension, position, orientation)
    }
}
