//! Collider to mesh transform synchronization
//!
//! A [`TransformSync`] owns the association between one collider in a
//! [`PhysicsBackend`] world and one box mesh in a [`SceneGraph`]. It never
//! owns the world or the scene: both are lent to it for each call, so any
//! number of adapters can share them.
//!
//! ```ignore
//! let mut world = PhysicsWorld::default();
//! let mut scene = SceneGraph::new();
//! let mut ground = TransformSync::new(BoxSpec::new(Dimension::new(10.0, 0.1, 10.0), Position::zero()));
//! ground.setup(&mut world, &mut scene)?;
//! // once per frame
//! ground.tick(&mut world, &mut scene);
//! ```

pub mod debug;
pub mod factory;

pub use debug::{DebugOverlay, DEBUG_COLOR};
pub use factory::{PhysicsBox, ShapeFactory};

use thiserror::Error;
use tracing::{info, trace, warn};

use crate::config::BoxSettings;
use crate::rendering::{Color, MeshId, SceneGraph};
use crate::utils::math::{Dimension, Orientation, Position};
use crate::world::{BodyKind, PhysicsBackend, PhysicsError};

#[derive(Debug, Clone, Error)]
pub enum SyncError {
    #[error("Incomplete orientation: {defined} of 4 quaternion components defined")]
    IncompleteOrientation { defined: usize },

    #[error(transparent)]
    Physics(#[from] PhysicsError),
}

/// Construction-time description of one synchronized box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSpec {
    pub dimension: Dimension,
    pub position: Position,
    pub orientation: Option<Orientation>,
    pub color: Color,
    pub debug: bool,
    pub body: BodyKind,
}

impl BoxSpec {
    pub fn new(dimension: Dimension, position: Position) -> Self {
        Self {
            dimension,
            position,
            orientation: None,
            color: Color::default(),
            debug: false,
            body: BodyKind::Fixed,
        }
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_body(mut self, body: BodyKind) -> Self {
        self.body = body;
        self
    }
}

impl TryFrom<&BoxSettings> for BoxSpec {
    type Error = SyncError;

    fn try_from(settings: &BoxSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            dimension: settings.dimension,
            position: settings.position,
            orientation: settings.orientation.resolve()?,
            color: settings.color,
            debug: settings.debug,
            body: settings.body,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct TrackedPair<H> {
    physics: H,
    mesh: MeshId,
}

/// Keeps one box mesh at the pose of one collider
#[derive(Debug)]
pub struct TransformSync<H> {
    spec: BoxSpec,
    factory: ShapeFactory,
    tracked: Option<TrackedPair<H>>,
    debug: Option<DebugOverlay>,
}

impl<H: Copy + std::fmt::Debug> TransformSync<H> {
    pub fn new(spec: BoxSpec) -> Self {
        Self {
            factory: ShapeFactory::new(spec.debug).with_body(spec.body),
            spec,
            tracked: None,
            debug: None,
        }
    }

    /// Creates the collider and the mesh and starts tracking them.
    ///
    /// Meant to be called once. A second call creates and tracks a fresh
    /// pair; the first one stays in the world and the scene but is no longer
    /// synchronized.
    pub fn setup<W>(&mut self, world: &mut W, scene: &mut SceneGraph) -> Result<(), SyncError>
    where
        W: PhysicsBackend<Handle = H>,
    {
        let spec = &self.spec;
        let visual = self.factory.create_visual_box(spec.dimension, spec.color);
        let physics = self.factory.create_physics_box(
            world,
            scene,
            spec.dimension,
            spec.position,
            spec.orientation,
        )?;
        // Attached only once the collider exists, so a failed setup leaves no mesh behind
        let mesh = scene.add(visual);

        let pair = TrackedPair {
            physics: physics.handle,
            mesh,
        };
        if let Some(previous) = self.tracked.replace(pair) {
            warn!(
                "setup called again: {:?} and {} are no longer synchronized",
                previous.physics, previous.mesh
            );
        }
        self.debug = physics.debug;

        info!(
            "Synchronizing {:?} with {} ({} half-extents at {})",
            physics.handle, mesh, spec.dimension, spec.position
        );
        Ok(())
    }

    /// Steps the world once, then copies the collider pose onto the mesh.
    /// Returns whether a pose was copied.
    pub fn tick<W>(&self, world: &mut W, scene: &mut SceneGraph) -> bool
    where
        W: PhysicsBackend<Handle = H>,
    {
        world.step();
        self.sync(world, scene)
    }

    /// Copy-only half of [`tick`](Self::tick), for worlds stepped once per
    /// frame on behalf of several adapters. A no-op before `setup` or once
    /// either object has been removed.
    pub fn sync<W>(&self, world: &W, scene: &mut SceneGraph) -> bool
    where
        W: PhysicsBackend<Handle = H>,
    {
        let Some(pair) = self.tracked else {
            return false;
        };
        let (Some(position), Some(rotation)) =
            (world.translation(pair.physics), world.rotation(pair.physics))
        else {
            trace!("{:?} no longer in the world", pair.physics);
            return false;
        };
        let Some(mesh) = scene.get_mut(pair.mesh) else {
            trace!("{} no longer in the scene", pair.mesh);
            return false;
        };

        mesh.set_position(position);
        mesh.set_quaternion(rotation);
        trace!("{} <- {:?} at {}", pair.mesh, pair.physics, position);
        true
    }

    pub fn is_ready(&self) -> bool {
        self.tracked.is_some()
    }

    pub fn physics_handle(&self) -> Option<H> {
        self.tracked.map(|pair| pair.physics)
    }

    pub fn mesh_id(&self) -> Option<MeshId> {
        self.tracked.map(|pair| pair.mesh)
    }

    pub fn debug_overlay(&self) -> Option<&DebugOverlay> {
        self.debug.as_ref()
    }
}
