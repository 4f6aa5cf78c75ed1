use rapier3d::na::{Quaternion, UnitQuaternion};
use rapier3d::prelude::*;
use tracing::{debug, trace};

use super::{BodyKind, CuboidDesc, PhysicsBackend, PhysicsError, PhysicsResult};
use crate::config::WorldSettings;
use crate::utils::math::{Orientation, Position};

pub const DEFAULT_GRAVITY: [f32; 3] = [0.0, -9.81, 0.0];

/// A rapier3d world shared by every adapter in a scene
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    steps: u64,
}

impl PhysicsWorld {
    pub fn new(gravity: Position) -> Self {
        Self {
            gravity: vector![gravity.x, gravity.y, gravity.z],
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            steps: 0,
        }
    }

    pub fn with_settings(settings: &WorldSettings) -> Self {
        let [x, y, z] = settings.gravity;
        let mut world = Self::new(Position::new(x, y, z));
        world.integration_parameters.dt = settings.timestep;
        world
    }

    pub fn timestep(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Number of completed steps since creation
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        let [x, y, z] = DEFAULT_GRAVITY;
        Self::new(Position::new(x, y, z))
    }
}

impl PhysicsBackend for PhysicsWorld {
    type Handle = ColliderHandle;

    fn create_cuboid(&mut self, desc: CuboidDesc) -> PhysicsResult<ColliderHandle> {
        let [hx, hy, hz] = desc.half_extents.to_array();
        let t = desc.translation;

        let handle = match desc.body {
            BodyKind::Fixed => {
                let collider = ColliderBuilder::cuboid(hx, hy, hz)
                    .translation(vector![t.x, t.y, t.z])
                    .build();
                self.colliders.insert(collider)
            }
            BodyKind::Dynamic => {
                let body = RigidBodyBuilder::dynamic()
                    .translation(vector![t.x, t.y, t.z])
                    .build();
                let body_handle = self.bodies.insert(body);
                let collider = ColliderBuilder::cuboid(hx, hy, hz).build();
                self.colliders
                    .insert_with_parent(collider, body_handle, &mut self.bodies)
            }
        };

        debug!(
            "Created {:?} cuboid {:?} half-extents {} at {}",
            desc.body, handle, desc.half_extents, t
        );
        Ok(handle)
    }

    fn set_rotation(&mut self, handle: ColliderHandle, rotation: Orientation) -> PhysicsResult<()> {
        let collider = self
            .colliders
            .get_mut(handle)
            .ok_or_else(|| PhysicsError::ColliderNotFound {
                handle: format!("{:?}", handle),
            })?;
        let rotation = to_rotation(rotation);

        // The parent body drives the collider pose on every step
        if let Some(body) = collider.parent().and_then(|parent| self.bodies.get_mut(parent)) {
            body.set_rotation(rotation, true);
        }
        collider.set_rotation(rotation);
        Ok(())
    }

    fn translation(&self, handle: ColliderHandle) -> Option<Position> {
        self.colliders.get(handle).map(|c| {
            let t = c.translation();
            Position::new(t.x, t.y, t.z)
        })
    }

    fn rotation(&self, handle: ColliderHandle) -> Option<Orientation> {
        self.colliders.get(handle).map(|c| from_rotation(c.rotation()))
    }

    fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
        self.steps += 1;
        trace!("Physics step {} complete", self.steps);
    }

    fn gravity(&self) -> Position {
        Position::new(self.gravity.x, self.gravity.y, self.gravity.z)
    }
}

fn to_rotation(q: Orientation) -> Rotation<Real> {
    UnitQuaternion::from_quaternion(Quaternion::new(q.w, q.x, q.y, q.z))
}

fn from_rotation(rotation: &Rotation<Real>) -> Orientation {
    let c = rotation.quaternion().coords;
    Orientation::new(c.x, c.y, c.z, c.w)
}
