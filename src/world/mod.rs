//! Physics side of the adapter
//!
//! The adapter only needs a handful of operations from a physics engine:
//! create a cuboid, set its rotation, read its pose back and advance the
//! simulation. [`PhysicsBackend`] names exactly those, [`PhysicsWorld`]
//! provides them on top of rapier3d.

pub mod physics;

pub use physics::PhysicsWorld;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::math::{Dimension, Orientation, Position};

#[derive(Debug, Clone, Error)]
pub enum PhysicsError {
    #[error("Collider not found: {handle}")]
    ColliderNotFound { handle: String },

    #[error("Physics backend error: {reason}")]
    Backend { reason: String },
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;

/// How a collider is anchored in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    /// A bare collider; stepping the world never moves it
    #[default]
    Fixed,
    /// Collider attached to a dynamic rigid body, moved by gravity and contacts
    Dynamic,
}

/// Everything needed to place one cuboid collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuboidDesc {
    pub half_extents: Dimension,
    pub translation: Position,
    pub body: BodyKind,
}

pub trait PhysicsBackend {
    /// Non-owning reference to a collider living in the world
    type Handle: Copy + std::fmt::Debug;

    fn create_cuboid(&mut self, desc: CuboidDesc) -> PhysicsResult<Self::Handle>;

    fn set_rotation(&mut self, handle: Self::Handle, rotation: Orientation) -> PhysicsResult<()>;

    /// Current world-space translation, `None` once the collider is gone
    fn translation(&self, handle: Self::Handle) -> Option<Position>;

    /// Current world-space rotation, `None` once the collider is gone
    fn rotation(&self, handle: Self::Handle) -> Option<Orientation>;

    /// Advance every body by one fixed step
    fn step(&mut self);

    fn gravity(&self) -> Position;
}
