pub mod graph;

pub use graph::{MeshId, SceneGraph};

use cgmath::{Quaternion, Vector3};

use crate::rendering::Color;
use crate::utils::math::{Dimension, Orientation, Position};

/// Axis-aligned box geometry, parameterized by full size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl BoxGeometry {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self { width, height, depth }
    }

    /// Geometry covering a collider with the given half-extents
    pub fn from_half_extents(half: Dimension) -> Self {
        let [width, height, depth] = half.full_extents();
        Self::new(width, height, depth)
    }
}

/// Unlit single-color material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicMaterial {
    pub color: Color,
    pub wireframe: bool,
}

impl BasicMaterial {
    pub fn solid(color: Color) -> Self {
        Self { color, wireframe: false }
    }

    pub fn wireframe(color: Color) -> Self {
        Self { color, wireframe: true }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub geometry: BoxGeometry,
    pub material: BasicMaterial,
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Mesh {
    /// A mesh at the origin with identity rotation and unit scale
    pub fn new(geometry: BoxGeometry, material: BasicMaterial) -> Self {
        Self {
            geometry,
            material,
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position.into();
    }

    pub fn set_quaternion(&mut self, rotation: Orientation) {
        self.rotation = rotation.into();
    }

    pub fn pose(&self) -> (Position, Orientation) {
        (self.position.into(), self.rotation.into())
    }

    /// Size of the local bounding box, scale included
    pub fn bounding_extents(&self) -> [f32; 3] {
        [
            self.geometry.width * self.scale.x,
            self.geometry.height * self.scale.y,
            self.geometry.depth * self.scale.z,
        ]
    }
}
