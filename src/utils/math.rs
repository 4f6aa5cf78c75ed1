use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sync::SyncError;

/// Box half-extents along each axis
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Dimension {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Dimension {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self { width, height, depth }
    }

    /// Full extents, as a box geometry expects them
    pub fn full_extents(&self) -> [f32; 3] {
        [self.width * 2.0, self.height * 2.0, self.depth * 2.0]
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.width, self.height, self.depth]
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

/// World-space translation
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

impl From<Position> for cgmath::Vector3<f32> {
    fn from(p: Position) -> Self {
        cgmath::Vector3::new(p.x, p.y, p.z)
    }
}

impl From<cgmath::Vector3<f32>> for Position {
    fn from(v: cgmath::Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Rotation quaternion stored as (x, y, z, w)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Orientation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Orientation {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3}, {:.3})", self.x, self.y, self.z, self.w)
    }
}

// cgmath keeps the scalar part first
impl From<Orientation> for cgmath::Quaternion<f32> {
    fn from(q: Orientation) -> Self {
        cgmath::Quaternion::new(q.w, q.x, q.y, q.z)
    }
}

impl From<cgmath::Quaternion<f32>> for Orientation {
    fn from(q: cgmath::Quaternion<f32>) -> Self {
        Self::new(q.v.x, q.v.y, q.v.z, q.s)
    }
}

/// Quaternion components as they arrive from loosely typed input such as a
/// settings file, where any of them may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, Default)]
pub struct OrientationComponents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f32>,
}

impl OrientationComponents {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn defined(&self) -> usize {
        [self.x, self.y, self.z, self.w].iter().filter(|c| c.is_some()).count()
    }

    /// All four components give an orientation, none gives `None`, anything
    /// in between is rejected.
    pub fn resolve(&self) -> Result<Option<Orientation>, SyncError> {
        match (self.x, self.y, self.z, self.w) {
            (Some(x), Some(y), Some(z), Some(w)) => Ok(Some(Orientation::new(x, y, z, w))),
            (None, None, None, None) => Ok(None),
            _ => Err(SyncError::IncompleteOrientation {
                defined: self.defined(),
            }),
        }
    }
}

impl From<Orientation> for OrientationComponents {
    fn from(q: Orientation) -> Self {
        Self {
            x: Some(q.x),
            y: Some(q.y),
            z: Some(q.z),
            w: Some(q.w),
        }
    }
}

impl From<Option<Orientation>> for OrientationComponents {
    fn from(q: Option<Orientation>) -> Self {
        q.map(Self::from).unwrap_or_default()
    }
}
