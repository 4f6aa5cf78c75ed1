// rigid-sync: keeps a rapier3d collider and a scene-graph box mesh in step

pub mod utils;
pub mod config;
pub mod world;
pub mod rendering;
pub mod sync;

// Re-export commonly used types for convenience
pub use config::{BoxSettings, SimulationSettings, WorldSettings};
pub use rendering::{Color, Mesh, MeshId, SceneGraph};
pub use sync::{BoxSpec, DebugOverlay, ShapeFactory, SyncError, TransformSync};
pub use utils::math::{Dimension, Orientation, OrientationComponents, Position};
pub use world::{BodyKind, PhysicsBackend, PhysicsError, PhysicsWorld};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
