pub mod color;
pub mod scene;

// Re-export the scene types the adapter works with
pub use color::{Color, ColorParseError};
pub use scene::{BasicMaterial, BoxGeometry, Mesh, MeshId, SceneGraph};
