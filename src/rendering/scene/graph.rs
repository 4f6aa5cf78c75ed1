use std::collections::BTreeMap;
use std::fmt;

use crate::rendering::scene::Mesh;

/// Key of a mesh attached to a [`SceneGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeshId(u32);

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mesh#{}", self.0)
    }
}

/// Flat scene: owns every attached mesh, hands out ids in attach order
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: BTreeMap<MeshId, Mesh>,
    next_id: u32,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mesh: Mesh) -> MeshId {
        let id = MeshId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, mesh);
        tracing::trace!("Attached {} to scene", id);
        id
    }

    pub fn remove(&mut self, id: MeshId) -> Option<Mesh> {
        self.nodes.remove(&id)
    }

    pub fn get(&self, id: MeshId) -> Option<&Mesh> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: MeshId) -> Option<&mut Mesh> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: MeshId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeshId, &Mesh)> {
        self.nodes.iter().map(|(id, mesh)| (*id, mesh))
    }
}
