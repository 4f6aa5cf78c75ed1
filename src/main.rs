use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use rigid_sync::config::{load_simulation_settings, SimulationSettings};
use rigid_sync::utils::logging::{init_logging, log_simulation_info};
use rigid_sync::{BoxSpec, PhysicsBackend, PhysicsWorld, SceneGraph, TransformSync};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn load_settings() -> Result<SimulationSettings> {
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        return SimulationSettings::load_from_path(&path)
            .with_context(|| format!("Failed to load settings from {}", path.display()));
    }
    Ok(load_simulation_settings().unwrap_or_default())
}

fn main() -> Result<()> {
    init_logging();
    info!("rigid-sync {}", VERSION);

    let settings = load_settings()?;
    log_simulation_info(&settings);

    let mut world = PhysicsWorld::with_settings(&settings.world);
    let mut scene = SceneGraph::new();

    let mut adapters = Vec::with_capacity(settings.bodies.len());
    for (index, body) in settings.bodies.iter().enumerate() {
        let spec = BoxSpec::try_from(body).with_context(|| format!("Body {} is invalid", index))?;
        let mut adapter = TransformSync::new(spec);
        adapter
            .setup(&mut world, &mut scene)
            .with_context(|| format!("Failed to set up body {}", index))?;
        adapters.push(adapter);
    }

    // One shared world: step it once per frame, then sync every adapter
    for _ in 0..settings.frames {
        world.step();
        for adapter in &adapters {
            adapter.sync(&world, &mut scene);
        }
    }

    for (index, adapter) in adapters.iter().enumerate() {
        if let Some(mesh) = adapter.mesh_id().and_then(|id| scene.get(id)) {
            let (position, rotation) = mesh.pose();
            info!("Body {}: position {} rotation {}", index, position, rotation);
        }
    }
    info!(
        "Ran {} frames ({:.2}s simulated), {} meshes in scene",
        world.steps(),
        world.steps() as f32 * world.timestep(),
        scene.len()
    );

    Ok(())
}
