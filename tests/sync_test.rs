use rigid_sync::rendering::Color;
use rigid_sync::sync::{ShapeFactory, SyncError, DEBUG_COLOR};
use rigid_sync::world::{CuboidDesc, PhysicsResult};
use rigid_sync::{
    BodyKind, BoxSpec, Dimension, Orientation, OrientationComponents, PhysicsBackend,
    PhysicsError, PhysicsWorld, Position, SceneGraph, TransformSync,
};

/// World whose colliders drift +1 along x on every step, so the step count
/// can be read back from any collider's translation.
#[derive(Default)]
struct CountingWorld {
    steps: u32,
    colliders: Vec<(Position, Orientation)>,
}

impl PhysicsBackend for CountingWorld {
    type Handle = usize;

    fn create_cuboid(&mut self, desc: CuboidDesc) -> PhysicsResult<usize> {
        self.colliders.push((desc.translation, Orientation::identity()));
        Ok(self.colliders.len() - 1)
    }

    fn set_rotation(&mut self, handle: usize, rotation: Orientation) -> PhysicsResult<()> {
        let collider = self
            .colliders
            .get_mut(handle)
            .ok_or_else(|| PhysicsError::ColliderNotFound { handle: handle.to_string() })?;
        collider.1 = rotation;
        Ok(())
    }

    fn translation(&self, handle: usize) -> Option<Position> {
        self.colliders
            .get(handle)
            .map(|(p, _)| Position::new(p.x + self.steps as f32, p.y, p.z))
    }

    fn rotation(&self, handle: usize) -> Option<Orientation> {
        self.colliders.get(handle).map(|(_, q)| *q)
    }

    fn step(&mut self) {
        self.steps += 1;
    }

    fn gravity(&self) -> Position {
        Position::zero()
    }
}

/// World that refuses to create anything
struct BrokenWorld;

impl PhysicsBackend for BrokenWorld {
    type Handle = usize;

    fn create_cuboid(&mut self, _desc: CuboidDesc) -> PhysicsResult<usize> {
        Err(PhysicsError::Backend { reason: "invalid extents".to_string() })
    }

    fn set_rotation(&mut self, handle: usize, _rotation: Orientation) -> PhysicsResult<()> {
        Err(PhysicsError::ColliderNotFound { handle: handle.to_string() })
    }

    fn translation(&self, _handle: usize) -> Option<Position> {
        None
    }

    fn rotation(&self, _handle: usize) -> Option<Orientation> {
        None
    }

    fn step(&mut self) {}

    fn gravity(&self) -> Position {
        Position::zero()
    }
}

/// World that creates colliders but rejects every rotation
#[derive(Default)]
struct NoRotationWorld {
    inner: CountingWorld,
}

impl PhysicsBackend for NoRotationWorld {
    type Handle = usize;

    fn create_cuboid(&mut self, desc: CuboidDesc) -> PhysicsResult<usize> {
        self.inner.create_cuboid(desc)
    }

    fn set_rotation(&mut self, _handle: usize, _rotation: Orientation) -> PhysicsResult<()> {
        Err(PhysicsError::Backend { reason: "rotation locked".to_string() })
    }

    fn translation(&self, handle: usize) -> Option<Position> {
        self.inner.translation(handle)
    }

    fn rotation(&self, handle: usize) -> Option<Orientation> {
        self.inner.rotation(handle)
    }

    fn step(&mut self) {
        self.inner.step();
    }

    fn gravity(&self) -> Position {
        self.inner.gravity()
    }
}

fn unit_spec() -> BoxSpec {
    BoxSpec::new(Dimension::new(0.5, 0.5, 0.5), Position::new(0.0, 2.0, 0.0))
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn test_visual_box_is_twice_the_half_extents() {
    let factory = ShapeFactory::default();
    for dimension in [
        Dimension::new(10.0, 0.1, 10.0),
        Dimension::new(0.5, 0.5, 0.5),
        Dimension::new(1.25, 3.0, 0.01),
    ] {
        let mesh = factory.create_visual_box(dimension, Color::RED);
        assert_eq!(mesh.bounding_extents(), dimension.full_extents());
        assert!(!mesh.material.wireframe);
        assert_eq!(mesh.material.color, Color::RED);
    }
}

#[test]
fn test_setup_places_collider_at_position() {
    let mut world = PhysicsWorld::default();
    let mut scene = SceneGraph::new();
    let position = Position::new(1.5, -2.0, 7.25);
    let mut adapter = TransformSync::new(
        BoxSpec::new(Dimension::new(1.0, 1.0, 1.0), position)
            .with_orientation(Orientation::identity()),
    );

    adapter.setup(&mut world, &mut scene).unwrap();

    let handle = adapter.physics_handle().unwrap();
    let translation = world.translation(handle).unwrap();
    assert!(approx(translation.x, position.x));
    assert!(approx(translation.y, position.y));
    assert!(approx(translation.z, position.z));
    assert_eq!(world.collider_count(), 1);
    assert_eq!(scene.len(), 1);
}

#[test]
fn test_second_setup_leaks_first_pair() {
    let mut world = CountingWorld::default();
    let mut scene = SceneGraph::new();
    let mut adapter = TransformSync::new(unit_spec());

    adapter.setup(&mut world, &mut scene).unwrap();
    let first_mesh = adapter.mesh_id().unwrap();
    adapter.setup(&mut world, &mut scene).unwrap();
    let second_mesh = adapter.mesh_id().unwrap();

    // Both pairs stay alive in the world and the scene
    assert_ne!(first_mesh, second_mesh);
    assert_eq!(world.colliders.len(), 2);
    assert_eq!(scene.len(), 2);

    adapter.tick(&mut world, &mut scene);

    let (first_pos, _) = scene.get(first_mesh).unwrap().pose();
    let (second_pos, _) = scene.get(second_mesh).unwrap().pose();
    assert_eq!(first_pos, Position::zero());
    assert_eq!(second_pos, Position::new(1.0, 2.0, 0.0));
}

#[test]
fn test_tick_copies_pose_after_the_step() {
    let mut world = CountingWorld::default();
    let mut scene = SceneGraph::new();
    let mut adapter = TransformSync::new(unit_spec());
    adapter.setup(&mut world, &mut scene).unwrap();
    let mesh = adapter.mesh_id().unwrap();

    for expected in 1..=3 {
        assert!(adapter.tick(&mut world, &mut scene));
        let (position, _) = scene.get(mesh).unwrap().pose();
        assert_eq!(position.x, expected as f32);
    }
}

#[test]
fn test_tick_before_setup_only_steps() {
    let mut world = CountingWorld::default();
    let mut scene = SceneGraph::new();
    let adapter: TransformSync<usize> = TransformSync::new(unit_spec());

    assert!(!adapter.tick(&mut world, &mut scene));

    assert_eq!(world.steps, 1);
    assert!(scene.is_empty());
    assert!(!adapter.is_ready());
}

#[test]
fn test_debug_overlay_keeps_initial_pose() {
    let mut world = CountingWorld::default();
    let mut scene = SceneGraph::new();
    let mut adapter = TransformSync::new(unit_spec().with_debug(true));
    adapter.setup(&mut world, &mut scene).unwrap();

    let overlay = *adapter.debug_overlay().unwrap();
    let debug_mesh = scene.get(overlay.mesh_id()).unwrap();
    assert!(debug_mesh.material.wireframe);
    assert_eq!(debug_mesh.material.color, DEBUG_COLOR);
    assert_eq!(
        debug_mesh.bounding_extents(),
        unit_spec().dimension.full_extents()
    );

    for _ in 0..5 {
        adapter.tick(&mut world, &mut scene);
    }

    let initial = (Position::new(0.0, 2.0, 0.0), Orientation::identity());
    assert_eq!(scene.get(overlay.mesh_id()).unwrap().pose(), initial);
    assert_eq!(overlay.snapshot(), initial);

    let (live, _) = scene.get(adapter.mesh_id().unwrap()).unwrap().pose();
    assert_eq!(live, Position::new(5.0, 2.0, 0.0));
}

#[test]
fn test_debug_overlay_disabled_by_default() {
    let mut world = CountingWorld::default();
    let mut scene = SceneGraph::new();
    let mut adapter = TransformSync::new(unit_spec());
    adapter.setup(&mut world, &mut scene).unwrap();

    assert!(adapter.debug_overlay().is_none());
    assert_eq!(scene.len(), 1);
}

#[test]
fn test_partial_quaternion_is_rejected() {
    let mut world = CountingWorld::default();
    let mut scene = SceneGraph::new();
    let factory = ShapeFactory::new(true);
    let components = OrientationComponents {
        x: Some(0.0),
        y: Some(0.0),
        ..Default::default()
    };

    let result = factory.create_physics_box_from_components(
        &mut world,
        &mut scene,
        Dimension::new(1.0, 1.0, 1.0),
        Position::zero(),
        components,
    );

    assert!(matches!(
        result,
        Err(SyncError::IncompleteOrientation { defined: 2 })
    ));
    assert!(world.colliders.is_empty());
    assert!(scene.is_empty());
}

#[test]
fn test_full_quaternion_components_are_applied() {
    let mut world = CountingWorld::default();
    let mut scene = SceneGraph::new();
    let factory = ShapeFactory::new(false);
    let rotation = Orientation::new(0.0, 0.0, 0.6, 0.8);

    let created = factory
        .create_physics_box_from_components(
            &mut world,
            &mut scene,
            Dimension::new(1.0, 1.0, 1.0),
            Position::zero(),
            rotation.into(),
        )
        .unwrap();

    assert_eq!(world.rotation(created.handle), Some(rotation));
    assert!(created.debug.is_none());
}

#[test]
fn test_failed_setup_attaches_nothing() {
    let mut world = BrokenWorld;
    let mut scene = SceneGraph::new();
    let mut adapter = TransformSync::new(unit_spec().with_debug(true));

    let err = adapter.setup(&mut world, &mut scene).unwrap_err();

    assert!(matches!(err, SyncError::Physics(PhysicsError::Backend { .. })));
    assert!(scene.is_empty());
    assert!(!adapter.is_ready());
    assert!(!adapter.tick(&mut world, &mut scene));
}

#[test]
fn test_sync_skips_mesh_removed_from_scene() {
    let mut world = CountingWorld::default();
    let mut scene = SceneGraph::new();
    let mut adapter = TransformSync::new(unit_spec());
    adapter.setup(&mut world, &mut scene).unwrap();

    scene.remove(adapter.mesh_id().unwrap());

    assert!(!adapter.tick(&mut world, &mut scene));
    assert!(scene.is_empty());
}

#[test]
fn test_rotated_fixed_box_mesh_matches_collider() {
    let mut world = PhysicsWorld::default();
    let mut scene = SceneGraph::new();
    let half = std::f32::consts::FRAC_1_SQRT_2;
    let mut adapter = TransformSync::new(
        BoxSpec::new(Dimension::new(2.0, 0.5, 1.0), Position::new(0.0, 1.0, 0.0))
            .with_orientation(Orientation::new(half, 0.0, 0.0, half)),
    );
    adapter.setup(&mut world, &mut scene).unwrap();

    adapter.tick(&mut world, &mut scene);

    let (position, rotation) = scene.get(adapter.mesh_id().unwrap()).unwrap().pose();
    assert!(approx(position.y, 1.0));
    assert!(approx(rotation.x, half));
    assert!(approx(rotation.w, half));
}

#[test]
fn test_dynamic_box_mesh_follows_fall() {
    let mut world = PhysicsWorld::default();
    let mut scene = SceneGraph::new();
    let mut ground = TransformSync::new(
        BoxSpec::new(Dimension::new(10.0, 0.1, 10.0), Position::zero()).with_color(Color::RED),
    );
    let mut crate_box = TransformSync::new(
        BoxSpec::new(Dimension::new(0.5, 0.5, 0.5), Position::new(0.0, 5.0, 0.0))
            .with_body(BodyKind::Dynamic)
            .with_debug(true),
    );
    ground.setup(&mut world, &mut scene).unwrap();
    crate_box.setup(&mut world, &mut scene).unwrap();

    for _ in 0..20 {
        world.step();
        ground.sync(&world, &mut scene);
        crate_box.sync(&world, &mut scene);
    }

    let (fallen, _) = scene.get(crate_box.mesh_id().unwrap()).unwrap().pose();
    assert!(fallen.y < 5.0, "mesh did not follow the body: y = {}", fallen.y);

    let (ground_pos, _) = scene.get(ground.mesh_id().unwrap()).unwrap().pose();
    assert_eq!(ground_pos, Position::zero());

    let (marker, _) = crate_box.debug_overlay().unwrap().snapshot();
    assert!(approx(marker.x, 0.0));
    assert!(approx(marker.y, 5.0));
    assert!(approx(marker.z, 0.0));
}

#[test]
fn test_rotation_failure_leaves_collider_untracked() {
    let mut world = NoRotationWorld::default();
    let mut scene = SceneGraph::new();
    let mut adapter = TransformSync::new(
        unit_spec()
            .with_orientation(Orientation::new(0.0, 0.0, 0.6, 0.8))
            .with_debug(true),
    );

    let err = adapter.setup(&mut world, &mut scene).unwrap_err();

    assert!(matches!(err, SyncError::Physics(PhysicsError::Backend { .. })));
    // The cuboid was created before the rotation failed and stays in the world
    assert_eq!(world.inner.colliders.len(), 1);
    assert!(scene.is_empty());
    assert!(!adapter.is_ready());
    assert!(!adapter.tick(&mut world, &mut scene));
}
