use bevy::prelude::*;
use glam::IVec2;
use rand::Rng;

use crate::assets::ChunkPaletteAsset;
use crate::layout;
use crate::types::{
    Chunk, ChunkConfig, ChunkMaterials, ChunkPalette, PendingChunks, SpawnedChunks,
};

#[derive(Resource, Clone)]
pub struct ChunkPaletteHandle(pub Handle<ChunkPaletteAsset>);

pub fn setup_chunk_renderer(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handle: Handle<ChunkPaletteAsset> = asset_server.load("palette.ron");
    commands.insert_resource(ChunkPaletteHandle(handle));
}

pub fn finish_palette_load(
    mut commands: Commands,
    handle: Option<Res<ChunkPaletteHandle>>,
    assets: Res<Assets<ChunkPaletteAsset>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(handle) = handle else {
        return;
    };

    let Some(asset) = assets.get(&handle.0) else {
        return;
    };
    let palette = asset.0.clone();

    commands.remove_resource::<ChunkPaletteHandle>();

    let chunk_materials = ChunkMaterials {
        ground: materials.add(ground_material(&palette)),
        trunk: materials.add(trunk_material(&palette)),
    };

    commands.insert_resource(chunk_materials);
    info!("chunk palette loaded, materials ready");
}

fn ground_material(palette: &ChunkPalette) -> StandardMaterial {
    let (r, g, b) = palette.ground_srgb;
    StandardMaterial {
        base_color: Color::srgb(r, g, b),
        unlit: true,
        // The plane is visible from below as well.
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

fn trunk_material(palette: &ChunkPalette) -> StandardMaterial {
    let (r, g, b) = palette.trunk_srgb;
    StandardMaterial {
        base_color: Color::srgb(r, g, b),
        unlit: true,
        ..default()
    }
}

/// Builds one chunk: a group entity whose children are the ground plane
/// and `tree_count` trunk cylinders, all placed in world space.
///
/// The group's transform is the identity, so child transforms are world
/// coordinates. The returned entity belongs to the caller; despawning
/// it releases every child with it. Nothing is pooled or reused, so two
/// calls for the same coordinate yield distinct meshes and distinct
/// (unseeded) tree placement.
pub fn spawn_chunk(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    config: &ChunkConfig,
    materials: &ChunkMaterials,
    rng: &mut impl Rng,
    coord: IVec2,
) -> Entity {
    let plan = layout::plan_chunk(config, coord, rng);

    let ground_mesh = meshes.add(Rectangle::new(config.chunk_size, config.chunk_size));

    commands
        .spawn((Chunk(coord), Transform::IDENTITY, Visibility::default()))
        .with_children(|group| {
            // A Rectangle mesh stands in the XY plane; lay it flat.
            group.spawn((
                Mesh3d(ground_mesh),
                MeshMaterial3d(materials.ground.clone()),
                Transform::from_translation(plan.origin)
                    .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
            ));

            for position in &plan.tree_positions {
                let trunk_mesh = meshes.add(
                    Cylinder::new(config.trunk_radius, config.trunk_height)
                        .mesh()
                        .resolution(config.trunk_resolution),
                );
                group.spawn((
                    Mesh3d(trunk_mesh),
                    MeshMaterial3d(materials.trunk.clone()),
                    Transform::from_translation(*position),
                ));
            }
        })
        .id()
}

pub fn spawn_pending_chunks(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    materials: Option<Res<ChunkMaterials>>,
    config: Res<ChunkConfig>,
    mut pending: ResMut<PendingChunks>,
    mut spawned: ResMut<SpawnedChunks>,
) {
    // Requests queue up until the palette materials exist.
    let Some(materials) = materials else {
        return;
    };

    let mut rng = rand::rng();
    while let Some(coord) = pending.coords.pop_front() {
        if spawned.entities.contains_key(&coord) {
            continue;
        }

        let entity = spawn_chunk(&mut commands, &mut meshes, &config, &materials, &mut rng, coord);
        spawned.entities.insert(coord, entity);
        debug!("spawned chunk ({}, {})", coord.x, coord.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn test_world() -> World {
        let mut world = World::new();
        world.insert_resource(Assets::<Mesh>::default());

        let mut materials = Assets::<StandardMaterial>::default();
        let chunk_materials = ChunkMaterials {
            ground: materials.add(StandardMaterial::default()),
            trunk: materials.add(StandardMaterial::default()),
        };
        world.insert_resource(materials);
        world.insert_resource(chunk_materials);
        world.insert_resource(ChunkConfig::default());
        world
    }

    fn spawn_test_chunk(world: &mut World, coord: IVec2, seed: u64) -> Entity {
        world
            .run_system_once(
                move |mut commands: Commands,
                      mut meshes: ResMut<Assets<Mesh>>,
                      config: Res<ChunkConfig>,
                      materials: Res<ChunkMaterials>| {
                    let mut rng = StdRng::seed_from_u64(seed);
                    spawn_chunk(&mut commands, &mut meshes, &config, &materials, &mut rng, coord)
                },
            )
            .unwrap()
    }

    fn child_entities(world: &World, group: Entity) -> Vec<Entity> {
        world
            .entity(group)
            .get::<Children>()
            .map(|children| children.iter().collect())
            .unwrap_or_default()
    }

    #[test]
    fn group_holds_ground_plus_trees() {
        let mut world = test_world();
        let config = ChunkConfig::default();

        let group = spawn_test_chunk(&mut world, IVec2::new(0, 0), 7);

        let children = child_entities(&world, group);
        assert_eq!(children.len(), 1 + config.tree_count);
        assert!(world.entity(group).get::<Chunk>().is_some());
    }

    #[test]
    fn ground_child_sits_at_chunk_origin() {
        let mut world = test_world();

        let group = spawn_test_chunk(&mut world, IVec2::new(2, -1), 3);

        // The ground plane is spawned first.
        let children = child_entities(&world, group);
        let ground = world.entity(children[0]).get::<Transform>().unwrap();
        assert_eq!(ground.translation, Vec3::new(40.0, 0.0, -20.0));
    }

    #[test]
    fn tree_children_stay_inside_chunk_bounds() {
        let mut world = test_world();
        let config = ChunkConfig::default();
        let half = config.chunk_size * 0.5;

        let group = spawn_test_chunk(&mut world, IVec2::new(-3, 5), 9);
        let origin = layout::chunk_origin(&config, IVec2::new(-3, 5));

        let children = child_entities(&world, group);
        for &tree in &children[1..] {
            let transform = world.entity(tree).get::<Transform>().unwrap();
            assert!(transform.translation.x >= origin.x - half);
            assert!(transform.translation.x <= origin.x + half);
            assert!(transform.translation.z >= origin.z - half);
            assert!(transform.translation.z <= origin.z + half);
            assert_eq!(transform.translation.y, config.trunk_height * 0.5);
        }
    }

    #[test]
    fn group_transform_is_identity() {
        let mut world = test_world();

        let group = spawn_test_chunk(&mut world, IVec2::new(6, 6), 1);

        let transform = world.entity(group).get::<Transform>().unwrap();
        assert_eq!(*transform, Transform::IDENTITY);
    }

    #[test]
    fn chunks_are_structurally_independent() {
        let mut world = test_world();
        let config = ChunkConfig::default();

        let first = spawn_test_chunk(&mut world, IVec2::new(0, 0), 1);
        let second = spawn_test_chunk(&mut world, IVec2::new(0, 0), 2);

        // Tearing one chunk down leaves the other intact.
        world.entity_mut(first).despawn();

        let children = child_entities(&world, second);
        assert_eq!(children.len(), 1 + config.tree_count);
        for &child in &children {
            assert!(world.get_entity(child).is_ok());
        }
    }

    #[test]
    fn palette_load_bakes_materials_and_drops_handle() {
        let mut world = World::new();

        let mut palette_assets = Assets::<ChunkPaletteAsset>::default();
        let handle = palette_assets.add(ChunkPaletteAsset(ChunkPalette {
            ground_srgb: (0.0, 1.0, 0.0),
            trunk_srgb: (0.545, 0.271, 0.075),
        }));
        world.insert_resource(palette_assets);
        world.insert_resource(ChunkPaletteHandle(handle));
        world.insert_resource(Assets::<StandardMaterial>::default());

        world.run_system_once(finish_palette_load).unwrap();

        // The palette is fully baked into the two materials; only
        // ChunkMaterials survives, the load handle is gone.
        assert!(!world.contains_resource::<ChunkPaletteHandle>());
        let chunk_materials = world.resource::<ChunkMaterials>();
        let materials = world.resource::<Assets<StandardMaterial>>();

        let ground = materials.get(&chunk_materials.ground).unwrap();
        assert_eq!(ground.base_color, Color::srgb(0.0, 1.0, 0.0));
        assert!(ground.unlit);
        assert!(ground.double_sided);
        assert!(ground.cull_mode.is_none());

        let trunk = materials.get(&chunk_materials.trunk).unwrap();
        assert_eq!(trunk.base_color, Color::srgb(0.545, 0.271, 0.075));
        assert!(trunk.unlit);
    }

    #[test]
    fn repeated_coordinate_yields_distinct_meshes() {
        let mut world = test_world();

        let first = spawn_test_chunk(&mut world, IVec2::new(1, 1), 5);
        let second = spawn_test_chunk(&mut world, IVec2::new(1, 1), 5);

        let ground_a = world
            .entity(child_entities(&world, first)[0])
            .get::<Mesh3d>()
            .unwrap()
            .0
            .clone();
        let ground_b = world
            .entity(child_entities(&world, second)[0])
            .get::<Mesh3d>()
            .unwrap()
            .0
            .clone();
        assert_ne!(ground_a, ground_b);
    }
}
