pub mod camera;
pub mod lighting;

use bevy::prelude::*;
use glam::IVec2;

use chunkgen::PendingChunks;

/// Half-width of the demo's fixed chunk grid: a (2r+1) x (2r+1) square
/// around the origin, requested once. Nothing streams in or out later.
const STARTING_GRID_RADIUS: i32 = 1;

pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(camera::TopDownCameraSettings::default())
            .add_systems(
                Startup,
                (
                    camera::setup_viewer,
                    lighting::setup_sun_light,
                    request_starting_chunks,
                ),
            )
            .add_systems(
                Update,
                (camera::top_down_camera_input, camera::update_top_down_camera).chain(),
            );
    }
}

/// Enqueues the demo's chunk coordinates. The chunkgen plugin drains
/// the queue once its palette materials are ready.
fn request_starting_chunks(mut pending: ResMut<PendingChunks>) {
    for z in -STARTING_GRID_RADIUS..=STARTING_GRID_RADIUS {
        for x in -STARTING_GRID_RADIUS..=STARTING_GRID_RADIUS {
            pending.coords.push_back(IVec2::new(x, z));
        }
    }
}
