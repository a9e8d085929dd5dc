use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;

/// Focus point the camera orbits; panning moves this, not the camera.
#[derive(Component)]
pub struct Viewer;

#[derive(Component)]
pub struct TopDownCamera;

#[derive(Resource, Clone)]
pub struct TopDownCameraSettings {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub pan_speed: f32,
    pub pan_speed_fast: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for TopDownCameraSettings {
    fn default() -> Self {
        Self {
            yaw: 0.8,
            pitch: 1.05,
            distance: 50.0,
            min_distance: 5.0,
            max_distance: 200.0,
            pan_speed: 30.0,
            pan_speed_fast: 90.0,
            rotate_speed: 1.8,
            zoom_speed: 0.12,
        }
    }
}

pub fn setup_viewer(mut commands: Commands) {
    commands.spawn((Viewer, Transform::from_xyz(0.0, 0.0, 0.0)));

    commands.spawn((TopDownCamera, Camera3d::default(), Transform::default()));
}

pub fn top_down_camera_input(
    time: Res<Time>,
    keys: Res<ButtonInput<KeyCode>>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mut settings: ResMut<TopDownCameraSettings>,
    mut q_focus: Query<&mut Transform, With<Viewer>>,
) {
    let mut focus = match q_focus.single_mut() {
        Ok(t) => t,
        Err(_) => return,
    };

    // Rotate around focus
    if keys.pressed(KeyCode::KeyQ) {
        settings.yaw += settings.rotate_speed * time.delta_secs();
    }
    if keys.pressed(KeyCode::KeyE) {
        settings.yaw -= settings.rotate_speed * time.delta_secs();
    }

    // Zoom
    let mut scroll: f32 = 0.0;
    for ev in mouse_wheel.read() {
        scroll += ev.y;
    }
    if scroll.abs() > 0.0 {
        let factor = (1.0 - scroll * settings.zoom_speed).clamp(0.2, 5.0);
        settings.distance =
            (settings.distance * factor).clamp(settings.min_distance, settings.max_distance);
    }

    // Pan on the XZ plane, relative to camera yaw.
    let mut input = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        input.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        input.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        input.x += 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        input.x -= 1.0;
    }

    if input.length_squared() > 0.0 {
        let yaw_rot = Quat::from_rotation_y(settings.yaw);
        let right = yaw_rot * Vec3::X;
        let forward = yaw_rot * Vec3::Z;

        let speed = if keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight) {
            settings.pan_speed_fast
        } else {
            settings.pan_speed
        };

        let delta = (right * input.x + forward * input.y) * speed * time.delta_secs();
        focus.translation += Vec3::new(delta.x, 0.0, delta.z);
    }
}

pub fn update_top_down_camera(
    settings: Res<TopDownCameraSettings>,
    q_focus: Query<&Transform, (With<Viewer>, Without<TopDownCamera>)>,
    mut q_cam: Query<&mut Transform, (With<TopDownCamera>, Without<Viewer>)>,
) {
    let focus = match q_focus.single() {
        Ok(v) => v.translation,
        Err(_) => return,
    };
    let mut cam = match q_cam.single_mut() {
        Ok(c) => c,
        Err(_) => return,
    };

    let rot = Quat::from_euler(EulerRot::YXZ, settings.yaw, settings.pitch, 0.0);
    let offset = rot * Vec3::new(0.0, 0.0, -settings.distance);
    cam.translation = focus + offset;
    cam.look_at(focus, Vec3::Y);
}
