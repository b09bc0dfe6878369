//! Main camera and viewport layout
//!
//! The camera faces the wall head-on. On window resize (which also covers
//! orientation changes on mobile) the layout is recomputed and the camera
//! moved, which shifts the wall on screen for portrait viewports.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use painting::ViewportLayout;
use tagmaster_config::AppConfig;

use crate::convert::vec3_from_core;
use crate::wall::configured_wall;

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Layout currently applied to the camera
#[derive(Resource, Debug, Clone, Copy)]
pub struct CurrentLayout(pub ViewportLayout);

/// Plugin for the camera and layout handling
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, init_layout)
            .add_systems(Startup, setup_camera)
            .add_systems(Update, apply_layout_on_resize);
    }
}

fn layout_for(width: f32, height: f32, config: &AppConfig) -> ViewportLayout {
    ViewportLayout::for_viewport(
        width,
        height,
        config.display.fov_radians(),
        &configured_wall(&config.wall),
    )
}

/// Compute the first layout from the window (or the configured size)
fn init_layout(
    mut commands: Commands,
    config: Res<AppConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let (width, height) = windows
        .single()
        .map(|w| (w.width(), w.height()))
        .unwrap_or((config.display.width_f32(), config.display.height_f32()));

    commands.insert_resource(CurrentLayout(layout_for(width, height, &config)));
}

/// Spawn the perspective camera looking at the wall
fn setup_camera(mut commands: Commands, config: Res<AppConfig>, layout: Res<CurrentLayout>) {
    let layout = layout.0;

    // TonyMcMapFace requires tonemapping_luts which needs zstd (not available in WASM)
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: config.display.fov_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        Transform::from_translation(vec3_from_core(layout.camera_position))
            .looking_at(vec3_from_core(layout.camera_target), Vec3::Y),
        Tonemapping::Reinhard,
        MainCamera,
    ));

    info!(
        "Camera initialized at {:?} ({} layout)",
        layout.camera_position,
        if layout.is_portrait() { "portrait" } else { "landscape" }
    );
}

/// Recompute the layout when the primary window changes size
fn apply_layout_on_resize(
    mut resize_events: MessageReader<WindowResized>,
    primary: Query<Entity, With<PrimaryWindow>>,
    config: Res<AppConfig>,
    mut layout: ResMut<CurrentLayout>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(primary) = primary.single() else {
        resize_events.clear();
        return;
    };

    // Only the latest size matters
    let Some(event) = resize_events.read().filter(|e| e.window == primary).last() else {
        return;
    };

    let new_layout = layout_for(event.width, event.height, &config);
    if new_layout == layout.0 {
        return;
    }

    for mut transform in camera_query.iter_mut() {
        *transform = Transform::from_translation(vec3_from_core(new_layout.camera_position))
            .looking_at(vec3_from_core(new_layout.camera_target), Vec3::Y);
    }

    info!(
        "Viewport resized to {}x{}, {} layout",
        event.width,
        event.height,
        if new_layout.is_portrait() { "portrait" } else { "landscape" }
    );
    layout.0 = new_layout;
}
