//! The paintable wall
//!
//! The wall texture loads asynchronously; the wall entity only appears once
//! it has loaded. A failed load is logged and reported and the wall never
//! appears, which also means no ray can hit it and nothing can be painted.

use bevy::asset::LoadState;
use bevy::prelude::*;
use painting::{glam, WallPlane};
use tagmaster_config::{AppConfig, WallConfig};
use tagmaster_ipc::{error_codes, BevyToUi};

use crate::convert::vec3_from_core;
use crate::painting_system::PaintingResource;
use crate::OutboundUiMessages;

/// Marker component for the wall entity
#[derive(Component)]
pub struct WallSurface;

/// Where the wall texture load stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallTextureState {
    Loading,
    Spawned,
    Failed,
}

/// Handle to the wall texture and its load progress
#[derive(Resource)]
pub struct WallTexture {
    pub handle: Handle<Image>,
    pub state: WallTextureState,
}

/// Wall geometry from configuration
pub fn configured_wall(config: &WallConfig) -> WallPlane {
    WallPlane::new(
        glam::Vec3::from_array(config.center),
        config.width,
        config.height,
    )
}

/// Plugin for loading and spawning the wall
pub struct WallPlugin;

impl Plugin for WallPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, start_wall_texture_load)
            .add_systems(Update, spawn_wall_when_loaded);
    }
}

fn start_wall_texture_load(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<AppConfig>,
) {
    let handle: Handle<Image> = asset_server.load(config.wall.texture_path.clone());
    info!("Loading wall texture {}", config.wall.texture_path);
    commands.insert_resource(WallTexture {
        handle,
        state: WallTextureState::Loading,
    });
}

/// Spawn the wall entity and make it paintable
fn attach_wall(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    texture: Handle<Image>,
    wall: WallPlane,
    painting: &mut PaintingResource,
) {
    // Rectangle meshes lie in the XY plane facing +Z, toward the camera
    commands.spawn((
        Mesh3d(meshes.add(Rectangle::new(wall.width, wall.height))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color_texture: Some(texture),
            unlit: true,
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        Transform::from_translation(vec3_from_core(wall.center)),
        WallSurface,
        Name::new("Wall"),
    ));

    painting.canvas.set_wall(wall);
    info!(
        "Wall spawned at {:?} ({}x{})",
        wall.center, wall.width, wall.height
    );
}

fn spawn_wall_when_loaded(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<AppConfig>,
    wall_texture: Option<ResMut<WallTexture>>,
    mut painting: ResMut<PaintingResource>,
    mut outbound: ResMut<OutboundUiMessages>,
) {
    let Some(mut wall_texture) = wall_texture else {
        return;
    };
    if wall_texture.state != WallTextureState::Loading {
        return;
    }

    match asset_server.load_state(&wall_texture.handle) {
        LoadState::Loaded => {
            let wall = configured_wall(&config.wall);
            attach_wall(
                &mut commands,
                &mut meshes,
                &mut materials,
                wall_texture.handle.clone(),
                wall,
                &mut painting,
            );
            wall_texture.state = WallTextureState::Spawned;
        }
        LoadState::Failed(err) => {
            error!(
                "Failed to load wall texture {}: {}",
                config.wall.texture_path, err
            );
            outbound.send(BevyToUi::error(
                error_codes::TEXTURE_LOAD_FAILED,
                format!("Could not load {}", config.wall.texture_path),
            ));
            wall_texture.state = WallTextureState::Failed;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use tagmaster_config::PaintConfig;

    #[test]
    fn test_configured_wall_matches_config() {
        let config = WallConfig {
            center: [1.0, 2.0, -0.5],
            width: 4.0,
            height: 2.0,
            ..Default::default()
        };
        let wall = configured_wall(&config);
        assert_eq!(wall.center.to_array(), [1.0, 2.0, -0.5]);
        assert_eq!((wall.width, wall.height), (4.0, 2.0));
    }

    #[test]
    fn test_wall_texture_ships_with_each_host() {
        let workspace = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("..");
        for host in ["app", "app-wasm"] {
            let asset = workspace
                .join(host)
                .join("assets")
                .join(tagmaster_config::DEFAULT_WALL_TEXTURE);
            let bytes = std::fs::read(&asset).unwrap();
            assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "{}", asset.display());
        }
    }

    #[test]
    fn test_loaded_wall_is_paintable() {
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        world.init_resource::<Assets<StandardMaterial>>();
        world.init_resource::<Assets<Image>>();
        world.insert_resource(PaintingResource::from_config(&PaintConfig::default()));

        world
            .run_system_once(
                |mut commands: Commands,
                 mut meshes: ResMut<Assets<Mesh>>,
                 mut materials: ResMut<Assets<StandardMaterial>>,
                 mut images: ResMut<Assets<Image>>,
                 mut painting: ResMut<PaintingResource>| {
                    let texture = images.add(Image::default());
                    attach_wall(
                        &mut commands,
                        &mut meshes,
                        &mut materials,
                        texture,
                        configured_wall(&WallConfig::default()),
                        &mut painting,
                    );
                },
            )
            .unwrap();

        assert!(world.resource::<PaintingResource>().canvas.wall().is_some());
        let walls = world
            .query_filtered::<Entity, With<WallSurface>>()
            .iter(&world)
            .count();
        assert_eq!(walls, 1);
    }
}
