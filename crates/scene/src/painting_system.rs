//! Painting system for Bevy integration
//!
//! This module connects [`DepositRequest`] messages to the deposit pipeline
//! and mirrors the canvas marks as entities. The canvas is the source of
//! truth; entities are spawned for every mark past `spawned` and all of
//! them are despawned on reset.

use std::collections::HashMap;

use bevy::ecs::message::Message;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use painting::{
    AmbientLight, Canvas, DepositPipeline, DripMotion, MarkShape, PaintColor, PaintMark,
    PerspectiveView, SprayPattern, ToolConfig, ToolState,
};
use tagmaster_config::PaintConfig;
use tagmaster_ipc::{BevyToUi, ToolSettings};

use crate::camera::MainCamera;
use crate::convert::{quat_to_core, vec2_to_core, vec3_from_core, vec3_to_core};
use crate::paint_mode::DepositRequest;
use crate::OutboundUiMessages;

/// Base depth of marks in front of the wall
const MARK_DEPTH: f32 = 0.001;
/// Depth added per mark so later marks draw over earlier ones
const MARK_DEPTH_STEP: f32 = 2e-5;
/// Layers before the depth offset wraps around
const MARK_DEPTH_LAYERS: usize = 5000;

/// Resource holding the canvas model and the deposit pipeline
#[derive(Resource)]
pub struct PaintingResource {
    pub canvas: Canvas,
    pub pipeline: DepositPipeline,
    /// Slide drips downward after they spawn
    pub animate_drips: bool,
}

impl PaintingResource {
    /// Build the canvas and pipeline from paint configuration
    ///
    /// Invalid configured values fall back to the tool defaults with a
    /// warning. The wall is attached later, once its texture has loaded.
    pub fn from_config(config: &PaintConfig) -> Self {
        let defaults = ToolConfig::default();

        let color = PaintColor::from_hex(&config.default_color).unwrap_or_else(|err| {
            warn!("Invalid default color {}: {}", config.default_color, err);
            defaults.color
        });

        let tool_config = ToolConfig {
            color,
            pattern: SprayPattern::from_key(&config.default_pattern),
            size: config.default_size,
            drip_probability: config.drip_probability,
        };
        let tool = ToolState::new(tool_config).unwrap_or_else(|err| {
            warn!("Invalid paint configuration, using defaults: {}", err);
            ToolState::new(ToolConfig { color, ..defaults }).unwrap_or_default()
        });

        let pipeline = match config.seed {
            Some(seed) => {
                info!("Paint RNG seeded with {}", seed);
                DepositPipeline::seeded(tool, seed)
            }
            None => DepositPipeline::from_entropy(tool),
        }
        .with_drip_offset(config.drip_offset);

        let mut canvas = Canvas::new();
        canvas.set_ambient(AmbientLight::default());

        Self {
            canvas,
            pipeline,
            animate_drips: config.animate_drips,
        }
    }

    /// Tool state in the shape the UI controls use
    pub fn tool_settings(&self) -> ToolSettings {
        let tool = self.pipeline.tool().snapshot();
        ToolSettings {
            color: tool.color.to_hex(),
            pattern: tool.pattern.key().to_string(),
            size: tool.size,
        }
    }
}

/// Component linking an entity to its mark in the canvas
#[derive(Component, Debug, Clone, Copy)]
pub struct PaintMarkEntity {
    pub index: usize,
}

/// Component for a drip that is still sliding down the wall
#[derive(Component, Debug)]
pub struct SlidingDrip(pub DripMotion);

/// Message asking to clear the wall
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ResetCanvasEvent;

/// Shared meshes and per-color materials for mark entities
#[derive(Resource, Default)]
struct MarkRenderState {
    /// Canvas marks that already have an entity
    spawned: usize,
    meshes: Option<MarkMeshes>,
    materials: HashMap<[u8; 4], Handle<StandardMaterial>>,
}

/// Unit meshes scaled per mark through the transform
struct MarkMeshes {
    disc: Handle<Mesh>,
    quad: Handle<Mesh>,
    drip: Handle<Mesh>,
}

impl MarkMeshes {
    fn new(meshes: &mut Assets<Mesh>) -> Self {
        Self {
            disc: meshes.add(Circle::new(1.0).mesh().resolution(32)),
            quad: meshes.add(Rectangle::new(1.0, 1.0)),
            drip: meshes.add(Triangle2d::new(
                Vec2::new(-0.5, 0.5),
                Vec2::new(0.0, -0.5),
                Vec2::new(0.5, 0.5),
            )),
        }
    }

    fn for_shape(&self, shape: &MarkShape) -> Handle<Mesh> {
        match shape {
            MarkShape::Disc { .. } => self.disc.clone(),
            MarkShape::Line { .. } | MarkShape::Rect { .. } => self.quad.clone(),
            MarkShape::Drip { .. } => self.drip.clone(),
        }
    }
}

/// Plugin for the painting system
pub struct PaintingSystemPlugin;

impl Plugin for PaintingSystemPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MarkRenderState>()
            .add_message::<ResetCanvasEvent>()
            .add_systems(
                Update,
                (
                    process_deposit_requests,
                    handle_reset,
                    spawn_new_marks,
                    slide_drips,
                    report_canvas_changes,
                )
                    .chain(),
            );
    }
}

/// Depth offset for the mark at `index`
fn mark_depth(index: usize) -> f32 {
    MARK_DEPTH + MARK_DEPTH_STEP * (index % MARK_DEPTH_LAYERS) as f32
}

/// Transform placing a unit mesh so it matches the mark
fn mark_transform(mark: &PaintMark, index: usize) -> Transform {
    let mut position = vec3_from_core(mark.position);
    position.z += mark_depth(index);

    match mark.shape {
        MarkShape::Disc { radius } => {
            Transform::from_translation(position).with_scale(Vec3::new(radius, radius, 1.0))
        }
        MarkShape::Line { start, end, width } => {
            let start = vec3_from_core(start);
            let end = vec3_from_core(end);
            let span = end - start;
            let mid = (start + end) * 0.5;
            Transform::from_translation(Vec3::new(mid.x, mid.y, position.z))
                .with_rotation(Quat::from_rotation_z(span.y.atan2(span.x)))
                .with_scale(Vec3::new(span.truncate().length(), width, 1.0))
        }
        MarkShape::Rect {
            length,
            width,
            rotation,
        } => Transform::from_translation(position)
            .with_rotation(Quat::from_rotation_z(rotation))
            .with_scale(Vec3::new(length, width, 1.0)),
        MarkShape::Drip { top_width, length } => {
            Transform::from_translation(position).with_scale(Vec3::new(top_width, length, 1.0))
        }
    }
}

/// Material cache key: color and opacity quantized to 8 bits
fn material_key(mark: &PaintMark) -> [u8; 4] {
    let [r, g, b] = mark.color.to_rgb8();
    [r, g, b, (mark.opacity * 255.0).round() as u8]
}

/// Raycast each deposit request against the wall and deposit on a hit
fn process_deposit_requests(
    mut requests: MessageReader<DepositRequest>,
    camera_query: Query<(&GlobalTransform, &Projection), With<MainCamera>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut painting: ResMut<PaintingResource>,
) {
    if requests.is_empty() {
        return;
    }

    let Ok((camera_transform, projection)) = camera_query.single() else {
        requests.clear();
        return;
    };
    let Projection::Perspective(perspective) = projection else {
        requests.clear();
        return;
    };
    let Ok(window) = windows.single() else {
        requests.clear();
        return;
    };

    let aspect = window.width() / window.height().max(1.0);
    let view = PerspectiveView {
        position: vec3_to_core(camera_transform.translation()),
        rotation: quat_to_core(camera_transform.rotation()),
        fov_y: perspective.fov,
        aspect,
    };

    let PaintingResource {
        canvas, pipeline, ..
    } = painting.as_mut();

    for request in requests.read() {
        if let Some(outcome) = pipeline.deposit_ndc(canvas, &view, vec2_to_core(request.ndc)) {
            debug!(
                "Deposited {} marks at ({:.2}, {:.2}){}",
                outcome.marks_added,
                outcome.point.x,
                outcome.point.y,
                if outcome.dripped { " with drip" } else { "" }
            );
        }
    }
}

/// Clear the canvas and despawn every mark entity
fn handle_reset(
    mut commands: Commands,
    mut resets: MessageReader<ResetCanvasEvent>,
    mut painting: ResMut<PaintingResource>,
    mut render_state: ResMut<MarkRenderState>,
    marks: Query<Entity, With<PaintMarkEntity>>,
) {
    if resets.is_empty() {
        return;
    }
    resets.clear();

    let removed = painting.canvas.reset();
    let mut despawned = 0;
    for entity in marks.iter() {
        commands.entity(entity).despawn();
        despawned += 1;
    }
    render_state.spawned = 0;

    info!("Canvas reset: {} marks, {} entities", removed, despawned);
}

/// Spawn entities for marks added since the last frame
fn spawn_new_marks(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut painting: ResMut<PaintingResource>,
    mut render_state: ResMut<MarkRenderState>,
) {
    if painting.canvas.mark_count() <= render_state.spawned {
        return;
    }

    let MarkRenderState {
        spawned,
        meshes: mark_meshes,
        materials: material_cache,
    } = render_state.as_mut();
    let mark_meshes = mark_meshes.get_or_insert_with(|| MarkMeshes::new(&mut meshes));

    let animate = painting.animate_drips;
    let PaintingResource {
        canvas, pipeline, ..
    } = painting.as_mut();

    for (index, mark) in canvas.marks_from(*spawned) {
        let key = material_key(mark);
        let material = material_cache
            .entry(key)
            .or_insert_with(|| {
                let [r, g, b] = mark.color.to_array();
                materials.add(StandardMaterial {
                    base_color: Color::srgba(r, g, b, mark.opacity),
                    alpha_mode: AlphaMode::Blend,
                    unlit: true,
                    double_sided: true,
                    cull_mode: None,
                    ..default()
                })
            })
            .clone();

        let mut entity = commands.spawn((
            Mesh3d(mark_meshes.for_shape(&mark.shape)),
            MeshMaterial3d(material),
            mark_transform(mark, index),
            PaintMarkEntity { index },
        ));

        if animate && mark.is_drip() {
            entity.insert(SlidingDrip(DripMotion::random(pipeline.rng_mut())));
        }
    }

    *spawned = canvas.mark_count();
}

/// Move sliding drips down one step per frame until they stop
///
/// Only the entity moves; the canvas record keeps the spawn position.
fn slide_drips(
    mut commands: Commands,
    mut drips: Query<(Entity, &mut Transform, &mut SlidingDrip)>,
) {
    for (entity, mut transform, mut drip) in drips.iter_mut() {
        transform.translation.y -= drip.0.step();
        if drip.0.is_finished() {
            commands.entity(entity).remove::<SlidingDrip>();
        }
    }
}

/// Tell the UI when the number of marks changes
fn report_canvas_changes(
    painting: Res<PaintingResource>,
    mut last_count: Local<usize>,
    mut outbound: ResMut<OutboundUiMessages>,
) {
    let mark_count = painting.canvas.mark_count();
    if mark_count != *last_count {
        *last_count = mark_count;
        outbound.send(BevyToUi::CanvasChanged { mark_count });
    }
}
