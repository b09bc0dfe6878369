//! Paint input handling
//!
//! Mouse and touch input both feed a painting flag. Pressing deposits once
//! at the press position; every pointer move while the flag is set deposits
//! again. Input is turned into [`DepositRequest`] messages carrying NDC
//! positions; the painting system does the raycast and deposition.

use bevy::ecs::message::Message;
use bevy::input::mouse::MouseButton;
use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow};
use painting::viewport_to_ndc;

use crate::convert::vec2_to_core;

/// Resource tracking whether the user is currently painting
#[derive(Resource, Default, Debug)]
pub struct PaintMode {
    /// Left mouse button is held
    pub mouse_down: bool,
    /// Touch id of the finger currently painting, if any
    pub touch: Option<u64>,
}

impl PaintMode {
    pub fn is_painting(&self) -> bool {
        self.mouse_down || self.touch.is_some()
    }
}

/// Request to deposit paint under a screen position
#[derive(Message, Debug, Clone, Copy)]
pub struct DepositRequest {
    /// Position in normalized device coordinates, +Y up
    pub ndc: Vec2,
}

/// Plugin for paint input
pub struct PaintModePlugin;

impl Plugin for PaintModePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PaintMode>()
            .add_message::<DepositRequest>()
            .add_systems(Update, (handle_mouse_paint_input, handle_touch_paint_input));
    }
}

/// Convert a logical window position to NDC
fn window_to_ndc(window: &Window, position: Vec2) -> Vec2 {
    logical_to_ndc(position, window.size())
}

fn logical_to_ndc(position: Vec2, size: Vec2) -> Vec2 {
    let ndc = viewport_to_ndc(vec2_to_core(position), vec2_to_core(size));
    Vec2::new(ndc.x, ndc.y)
}

/// Mouse button edges and cursor positions seen this frame
#[derive(Debug, Default)]
struct MouseFrame<'a> {
    pressed: bool,
    released: bool,
    /// Cursor position at the time the press is handled
    press_position: Option<Vec2>,
    /// Cursor move positions, in event order
    moves: &'a [Vec2],
}

/// Decide the painting flag and the deposit positions for one frame
///
/// A press deposits at the press position, then at any moves from the same
/// frame. Moves deposit only while the button is held. A release clears
/// the flag before moves are considered.
fn mouse_requests(mouse_down: bool, frame: &MouseFrame) -> (bool, Vec<Vec2>) {
    if frame.pressed {
        let mut positions: Vec<Vec2> = frame.press_position.into_iter().collect();
        if frame.released {
            return (false, positions);
        }
        positions.extend(
            frame
                .moves
                .iter()
                .copied()
                .filter(|pos| Some(*pos) != frame.press_position),
        );
        return (true, positions);
    }

    if frame.released || !mouse_down {
        return (false, Vec::new());
    }

    // One deposit per move event, no interpolation between them
    (true, frame.moves.to_vec())
}

/// Touch changes seen this frame
#[derive(Debug, Default)]
struct TouchFrame<'a> {
    /// Touches released or canceled
    ended: &'a [u64],
    /// New touches and where they landed
    started: &'a [(u64, Vec2)],
    /// Touches that moved and their new positions
    moved: &'a [(u64, Vec2)],
}

/// Decide the painting touch and the deposit positions for one frame
///
/// Only the first finger down paints; others are ignored until it lifts.
fn touch_requests(active: Option<u64>, frame: &TouchFrame) -> (Option<u64>, Vec<Vec2>) {
    let active = active.filter(|id| !frame.ended.contains(id));

    match active {
        None => match frame.started.first() {
            Some(&(id, pos)) => (Some(id), vec![pos]),
            None => (None, Vec::new()),
        },
        Some(id) => {
            let positions = frame
                .moved
                .iter()
                .filter(|(moved_id, _)| *moved_id == id)
                .map(|&(_, pos)| pos)
                .collect();
            (Some(id), positions)
        }
    }
}

/// Handle left mouse button painting
fn handle_mouse_paint_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
    mut cursor_events: MessageReader<CursorMoved>,
    mut paint_mode: ResMut<PaintMode>,
    mut requests: MessageWriter<DepositRequest>,
) {
    let Ok((window_entity, window)) = windows.single() else {
        cursor_events.clear();
        return;
    };

    // Collect all cursor positions from this frame for this window
    let cursor_positions: Vec<Vec2> = cursor_events
        .read()
        .filter(|e| e.window == window_entity)
        .map(|e| e.position)
        .collect();

    let frame = MouseFrame {
        pressed: mouse_button.just_pressed(MouseButton::Left),
        released: mouse_button.just_released(MouseButton::Left),
        press_position: window
            .cursor_position()
            .or_else(|| cursor_positions.last().copied()),
        moves: &cursor_positions,
    };

    let (mouse_down, positions) = mouse_requests(paint_mode.mouse_down, &frame);
    if paint_mode.mouse_down != mouse_down {
        paint_mode.mouse_down = mouse_down;
    }

    for pos in positions {
        requests.write(DepositRequest {
            ndc: window_to_ndc(window, pos),
        });
    }
}

/// Handle single-finger touch painting
fn handle_touch_paint_input(
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut paint_mode: ResMut<PaintMode>,
    mut requests: MessageWriter<DepositRequest>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let ended: Vec<u64> = touches
        .iter_just_released()
        .chain(touches.iter_just_canceled())
        .map(|touch| touch.id())
        .collect();
    let started: Vec<(u64, Vec2)> = touches
        .iter_just_pressed()
        .map(|touch| (touch.id(), touch.position()))
        .collect();
    let moved: Vec<(u64, Vec2)> = touches
        .iter()
        .filter(|touch| touch.delta() != Vec2::ZERO)
        .map(|touch| (touch.id(), touch.position()))
        .collect();

    let frame = TouchFrame {
        ended: &ended,
        started: &started,
        moved: &moved,
    };

    let (touch, positions) = touch_requests(paint_mode.touch, &frame);
    if paint_mode.touch != touch {
        paint_mode.touch = touch;
    }

    for pos in positions {
        requests.write(DepositRequest {
            ndc: window_to_ndc(window, pos),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_painting_flag_covers_mouse_and_touch() {
        let mut mode = PaintMode::default();
        assert!(!mode.is_painting());

        mode.touch = Some(3);
        assert!(mode.is_painting());

        mode.touch = None;
        mode.mouse_down = true;
        assert!(mode.is_painting());
    }

    fn moves(frame_moves: &[Vec2]) -> MouseFrame<'_> {
        MouseFrame {
            moves: frame_moves,
            ..Default::default()
        }
    }

    #[test]
    fn test_mouse_moves_without_press_do_nothing() {
        let positions = [Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0)];
        let (down, requests) = mouse_requests(false, &moves(&positions));
        assert!(!down);
        assert!(requests.is_empty());
    }

    #[test]
    fn test_mouse_press_deposits_once() {
        let frame = MouseFrame {
            pressed: true,
            press_position: Some(Vec2::new(5.0, 5.0)),
            ..Default::default()
        };
        let (down, requests) = mouse_requests(false, &frame);
        assert!(down);
        assert_eq!(requests, vec![Vec2::new(5.0, 5.0)]);
    }

    #[test]
    fn test_mouse_press_keeps_same_frame_moves() {
        let positions = [Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0), Vec2::new(3.0, 3.0)];
        let frame = MouseFrame {
            pressed: true,
            press_position: Some(Vec2::new(3.0, 3.0)),
            moves: &positions,
            ..Default::default()
        };
        let (down, requests) = mouse_requests(false, &frame);
        assert!(down);
        assert_eq!(
            requests,
            vec![Vec2::new(3.0, 3.0), Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)]
        );
    }

    #[test]
    fn test_mouse_drag_deposits_every_move() {
        let positions = [Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)];
        let (down, requests) = mouse_requests(true, &moves(&positions));
        assert!(down);
        assert_eq!(requests, positions.to_vec());
    }

    #[test]
    fn test_mouse_release_stops_painting() {
        let positions = [Vec2::new(1.0, 1.0)];
        let frame = MouseFrame {
            released: true,
            moves: &positions,
            ..Default::default()
        };
        let (down, requests) = mouse_requests(true, &frame);
        assert!(!down);
        assert!(requests.is_empty());

        let (down, requests) = mouse_requests(down, &moves(&positions));
        assert!(!down);
        assert!(requests.is_empty());
    }

    #[test]
    fn test_first_finger_paints() {
        let started = [(7, Vec2::new(4.0, 4.0))];
        let frame = TouchFrame {
            started: &started,
            ..Default::default()
        };
        let (active, requests) = touch_requests(None, &frame);
        assert_eq!(active, Some(7));
        assert_eq!(requests, vec![Vec2::new(4.0, 4.0)]);
    }

    #[test]
    fn test_second_finger_is_ignored() {
        let started = [(9, Vec2::new(50.0, 50.0))];
        let moved = [(9, Vec2::new(55.0, 50.0)), (7, Vec2::new(6.0, 4.0))];
        let frame = TouchFrame {
            started: &started,
            moved: &moved,
            ..Default::default()
        };
        let (active, requests) = touch_requests(Some(7), &frame);
        assert_eq!(active, Some(7));
        assert_eq!(requests, vec![Vec2::new(6.0, 4.0)]);
    }

    #[test]
    fn test_lifting_or_canceling_finger_stops_painting() {
        let moved = [(7, Vec2::new(6.0, 4.0))];
        let ended = [7];
        let frame = TouchFrame {
            ended: &ended,
            moved: &moved,
            ..Default::default()
        };
        let (active, requests) = touch_requests(Some(7), &frame);
        assert_eq!(active, None);
        assert!(requests.is_empty());

        let frame = TouchFrame {
            moved: &moved,
            ..Default::default()
        };
        let (active, requests) = touch_requests(None, &frame);
        assert_eq!(active, None);
        assert!(requests.is_empty());
    }

    #[test]
    fn test_window_center_maps_to_ndc_origin() {
        let size = Vec2::new(800.0, 600.0);
        let ndc = logical_to_ndc(Vec2::new(400.0, 300.0), size);
        assert!(ndc.length() < 1e-5);

        let corner = logical_to_ndc(Vec2::ZERO, size);
        assert_eq!(corner, Vec2::new(-1.0, 1.0));

        let bottom_right = logical_to_ndc(size, size);
        assert_eq!(bottom_right, Vec2::new(1.0, -1.0));
    }
}
