//! Input mapping: screen coordinates to a point on the wall.
//!
//! Pointer positions are converted to normalized device coordinates, a ray
//! is cast from the camera through that point, and the ray is intersected
//! with the wall rectangle only.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::{WALL_CENTER, WALL_HEIGHT, WALL_WIDTH};

/// Epsilon for parallel-ray rejection
const EPSILON: f32 = 1e-6;

/// A half-line in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Normalized direction
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Map a position in a viewport (origin top-left, +Y down) to NDC in
/// [-1, 1] with +Y up.
pub fn viewport_to_ndc(position: Vec2, viewport_size: Vec2) -> Vec2 {
    rect_to_ndc(position, Vec2::ZERO, viewport_size)
}

/// Map a position to NDC relative to a bounding rectangle, as used for
/// touch input on the render surface.
pub fn rect_to_ndc(position: Vec2, rect_min: Vec2, rect_size: Vec2) -> Vec2 {
    let size = rect_size.max(Vec2::splat(EPSILON));
    let local = (position - rect_min) / size;
    Vec2::new(local.x * 2.0 - 1.0, -(local.y * 2.0) + 1.0)
}

/// A perspective camera, enough of it to cast rays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveView {
    pub position: Vec3,
    pub rotation: Quat,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Width / height
    pub aspect: f32,
}

impl PerspectiveView {
    /// A camera at `position` looking at `target` with +Y up
    pub fn looking_at(position: Vec3, target: Vec3, fov_y: f32, aspect: f32) -> Self {
        let forward = (target - position).normalize_or_zero();
        let rotation = if forward == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            // Camera looks down its local -Z
            let right = forward.cross(Vec3::Y).normalize_or_zero();
            let up = right.cross(forward);
            Quat::from_mat3(&glam::Mat3::from_cols(right, up, -forward))
        };
        Self {
            position,
            rotation,
            fov_y,
            aspect,
        }
    }

    /// Ray from the camera through an NDC point
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * self.aspect;
        let local = Vec3::new(ndc.x * half_width, ndc.y * half_height, -1.0);
        Ray::new(self.position, self.rotation * local)
    }
}

/// The wall: an axis-aligned rectangle facing +Z
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallPlane {
    pub center: Vec3,
    pub width: f32,
    pub height: f32,
}

impl Default for WallPlane {
    fn default() -> Self {
        Self {
            center: Vec3::from_array(WALL_CENTER),
            width: WALL_WIDTH,
            height: WALL_HEIGHT,
        }
    }
}

impl WallPlane {
    pub const NORMAL: Vec3 = Vec3::Z;

    pub fn new(center: Vec3, width: f32, height: f32) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    /// Whether a point on the wall's plane lies inside the rectangle
    pub fn contains(&self, point: Vec3) -> bool {
        let local = point - self.center;
        local.x.abs() <= self.width * 0.5 && local.y.abs() <= self.height * 0.5
    }

    /// Intersect a ray with the wall.
    ///
    /// Returns the world-space hit, or `None` when the ray is parallel to
    /// the wall, points away from it, or crosses the plane outside the
    /// rectangle. The wall is double sided.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        let denom = ray.direction.dot(Self::NORMAL);
        if denom.abs() < EPSILON {
            return None;
        }

        let t = (self.center - ray.origin).dot(Self::NORMAL) / denom;
        if t < 0.0 {
            return None;
        }

        let mut hit = ray.at(t);
        // Snap onto the plane so marks sit exactly at the wall depth
        hit.z = self.center.z;

        self.contains(hit).then_some(hit)
    }
}
