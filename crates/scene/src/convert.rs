//! Conversions between Bevy math types and the paint core's glam types.

use bevy::prelude::{Quat, Vec2, Vec3};
use painting::glam;

pub fn vec3_to_core(v: Vec3) -> glam::Vec3 {
    glam::Vec3::from_array(v.to_array())
}

pub fn vec3_from_core(v: glam::Vec3) -> Vec3 {
    Vec3::from_array(v.to_array())
}

pub fn vec2_to_core(v: Vec2) -> glam::Vec2 {
    glam::Vec2::from_array(v.to_array())
}

pub fn quat_to_core(q: Quat) -> glam::Quat {
    glam::Quat::from_array(q.to_array())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_round_trip() {
        let v = Vec3::new(1.0, -2.0, 3.5);
        assert_eq!(vec3_from_core(vec3_to_core(v)), v);
    }

    #[test]
    fn test_quat_components_preserved() {
        let q = Quat::from_rotation_z(0.3);
        assert_eq!(quat_to_core(q).to_array(), q.to_array());
    }
}
