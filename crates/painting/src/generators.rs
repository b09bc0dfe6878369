//! Procedural mark generation for each spray pattern
//!
//! Every generator is a pure function of the point, the tool snapshot and
//! the random source. Nothing here touches the canvas; the deposit pipeline
//! decides what to do with the returned marks.

use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;
use tracing::debug;

use crate::constants::LINE_WIDTH_RATIO;
use crate::mark::{MarkShape, PaintMark};
use crate::pattern::SprayPattern;
use crate::tool::ToolConfig;

/// Generate the marks for one deposit at `point`
pub fn generate<R: Rng + ?Sized>(point: Vec3, tool: &ToolConfig, rng: &mut R) -> Vec<PaintMark> {
    let marks = match tool.pattern {
        SprayPattern::Normal => normal(point, tool, rng),
        SprayPattern::Splatter => splatter(point, tool, rng),
        SprayPattern::Thin => thin(point, tool, rng),
        SprayPattern::Spray => spray(point, tool, rng),
        SprayPattern::Dotted => dotted(point, tool, rng),
        SprayPattern::Streak => streak(point, tool, rng),
    };

    debug!(
        "generate: {} produced {} marks at ({:.2}, {:.2}, {:.2})",
        tool.pattern,
        marks.len(),
        point.x,
        point.y,
        point.z
    );

    marks
}

/// One disc the size of the brush
pub fn normal<R: Rng + ?Sized>(point: Vec3, tool: &ToolConfig, rng: &mut R) -> Vec<PaintMark> {
    let opacity = rng.gen_range(0.5..1.0);
    vec![PaintMark::new(
        MarkShape::Disc { radius: tool.size },
        point,
        tool.color,
        opacity,
    )]
}

/// 5-14 scattered discs
pub fn splatter<R: Rng + ?Sized>(point: Vec3, tool: &ToolConfig, rng: &mut R) -> Vec<PaintMark> {
    scattered_discs(
        point,
        tool,
        rng,
        DiscCloud {
            count: 5..15,
            radius_factor: 0.1..0.6,
            spread: 0.25,
            min_opacity: 0.4,
        },
    )
}

/// 20-49 small discs in a wide mist
pub fn spray<R: Rng + ?Sized>(point: Vec3, tool: &ToolConfig, rng: &mut R) -> Vec<PaintMark> {
    scattered_discs(
        point,
        tool,
        rng,
        DiscCloud {
            count: 20..50,
            radius_factor: 0.05..0.35,
            spread: 0.5,
            min_opacity: 0.3,
        },
    )
}

/// 15-39 tiny specks
pub fn dotted<R: Rng + ?Sized>(point: Vec3, tool: &ToolConfig, rng: &mut R) -> Vec<PaintMark> {
    scattered_discs(
        point,
        tool,
        rng,
        DiscCloud {
            count: 15..40,
            radius_factor: 0.02..0.12,
            spread: 0.4,
            min_opacity: 0.5,
        },
    )
}

/// One line two brush sizes long with a tilted right end
pub fn thin<R: Rng + ?Sized>(point: Vec3, tool: &ToolConfig, rng: &mut R) -> Vec<PaintMark> {
    let tilt = rng.gen_range(-0.1..0.1);
    let start = point - Vec3::X * tool.size;
    let end = point + Vec3::new(tool.size, tilt, 0.0);

    vec![PaintMark::new(
        MarkShape::Line {
            start,
            end,
            width: tool.size * LINE_WIDTH_RATIO,
        },
        point,
        tool.color,
        1.0,
    )]
}

/// 5-14 short dashes, shifted sideways and rotated at random
pub fn streak<R: Rng + ?Sized>(point: Vec3, tool: &ToolConfig, rng: &mut R) -> Vec<PaintMark> {
    let count = rng.gen_range(5..15);
    (0..count)
        .map(|_| {
            let length = tool.size * rng.gen_range(0.2..0.7);
            let offset_x = rng.gen_range(-0.25..0.25);
            let rotation = rng.gen_range(0.0..PI);
            let opacity = rng.gen_range(0.4..1.0);
            PaintMark::new(
                MarkShape::Rect {
                    length,
                    width: tool.size * LINE_WIDTH_RATIO,
                    rotation,
                },
                point + Vec3::X * offset_x,
                tool.color,
                opacity,
            )
        })
        .collect()
}

/// Parameters shared by the disc-cloud patterns
struct DiscCloud {
    count: std::ops::Range<usize>,
    radius_factor: std::ops::Range<f32>,
    /// Max offset on x and y
    spread: f32,
    min_opacity: f32,
}

fn scattered_discs<R: Rng + ?Sized>(
    point: Vec3,
    tool: &ToolConfig,
    rng: &mut R,
    cloud: DiscCloud,
) -> Vec<PaintMark> {
    let count = rng.gen_range(cloud.count);
    (0..count)
        .map(|_| {
            let radius = tool.size * rng.gen_range(cloud.radius_factor.clone());
            let offset_x = rng.gen_range(-cloud.spread..cloud.spread);
            let offset_y = rng.gen_range(-cloud.spread..cloud.spread);
            let opacity = rng.gen_range(cloud.min_opacity..1.0);
            PaintMark::new(
                MarkShape::Disc { radius },
                point + Vec3::new(offset_x, offset_y, 0.0),
                tool.color,
                opacity,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PaintColor;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tool(pattern: SprayPattern, size: f32) -> ToolConfig {
        ToolConfig {
            pattern,
            size,
            color: PaintColor::rgb(0.2, 0.4, 0.6),
            ..Default::default()
        }
    }

    /// (pattern, count range, opacity range)
    const POLICY: [(SprayPattern, (usize, usize), (f32, f32)); 6] = [
        (SprayPattern::Normal, (1, 1), (0.5, 1.0)),
        (SprayPattern::Splatter, (5, 14), (0.4, 1.0)),
        (SprayPattern::Thin, (1, 1), (1.0, 1.0)),
        (SprayPattern::Spray, (20, 49), (0.3, 1.0)),
        (SprayPattern::Dotted, (15, 39), (0.5, 1.0)),
        (SprayPattern::Streak, (5, 14), (0.4, 1.0)),
    ];

    #[test]
    fn test_counts_and_opacity_within_policy() {
        let mut rng = StdRng::seed_from_u64(7);
        for (pattern, (min_count, max_count), (min_opacity, max_opacity)) in POLICY {
            for size in [0.01, 0.1, 0.5, 3.0] {
                for _ in 0..200 {
                    let marks = generate(Vec3::ZERO, &tool(pattern, size), &mut rng);
                    assert!(
                        (min_count..=max_count).contains(&marks.len()),
                        "{pattern}: {} marks",
                        marks.len()
                    );
                    for mark in &marks {
                        assert!(mark.opacity >= min_opacity && mark.opacity <= max_opacity);
                        if max_opacity > min_opacity {
                            assert!(mark.opacity < max_opacity);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_counts_cover_both_ends() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(splatter(Vec3::ZERO, &tool(SprayPattern::Splatter, 0.1), &mut rng).len());
        }
        assert!(seen.contains(&5));
        assert!(seen.contains(&14));
        assert!(!seen.contains(&15));
    }

    #[test]
    fn test_splatter_example() {
        let mut rng = StdRng::seed_from_u64(42);
        let red = ToolConfig {
            color: PaintColor::from_hex("#ff0000").unwrap(),
            pattern: SprayPattern::Splatter,
            size: 0.2,
            ..Default::default()
        };
        let point = Vec3::new(1.0, 1.0, 0.0);
        let marks = generate(point, &red, &mut rng);

        assert!((5..=14).contains(&marks.len()));
        for mark in marks {
            assert_eq!(mark.color, PaintColor::rgb(1.0, 0.0, 0.0));
            assert!(mark.opacity < 1.0);
            assert!((mark.position.x - 1.0).abs() <= 0.25);
            assert!((mark.position.y - 1.0).abs() <= 0.25);
            assert_eq!(mark.position.z, 0.0);
            let MarkShape::Disc { radius } = mark.shape else {
                panic!("splatter must produce discs");
            };
            assert!(radius >= 0.2 * 0.1 && radius <= 0.2 * 0.6);
        }
    }

    #[test]
    fn test_spray_and_dotted_offsets() {
        let mut rng = StdRng::seed_from_u64(3);
        let point = Vec3::new(-2.0, 0.5, 0.25);
        for (pattern, spread, radius_range) in [
            (SprayPattern::Spray, 0.5, (0.05, 0.35)),
            (SprayPattern::Dotted, 0.4, (0.02, 0.12)),
        ] {
            let marks = generate(point, &tool(pattern, 1.0), &mut rng);
            for mark in marks {
                let offset = mark.position - point;
                assert!(offset.x.abs() <= spread && offset.y.abs() <= spread);
                assert_eq!(offset.z, 0.0);
                let MarkShape::Disc { radius } = mark.shape else {
                    panic!("{pattern} must produce discs");
                };
                assert!(radius >= radius_range.0 && radius < radius_range.1);
            }
        }
    }

    #[test]
    fn test_normal_uses_brush_radius() {
        let mut rng = StdRng::seed_from_u64(5);
        let marks = normal(Vec3::ONE, &tool(SprayPattern::Normal, 0.3), &mut rng);
        assert_eq!(marks[0].shape, MarkShape::Disc { radius: 0.3 });
        assert_eq!(marks[0].position, Vec3::ONE);
    }

    #[test]
    fn test_thin_line_geometry() {
        let mut rng = StdRng::seed_from_u64(9);
        let point = Vec3::new(0.0, 1.0, 0.0);
        let marks = thin(point, &tool(SprayPattern::Thin, 0.2), &mut rng);
        let MarkShape::Line { start, end, width } = marks[0].shape else {
            panic!("thin must produce a line");
        };
        assert_eq!(start, Vec3::new(-0.2, 1.0, 0.0));
        assert!((end.x - 0.2).abs() < 1e-6);
        assert!((end.y - 1.0).abs() <= 0.1);
        assert_eq!(end.z, 0.0);
        assert!((width - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_streak_shape() {
        let mut rng = StdRng::seed_from_u64(13);
        let point = Vec3::new(0.0, 2.0, 0.0);
        let marks = streak(point, &tool(SprayPattern::Streak, 1.0), &mut rng);
        for mark in marks {
            let MarkShape::Rect {
                length,
                width,
                rotation,
            } = mark.shape
            else {
                panic!("streak must produce rects");
            };
            assert!((0.2..0.7).contains(&length));
            assert!((width - 0.1).abs() < 1e-6);
            assert!((0.0..PI).contains(&rotation));
            assert!((mark.position.x - point.x).abs() <= 0.25);
            assert_eq!(mark.position.y, point.y);
        }
    }

    #[test]
    fn test_seeded_output_is_reproducible() {
        let t = tool(SprayPattern::Spray, 0.1);
        let a = generate(Vec3::ZERO, &t, &mut StdRng::seed_from_u64(99));
        let b = generate(Vec3::ZERO, &t, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
