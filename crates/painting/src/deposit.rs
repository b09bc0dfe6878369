//! Deposit pipeline
//!
//! One deposit turns a resolved wall point into marks on the canvas:
//! 1. Snapshot the tool
//! 2. Run the pattern generator for the snapshot
//! 3. Append the marks to the canvas
//! 4. Roll for a drip below the last mark
//!
//! The pipeline owns the tool state and the random source so that a
//! seeded pipeline replays exactly.

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::canvas::Canvas;
use crate::constants::DRIP_OFFSET;
use crate::drip::DripPolicy;
use crate::generators::generate;
use crate::raycast::{PerspectiveView, Ray};
use crate::tool::{ToolConfig, ToolState};

/// What a single deposit did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepositOutcome {
    /// Wall point the deposit was made at
    pub point: Vec3,
    /// Marks added by the pattern (drip not included)
    pub marks_added: usize,
    /// Whether a drip was added as well
    pub dripped: bool,
}

/// Turns deposit requests into marks
pub struct DepositPipeline<R: Rng = StdRng> {
    tool: ToolState,
    drip_offset: f32,
    rng: R,
}

impl DepositPipeline<StdRng> {
    /// Pipeline with an entropy-seeded random source
    pub fn from_entropy(tool: ToolState) -> Self {
        Self::new(tool, StdRng::from_entropy())
    }

    /// Pipeline that replays the same marks for the same inputs
    pub fn seeded(tool: ToolState, seed: u64) -> Self {
        Self::new(tool, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DepositPipeline<R> {
    pub fn new(tool: ToolState, rng: R) -> Self {
        Self {
            tool,
            drip_offset: DRIP_OFFSET,
            rng,
        }
    }

    pub fn with_drip_offset(mut self, offset: f32) -> Self {
        self.drip_offset = offset;
        self
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn tool_mut(&mut self) -> &mut ToolState {
        &mut self.tool
    }

    /// Random source, for callers that need extra rolls (drip motion, filenames)
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Deposit paint at a wall point using the current tool
    pub fn deposit(&mut self, canvas: &mut Canvas, point: Vec3) -> DepositOutcome {
        let tool = self.tool.snapshot();
        self.deposit_with(canvas, point, &tool)
    }

    /// Deposit paint at a wall point with an explicit tool snapshot
    pub fn deposit_with(
        &mut self,
        canvas: &mut Canvas,
        point: Vec3,
        tool: &ToolConfig,
    ) -> DepositOutcome {
        let marks = generate(point, tool, &mut self.rng);
        let marks_added = marks.len();
        let anchor = marks.last().copied();
        canvas.insert(marks);

        let policy = DripPolicy {
            probability: tool.drip_probability,
            offset: self.drip_offset,
        };

        let mut dripped = false;
        if policy.roll(&mut self.rng) {
            match anchor {
                Some(anchor) => {
                    canvas.insert([policy.drip_below(&anchor, tool.size)]);
                    dripped = true;
                    debug!("Drip spawned below ({:.2}, {:.2})", point.x, point.y);
                }
                None => warn!("Drip rolled but the deposit placed no paint, skipping"),
            }
        }

        DepositOutcome {
            point,
            marks_added,
            dripped,
        }
    }

    /// Cast `ray` at the canvas wall and deposit at the hit, if any
    pub fn deposit_ray(&mut self, canvas: &mut Canvas, ray: &Ray) -> Option<DepositOutcome> {
        let point = canvas.wall()?.intersect(ray)?;
        Some(self.deposit(canvas, point))
    }

    /// Cast from the camera through an NDC point and deposit at the hit
    pub fn deposit_ndc(
        &mut self,
        canvas: &mut Canvas,
        view: &PerspectiveView,
        ndc: Vec2,
    ) -> Option<DepositOutcome> {
        let ray = view.ray_through(ndc);
        self.deposit_ray(canvas, &ray)
    }
}
