//! Shape distribution by bounded-retry rejection sampling.
//!
//! Candidates are drawn uniformly from the central window of the grid (see
//! [`PLACEMENT_WINDOW_MIN`] and [`PLACEMENT_WINDOW_MAX`]) and rejected when their cell is
//! taken or when an existing shape lies strictly closer than the minimum radius.
//! The pass stops after `max_shape_count` placements or once the attempt budget runs
//! out; returning fewer shapes than requested is a normal outcome.
use glam::IVec2;
use rand::rngs::StdRng;
use rand::{Rng as RngCore, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::events::{EventSink, GenerationEvent, GenerationEventKind};
use crate::grid::GridSize;
use crate::mask::Mask;
use crate::shape::{Shape, ShapeMap};

/// Lower bound of the placement window as a fraction of each axis.
///
/// Shapes never start within the outer eighth of the grid, which leaves room for
/// corridors to bend around them.
pub const PLACEMENT_WINDOW_MIN: f64 = 0.125;

/// Upper bound (exclusive) of the placement window as a fraction of each axis.
pub const PLACEMENT_WINDOW_MAX: f64 = 0.875;

/// Default number of candidate draws before a pass gives up.
pub const DEFAULT_MAX_ATTEMPTS: u64 = 10_000_000;

/// Generate a random float in the range [0, 1).
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f64 {
    (rng.next_u32() as f64) / ((u32::MAX as f64) + 1.0)
}

/// Maps `t` in [0, 1) onto the placement window of an axis of length `extent`.
#[inline]
fn window_coordinate(extent: u32, t: f64) -> i32 {
    let lo = extent as f64 * PLACEMENT_WINDOW_MIN;
    let hi = extent as f64 * PLACEMENT_WINDOW_MAX;
    (lo + (hi - lo) * t).floor() as i32
}

/// Parameters for a distribution pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DistributeConfig {
    /// Upper bound on the number of shapes placed.
    pub max_shape_count: usize,
    /// Minimum Euclidean distance between any two shapes. Values below 1 act as 1.
    pub min_radius: u32,
    /// Candidate draws allowed before the pass stops.
    pub max_attempts: u64,
}

impl Default for DistributeConfig {
    fn default() -> Self {
        Self {
            max_shape_count: 10,
            min_radius: 1,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl DistributeConfig {
    /// Creates a new [`DistributeConfig`] with the given count and separation.
    pub fn new(max_shape_count: usize, min_radius: u32) -> Self {
        Self {
            max_shape_count,
            min_radius,
            ..Default::default()
        }
    }

    /// Sets the attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Minimum radius after coercion to at least one cell.
    pub fn effective_min_radius(&self) -> u32 {
        self.min_radius.max(1)
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.max_shape_count > 0 && self.max_attempts == 0 {
            return Err(Error::InvalidConfig(
                "max_attempts must be > 0 when shapes are requested".into(),
            ));
        }
        Ok(())
    }
}

/// Counters describing how a distribution pass went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistributeReport {
    /// Shapes requested.
    pub requested: usize,
    /// Shapes placed.
    pub placed: usize,
    /// Candidate draws consumed.
    pub attempts: u64,
    /// Candidates that landed on an occupied cell.
    pub rejected_occupied: u64,
    /// Candidates that landed too close to an existing shape.
    pub rejected_too_close: u64,
}

impl DistributeReport {
    /// Whether the pass ended with fewer shapes than requested.
    pub fn is_undersupplied(&self) -> bool {
        self.placed < self.requested
    }
}

/// Output of a distribution pass.
#[derive(Debug, Clone)]
pub struct Distribution {
    /// Placed shapes, unconnected.
    pub shapes: ShapeMap,
    /// Mask with each shape cell occupied.
    pub mask: Mask,
    /// Pass counters.
    pub report: DistributeReport,
}

/// Runs a distribution pass seeded with `seed`.
pub fn distribute(grid: GridSize, seed: u64, config: &DistributeConfig) -> Result<Distribution> {
    distribute_with_events(grid, seed, config, &mut ())
}

pub fn distribute_with_events(
    grid: GridSize,
    seed: u64,
    config: &DistributeConfig,
    sink: &mut dyn EventSink,
) -> Result<Distribution> {
    grid.validate()?;
    config.validate()?;

    if sink.wants(GenerationEventKind::DistributionStarted) {
        sink.send(GenerationEvent::DistributionStarted {
            seed,
            target_count: config.max_shape_count,
            min_radius: config.effective_min_radius(),
        });
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let (shapes, report) = place_shapes(grid, config, &mut rng, sink);

    info!(
        "Distributed {}/{} shapes on {} grid in {} attempts.",
        report.placed, report.requested, grid, report.attempts
    );
    debug!(
        "Rejections: {} occupied, {} too close.",
        report.rejected_occupied, report.rejected_too_close
    );
    if report.is_undersupplied() {
        warn!(
            "Attempt budget of {} exhausted after placing {} of {} shapes.",
            config.max_attempts, report.placed, report.requested
        );
        if sink.wants(GenerationEventKind::Warning) {
            sink.send(GenerationEvent::Warning {
                context: "distribute".into(),
                message: format!(
                    "placed {} of {} shapes before the attempt budget ran out",
                    report.placed, report.requested
                ),
            });
        }
    }

    let mut mask = Mask::new(grid);
    mask.mark_all(shapes.iter().map(Shape::position));

    if sink.wants(GenerationEventKind::DistributionFinished) {
        sink.send(GenerationEvent::DistributionFinished { report });
    }

    Ok(Distribution {
        shapes,
        mask,
        report,
    })
}

/// Rejection sampling loop over an already seeded random source.
pub(crate) fn place_shapes(
    grid: GridSize,
    config: &DistributeConfig,
    rng: &mut dyn RngCore,
    sink: &mut dyn EventSink,
) -> (ShapeMap, DistributeReport) {
    let min_radius = config.effective_min_radius();
    let mut shapes = ShapeMap::new(grid);
    let mut report = DistributeReport {
        requested: config.max_shape_count,
        ..Default::default()
    };

    while shapes.len() < config.max_shape_count && report.attempts < config.max_attempts {
        report.attempts += 1;

        let x = window_coordinate(grid.width(), rand01(rng));
        let y = window_coordinate(grid.height(), rand01(rng));
        let cell = IVec2::new(x, y);
        debug_assert!(grid.contains(cell), "window cell {cell} outside {grid} grid");

        let Some(shape) = Shape::new(grid, cell) else {
            continue;
        };
        if shapes.contains_key(shape.index()) {
            report.rejected_occupied += 1;
            continue;
        }
        if shapes.any_within(cell, min_radius) {
            report.rejected_too_close += 1;
            continue;
        }

        let index = shape.index();
        shapes.insert(shape);
        if sink.wants(GenerationEventKind::ShapePlaced) {
            sink.send(GenerationEvent::ShapePlaced {
                index,
                position: cell,
            });
        }
    }

    report.placed = shapes.len();
    (shapes, report)
}
