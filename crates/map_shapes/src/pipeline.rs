//! Full generation pass and the host-facing cached wrapper.
//!
//! [`compute`] runs distribution followed by connection and is pure: the same grid and
//! [`GenerationConfig`] always produce the same [`GenerationOutput`]. Hosts that poll for
//! output buffers use [`CachedGenerator`], which recomputes only when [`is_valid`] says
//! the cached mask no longer fits the requested grid.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::connect::{connect_with_events, ConnectConfig, Connection, Edge};
use crate::distribute::{distribute_with_events, DistributeConfig, Distribution};
use crate::error::Result;
use crate::events::EventSink;
use crate::grid::GridSize;
use crate::mask::Mask;
use crate::shape::ShapeMap;

/// Configuration for a full generation pass.
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GenerationConfig {
    /// Seed for the distribution random source.
    pub seed: u64,
    /// Distribution parameters.
    pub distribute: DistributeConfig,
    /// Connection parameters.
    pub connect: ConnectConfig,
}

impl GenerationConfig {
    /// Creates a new [`GenerationConfig`] with the given seed and default parameters.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    /// Sets the distribution parameters.
    pub fn with_distribute(mut self, distribute: DistributeConfig) -> Self {
        self.distribute = distribute;
        self
    }

    /// Sets the connection parameters.
    pub fn with_connect(mut self, connect: ConnectConfig) -> Self {
        self.connect = connect;
        self
    }

    /// Validates both stages, returning an error if either is invalid.
    pub fn validate(&self) -> Result<()> {
        self.distribute.validate()?;
        self.connect.validate()?;
        Ok(())
    }
}

/// Result of a full generation pass.
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// Shape cells only, as produced by distribution.
    pub shapes_mask: Mask,
    /// Connected shapes, their edges and the final corridor mask.
    pub connection: Connection,
}

impl GenerationOutput {
    /// Final mask with shapes and corridors.
    pub fn mask(&self) -> &Mask {
        &self.connection.mask
    }

    /// Shapes with populated neighbour sets.
    pub fn shapes(&self) -> &ShapeMap {
        &self.connection.shapes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.connection.edges
    }
}

/// Runs distribution then connection on `grid`.
pub fn compute(grid: GridSize, config: &GenerationConfig) -> Result<GenerationOutput> {
    compute_with_events(grid, config, &mut ())
}

pub fn compute_with_events(
    grid: GridSize,
    config: &GenerationConfig,
    sink: &mut dyn EventSink,
) -> Result<GenerationOutput> {
    grid.validate()?;
    config.validate()?;

    let Distribution { shapes, mask, .. } =
        distribute_with_events(grid, config.seed, &config.distribute, sink)?;
    let connection = connect_with_events(grid, Some(shapes), &config.connect, sink)?;

    Ok(GenerationOutput {
        shapes_mask: mask,
        connection,
    })
}

/// Whether `cache` holds a mask that can be served for `grid` as is.
pub fn is_valid(cache: Option<&Mask>, grid: GridSize) -> bool {
    cache.is_some_and(|mask| mask.is_sized_for(grid))
}

/// Pull-based wrapper that keeps the last [`GenerationOutput`] and recomputes it when the
/// requested grid no longer matches.
pub struct CachedGenerator {
    config: GenerationConfig,
    cached: Option<GenerationOutput>,
    passes: usize,
}

impl CachedGenerator {
    /// Creates a generator, validating the configuration.
    pub fn try_new(config: GenerationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn new(config: GenerationConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid generation config");
        Self {
            config,
            cached: None,
            passes: 0,
        }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Replaces the configuration and drops the cached output.
    pub fn set_config(&mut self, config: GenerationConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.invalidate();
        Ok(())
    }

    /// Drops the cached output so the next request recomputes.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Number of full passes run so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Cached output, if any, without recomputing.
    pub fn cached(&self) -> Option<&GenerationOutput> {
        self.cached.as_ref()
    }

    /// Returns the output for `grid`, recomputing first if the cache is absent or stale.
    pub fn request(&mut self, grid: GridSize) -> Result<&GenerationOutput> {
        self.request_with_events(grid, &mut ())
    }

    pub fn request_with_events(
        &mut self,
        grid: GridSize,
        sink: &mut dyn EventSink,
    ) -> Result<&GenerationOutput> {
        if is_valid(self.cached.as_ref().map(GenerationOutput::mask), grid) {
            debug!("Serving cached output for {} grid.", grid);
        } else {
            info!("Recomputing output for {} grid.", grid);
            self.cached = None;
            let output = compute_with_events(grid, &self.config, sink)?;
            self.passes += 1;
            self.cached = Some(output);
        }
        match self.cached.as_ref() {
            Some(output) => Ok(output),
            None => Err("cached output missing after compute".into()),
        }
    }

    /// Final mask for `grid`.
    pub fn request_output(&mut self, grid: GridSize) -> Result<&Mask> {
        self.request(grid).map(GenerationOutput::mask)
    }

    /// Connected shapes for `grid`.
    pub fn request_shapes(&mut self, grid: GridSize) -> Result<&ShapeMap> {
        self.request(grid).map(GenerationOutput::shapes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GenerationConfig {
        GenerationConfig::new(42)
            .with_distribute(DistributeConfig::new(6, 3))
            .with_connect(ConnectConfig::new(10).with_connections(1, 3))
    }

    fn grid(w: u32, h: u32) -> GridSize {
        GridSize::new(w, h).unwrap()
    }

    #[test]
    fn is_valid_requires_matching_mask() {
        let mask = Mask::new(grid(8, 8));
        assert!(!is_valid(None, grid(8, 8)));
        assert!(is_valid(Some(&mask), grid(8, 8)));
        assert!(!is_valid(Some(&mask), grid(8, 9)));
    }

    #[test]
    fn compute_is_deterministic() {
        let a = compute(grid(24, 24), &config()).unwrap();
        let b = compute(grid(24, 24), &config()).unwrap();
        assert_eq!(a.mask(), b.mask());
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn final_mask_covers_shapes_mask() {
        let out = compute(grid(32, 32), &config()).unwrap();
        for cell in out.shapes_mask.occupied_cells() {
            assert!(out.mask().is_occupied(cell));
        }
    }

    #[test]
    fn repeated_requests_reuse_cache() {
        let mut generator = CachedGenerator::try_new(config()).unwrap();
        let first = generator.request_output(grid(20, 20)).unwrap().clone();
        let second = generator.request_output(grid(20, 20)).unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(generator.passes(), 1);
    }

    #[test]
    fn resize_triggers_recompute() {
        let mut generator = CachedGenerator::try_new(config()).unwrap();
        generator.request_output(grid(20, 20)).unwrap();
        let resized = generator.request_output(grid(30, 25)).unwrap();
        assert_eq!(resized.len(), 750);
        assert_eq!(resized.grid(), grid(30, 25));
        assert_eq!(generator.passes(), 2);
    }

    #[test]
    fn set_config_invalidates() {
        let mut generator = CachedGenerator::try_new(config()).unwrap();
        generator.request(grid(20, 20)).unwrap();
        generator.set_config(config().with_distribute(DistributeConfig::new(2, 3))).unwrap();
        assert!(generator.cached().is_none());
        let shapes = generator.request_shapes(grid(20, 20)).unwrap();
        assert!(shapes.len() <= 2);
        assert_eq!(generator.passes(), 2);
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let bad = config().with_connect(ConnectConfig::new(5).with_connections(3, 1));
        assert!(CachedGenerator::try_new(bad.clone()).is_err());
        let mut generator = CachedGenerator::try_new(config()).unwrap();
        assert!(generator.set_config(bad).is_err());
        assert_eq!(generator.config(), &config());
    }
}
