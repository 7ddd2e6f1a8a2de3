#![forbid(unsafe_code)]
//! map_shapes: separated shape placement and degree-bounded corridor graphs on a grid.
//!
//! Modules:
//! - distribute: rejection sampling of shapes with a minimum separation
//! - connect: radius graph, min/max degree repair, and Bresenham rasterization
//! - pipeline: full pass plus a cached wrapper for hosts that poll for output
//! - grid, mask, shape: the data model shared by both stages
//! - events: observation hooks for generation passes
//!
//! For examples and docs, see README and docs.rs.
pub mod connect;
pub mod distribute;
pub mod error;
pub mod events;
pub mod grid;
pub mod mask;
pub mod pipeline;
pub mod shape;

/// Convenient re-exports for common types. Import with `use map_shapes::prelude::*;`.
pub mod prelude {
    pub use crate::connect::{
        connect, connect_with_events, line, rasterize, ConnectConfig, ConnectPhase, Connection,
        Edge, ShapeGraph,
    };
    pub use crate::distribute::{
        distribute, distribute_with_events, DistributeConfig, DistributeReport, Distribution,
        DEFAULT_MAX_ATTEMPTS, PLACEMENT_WINDOW_MAX, PLACEMENT_WINDOW_MIN,
    };
    pub use crate::error::{Error, Result};
    pub use crate::events::{
        EventSink, FnSink, GenerationEvent, GenerationEventKind, MultiSink, VecSink,
    };
    pub use crate::grid::GridSize;
    pub use crate::mask::Mask;
    pub use crate::pipeline::{
        compute, compute_with_events, is_valid, CachedGenerator, GenerationConfig,
        GenerationOutput,
    };
    pub use crate::shape::{distance_squared, Shape, ShapeMap};
}
