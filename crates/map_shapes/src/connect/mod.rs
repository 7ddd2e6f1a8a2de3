//! Degree-bounded connection of distributed shapes and corridor rasterization.
//!
//! A pass runs four phases in a fixed order over one [`ShapeGraph`]:
//!
//! 1. every pair within `radius` is connected;
//! 2. shapes below `min_connections` are connected to their nearest unconnected shape,
//!    regardless of distance, until satisfied or no candidate remains;
//! 3. shapes above `max_connections` drop their farthest neighbour until satisfied;
//! 4. surviving edges are rasterized with [`line`] into the output mask, together with
//!    every shape cell.
//!
//! Later phases see the neighbour sets left by earlier ones, so reordering them changes
//! the result.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::events::{EventSink, GenerationEvent, GenerationEventKind};
use crate::grid::GridSize;
use crate::mask::Mask;
use crate::shape::{Shape, ShapeMap};

pub mod graph;
pub mod line;

pub use graph::{Edge, ShapeGraph};
pub use line::line;

/// Phase of a connection pass that added an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectPhase {
    /// Pair within the connection radius.
    Radius,
    /// Nearest-neighbour link added for a shape below the minimum degree.
    MinDegree,
}

/// Parameters for a connection pass.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConnectConfig {
    /// Pairs at most this far apart are connected in the first phase.
    pub radius: u32,
    /// Degree every shape is topped up to, when enough shapes exist.
    pub min_connections: usize,
    /// Degree no shape exceeds after the pass.
    pub max_connections: usize,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            radius: 15,
            min_connections: 2,
            max_connections: 6,
        }
    }
}

impl ConnectConfig {
    /// Creates a new [`ConnectConfig`] with the given connection radius.
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            ..Default::default()
        }
    }

    /// Sets the minimum and maximum degree.
    pub fn with_connections(mut self, min_connections: usize, max_connections: usize) -> Self {
        self.min_connections = min_connections;
        self.max_connections = max_connections;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.max_connections < self.min_connections {
            return Err(Error::InvalidConfig(format!(
                "max_connections ({}) must be >= min_connections ({})",
                self.max_connections, self.min_connections
            )));
        }
        Ok(())
    }
}

/// Output of a connection pass.
#[derive(Debug, Clone)]
pub struct Connection {
    /// Shapes with their final neighbour sets.
    pub shapes: ShapeMap,
    /// Surviving edges.
    pub edges: Vec<Edge>,
    /// Mask with shape cells and corridor cells occupied.
    pub mask: Mask,
}

/// Connects `shapes` on `grid`. `None` or an empty map yields an all-empty mask.
pub fn connect(
    grid: GridSize,
    shapes: Option<ShapeMap>,
    config: &ConnectConfig,
) -> Result<Connection> {
    connect_with_events(grid, shapes, config, &mut ())
}

pub fn connect_with_events(
    grid: GridSize,
    shapes: Option<ShapeMap>,
    config: &ConnectConfig,
    sink: &mut dyn EventSink,
) -> Result<Connection> {
    grid.validate()?;
    config.validate()?;

    let Some(shapes) = shapes else {
        debug!("No shapes supplied; producing an empty mask.");
        return Ok(Connection {
            shapes: ShapeMap::new(grid),
            edges: Vec::new(),
            mask: Mask::new(grid),
        });
    };
    if shapes.grid() != grid {
        return Err(Error::GridMismatch {
            expected: grid,
            found: shapes.grid(),
        });
    }

    let mut graph = ShapeGraph::new(shapes);
    let radius_edges = connect_within_radius(&mut graph, config.radius, sink);
    let repair_edges = repair_min_degree(&mut graph, config.min_connections, sink);
    let removed_edges = repair_max_degree(&mut graph, config.max_connections, sink);
    debug!(
        "Edges: {} within radius, {} added for min degree, {} removed for max degree.",
        radius_edges, repair_edges, removed_edges
    );

    let under_connected = graph
        .shapes()
        .iter()
        .filter(|s| s.degree() < config.min_connections)
        .count();
    if under_connected > 0 {
        warn!(
            "{} of {} shapes have fewer than {} connections.",
            under_connected,
            graph.shapes().len(),
            config.min_connections
        );
        if sink.wants(GenerationEventKind::Warning) {
            sink.send(GenerationEvent::Warning {
                context: "connect".into(),
                message: format!(
                    "{under_connected} shapes are below the minimum of {} connections",
                    config.min_connections
                ),
            });
        }
    }

    let (shapes, edges) = graph.into_parts();
    let mask = rasterize(&shapes, &edges);

    info!(
        "Connected {} shapes with {} edges; {} cells occupied.",
        shapes.len(),
        edges.len(),
        mask.occupied_count()
    );
    if sink.wants(GenerationEventKind::ConnectionFinished) {
        sink.send(GenerationEvent::ConnectionFinished {
            shape_count: shapes.len(),
            edge_count: edges.len(),
            occupied_cells: mask.occupied_count(),
        });
    }

    Ok(Connection {
        shapes,
        edges,
        mask,
    })
}

fn emit_added(sink: &mut dyn EventSink, phase: ConnectPhase, a: usize, b: usize) {
    if sink.wants(GenerationEventKind::EdgeAdded) {
        sink.send(GenerationEvent::EdgeAdded { phase, a, b });
    }
}

/// Phase 1: connects every unordered pair at most `radius` apart.
fn connect_within_radius(
    graph: &mut ShapeGraph,
    radius: u32,
    sink: &mut dyn EventSink,
) -> usize {
    let r2 = radius as i64 * radius as i64;
    let shapes: Vec<&Shape> = graph.shapes().iter().collect();
    let mut pairs = Vec::new();
    for (i, a) in shapes.iter().enumerate() {
        for b in &shapes[i + 1..] {
            if a.distance_squared_to(b) <= r2 {
                pairs.push((a.index(), b.index()));
            }
        }
    }

    let mut added = 0;
    for (a, b) in pairs {
        if graph.add_edge(a, b) {
            emit_added(sink, ConnectPhase::Radius, a, b);
            added += 1;
        }
    }
    added
}

/// Nearest shape not yet connected to `key`; the first in insertion order wins ties.
fn nearest_unconnected(shapes: &ShapeMap, key: usize) -> Option<usize> {
    let shape = shapes.get(key)?;
    let mut best: Option<(usize, i64)> = None;
    for other in shapes.iter() {
        if other.index() == key || shape.is_connected_to(other.index()) {
            continue;
        }
        let d = shape.distance_squared_to(other);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((other.index(), d));
        }
    }
    best.map(|(index, _)| index)
}

/// Farthest neighbour of `key`; the earliest linked wins ties.
fn farthest_neighbour(shapes: &ShapeMap, key: usize) -> Option<usize> {
    let shape = shapes.get(key)?;
    let mut best: Option<(usize, i64)> = None;
    for &index in shape.neighbours() {
        let Some(neighbour) = shapes.get(index) else {
            continue;
        };
        let d = shape.distance_squared_to(neighbour);
        if best.is_none_or(|(_, best_d)| d > best_d) {
            best = Some((index, d));
        }
    }
    best.map(|(index, _)| index)
}

/// Phase 2: tops every shape up to `min_connections` with nearest-neighbour links.
///
/// Each iteration either adds a new neighbour or stops, so the loop per shape runs at
/// most `len - 1` times.
fn repair_min_degree(
    graph: &mut ShapeGraph,
    min_connections: usize,
    sink: &mut dyn EventSink,
) -> usize {
    let keys: Vec<usize> = graph.shapes().keys().collect();
    let mut added = 0;
    for key in keys {
        while graph.degree(key) < min_connections {
            let Some(other) = nearest_unconnected(graph.shapes(), key) else {
                break;
            };
            if !graph.add_edge(key, other) {
                break;
            }
            emit_added(sink, ConnectPhase::MinDegree, key, other);
            added += 1;
        }
    }
    added
}

/// Phase 3: drops farthest neighbours until no shape exceeds `max_connections`.
fn repair_max_degree(
    graph: &mut ShapeGraph,
    max_connections: usize,
    sink: &mut dyn EventSink,
) -> usize {
    let keys: Vec<usize> = graph.shapes().keys().collect();
    let mut removed = 0;
    for key in keys {
        while graph.degree(key) > max_connections {
            let Some(other) = farthest_neighbour(graph.shapes(), key) else {
                break;
            };
            if !graph.remove_edge(key, other) {
                break;
            }
            if sink.wants(GenerationEventKind::EdgeRemoved) {
                sink.send(GenerationEvent::EdgeRemoved { a: key, b: other });
            }
            removed += 1;
        }
    }
    removed
}

/// Phase 4: marks every shape cell and every cell on each edge's line.
pub fn rasterize(shapes: &ShapeMap, edges: &[Edge]) -> Mask {
    let mut mask = Mask::new(shapes.grid());
    mask.mark_all(shapes.iter().map(Shape::position));
    for edge in edges {
        let (Some(a), Some(b)) = (shapes.get(edge.a), shapes.get(edge.b)) else {
            continue;
        };
        mask.mark_all(line(a.position(), b.position()));
    }
    mask
}
