//! Event types and sinks for observing generation passes.
//!
//! This module defines [`GenerationEvent`] and a set of sinks to emit, collect, or
//! forward events while running [`crate::distribute::distribute_with_events`],
//! [`crate::connect::connect_with_events`], or [`crate::pipeline::compute_with_events`].
use glam::IVec2;

use crate::connect::ConnectPhase;
use crate::distribute::DistributeReport;

/// Describes events emitted by generation passes.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationEvent {
    /// Emitted when a distribution pass starts.
    DistributionStarted {
        /// Seed the random source was initialized with.
        seed: u64,
        /// Requested number of shapes.
        target_count: usize,
        /// Effective minimum separation after coercion.
        min_radius: u32,
    },

    /// Emitted when a shape is accepted.
    ShapePlaced {
        /// Key of the new shape.
        index: usize,
        /// Cell the shape occupies.
        position: IVec2,
    },

    /// Emitted when a distribution pass finishes.
    DistributionFinished {
        /// Counters for the pass.
        report: DistributeReport,
    },

    /// Emitted when an edge is added to the graph.
    EdgeAdded {
        /// Phase that added the edge.
        phase: ConnectPhase,
        a: usize,
        b: usize,
    },

    /// Emitted when maximum-degree repair drops an edge.
    EdgeRemoved { a: usize, b: usize },

    /// Emitted when a connection pass finishes.
    ConnectionFinished {
        /// Number of shapes in the graph.
        shape_count: usize,
        /// Number of surviving edges.
        edge_count: usize,
        /// Number of cells set in the output mask.
        occupied_cells: usize,
    },

    /// Non-fatal warning generated during a pass.
    Warning {
        /// Context string (e.g. pass name).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Discriminant of [`GenerationEvent`], used to filter what a sink receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenerationEventKind {
    DistributionStarted,
    ShapePlaced,
    DistributionFinished,
    EdgeAdded,
    EdgeRemoved,
    ConnectionFinished,
    Warning,
}

impl GenerationEvent {
    pub fn kind(&self) -> GenerationEventKind {
        match self {
            GenerationEvent::DistributionStarted { .. } => GenerationEventKind::DistributionStarted,
            GenerationEvent::ShapePlaced { .. } => GenerationEventKind::ShapePlaced,
            GenerationEvent::DistributionFinished { .. } => {
                GenerationEventKind::DistributionFinished
            }
            GenerationEvent::EdgeAdded { .. } => GenerationEventKind::EdgeAdded,
            GenerationEvent::EdgeRemoved { .. } => GenerationEventKind::EdgeRemoved,
            GenerationEvent::ConnectionFinished { .. } => GenerationEventKind::ConnectionFinished,
            GenerationEvent::Warning { .. } => GenerationEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`GenerationEvent`]s.
pub trait EventSink {
    /// Whether events of `kind` should be constructed and sent at all.
    fn wants(&self, _kind: GenerationEventKind) -> bool {
        true
    }

    fn send(&mut self, event: GenerationEvent);

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = GenerationEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn wants(&self, _kind: GenerationEventKind) -> bool {
        false
    }

    #[inline]
    fn send(&mut self, _event: GenerationEvent) {}
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(GenerationEvent),
{
    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects events in a `Vec`, optionally restricted to some kinds.
#[derive(Default)]
pub struct VecSink {
    events: Vec<GenerationEvent>,
    only: Option<Vec<GenerationEventKind>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            only: None,
        }
    }

    /// Collect only events whose kind is listed.
    pub fn filtered(kinds: impl Into<Vec<GenerationEventKind>>) -> Self {
        Self {
            events: Vec::new(),
            only: Some(kinds.into()),
        }
    }

    pub fn into_inner(self) -> Vec<GenerationEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[GenerationEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    fn wants(&self, kind: GenerationEventKind) -> bool {
        self.only.as_ref().is_none_or(|kinds| kinds.contains(&kind))
    }

    #[inline]
    fn send(&mut self, event: GenerationEvent) {
        if self.wants(event.kind()) {
            self.events.push(event);
        }
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn wants(&self, kind: GenerationEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }

    fn send(&mut self, event: GenerationEvent) {
        let kind = event.kind();
        for sink in &mut self.sinks {
            if sink.wants(kind) {
                sink.send(event.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(context: &str) -> GenerationEvent {
        GenerationEvent::Warning {
            context: context.into(),
            message: "msg".into(),
        }
    }

    #[test]
    fn unit_sink_wants_nothing() {
        assert!(!().wants(GenerationEventKind::Warning));
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(warning("a"));
        sink.send(warning("b"));
        assert_eq!(sink.len(), 2);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn filtered_sink_drops_other_kinds() {
        let mut sink = VecSink::filtered([GenerationEventKind::EdgeRemoved]);
        assert!(!sink.wants(GenerationEventKind::Warning));
        sink.send(warning("a"));
        sink.send(GenerationEvent::EdgeRemoved { a: 1, b: 2 });
        assert_eq!(sink.into_inner(), vec![GenerationEvent::EdgeRemoved { a: 1, b: 2 }]);
    }

    #[test]
    fn multi_sink_fans_out_events() {
        let mut multi = MultiSink::with_sinks(vec![
            VecSink::new(),
            VecSink::filtered([GenerationEventKind::ShapePlaced]),
        ]);
        assert!(multi.wants(GenerationEventKind::Warning));
        multi.send(warning("ctx"));
        let sinks = multi.into_inner();
        assert_eq!(sinks[0].len(), 1);
        assert!(sinks[1].is_empty());
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(warning("ctx"));
        assert_eq!(count, 1);
    }
}
