use std::collections::HashSet;

use glam::IVec2;
use map_shapes::prelude::*;

const SEED: u64 = 20_240_611;

fn scenario() -> GenerationConfig {
    GenerationConfig::new(SEED)
        .with_distribute(DistributeConfig::new(5, 3))
        .with_connect(ConnectConfig::new(10).with_connections(2, 3))
}

fn grid() -> GridSize {
    GridSize::new(20, 20).unwrap()
}

#[test]
fn corridor_scenario_respects_all_invariants() {
    let mut sink = VecSink::filtered([GenerationEventKind::EdgeRemoved]);
    let out = compute_with_events(grid(), &scenario(), &mut sink).unwrap();
    let shapes: Vec<&Shape> = out.shapes().iter().collect();

    assert!(!shapes.is_empty());
    assert!(shapes.len() <= 5);

    for (i, a) in shapes.iter().enumerate() {
        assert_eq!(out.shapes().key_of(a.position()), Some(a.index()));
        for b in &shapes[i + 1..] {
            assert!(distance_squared(a.position(), b.position()) >= 9);
        }
    }

    // Shapes left below two connections lost an edge to max-degree repair.
    let trimmed: HashSet<usize> = sink
        .into_inner()
        .into_iter()
        .flat_map(|event| match event {
            GenerationEvent::EdgeRemoved { a, b } => vec![a, b],
            _ => Vec::new(),
        })
        .collect();
    for shape in &shapes {
        assert!(shape.degree() <= 3);
        if shape.degree() < 2 && shapes.len() > 2 {
            assert!(trimmed.contains(&shape.index()));
        }
        for &n in shape.neighbours() {
            assert!(out.shapes().get(n).unwrap().is_connected_to(shape.index()));
        }
    }

    let mut expected: HashSet<IVec2> = shapes.iter().map(|s| s.position()).collect();
    for edge in out.edges() {
        let a = out.shapes().get(edge.a).unwrap().position();
        let b = out.shapes().get(edge.b).unwrap().position();
        expected.extend(line(a, b));
    }
    let actual: HashSet<IVec2> = out.mask().occupied_cells().collect();
    assert_eq!(actual, expected);
    assert_eq!(out.mask().len(), 400);
    assert!(out
        .mask()
        .as_slice()
        .iter()
        .all(|v| *v == 0.0 || *v == 1.0));
}

#[test]
fn two_shapes_cannot_reach_three_connections() {
    let shapes = ShapeMap::from_cells(grid(), [IVec2::new(4, 4), IVec2::new(15, 15)]).unwrap();
    let config = ConnectConfig::new(2).with_connections(3, 5);
    let result = connect(grid(), Some(shapes), &config).unwrap();
    assert_eq!(result.edges.len(), 1);
    for shape in result.shapes.iter() {
        assert_eq!(shape.degree(), 1);
    }
}

#[test]
fn stale_buffer_is_recomputed_after_resize() {
    let mut generator = CachedGenerator::try_new(scenario()).unwrap();
    let small = generator.request_output(grid()).unwrap().clone();
    assert_eq!(small.len(), 400);

    let larger = GridSize::new(40, 30).unwrap();
    assert!(!is_valid(Some(&small), larger));
    let resized = generator.request_output(larger).unwrap();
    assert_eq!(resized.len(), 1200);
    assert!(resized.occupied_count() > 0);

    let back = generator.request_output(grid()).unwrap();
    assert_eq!(back, &small);
    assert_eq!(generator.passes(), 3);
}

#[test]
fn distribution_events_bracket_connection_events() {
    let mut sink = VecSink::new();
    compute_with_events(grid(), &scenario(), &mut sink).unwrap();
    let kinds: Vec<_> = sink.as_slice().iter().map(GenerationEvent::kind).collect();
    assert_eq!(kinds.first(), Some(&GenerationEventKind::DistributionStarted));
    assert_eq!(kinds.last(), Some(&GenerationEventKind::ConnectionFinished));
    let finished = kinds
        .iter()
        .position(|k| *k == GenerationEventKind::DistributionFinished)
        .unwrap();
    assert!(kinds[..finished]
        .iter()
        .all(|k| *k != GenerationEventKind::EdgeAdded));
}
