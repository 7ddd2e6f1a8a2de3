#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use map_shapes::shape::ShapeMap;

/// Distribution passes are linear in the attempt budget; short runs are stable enough.
pub fn distribute_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(30)
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(2))
}

/// Connection is quadratic in the shape count, so take fewer samples over a longer window.
pub fn connect_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(10)
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(5))
}

/// Throughput in shapes actually placed, which can fall short of the requested count.
pub fn shape_throughput(shapes: &ShapeMap) -> Throughput {
    Throughput::Elements(shapes.len().max(1) as u64)
}
