use map_shapes::prelude::*;
use map_shapes_examples::init_tracing;

/// Polls a cached generator the way a host graph would, resizing in between.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = GenerationConfig::new(1234)
        .with_distribute(DistributeConfig::new(10, 6))
        .with_connect(ConnectConfig::default());
    let mut generator = CachedGenerator::try_new(config)?;

    let sizes = [(48, 48), (48, 48), (64, 32), (64, 32), (48, 48)];
    for (w, h) in sizes {
        let grid = GridSize::new(w, h)?;
        let (len, occupied) = {
            let mask = generator.request_output(grid)?;
            (mask.len(), mask.occupied_count())
        };
        println!(
            "{grid}: {len} cells, {occupied} occupied (passes so far: {})",
            generator.passes()
        );
    }

    let mut sink = VecSink::filtered([GenerationEventKind::Warning]);
    generator.invalidate();
    generator.request_with_events(GridSize::new(16, 16)?, &mut sink)?;
    for event in sink.into_inner() {
        if let GenerationEvent::Warning { context, message } = event {
            println!("warning [{context}]: {message}");
        }
    }
    Ok(())
}
