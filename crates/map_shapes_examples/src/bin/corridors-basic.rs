use map_shapes::prelude::*;
use map_shapes_examples::{init_tracing, render_output_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let grid = GridSize::new(96, 64)?;
    let config = GenerationConfig::new(42)
        .with_distribute(DistributeConfig::new(18, 10))
        .with_connect(ConnectConfig::new(24).with_connections(1, 3));

    let output = compute(grid, &config)?;
    println!(
        "{} shapes, {} corridors, {} occupied cells",
        output.shapes().len(),
        output.edges().len(),
        output.mask().occupied_count()
    );

    render_output_to_png(&output, &RenderConfig::default(), "corridors-basic.png")?;
    Ok(())
}
