use map_shapes::prelude::*;
use map_shapes_examples::{init_tracing, render_output_to_png, RenderConfig};

/// Same shapes, different degree bounds: sparse trees versus dense meshes.
fn main() -> anyhow::Result<()> {
    init_tracing();

    let grid = GridSize::new(80, 80)?;
    let distribute = DistributeConfig::new(24, 9);
    // Tinted backgrounds keep the three images apart when viewed side by side.
    let variants = [
        ("sparse", 1, 1, [16, 24, 40]),
        ("default", 2, 6, [24, 24, 32]),
        ("dense", 4, 8, [40, 20, 24]),
    ];

    for (name, min, max, background) in variants {
        let config = GenerationConfig::new(7)
            .with_distribute(distribute.clone())
            .with_connect(ConnectConfig::new(20).with_connections(min, max));
        let output = compute(grid, &config)?;

        let degrees: Vec<usize> = output.shapes().iter().map(Shape::degree).collect();
        println!(
            "{name}: {} edges, degrees {:?}",
            output.edges().len(),
            degrees
        );

        let path = format!("corridors-degree-bounds-{name}.png");
        let render = RenderConfig::default()
            .with_cell_px(6)
            .with_background(background);
        render_output_to_png(&output, &render, path)?;
    }
    Ok(())
}
