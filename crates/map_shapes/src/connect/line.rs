//! Integer line rasterization.
use glam::IVec2;

/// Cells visited by the midpoint (Bresenham) line from `p1` to `p2`, endpoints included.
///
/// The walk always steps along the dominant axis in increasing order, so `line(a, b)` and
/// `line(b, a)` visit the same cells in the same order.
pub fn line(p1: IVec2, p2: IVec2) -> Vec<IVec2> {
    let (mut x0, mut y0, mut x1, mut y1) = (p1.x, p1.y, p2.x, p2.y);

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let mut error = dx / 2;
    let ystep = if y0 < y1 { 1 } else { -1 };
    let mut y = y0;

    let mut cells = Vec::with_capacity(dx as usize + 1);
    for x in x0..=x1 {
        cells.push(if steep {
            IVec2::new(y, x)
        } else {
            IVec2::new(x, y)
        });
        error -= dy;
        if error < 0 {
            y += ystep;
            error += dx;
        }
    }
    cells
}
