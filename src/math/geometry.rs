//! Polygon filling with a regular grid of points.
//!
//! Inclusion follows the even-odd rule with half-open edge crossings, so a
//! grid point is inside when a vertical ray from it crosses the outline an
//! odd number of times. [`fill_polygon`] first tries a column scan that
//! only handles outlines crossing each grid column exactly twice, and falls
//! back to testing every grid point otherwise. Both paths select the same
//! points.

/// Regular grid covering a bounding box, sampled at cell centres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub x0: f64,
    pub y0: f64,
    pub step: f64,
    pub nx: usize,
    pub ny: usize,
}

impl Grid {
    /// Grid over the outline's bounding box with `n_long` cells along the
    /// longer side. `None` if the outline has no extent.
    #[must_use]
    pub fn covering(xs: &[f64], ys: &[f64], n_long: usize) -> Option<Self> {
        let (min_x, max_x) = super::stats::min_max(xs)?;
        let (min_y, max_y) = super::stats::min_max(ys)?;
        let span = (max_x - min_x).max(max_y - min_y);
        if !(span > 0.0) || n_long == 0 {
            return None;
        }
        let step = span / n_long as f64;
        let nx = (((max_x - min_x) / step).ceil() as usize).max(1);
        let ny = (((max_y - min_y) / step).ceil() as usize).max(1);
        Some(Self {
            x0: min_x + step / 2.0,
            y0: min_y + step / 2.0,
            step,
            nx,
            ny,
        })
    }

    #[inline]
    #[must_use]
    pub fn x(&self, i: usize) -> f64 {
        self.x0 + self.step * i as f64
    }

    #[inline]
    #[must_use]
    pub fn y(&self, j: usize) -> f64 {
        self.y0 + self.step * j as f64
    }
}

/// y positions where the closed outline crosses the vertical line at `x`,
/// sorted ascending.
fn column_crossings(xs: &[f64], ys: &[f64], x: f64) -> Vec<f64> {
    let n = xs.len();
    let mut crossings = Vec::new();
    for i in 0..n {
        let j = (i + 1) % n;
        let (xa, ya, xb, yb) = (xs[i], ys[i], xs[j], ys[j]);
        if (xa <= x) != (xb <= x) {
            crossings.push(ya + (yb - ya) * (x - xa) / (xb - xa));
        }
    }
    crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    crossings
}

/// Even-odd inclusion test for a single point.
#[must_use]
pub fn point_in_polygon(xs: &[f64], ys: &[f64], px: f64, py: f64) -> bool {
    column_crossings(xs, ys, px)
        .iter()
        .filter(|&&cy| cy > py)
        .count()
        % 2
        == 1
}

/// Grid points inside the outline, tested one by one.
#[must_use]
pub fn fill_polygon_exhaustive(xs: &[f64], ys: &[f64], grid: &Grid) -> (Vec<f64>, Vec<f64>) {
    let (mut inside_x, mut inside_y) = (Vec::new(), Vec::new());
    for i in 0..grid.nx {
        let px = grid.x(i);
        for j in 0..grid.ny {
            let py = grid.y(j);
            if point_in_polygon(xs, ys, px, py) {
                inside_x.push(px);
                inside_y.push(py);
            }
        }
    }
    (inside_x, inside_y)
}

/// Grid points inside the outline when every grid column crosses it exactly
/// twice (or not at all). `None` as soon as a column doesn't.
#[must_use]
pub fn fill_polygon_columns(xs: &[f64], ys: &[f64], grid: &Grid) -> Option<(Vec<f64>, Vec<f64>)> {
    let (mut inside_x, mut inside_y) = (Vec::new(), Vec::new());
    for i in 0..grid.nx {
        let px = grid.x(i);
        let crossings = column_crossings(xs, ys, px);
        match crossings.as_slice() {
            [] => {}
            &[lo, hi] => {
                for j in 0..grid.ny {
                    let py = grid.y(j);
                    if py >= lo && py < hi {
                        inside_x.push(px);
                        inside_y.push(py);
                    }
                }
            }
            _ => return None,
        }
    }
    Some((inside_x, inside_y))
}

/// Grid points inside the outline.
#[must_use]
pub fn fill_polygon(xs: &[f64], ys: &[f64], grid: &Grid) -> (Vec<f64>, Vec<f64>) {
    fill_polygon_columns(xs, ys, grid).unwrap_or_else(|| fill_polygon_exhaustive(xs, ys, grid))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> (Vec<f64>, Vec<f64>) {
        (vec![0.0, 4.0, 4.0, 0.0], vec![0.0, 0.0, 4.0, 4.0])
    }

    /// C shape: two arms joined on the left, open to the right.
    fn c_shape() -> (Vec<f64>, Vec<f64>) {
        (
            vec![0.0, 6.0, 6.0, 2.0, 2.0, 6.0, 6.0, 0.0],
            vec![0.0, 0.0, 2.0, 2.0, 4.0, 4.0, 6.0, 6.0],
        )
    }

    #[test]
    fn test_point_in_polygon() {
        let (xs, ys) = square();
        assert!(point_in_polygon(&xs, &ys, 2.0, 2.0));
        assert!(!point_in_polygon(&xs, &ys, 5.0, 2.0));
        assert!(!point_in_polygon(&xs, &ys, 2.0, -1.0));

        let (xs, ys) = c_shape();
        assert!(point_in_polygon(&xs, &ys, 1.0, 3.0));
        assert!(!point_in_polygon(&xs, &ys, 3.0, 3.0));
        assert!(point_in_polygon(&xs, &ys, 3.0, 1.0));
        assert!(point_in_polygon(&xs, &ys, 3.0, 5.0));
    }

    #[test]
    fn test_grid_covering() {
        let (xs, ys) = (vec![0.0, 10.0, 10.0, 0.0], vec![0.0, 0.0, 2.0, 2.0]);
        let grid = Grid::covering(&xs, &ys, 10).unwrap();
        assert_eq!(grid.nx, 10);
        assert_eq!(grid.ny, 2);
        assert!((grid.step - 1.0).abs() < 1e-12);
        assert!(Grid::covering(&[1.0, 1.0], &[2.0, 2.0], 10).is_none());
    }

    #[test]
    fn test_convex_fill_matches_exhaustive() {
        let (xs, ys) = square();
        let grid = Grid::covering(&xs, &ys, 8).unwrap();
        let fast = fill_polygon_columns(&xs, &ys, &grid).unwrap();
        let slow = fill_polygon_exhaustive(&xs, &ys, &grid);
        assert_eq!(fast, slow);
        assert_eq!(fast.0.len(), 64);
    }

    #[test]
    fn test_concave_falls_back() {
        let (xs, ys) = c_shape();
        let grid = Grid::covering(&xs, &ys, 12).unwrap();
        assert!(fill_polygon_columns(&xs, &ys, &grid).is_none());

        let filled = fill_polygon(&xs, &ys, &grid);
        assert_eq!(filled, fill_polygon_exhaustive(&xs, &ys, &grid));
        // area 36 - 8 = 28 at step 0.5 -> 112 cells
        assert_eq!(filled.0.len(), 112);
    }
}
