use std::cell::OnceCell;

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::coil::Coil;
use crate::field::{self, CurrentPath, DiscreteFieldReport, SolverChoice, CHESS_SQUARE_SIZE};
use crate::geo_3d::{GeoVector, Point};

/// Default observer grid resolution along each axis.
pub const DEFAULT_RESOLUTION: usize = 100;

/// Default grid extent, two board squares.
pub const DEFAULT_BOUND: f64 = CHESS_SQUARE_SIZE * 2.0;

/// Full field report: the discrete sensors plus two observer grids.
///
/// Both grids are anchored at the coil center `(cx, cy)`.
/// The top grid lies in the observer plane, spanning `cx + [0, bound]` and `cy + [0, bound]`.
/// The side grid is the vertical plane through the centerline `y = cy`, spanning `cx + [0, bound]`
/// and `[-bound / 2, bound / 2]` in height.
/// Grid rows run along the second axis, columns along `x`.
/// Grid fields are only solved when first asked for, then kept.
pub struct GridFieldReport<'a> {
    pub discrete: DiscreteFieldReport,
    pub resolution: usize,
    pub bound: f64,
    pub grid_step: Vec<f64>,
    pub top_observer_grid: Vec<Vec<Point>>,
    pub side_observer_grid: Vec<Vec<Point>>,

    path: CurrentPath,
    solver: &'a SolverChoice,
    top_field: OnceCell<Vec<Vec<GeoVector>>>,
    side_field: OnceCell<Vec<Vec<GeoVector>>>,
}
impl<'a> GridFieldReport<'a> {
    /// Run the discrete sensors and lay out both observer grids.
    pub fn new(
        coil: &Coil,
        solver: &'a SolverChoice,
        resolution: usize,
        bound: f64,
        observer_height: f64,
    ) -> field::ProcResult<Self> {
        if resolution == 0 {
            field::err_str("Grid resolution must be at least 1")?;
        }
        if !(bound > 0.0) || !bound.is_finite() {
            field::err_str(&format!("Grid bound must be positive, got {bound}"))?;
        }

        let discrete = DiscreteFieldReport::new(coil, solver, observer_height)?;
        let grid_step = linspace(0.0, bound, resolution);

        let (cx, cy) = (coil.center.x, coil.center.y);

        let top_observer_grid = grid_step.iter()
            .map(|&y| grid_step.iter().map(|&x| Point::new(cx + x, cy + y, observer_height)).collect())
            .collect();
        let side_observer_grid = grid_step.iter()
            .map(|&z| grid_step.iter().map(|&x| Point::new(cx + x, cy, z - bound / 2.0)).collect())
            .collect();

        Ok(GridFieldReport{
            discrete,
            resolution,
            bound,
            grid_step,
            top_observer_grid,
            side_observer_grid,
            path: CurrentPath::from_coil(coil),
            solver,
            top_field: OnceCell::new(),
            side_field: OnceCell::new(),
        })
    }

    /// Field over the top grid.
    pub fn b_top(&self) -> field::ProcResult<&Vec<Vec<GeoVector>>> {
        self.cached_grid(&self.top_field, &self.top_observer_grid, "top")
    }

    /// Field over the side grid.
    pub fn b_side(&self) -> field::ProcResult<&Vec<Vec<GeoVector>>> {
        self.cached_grid(&self.side_field, &self.side_observer_grid, "side")
    }

    /// |B| statistics for both grids.
    pub fn summary(&self) -> field::ProcResult<(GridSummary, GridSummary)> {
        Ok((GridSummary::of(self.b_top()?), GridSummary::of(self.b_side()?)))
    }

    /// Serializable copy of both grids (solving them if needed).
    pub fn data(&self) -> field::ProcResult<GridFieldData> {
        Ok(GridFieldData{
            resolution: self.resolution,
            bound: self.bound,
            observer_height: self.discrete.observer_height,
            grid_step: self.grid_step.clone(),
            b_top: self.b_top()?.clone(),
            b_side: self.b_side()?.clone(),
        })
    }

    fn cached_grid<'s>(
        &'s self,
        cell: &'s OnceCell<Vec<Vec<GeoVector>>>,
        observers: &[Vec<Point>],
        label: &str,
    ) -> field::ProcResult<&'s Vec<Vec<GeoVector>>> {
        if let Some(grid) = cell.get() {
            return Ok(grid);
        }
        debug!("Solving {} grid ({} x {} observers)...", label, self.resolution, self.resolution);
        let mut grid = Vec::with_capacity(observers.len());
        for row in observers {
            grid.push(self.solver.compute_b(&self.path, row)?);
        }
        Ok(cell.get_or_init(|| grid))
    }
}

/// Minimum, maximum and mean of |B| over a grid, in Tesla.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}
impl GridSummary {
    pub fn of(grid: &[Vec<GeoVector>]) -> Self {
        let magnitudes: Vec<f64> = grid.iter().flatten().map(|b| b.norm()).collect();
        GridSummary{
            min: magnitudes.iter().copied().fold(f64::INFINITY, f64::min),
            max: magnitudes.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean: field::mean(&magnitudes),
        }
    }
}

/// Grid report as written to disk. Lengths in metres, fields in Tesla.
/// `grid_step` holds the offsets from the coil center along each grid axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridFieldData {
    pub resolution: usize,
    pub bound: f64,
    pub observer_height: f64,
    pub grid_step: Vec<f64>,
    pub b_top: Vec<Vec<GeoVector>>,
    pub b_side: Vec<Vec<GeoVector>>,
}

/// `count` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
            values[count - 1] = end;
            values
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coil::tests::diamond_descriptor;
    use crate::field::DEFAULT_OBSERVER_HEIGHT;

    #[test]
    fn linspace_includes_both_ends() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(0.0, 1.0, 1), vec![0.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn grids_are_square_and_cached() {
        let coil = Coil::new(&diamond_descriptor()).unwrap();
        let solver = SolverChoice::default();
        let report = GridFieldReport::new(&coil, &solver, 6, DEFAULT_BOUND, DEFAULT_OBSERVER_HEIGHT).unwrap();

        assert_eq!(report.top_observer_grid.len(), 6);
        assert!(report.top_observer_grid.iter().all(|row| row.len() == 6));
        assert_eq!(report.top_observer_grid[0][5], Point::new(DEFAULT_BOUND, 0.0, DEFAULT_OBSERVER_HEIGHT));
        assert_eq!(report.side_observer_grid[0][0], Point::new(0.0, 0.0, -DEFAULT_BOUND / 2.0));
        assert_eq!(report.side_observer_grid[5][0].z, DEFAULT_BOUND / 2.0);

        let first = report.b_top().unwrap() as *const _;
        let second = report.b_top().unwrap() as *const _;
        assert_eq!(first, second);
        assert_eq!(report.b_side().unwrap().len(), 6);
    }

    #[test]
    fn summary_brackets_the_mean() {
        let coil = Coil::new(&diamond_descriptor()).unwrap();
        let solver = SolverChoice::default();
        let report = GridFieldReport::new(&coil, &solver, 5, DEFAULT_BOUND, DEFAULT_OBSERVER_HEIGHT).unwrap();
        let (top, side) = report.summary().unwrap();
        for summary in [top, side] {
            assert!(summary.min <= summary.mean && summary.mean <= summary.max);
            assert!(summary.max > 0.0);
        }
        let data = report.data().unwrap();
        assert_eq!(data.b_top.len(), 5);
        assert_eq!(data.grid_step.len(), 5);
    }

    #[test]
    fn grids_follow_the_coil_center() {
        let mut desc = diamond_descriptor();
        desc.center = [10.0, -5.0];
        let coil = Coil::new(&desc).unwrap();
        let solver = SolverChoice::default();
        let report = GridFieldReport::new(&coil, &solver, 3, DEFAULT_BOUND, DEFAULT_OBSERVER_HEIGHT).unwrap();

        assert_eq!(report.top_observer_grid[0][0], Point::new(0.01, -0.005, DEFAULT_OBSERVER_HEIGHT));
        assert_eq!(report.top_observer_grid[2][2], Point::new(0.01 + DEFAULT_BOUND, -0.005 + DEFAULT_BOUND, DEFAULT_OBSERVER_HEIGHT));
        for row in report.side_observer_grid.iter() {
            assert!(row.iter().all(|p| p.y == -0.005));
        }
        assert_eq!(report.side_observer_grid[0][2].x, 0.01 + DEFAULT_BOUND);

        // Same field as the centered coil, sampled at the same offsets
        let centered = Coil::new(&diamond_descriptor()).unwrap();
        let reference = GridFieldReport::new(&centered, &solver, 3, DEFAULT_BOUND, DEFAULT_OBSERVER_HEIGHT).unwrap();
        let (shifted, _) = report.summary().unwrap();
        let (expected, _) = reference.summary().unwrap();
        assert!((shifted.mean - expected.mean).abs() < 1e-9 * expected.mean);
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let coil = Coil::new(&diamond_descriptor()).unwrap();
        let solver = SolverChoice::default();
        assert!(GridFieldReport::new(&coil, &solver, 0, DEFAULT_BOUND, DEFAULT_OBSERVER_HEIGHT).is_err());
    }
}
