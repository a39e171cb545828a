mod proc_errors;
mod methods;
pub mod report;
pub mod grid;

use itertools::Itertools;

use crate::coil::Coil;
use crate::geo_3d::{GeoVector, Point};

// Re-export errors
pub use proc_errors::{
    FieldError,
    ProcResult,
    err_str,
};
// Re-export solver methods
pub use methods::{
    FieldSolver,
    SolverChoice,
};
pub use report::DiscreteFieldReport;
pub use grid::{GridFieldReport, GridFieldData, GridSummary};

/// Side of a chess board square, in metres. Sensor positions are laid out in these units.
pub const CHESS_SQUARE_SIZE: f64 = 38.0 / 1000.0;

/// Default height of the observers above the coil plane, in metres.
pub const DEFAULT_OBSERVER_HEIGHT: f64 = 3.0 / 1000.0;

/// mu0 / 4pi, in T m / A.
pub const MU0_OVER_4PI: f64 = 1.000_000_000_55e-7;

/// Current-carrying polylines handed to a field solver.
/// Each layer is an open polyline; every layer carries the same current.
#[derive(Debug, Clone)]
pub struct CurrentPath {
    pub layers: Vec<Vec<Point>>,
    /// Current, in Amperes.
    pub current: f64,
}
impl CurrentPath {
    pub fn new(layers: Vec<Vec<Point>>, current: f64) -> Self {
        CurrentPath{layers, current}
    }

    /// Current path of a coil.
    pub fn from_coil(coil: &Coil) -> Self {
        CurrentPath{layers: coil.current_path(), current: coil.current}
    }

    /// Straight segments `(start, end)` over every layer, in current direction.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.layers.iter()
            .flat_map(|layer| layer.iter().copied().tuple_windows())
    }

    pub fn is_empty(&self) -> bool {
        self.segments().next().is_none()
    }
}

/// Component of `field` pointing from `pos` toward `center` (absolute value).
/// A sensor sitting on the center has no direction toward it and scores zero.
pub fn centering_strength(pos: &Point, field: &GeoVector, center: &Point) -> f64 {
    let direction = (*center - *pos).normalize_or_zero();
    field.dot(&direction).abs()
}

/// Arithmetic mean, zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centering_strength_projects_onto_center_direction() {
        let center = Point::new(0.0, 0.0, 0.003);
        let pos = Point::new(0.019, 0.0, 0.003);
        let toward = GeoVector::new(-2.0, 5.0, 7.0);
        assert_eq!(centering_strength(&pos, &toward, &center), 2.0);
        let away = GeoVector::new(3.0, 0.0, 0.0);
        assert_eq!(centering_strength(&pos, &away, &center), 3.0);
    }

    #[test]
    fn centering_strength_at_center_is_zero() {
        let center = Point::new(0.0, 0.0, 0.003);
        assert_eq!(centering_strength(&center, &GeoVector::new(1.0, 1.0, 1.0), &center), 0.0);
    }

    #[test]
    fn segments_do_not_join_layers() {
        let path = CurrentPath::new(
            vec![
                vec![Point::zero(), Point::new(1.0, 0.0, 0.0), Point::new(1.0, 1.0, 0.0)],
                vec![Point::new(0.0, 0.0, -1.0), Point::new(1.0, 0.0, -1.0)],
            ],
            1.0,
        );
        assert_eq!(path.segments().count(), 3);
        assert!(!path.is_empty());
        assert!(CurrentPath::new(vec![vec![Point::zero()]], 1.0).is_empty());
    }

    #[test]
    fn mean_of_nothing_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), 3.0);
    }
}
