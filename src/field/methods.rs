/*!
 * This is the field solver methods module.
 * Adding new solvers should be done here.
 *
 * New solvers need:
 * - A struct implementing `FieldSolver`
 * - An enum variant containing that struct in `SolverChoice`
 * - A constructor arg_name and function in `SOLVER_CONSTRUCTION`
 *
 */

use enum_dispatch::enum_dispatch;

use crate::field::{self, CurrentPath};
use crate::geo_3d::{GeoVector, Point};

//
// ------------------------------------------------------------
// Code that requires modification to add a new field solver
//      |
//      V
//

// Source files for the field solvers
mod analytic_filament;
mod subdivided_filament;

/// Field solvers enum.
/// To add a new solver:
/// include it here,
/// add handling for its constructor in `SOLVER_CONSTRUCTION`,
/// and implement the `FieldSolver` trait for it.
#[derive(Debug)]
#[enum_dispatch(FieldSolver)]
pub enum SolverChoice {
    /// Closed-form Biot-Savart field of straight filament segments.
    AnalyticFilament(analytic_filament::Method),
    /// Midpoint-rule Biot-Savart over subdivided filament segments.
    SubdividedFilament(subdivided_filament::Method),
}

/// Solver construction array -- Written out in one place for easy modification.
const SOLVER_CONSTRUCTION: &[SolverConstructor] = &[
    SolverConstructor{
        arg_name: "analytic_filament",
        constructor: || {SolverChoice::AnalyticFilament(analytic_filament::Method::default())},
    },
    SolverConstructor{
        arg_name: "subdivided_filament",
        constructor: || {SolverChoice::SubdividedFilament(subdivided_filament::Method::default())},
    },
];

//
// ------------------------------------------------------------
// Traits and structs that don't need modification,
// but are references for adding a new solver
//      |
//      V
//

/// Field solver trait.
/// A solver maps a current path and an observer position to the flux density there, in Tesla.
/// Solvers are pure: the same inputs always give the same field.
#[enum_dispatch] // This is a macro that allows the enum to be used in a trait object-like way
pub trait FieldSolver {
    /// Get the arg_name of the solver.
    fn get_method_name(&self) -> &'static str;

    /// Parse the solver config file (allows different settings for different solvers).
    fn parse_method_cfg(&mut self, method_cfg_file: &str) -> field::ProcResult<()>;

    /// Flux density at `observer` due to `path`.
    fn field_at(&self, path: &CurrentPath, observer: &Point) -> GeoVector;
}

/// Solver constructor struct. Used to construct the solvers from the arg_name string.
struct SolverConstructor {
    /// Name of the solver.
    arg_name: &'static str,
    /// Constructor function.
    constructor: fn() -> SolverChoice,
}

//
// ------------------------------------------------------------
// Functions and structs with no modification or reference needed
//      |
//      V
//

impl SolverChoice {
    /// Construct a solver from a name (given on the command line).
    pub fn from_name(arg_name: &str) -> field::ProcResult<Self> {
        for constructor in SOLVER_CONSTRUCTION.iter() {
            if constructor.arg_name == arg_name {
                return Ok((constructor.constructor)());
            }
        }

        let mut error_str = format!("Field solver not found: {arg_name}\n");
        error_str.push_str("Available solvers:\n");
        for name in Self::available_names() {
            error_str.push_str(&format!("    {}\n", name));
        }
        field::err_str(&error_str)
    }

    /// Names accepted by `from_name`.
    pub fn available_names() -> impl Iterator<Item = &'static str> {
        SOLVER_CONSTRUCTION.iter().map(|constructor| constructor.arg_name)
    }

    /// Flux density at each observer, in order.
    /// Fails on an empty path or any non-finite result.
    pub fn compute_b(&self, path: &CurrentPath, observers: &[Point]) -> field::ProcResult<Vec<GeoVector>> {
        if path.is_empty() {
            return Err(field::FieldError::EmptyPath);
        }

        let mut fields = Vec::with_capacity(observers.len());
        for observer in observers {
            let b = self.field_at(path, observer);
            if !b.is_finite() {
                return Err(field::FieldError::NonFinite(format!(
                    "{} gave {} at observer {}", self.get_method_name(), b, observer,
                )));
            }
            fields.push(b);
        }
        Ok(fields)
    }
}
impl Default for SolverChoice {
    fn default() -> Self {
        SolverChoice::AnalyticFilament(analytic_filament::Method::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const MU0: f64 = 4.0 * PI * field::MU0_OVER_4PI;

    /// Closed square loop of side `side` in the `z = 0` plane, counterclockwise.
    fn square_loop(side: f64, current: f64) -> CurrentPath {
        let h = side / 2.0;
        CurrentPath::new(
            vec![vec![
                Point::new(h, h, 0.0),
                Point::new(-h, h, 0.0),
                Point::new(-h, -h, 0.0),
                Point::new(h, -h, 0.0),
                Point::new(h, h, 0.0),
            ]],
            current,
        )
    }

    fn fine_subdivided() -> SolverChoice {
        SolverChoice::SubdividedFilament(subdivided_filament::Method::with_max_segment_length(1e-5))
    }

    #[test]
    fn square_loop_center_field() {
        let side = 0.02;
        let expected = 2.0 * 2f64.sqrt() * MU0 / (PI * side);
        let path = square_loop(side, 1.0);

        let analytic = SolverChoice::default().compute_b(&path, &[Point::zero()]).unwrap()[0];
        assert!((analytic.z - expected).abs() < 1e-9 * expected, "{} vs {}", analytic.z, expected);
        assert!(analytic.x.abs() < 1e-18 && analytic.y.abs() < 1e-18);

        let subdivided = fine_subdivided().compute_b(&path, &[Point::zero()]).unwrap()[0];
        assert!((subdivided.z - expected).abs() < 1e-4 * expected);
    }

    #[test]
    fn long_wire_matches_infinite_wire() {
        let d = 0.001;
        let path = CurrentPath::new(vec![vec![Point::new(-100.0, 0.0, 0.0), Point::new(100.0, 0.0, 0.0)]], 2.0);
        let b = SolverChoice::default().compute_b(&path, &[Point::new(0.0, 0.0, d)]).unwrap()[0];
        let expected = MU0 * 2.0 / (2.0 * PI * d);
        // Current along +x, observer above: field along -y
        assert!((b.y + expected).abs() < 1e-6 * expected);
        assert!(b.x.abs() < 1e-18 && b.z.abs() < 1e-18);
    }

    #[test]
    fn solvers_agree_off_axis() {
        let path = square_loop(0.03, 0.5);
        let observers = [Point::new(0.005, -0.012, 0.003), Point::new(0.04, 0.02, 0.01)];
        let analytic = SolverChoice::default().compute_b(&path, &observers).unwrap();
        let subdivided = fine_subdivided().compute_b(&path, &observers).unwrap();
        for (a, s) in analytic.iter().zip(subdivided.iter()) {
            assert!((*a - *s).norm() < 1e-4 * a.norm());
        }
    }

    #[test]
    fn observer_on_wire_contributes_nothing() {
        let path = CurrentPath::new(vec![vec![Point::new(-1.0, 0.0, 0.0), Point::new(1.0, 0.0, 0.0)]], 1.0);
        for solver in [SolverChoice::default(), fine_subdivided()] {
            let b = solver.compute_b(&path, &[Point::zero(), Point::new(-1.0, 0.0, 0.0)]).unwrap();
            assert_eq!(b, vec![GeoVector::zero(), GeoVector::zero()]);
        }
    }

    #[test]
    fn empty_path_is_an_error() {
        let path = CurrentPath::new(vec![vec![Point::zero()]], 1.0);
        assert!(matches!(SolverChoice::default().compute_b(&path, &[Point::zero()]), Err(field::FieldError::EmptyPath)));
    }

    #[test]
    fn non_finite_current_is_an_error() {
        let mut path = square_loop(0.01, 1.0);
        path.current = f64::NAN;
        assert!(matches!(
            SolverChoice::default().compute_b(&path, &[Point::new(0.0, 0.0, 0.001)]),
            Err(field::FieldError::NonFinite(_)),
        ));
    }

    #[test]
    fn solvers_are_found_by_name() {
        for name in SolverChoice::available_names() {
            assert_eq!(SolverChoice::from_name(name).unwrap().get_method_name(), name);
        }
        assert!(SolverChoice::from_name("magpylib").is_err());
    }
}
