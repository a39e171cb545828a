use serde::{Serialize, Deserialize};

use crate::coil::Coil;
use crate::field::{self, centering_strength, mean, CurrentPath, SolverChoice, CHESS_SQUARE_SIZE};
use crate::geo_3d::{GeoVector, Point};

/// Planar sensor offsets from the coil center, in metres.
const SENSOR_POS_LATERAL: f64 = CHESS_SQUARE_SIZE / 2.0;
const SENSOR_POS_DIAGONAL: (f64, f64) = (CHESS_SQUARE_SIZE / 2.0, CHESS_SQUARE_SIZE / 2.0);

/// Fast to generate report on field strength at the center, lateral and diagonal positions.
///
/// Lateral and diagonal figures are means over their four sensors.
/// All fields are in Tesla, positions in metres.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscreteFieldReport {
    pub observer_height: f64,

    pub sensor_pos_center: Point,
    pub sensor_pos_lateral: [Point; 4],
    pub sensor_pos_diagonal: [Point; 4],

    pub center: GeoVector,
    pub laterals: [GeoVector; 4],
    pub diagonals: [GeoVector; 4],

    pub center_avg: f64,
    pub lateral_avg: f64,
    pub diagonal_avg: f64,

    pub centering_laterals: [f64; 4],
    pub centering_diagonals: [f64; 4],
    pub centering_lateral_avg: f64,
    pub centering_diagonal_avg: f64,
}
impl DiscreteFieldReport {
    /// Sample the field of `coil` at the nine canonical sensors.
    pub fn new(coil: &Coil, solver: &SolverChoice, observer_height: f64) -> field::ProcResult<Self> {
        Self::from_path(&CurrentPath::from_coil(coil), coil.center.x, coil.center.y, solver, observer_height)
    }

    /// Sample an arbitrary current path, with the sensors laid out around `(center_x, center_y)`.
    pub fn from_path(
        path: &CurrentPath,
        center_x: f64,
        center_y: f64,
        solver: &SolverChoice,
        observer_height: f64,
    ) -> field::ProcResult<Self> {
        let at = |dx: f64, dy: f64| Point::new(center_x + dx, center_y + dy, observer_height);

        let sensor_pos_center = at(0.0, 0.0);
        let sensor_pos_lateral = [
            at(SENSOR_POS_LATERAL, 0.0),
            at(0.0, SENSOR_POS_LATERAL),
            at(-SENSOR_POS_LATERAL, 0.0),
            at(0.0, -SENSOR_POS_LATERAL),
        ];
        let (dx, dy) = SENSOR_POS_DIAGONAL;
        let sensor_pos_diagonal = [
            at(dx, dy),
            at(dx, -dy),
            at(-dx, dy),
            at(-dx, -dy),
        ];

        let mut observers = vec![sensor_pos_center];
        observers.extend_from_slice(&sensor_pos_lateral);
        observers.extend_from_slice(&sensor_pos_diagonal);
        let fields = solver.compute_b(path, &observers)?;

        let center = fields[0];
        let laterals = [fields[1], fields[2], fields[3], fields[4]];
        let diagonals = [fields[5], fields[6], fields[7], fields[8]];

        let centering_laterals = std::array::from_fn(|i| {
            centering_strength(&sensor_pos_lateral[i], &laterals[i], &sensor_pos_center)
        });
        let centering_diagonals = std::array::from_fn(|i| {
            centering_strength(&sensor_pos_diagonal[i], &diagonals[i], &sensor_pos_center)
        });

        Ok(DiscreteFieldReport{
            observer_height,
            sensor_pos_center,
            sensor_pos_lateral,
            sensor_pos_diagonal,
            center,
            laterals,
            diagonals,
            center_avg: center.norm(),
            lateral_avg: mean(&laterals.map(|b| b.norm())),
            diagonal_avg: mean(&diagonals.map(|b| b.norm())),
            centering_laterals,
            centering_diagonals,
            centering_lateral_avg: mean(&centering_laterals),
            centering_diagonal_avg: mean(&centering_diagonals),
        })
    }

    /// Sensors whose magnitude deviates from their group mean by at least `allowable_error` (Tesla).
    pub fn uniformity_warnings(&self, allowable_error: f64) -> Vec<String> {
        let mut warnings = Vec::new();
        let groups = [
            ("Diagonal", &self.sensor_pos_diagonal, &self.diagonals, self.diagonal_avg),
            ("Lateral", &self.sensor_pos_lateral, &self.laterals, self.lateral_avg),
        ];
        for (label, positions, fields, avg) in groups {
            for (pos, b) in positions.iter().zip(fields.iter()) {
                let mag = b.norm();
                if (mag - avg).abs() >= allowable_error {
                    warnings.push(format!(
                        "{} field strength is not uniform: {:.4} mT @ ({:.1}, {:.1}) mm, mean is {:.4} mT",
                        label, mag * 1000.0, pos.x * 1000.0, pos.y * 1000.0, avg * 1000.0,
                    ));
                }
            }
        }
        warnings
    }

    /// Magnitude and centering component table, in mT.
    pub fn table(&self, title: &str) -> String {
        format!(
            concat!(
                "{}\n",
                "             Magnitude      |    Centering Component\n",
                "\n",
                "Center:     {:2.7} mT    |\n",
                "Lateral:    {:2.7} mT    |        {:2.7} mT\n",
                "Diagonal:   {:2.7} mT    |        {:2.7} mT\n",
            ),
            title,
            self.center_avg * 1000.0,
            self.lateral_avg * 1000.0, self.centering_lateral_avg * 1000.0,
            self.diagonal_avg * 1000.0, self.centering_diagonal_avg * 1000.0,
        )
    }
}
