use serde::{Serialize, Deserialize};

use crate::field::{self, methods, CurrentPath, MU0_OVER_4PI};
use crate::geo_3d::{GeoVector, Point};

/// Analytic Filament Method struct.
/// Exact Biot-Savart field of thin straight segments carrying a uniform current.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Method {
    /// Observers closer to a segment's line than this fraction of its length see no field from it.
    #[serde(default = "Method::default_on_wire_tolerance")]
    on_wire_tolerance: f64,
}
impl Method {
    pub fn default_on_wire_tolerance() -> f64 {
        1e-12
    }
}
impl Default for Method {
    fn default() -> Self {
        Method{on_wire_tolerance: Method::default_on_wire_tolerance()}
    }
}

impl methods::FieldSolver for Method {
    fn get_method_name(&self) -> &'static str {
        "analytic_filament"
    }

    fn parse_method_cfg(&mut self, method_cfg_file: &str) -> field::ProcResult<()> {
        *self = crate::io::read_cfg_file(method_cfg_file)?;
        Ok(())
    }

    fn field_at(&self, path: &CurrentPath, observer: &Point) -> GeoVector {
        let mut b = GeoVector::zero();
        for (start, end) in path.segments() {
            b += segment_field(&start, &end, observer, self.on_wire_tolerance);
        }
        b * (MU0_OVER_4PI * path.current)
    }
}

/// Field of a unit current from `start` to `end`, without the mu0/4pi factor.
///
/// Written as `(u x a) / rho^2 * (cos1 - cos2)`, with `u` the segment direction, `a` and `b` the
/// vectors from each end to the observer and `rho` the distance to the segment's line.
/// This stays accurate for long segments, where the `|a||b| + a.b` form cancels.
fn segment_field(start: &Point, end: &Point, observer: &Point, tolerance: f64) -> GeoVector {
    let dl = *end - *start;
    let length = dl.norm();
    if length == 0.0 {
        return GeoVector::zero();
    }
    let u = dl / length;
    let a = *observer - *start;
    let b = *observer - *end;

    let along = a.dot(&u);
    let rho = a - u * along;
    let rho_sq = rho.norm_sq();
    if rho_sq <= (tolerance * length).powi(2) {
        // On the segment's line
        return GeoVector::zero();
    }

    let cos_start = along / a.norm();
    let cos_end = b.dot(&u) / b.norm();
    u.cross(&a) * ((cos_start - cos_end) / rho_sq)
}
