use serde::{Serialize, Deserialize};

use crate::field::{self, methods, CurrentPath, MU0_OVER_4PI};
use crate::geo_3d::{GeoVector, Point};

/// Subdivided Filament Method struct.
/// Midpoint-rule Biot-Savart: every segment is split into pieces no longer than
/// `max_segment_length`, and each piece is treated as a current element at its midpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Method {
    /// Maximum piece length, in metres.
    #[serde(default = "Method::default_max_segment_length", alias = "dl")]
    max_segment_length: f64,
}
impl Method {
    pub fn default_max_segment_length() -> f64 {
        0.5 / 1000.0
    }
    pub fn with_max_segment_length(max_segment_length: f64) -> Self {
        Method{max_segment_length}
    }
}
impl Default for Method {
    fn default() -> Self {
        Method{max_segment_length: Method::default_max_segment_length()}
    }
}

impl methods::FieldSolver for Method {
    fn get_method_name(&self) -> &'static str {
        "subdivided_filament"
    }

    fn parse_method_cfg(&mut self, method_cfg_file: &str) -> field::ProcResult<()> {
        let method: Method = crate::io::read_cfg_file(method_cfg_file)?;
        if !(method.max_segment_length > 0.0) || !method.max_segment_length.is_finite() {
            field::err_str(&format!("max_segment_length must be positive, got {}", method.max_segment_length))?;
        }
        *self = method;
        Ok(())
    }

    fn field_at(&self, path: &CurrentPath, observer: &Point) -> GeoVector {
        let mut b = GeoVector::zero();

        for (start, end) in path.segments() {
            let length = start.distance(&end);
            if length == 0.0 {
                continue;
            }
            let pieces = (length / self.max_segment_length).ceil().max(1.0) as usize;
            let dl = (end - start) / pieces as f64;

            for piece in 0..pieces {
                let midpoint = start.lerp(&end, (piece as f64 + 0.5) / pieces as f64);
                let r = *observer - midpoint;
                let r_norm = r.norm();
                if r_norm == 0.0 {
                    continue;
                }
                b += dl.cross(&r) / (r_norm * r_norm * r_norm);
            }
        }

        b * (MU0_OVER_4PI * path.current)
    }
}
