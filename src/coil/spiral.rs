use std::f64::consts::TAU;

use itertools::Itertools;

use crate::coil::Base;
use crate::coil::extension::MiteredPolygon;
use crate::geo_2d::PlanarVector;

/// Lay out the spiral trace: `turns` offset copies of the mitered polygon.
///
/// `step` is the radial pitch (spacing plus trace width). The offset also advances linearly with
/// each vertex's polar angle, so the end of one turn meets the start of the next and the
/// turns join into one continuous spiral instead of separate rings.
/// Extensions point inward for a counterclockwise polygon, so an inner base uses negative offsets.
pub fn spiral_trace(
    mitered: &MiteredPolygon,
    turns: usize,
    step: f64,
    base: Base,
) -> Vec<PlanarVector> {
    let direction = match base {
        Base::Inner => -1.0,
        Base::Outer => 1.0,
    };

    // Per-vertex offset within a single turn
    let angular: Vec<f64> = mitered.vertices.iter()
        .map(|vertex| step * vertex.polar_angle() / TAU)
        .collect();

    let mut trace = Vec::with_capacity(turns * mitered.vertices.len());
    for turn in 0..turns {
        let base_offset = step * turn as f64;
        for ((vertex, extension), angular_offset) in mitered.vertices.iter()
            .zip(mitered.extensions.iter())
            .zip(angular.iter())
        {
            let offset = direction * (base_offset + angular_offset);
            trace.push(*vertex + offset * *extension);
        }
    }
    trace
}

/// Width and height of the axis-aligned box around the trace.
pub fn bounding_size(trace: &[PlanarVector]) -> PlanarVector {
    let (min_x, max_x) = match trace.iter().map(|v| v.x).minmax().into_option() {
        Some(extent) => extent,
        None => return PlanarVector::zero(),
    };
    let (min_y, max_y) = match trace.iter().map(|v| v.y).minmax().into_option() {
        Some(extent) => extent,
        None => return PlanarVector::zero(),
    };
    PlanarVector::new(max_x - min_x, max_y - min_y)
}

/// Length of the open polyline through the trace vertices.
pub fn polyline_length(trace: &[PlanarVector]) -> f64 {
    trace.iter()
        .tuple_windows()
        .map(|(a, b)| a.distance(b))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coil::extension::miter_polygon;

    fn pv(x: f64, y: f64) -> PlanarVector {
        PlanarVector::new(x, y)
    }

    fn diamond() -> MiteredPolygon {
        miter_polygon(&[pv(0.019, 0.0), pv(0.0, 0.019), pv(-0.019, 0.0), pv(0.0, -0.019)]).unwrap()
    }

    #[test]
    fn single_turn_is_pure_angular_offset() {
        let mitered = diamond();
        let step = 0.0007;
        let trace = spiral_trace(&mitered, 1, step, Base::Outer);
        assert_eq!(trace.len(), 4);
        for (j, point) in trace.iter().enumerate() {
            let vertex = mitered.vertices[j];
            let expected = vertex + (step * vertex.polar_angle() / TAU) * mitered.extensions[j];
            assert!(point.distance(&expected) < 1e-15);
        }
        // The first vertex lies on the +x axis, so it is not offset at all
        assert_eq!(trace[0], mitered.vertices[0]);
    }

    #[test]
    fn consecutive_turns_step_along_extension() {
        let mitered = diamond();
        let step = 0.0007;
        let n = mitered.vertices.len();
        for (base, sign) in [(Base::Inner, -1.0), (Base::Outer, 1.0)] {
            let trace = spiral_trace(&mitered, 3, step, base);
            assert_eq!(trace.len(), 3 * n);
            for t in 1..3 {
                for j in 0..n {
                    let delta = trace[t * n + j] - trace[(t - 1) * n + j];
                    let expected = sign * step * mitered.extensions[j];
                    assert!(delta.distance(&expected) < 1e-15, "turn {t} vertex {j}");
                }
            }
        }
    }

    #[test]
    fn inner_base_grows_outward() {
        let mitered = diamond();
        let trace = spiral_trace(&mitered, 4, 0.0007, Base::Inner);
        let n = mitered.vertices.len();
        for j in 0..n {
            assert!(trace[3 * n + j].norm() > trace[j].norm());
        }
        let outer = spiral_trace(&mitered, 4, 0.0007, Base::Outer);
        for j in 0..n {
            assert!(outer[3 * n + j].norm() < outer[j].norm());
        }
    }

    #[test]
    fn size_uses_both_axes() {
        let trace = vec![pv(-2.0, -0.5), pv(3.0, 0.5), pv(1.0, 1.5)];
        assert_eq!(bounding_size(&trace), pv(5.0, 2.0));
        assert_eq!(bounding_size(&[]), PlanarVector::zero());
    }

    #[test]
    fn polyline_length_is_open() {
        let trace = vec![pv(0.0, 0.0), pv(3.0, 0.0), pv(3.0, 4.0)];
        assert_eq!(polyline_length(&trace), 7.0);
        assert_eq!(polyline_length(&trace[..1]), 0.0);
    }
}
