use itertools::Either;

use crate::geo_2d::PlanarVector;

/// Quadrant sign pairs `(x, y)`, in winding order.
const QUADRANTS: [(f64, f64); 4] = [(1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0), (1.0, -1.0)];

/// Expand the descriptor vertices into the closed base polygon.
/// With `reflect` unset the vertices already describe the whole polygon.
pub fn expand_vertices(vertices: Vec<PlanarVector>, reflect: bool) -> Vec<PlanarVector> {
    if reflect {
        reflect_quadrant(&vertices)
    } else {
        vertices
    }
}

/// Mirror a single-quadrant vertex list into all four quadrants.
///
/// Quadrants whose signs match are walked forward, the others backward,
/// so the polygon keeps one winding direction across the axes.
/// A generated vertex equal to the previous kept vertex or to the start vertex is a seam
/// point on an axis and is dropped. Equality is exact: mirroring only flips signs,
/// and `-0.0 == 0.0`, so seam points compare equal bit-for-bit in magnitude.
pub fn reflect_quadrant(quadrant: &[PlanarVector]) -> Vec<PlanarVector> {
    let Some(&first) = quadrant.first() else {
        return Vec::new();
    };

    let mut polygon = vec![first];
    let mut last = first;
    for (sign_x, sign_y) in QUADRANTS {
        let ordered = if sign_x == sign_y {
            Either::Left(quadrant.iter())
        } else {
            Either::Right(quadrant.iter().rev())
        };

        for vertex in ordered.map(|v| v.mirror(sign_x, sign_y)) {
            if vertex != last && vertex != first {
                last = vertex;
                polygon.push(vertex);
            }
        }
    }
    polygon
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pv(x: f64, y: f64) -> PlanarVector {
        PlanarVector::new(x, y)
    }

    #[test]
    fn no_reflect_is_identity() {
        let square = vec![pv(1.0, 1.0), pv(-1.0, 1.0), pv(-1.0, -1.0), pv(1.0, -1.0)];
        assert_eq!(expand_vertices(square.clone(), false), square);
    }

    #[test]
    fn single_corner_becomes_square() {
        let polygon = reflect_quadrant(&[pv(19.0, 19.0)]);
        assert_eq!(polygon, vec![pv(19.0, 19.0), pv(-19.0, 19.0), pv(-19.0, -19.0), pv(19.0, -19.0)]);
    }

    #[test]
    fn axis_vertices_are_deduplicated() {
        // Both input vertices sit on an axis, so each is shared by two quadrants.
        let polygon = reflect_quadrant(&[pv(19.0, 0.0), pv(0.0, 19.0)]);
        assert_eq!(polygon, vec![pv(19.0, 0.0), pv(0.0, 19.0), pv(-19.0, 0.0), pv(0.0, -19.0)]);
    }

    #[test]
    fn reflected_polygon_has_no_repeated_neighbours() {
        let quadrant = [pv(10.0, 0.0), pv(12.0, 4.0), pv(8.0, 9.0), pv(0.0, 11.0)];
        let polygon = reflect_quadrant(&quadrant);

        assert_eq!(polygon[0], quadrant[0]);
        for (idx, vertex) in polygon.iter().enumerate() {
            let next = polygon[(idx + 1) % polygon.len()];
            assert_ne!(*vertex, next, "vertex {idx} repeats");
        }
        // Two off-axis vertices per quadrant plus one shared point on each half-axis.
        assert_eq!(polygon.len(), 4 * 2 + 4);
    }

    #[test]
    fn mirrored_quadrants_keep_winding() {
        let polygon = reflect_quadrant(&[pv(10.0, 2.0), pv(2.0, 10.0)]);
        let doubled_area: f64 = (0..polygon.len())
            .map(|i| {
                let a = polygon[i];
                let b = polygon[(i + 1) % polygon.len()];
                a.x * b.y - b.x * a.y
            })
            .sum();
        assert!(doubled_area > 0.0);
        assert_eq!(polygon.len(), 8);
    }

    #[test]
    fn empty_quadrant_yields_empty_polygon() {
        assert!(reflect_quadrant(&[]).is_empty());
    }
}
