use itertools::Itertools;

use crate::coil::{degenerate, ProcResult};
use crate::geo_2d::{wrap_angle, PlanarVector};

/// Turns whose sine is below this are straight (cosine positive) or fold back (cosine negative).
const STRAIGHT_TOLERANCE: f64 = 1e-9;

/// Polygons enclosing less than this fraction of their squared perimeter have no usable area.
const FLAT_AREA_TOLERANCE: f64 = 1e-9;

/// Base polygon after degenerate-vertex pruning, paired with its miter extension vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct MiteredPolygon {
    pub vertices: Vec<PlanarVector>,
    pub extensions: Vec<PlanarVector>,
}

/// Compute the miter extension vector of every vertex of a closed polygon
/// and drop the vertices that do not change direction.
///
/// Moving every surviving vertex by `d * extension` gives a polygon whose edges are parallel
/// to the original and offset by exactly `d` to the left of the edge direction
/// (inward for a counterclockwise polygon).
/// Extensions are computed against the unpruned neighbours; a collinear neighbour does not
/// change an edge direction, so pruning afterwards leaves the other vectors untouched.
/// Straightness and fold-backs are judged with a tolerance on the turn sine, so inputs that are
/// collinear up to rounding are still rejected, as are polygons that enclose almost no area.
pub fn miter_polygon(polygon: &[PlanarVector]) -> ProcResult<MiteredPolygon> {
    let count = polygon.len();
    if count < 3 {
        degenerate(&format!("polygon has {count} vertices, at least 3 are needed"))?;
    }

    let mut vertices = Vec::with_capacity(count);
    let mut extensions = Vec::with_capacity(count);

    for (idx, vertex) in polygon.iter().enumerate() {
        let prev = polygon[(idx + count - 1) % count];
        let next = polygon[(idx + 1) % count];

        let unit_in = edge_unit(prev, *vertex, idx)?;
        let unit_out = edge_unit(*vertex, next, (idx + 1) % count)?;
        let normal_in = unit_in.left_normal();
        let normal_out = unit_out.left_normal();

        let sin = normal_in.cross(&normal_out);
        let cos = normal_in.dot(&normal_out);
        if sin.abs() < STRAIGHT_TOLERANCE {
            if cos > 0.0 {
                // Collinear: no direction change, nothing to miter
                continue;
            }
            degenerate(&format!("polygon folds back on itself at vertex {idx} {vertex}"))?;
        }
        let angle = wrap_angle(sin.atan2(cos));

        vertices.push(*vertex);
        extensions.push(normal_in - (angle / 2.0).tan() * unit_in);
    }

    if vertices.len() < 3 {
        degenerate(&format!(
            "only {} of {} vertices change direction, the polygon has no area",
            vertices.len(), count,
        ))?;
    }

    let perimeter: f64 = vertices.iter()
        .circular_tuple_windows()
        .map(|(a, b)| a.distance(b))
        .sum();
    let area = signed_area(&vertices);
    if area.abs() <= FLAT_AREA_TOLERANCE * perimeter * perimeter {
        degenerate(&format!("polygon area {area:e} m^2 is negligible for its perimeter {perimeter:e} m"))?;
    }

    Ok(MiteredPolygon{vertices, extensions})
}

/// Unit vector along the edge ending at vertex `idx`.
fn edge_unit(from: PlanarVector, to: PlanarVector, idx: usize) -> ProcResult<PlanarVector> {
    match (to - from).normalize() {
        Some(unit) => Ok(unit),
        None => degenerate(&format!("zero-length edge ending at vertex {idx} {to}")),
    }
}

/// Shoelace area, positive for a counterclockwise polygon.
fn signed_area(polygon: &[PlanarVector]) -> f64 {
    polygon.iter()
        .circular_tuple_windows()
        .map(|(a, b)| a.cross(b))
        .sum::<f64>() / 2.0
}
