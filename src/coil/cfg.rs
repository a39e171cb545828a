use serde::{Serialize, Deserialize};
use strum::{Display, EnumString};

use crate::coil::{malformed, ProcResult};
use crate::geo_2d::PlanarVector;

/// Millimetres per metre. Descriptor files are written in millimetres.
pub const MM_PER_M: f64 = 1000.0;

/// Which boundary the base polygon describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Base {
    /// The polygon is the innermost turn, the spiral grows outward.
    Inner,
    /// The polygon is the outermost turn, the spiral shrinks inward.
    Outer,
}

/// A coil descriptor, as read from a descriptor file.
/// All lengths are in millimetres.
/// `turns` and vertex coordinates may be `null` placeholders, resolved by the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoilDescriptor {
    pub layers: usize,
    #[serde(default = "CoilDescriptor::default_center")]
    pub center: [f64; 2],
    pub name: String,
    pub spacing: f64,
    pub trace_width: f64,
    #[serde(default = "CoilDescriptor::default_trace_height")]
    pub trace_height: f64,
    pub base: Base,
    pub turns: Option<usize>,
    #[serde(default)]
    pub reflect: bool,
    pub vertices: Vec<[Option<f64>; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
}
impl CoilDescriptor {
    pub fn default_center() -> [f64; 2] {
        [0.0, 0.0]
    }
    /// 1 oz copper.
    pub fn default_trace_height() -> f64 {
        0.0341
    }

    /// Number of `null` slots (vertex coordinates plus `turns`).
    pub fn placeholder_count(&self) -> usize {
        let vertex_slots = self.vertices.iter()
            .flat_map(|vertex| vertex.iter())
            .filter(|coord| coord.is_none())
            .count();
        vertex_slots + usize::from(self.turns.is_none())
    }

    /// Copy of this descriptor with every placeholder replaced by `x`.
    /// A placeholder turn count receives `x` truncated to an integer (negative values clamp to zero).
    pub fn resolve(&self, x: f64) -> CoilDescriptor {
        let mut resolved = self.clone();
        for coord in resolved.vertices.iter_mut().flat_map(|vertex| vertex.iter_mut()) {
            if coord.is_none() {
                *coord = Some(x);
            }
        }
        if resolved.turns.is_none() {
            resolved.turns = Some(x.trunc().max(0.0) as usize);
        }
        resolved
    }

    /// Vertex list in metres. Fails on unresolved placeholders.
    pub fn vertices_m(&self) -> ProcResult<Vec<PlanarVector>> {
        let mut vertices = Vec::with_capacity(self.vertices.len());
        for (idx, vertex) in self.vertices.iter().enumerate() {
            match vertex {
                [Some(x), Some(y)] => {
                    if !x.is_finite() || !y.is_finite() {
                        malformed(&format!("vertex {idx} is not finite"))?;
                    }
                    vertices.push(PlanarVector::new(x / MM_PER_M, y / MM_PER_M));
                },
                _ => malformed(&format!("vertex {idx} has an unresolved null placeholder"))?,
            }
        }
        Ok(vertices)
    }

    /// Turn count. Fails on an unresolved placeholder or zero turns.
    pub fn turns_checked(&self) -> ProcResult<usize> {
        match self.turns {
            Some(0) => malformed("turns must be at least 1"),
            Some(turns) => Ok(turns),
            None => malformed("turns is an unresolved null placeholder"),
        }
    }
}
