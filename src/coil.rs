mod proc_errors;
mod cfg;
pub mod reflect;
pub mod extension;
pub mod spiral;

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::geo_2d::PlanarVector;
use crate::geo_3d::Point;

// Re-export errors
pub use proc_errors::{
    CoilError,
    ProcResult,
    malformed,
    degenerate,
};
// Re-export descriptor handling
pub use cfg::{
    Base,
    CoilDescriptor,
    MM_PER_M,
};

/// Resistivity of copper, in Ohm metres.
pub const RHO_COPPER: f64 = 1.724e-8;

/// A planar spiral coil.
/// Built once from a `CoilDescriptor`, immutable afterwards. All lengths are in metres.
#[derive(Debug, Clone)]
pub struct Coil {
    pub name: String,
    pub layers: usize,
    pub center: PlanarVector,
    pub spacing: f64,
    pub trace_width: f64,
    pub trace_height: f64,
    pub base: Base,
    pub turns: usize,
    /// Base polygon after reflection and pruning.
    pub polygon: Vec<PlanarVector>,
    /// Miter extension vectors, one per polygon vertex.
    pub extensions: Vec<PlanarVector>,
    /// Spiral trace, `turns * polygon.len()` vertices.
    pub trace: Vec<PlanarVector>,
    pub size: PlanarVector,
    /// Wire length over all layers.
    pub total_length: f64,
    pub resistance: f64,
    pub current: f64,
}
impl Coil {
    /// Build a coil from a descriptor.
    /// Fails on placeholders, invalid values or a polygon that cannot be offset.
    pub fn new(desc: &CoilDescriptor) -> ProcResult<Self> {
        if desc.layers == 0 {
            malformed("layers must be at least 1")?;
        }
        let turns = desc.turns_checked()?;
        let spacing = positive_mm("spacing", desc.spacing, true)?;
        let trace_width = positive_mm("trace_width", desc.trace_width, false)?;
        let trace_height = positive_mm("trace_height", desc.trace_height, false)?;
        let center = PlanarVector::new(desc.center[0] / MM_PER_M, desc.center[1] / MM_PER_M);
        if center.has_non_finite() {
            malformed("center is not finite")?;
        }

        let vertices = reflect::expand_vertices(desc.vertices_m()?, desc.reflect);
        if vertices.len() < 3 {
            malformed(&format!("{} base vertices after reflection, at least 3 are needed", vertices.len()))?;
        }

        let mitered = extension::miter_polygon(&vertices)?;
        if mitered.vertices.len() != vertices.len() {
            debug!("{}: pruned {} collinear vertices", desc.name, vertices.len() - mitered.vertices.len());
        }

        let trace = spiral::spiral_trace(&mitered, turns, spacing + trace_width, desc.base);
        let size = spiral::bounding_size(&trace);
        let total_length = desc.layers as f64 * spiral::polyline_length(&trace);
        let resistance = RHO_COPPER * total_length / (trace_width * trace_height);

        let current = match (desc.current, desc.power) {
            (Some(current), None) => {
                if !current.is_finite() {
                    malformed("current is not finite")?;
                }
                current
            },
            (None, Some(power)) => current_from_power(power, resistance)?,
            (Some(_), Some(_)) => malformed("both current and power are given, expected exactly one")?,
            (None, None) => malformed("neither current nor power is given, expected exactly one")?,
        };

        Ok(Coil{
            name: desc.name.clone(),
            layers: desc.layers,
            center,
            spacing,
            trace_width,
            trace_height,
            base: desc.base,
            turns,
            polygon: mitered.vertices,
            extensions: mitered.extensions,
            trace,
            size,
            total_length,
            resistance,
            current,
        })
    }

    /// The current path seen by a field solver.
    /// One open polyline per layer, translated to the coil center; layer `i` sits at `z = -i * spacing`.
    pub fn current_path(&self) -> Vec<Vec<Point>> {
        (0..self.layers)
            .map(|layer| {
                let z = -(layer as f64) * self.spacing;
                self.trace.iter()
                    .map(|vertex| Point::from_planar(*vertex + self.center, z))
                    .collect()
            })
            .collect()
    }

    /// Power dissipated at the coil current, in Watts.
    pub fn power(&self) -> f64 {
        self.current * self.current * self.resistance
    }

    /// Get a title for an analysis of this coil.
    pub fn analysis_title(&self) -> String {
        format!(
            "Field Analysis: {} ({} Layer{}, {} Turns) @ {:.0}mA",
            self.name,
            self.layers,
            if self.layers != 1 { "s" } else { "" },
            self.turns,
            self.current * 1000.0,
        )
    }

    /// Geometry summary in millimetres, for display and saving.
    pub fn summary(&self) -> CoilSummary {
        let to_mm = |v: &PlanarVector| *v * MM_PER_M;
        CoilSummary{
            name: self.name.clone(),
            layers: self.layers,
            turns: self.turns,
            polygon: self.polygon.iter().map(to_mm).collect(),
            trace: self.trace.iter().map(to_mm).collect(),
            size: to_mm(&self.size),
            total_length: self.total_length * MM_PER_M,
            resistance: self.resistance,
            current: self.current,
        }
    }
}

/// Coil geometry in millimetres, with electrical values in SI units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoilSummary {
    pub name: String,
    pub layers: usize,
    pub turns: usize,
    pub polygon: Vec<PlanarVector>,
    pub trace: Vec<PlanarVector>,
    pub size: PlanarVector,
    pub total_length: f64,
    pub resistance: f64,
    pub current: f64,
}

/// Current that dissipates `power` in `resistance`.
fn current_from_power(power: f64, resistance: f64) -> ProcResult<f64> {
    if !power.is_finite() || power < 0.0 {
        malformed(&format!("power must be a non-negative number, got {power}"))?;
    }
    if !(resistance > 0.0) || !resistance.is_finite() {
        degenerate(&format!("resistance is {resistance}, cannot derive current from power"))?;
    }
    Ok((power / resistance).sqrt())
}

/// Convert a descriptor length to metres, checking its sign.
fn positive_mm(field: &str, value_mm: f64, allow_zero: bool) -> ProcResult<f64> {
    let valid = value_mm.is_finite() && (value_mm > 0.0 || (allow_zero && value_mm == 0.0));
    if !valid {
        malformed(&format!("{field} must be {}, got {value_mm}", if allow_zero { "non-negative" } else { "positive" }))?;
    }
    Ok(value_mm / MM_PER_M)
}

/// Load a coil descriptor (json, yaml or toml).
pub fn load_descriptor(input_path: &str) -> crate::io::IoResult<CoilDescriptor> {
    debug!("Loading coil descriptor from {}...", input_path);
    crate::io::read_cfg_file(input_path)
}

/// Save a coil descriptor in the format implied by the extension of `output_path`.
pub fn save_descriptor(desc: &CoilDescriptor, output_path: &str) -> crate::io::IoResult<()> {
    debug!("Saving coil descriptor to {}...", output_path);
    crate::io::write_cfg_file(output_path, desc)
}
