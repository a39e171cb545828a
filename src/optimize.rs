mod proc_errors;

use clap::ValueEnum;
use serde::{Serialize, Deserialize};
use strum::Display;
use tracing::{debug, info, warn};

use crate::coil::{Coil, CoilDescriptor};
use crate::field::{DiscreteFieldReport, SolverChoice};

// Re-export errors
pub use proc_errors::{
    OptimizeError,
    ProcResult,
    err_str,
};

/// Default number of sweep samples.
pub const DEFAULT_STEPS: usize = 100;

/// Quantity maximized by the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(ValueEnum, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Objective {
    /// Mean centering component at the lateral sensors.
    #[default]
    Lateral,
    /// Mean centering component at the diagonal sensors.
    Diagonal,
    /// Field magnitude at the center sensor.
    Center,
}
impl Objective {
    pub fn score(&self, report: &DiscreteFieldReport) -> f64 {
        match self {
            Objective::Lateral => report.centering_lateral_avg,
            Objective::Diagonal => report.centering_diagonal_avg,
            Objective::Center => report.center_avg,
        }
    }
}

/// Sweep range and resolution.
/// Samples are `lower + i * (upper - lower) / steps` for `i` in `[0, steps)`.
#[derive(Debug, Clone, Copy)]
pub struct SweepRange {
    pub lower: f64,
    pub upper: f64,
    pub steps: usize,
}
impl SweepRange {
    pub fn new(lower: f64, upper: f64, steps: usize) -> ProcResult<Self> {
        if steps == 0 {
            err_str("Sweep needs at least one step")?;
        }
        if !lower.is_finite() || !upper.is_finite() {
            err_str(&format!("Sweep bounds must be finite, got [{lower}, {upper})"))?;
        }
        Ok(SweepRange{lower, upper, steps})
    }

    pub fn samples(&self) -> impl Iterator<Item = f64> {
        let SweepRange{lower, upper, steps} = *self;
        let increment = (upper - lower) / steps as f64;
        (0..steps).map(move |i| lower + i as f64 * increment)
    }
}

/// Best configuration found by a sweep.
#[derive(Debug, Clone)]
pub struct SweepResult {
    /// Placeholder value that produced the best score.
    pub x: f64,
    pub score: f64,
    /// Descriptor with every placeholder resolved to `x`.
    pub descriptor: CoilDescriptor,
    pub evaluated: usize,
    pub skipped: usize,
}

/// Sweep the placeholders of `base` over `range`, scoring each sample with `evaluate`.
/// Samples that fail or score non-finite are skipped.
/// The strictly greatest score wins; ties keep the earliest sample.
pub fn sweep<F>(base: &CoilDescriptor, range: &SweepRange, mut evaluate: F) -> ProcResult<SweepResult>
where
    F: FnMut(&CoilDescriptor) -> ProcResult<f64>,
{
    if base.placeholder_count() == 0 {
        warn!("{} has no null placeholders, every sample is the same coil", base.name);
    }

    let mut best: Option<SweepResult> = None;
    let mut evaluated = 0;
    let mut skipped = 0;
    for x in range.samples() {
        let descriptor = base.resolve(x);
        let score = match evaluate(&descriptor) {
            Ok(score) if score.is_finite() => score,
            Ok(score) => {
                debug!("x = {x}: objective is {score}, skipping");
                skipped += 1;
                continue;
            },
            Err(error) => {
                debug!("x = {x}: {error}");
                skipped += 1;
                continue;
            },
        };
        evaluated += 1;

        let improves = match &best {
            Some(current) => score > current.score,
            None => true,
        };
        if improves {
            best = Some(SweepResult{x, score, descriptor, evaluated: 0, skipped: 0});
        }
    }

    match best {
        Some(mut result) => {
            result.evaluated = evaluated;
            result.skipped = skipped;
            Ok(result)
        },
        None => Err(OptimizeError::NoValidConfiguration(format!(
            "all {} samples in [{}, {}) failed", range.steps, range.lower, range.upper,
        ))),
    }
}

/// Find the placeholder value maximizing `objective` for the coil described by `base`.
pub fn optimize(
    base: &CoilDescriptor,
    range: &SweepRange,
    objective: Objective,
    solver: &SolverChoice,
    observer_height: f64,
) -> ProcResult<SweepResult> {
    info!(
        "Optimizing {} over [{}, {}) in {} steps, maximizing {}...",
        base.name, range.lower, range.upper, range.steps, objective,
    );
    let result = sweep(base, range, |descriptor| {
        let coil = Coil::new(descriptor)?;
        let report = DiscreteFieldReport::new(&coil, solver, observer_height)?;
        Ok(objective.score(&report))
    })?;
    info!("Best x = {} ({} evaluated, {} skipped)", result.x, result.evaluated, result.skipped);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coil::tests::diamond_descriptor;
    use crate::field::DEFAULT_OBSERVER_HEIGHT;

    #[test]
    fn samples_exclude_upper_bound() {
        let range = SweepRange::new(5.0, 15.0, 10).unwrap();
        let samples: Vec<f64> = range.samples().collect();
        assert_eq!(samples.len(), 10);
        assert_eq!(samples[0], 5.0);
        assert_eq!(samples[9], 14.0);
        assert!(SweepRange::new(5.0, 15.0, 0).is_err());
        assert!(SweepRange::new(f64::NAN, 15.0, 10).is_err());
    }

    #[test]
    fn best_coordinate_beats_every_sample() {
        let mut desc = diamond_descriptor();
        desc.vertices = vec![[None, Some(0.0)], [Some(0.0), Some(19.0)]];
        let range = SweepRange::new(5.0, 15.0, 10).unwrap();
        let solver = SolverChoice::default();

        let result = optimize(&desc, &range, Objective::Lateral, &solver, DEFAULT_OBSERVER_HEIGHT).unwrap();
        assert!(result.x >= 5.0 && result.x < 15.0);
        assert_eq!(result.descriptor.vertices[0], [Some(result.x), Some(0.0)]);
        assert_eq!(result.descriptor.placeholder_count(), 0);
        assert_eq!(result.evaluated + result.skipped, 10);

        for x in range.samples() {
            let coil = Coil::new(&desc.resolve(x)).unwrap();
            let report = DiscreteFieldReport::new(&coil, &solver, DEFAULT_OBSERVER_HEIGHT).unwrap();
            assert!(result.score >= Objective::Lateral.score(&report));
        }
    }

    #[test]
    fn first_sample_wins_ties() {
        let desc = diamond_descriptor();
        let range = SweepRange::new(0.0, 4.0, 4).unwrap();
        let result = sweep(&desc, &range, |_| Ok(1.0)).unwrap();
        assert_eq!(result.x, 0.0);
    }

    #[test]
    fn failing_samples_are_skipped() {
        let mut desc = diamond_descriptor();
        desc.turns = None;
        let range = SweepRange::new(0.0, 4.0, 4).unwrap();
        // x = 0 resolves to zero turns, which cannot be built
        let result = sweep(&desc, &range, |d| {
            let coil = Coil::new(d)?;
            Ok(coil.turns as f64)
        }).unwrap();
        assert_eq!(result.descriptor.turns, Some(3));
        assert_eq!(result.skipped, 1);

        let result = sweep(&desc, &range, |d| Ok(if d.turns == Some(1) { f64::NAN } else { 0.0 })).unwrap();
        assert_eq!(result.x, 0.0);
        assert_eq!(result.skipped, 1);
    }

    #[test]
    fn no_valid_sample_is_an_error() {
        let desc = diamond_descriptor();
        let range = SweepRange::new(0.0, 1.0, 3).unwrap();
        let result = sweep(&desc, &range, |_| err_str("never valid"));
        assert!(matches!(result, Err(OptimizeError::NoValidConfiguration(_))));
    }

    #[test]
    fn objectives_read_their_aggregate() {
        let coil = Coil::new(&diamond_descriptor()).unwrap();
        let report = DiscreteFieldReport::new(&coil, &SolverChoice::default(), DEFAULT_OBSERVER_HEIGHT).unwrap();
        assert_eq!(Objective::Lateral.score(&report), report.centering_lateral_avg);
        assert_eq!(Objective::Diagonal.score(&report), report.centering_diagonal_avg);
        assert_eq!(Objective::Center.score(&report), report.center_avg);
        assert_eq!(Objective::Center.to_string(), "center");
    }
}
