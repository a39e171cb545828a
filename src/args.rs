mod proc_errors;

use clap::{
    ArgAction,
    Args,
    Parser,
    Subcommand,
};

use crate::field::{self, FieldSolver, SolverChoice};
use crate::optimize::{self, Objective};

// Re-export errors
pub use proc_errors::{
    ArgError,
    ProcResult,
    err_str,
};

/// Planar spiral coil generator and magnetic field analysis tool.
#[derive(Debug, Parser)]
#[command(name = "coilsim")]
pub struct CoilsimCli {
    #[arg(short, long, action = ArgAction::Count)]
    /// Log more to stderr (-v info, -vv debug, -vvv trace).
    pub verbose: u8,

    #[command(flatten)]
    pub shared_args: SharedArgs,

    /// Path to the coil descriptor file (.json, .yaml/.yml or .toml).
    pub input_path: String,

    #[command(subcommand)]
    pub command: RunCommand,
}

/// Parser for the subcommands of the coilsim binary using clap.
#[derive(Debug, Subcommand)]
pub enum RunCommand {
    #[command(name = "discrete")]
    /// Print the field magnitude and centering components at the canonical sensors.
    Discrete,

    #[command(name = "grid")]
    /// Solve the field over the top and side observer grids.
    Grid(GridCli),

    #[command(name = "trace")]
    /// Print the generated coil geometry.
    Trace(TraceCli),

    #[command(name = "optimize")]
    /// Sweep the null placeholders of the descriptor for the best field.
    Optimize(OptimizeCli),
}

/// Shared arguments, used in all commands. Compiled with clap.
#[derive(Debug, Args)]
pub struct SharedArgs {
    #[arg(short = 'e', long = "allowable-error", default_value_t = 0.05, allow_negative_numbers = true)]
    /// Allowed deviation of a sensor from its group mean before warning, in mT.
    pub allowable_error_mt: f64,

    #[arg(long, default_value = "analytic_filament")]
    /// Field solver to use.
    pub solver: String,

    #[arg(long = "solver-cfg")]
    /// Optional solver config file.
    pub solver_cfg: Option<String>,

    #[arg(long = "observer-height", default_value_t = 3.0, allow_negative_numbers = true)]
    /// Height of the sensors above the coil, in mm.
    pub observer_height_mm: f64,
}

/// Compiled arguments for the grid command. Compiled with clap.
#[derive(Debug, Args)]
pub struct GridCli {
    #[arg(short, long, default_value_t = field::grid::DEFAULT_RESOLUTION)]
    /// Observers along each grid axis.
    pub resolution: usize,

    #[arg(short, long = "bound")]
    /// Grid extent in mm [default: two board squares].
    pub bound_mm: Option<f64>,

    #[arg(short, long = "output")]
    /// Save the grid fields to this file.
    pub output_path: Option<String>,
}

/// Compiled arguments for the trace command. Compiled with clap.
#[derive(Debug, Args)]
pub struct TraceCli {
    #[arg(short, long = "output")]
    /// Save the coil geometry to this file.
    pub output_path: Option<String>,
}

/// Compiled arguments for the optimize command. Compiled with clap.
#[derive(Debug, Args)]
pub struct OptimizeCli {
    #[arg(allow_negative_numbers = true)]
    /// Lower bound of the sweep (inclusive).
    pub lower: f64,

    #[arg(allow_negative_numbers = true)]
    /// Upper bound of the sweep (exclusive).
    pub upper: f64,

    #[arg(long, value_enum, default_value_t = Objective::Lateral)]
    /// Quantity to maximize.
    pub over: Objective,

    #[arg(short, long, default_value_t = optimize::DEFAULT_STEPS)]
    /// Number of samples in the sweep.
    pub steps: usize,

    #[arg(short, long = "output")]
    /// Save the best descriptor to this file.
    pub output_path: Option<String>,
}

/// Validated settings shared by every command, in SI units.
#[derive(Debug)]
pub struct RunSettings {
    pub solver: SolverChoice,
    /// Tesla.
    pub allowable_error: f64,
    /// Metres.
    pub observer_height: f64,
}

impl SharedArgs {
    /// Check the shared arguments and construct the field solver.
    pub fn settings(&self) -> ProcResult<RunSettings> {
        if !self.allowable_error_mt.is_finite() || self.allowable_error_mt < 0.0 {
            err_str(&format!("Allowable error must be non-negative, got {} mT", self.allowable_error_mt))?;
        }
        if !self.observer_height_mm.is_finite() {
            err_str(&format!("Observer height must be finite, got {} mm", self.observer_height_mm))?;
        }

        let mut solver = SolverChoice::from_name(&self.solver)?;
        if let Some(solver_cfg) = &self.solver_cfg {
            solver.parse_method_cfg(solver_cfg)?;
        }

        Ok(RunSettings{
            solver,
            allowable_error: self.allowable_error_mt / 1000.0,
            observer_height: self.observer_height_mm / 1000.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CoilsimCli {
        CoilsimCli::try_parse_from(std::iter::once("coilsim").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let cli = parse(&["coil.json", "discrete"]);
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.input_path, "coil.json");
        assert!(matches!(cli.command, RunCommand::Discrete));

        let settings = cli.shared_args.settings().unwrap();
        assert_eq!(settings.solver.get_method_name(), "analytic_filament");
        assert!((settings.allowable_error - 0.05e-3).abs() < 1e-15);
        assert!((settings.observer_height - 0.003).abs() < 1e-15);
    }

    #[test]
    fn optimize_arguments() {
        let cli = parse(&["-vv", "-e", "0.1", "coil.json", "optimize", "-5", "15", "--over", "diagonal", "-s", "10", "-o", "best.json"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.shared_args.allowable_error_mt, 0.1);
        match cli.command {
            RunCommand::Optimize(opt) => {
                assert_eq!((opt.lower, opt.upper, opt.steps), (-5.0, 15.0, 10));
                assert_eq!(opt.over, Objective::Diagonal);
                assert_eq!(opt.output_path.as_deref(), Some("best.json"));
            },
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn optimize_defaults() {
        match parse(&["coil.json", "optimize", "1", "2"]).command {
            RunCommand::Optimize(opt) => {
                assert_eq!(opt.steps, 100);
                assert_eq!(opt.over, Objective::Lateral);
                assert!(opt.output_path.is_none());
            },
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn bad_settings_are_rejected() {
        let cli = parse(&["--solver", "nope", "coil.json", "discrete"]);
        assert!(matches!(cli.shared_args.settings(), Err(ArgError::SolverError(_))));
        let cli = parse(&["-e", "-1", "coil.json", "discrete"]);
        assert!(cli.shared_args.settings().is_err());
    }
}
