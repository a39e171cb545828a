pub mod coil;
pub mod field;
pub mod optimize;
pub mod args;
pub mod io;
pub mod geo_2d;
pub mod geo_3d;
mod crate_errors;

use tracing::{info, warn};

use crate::coil::{Coil, CoilDescriptor, MM_PER_M};
use crate::field::{DiscreteFieldReport, GridFieldReport, GridSummary};

pub use crate_errors::{
    CoilsimError,
    CoilsimResult,
};

/// Target struct.
/// The loaded descriptor, the checked shared settings and the command to run.
pub struct Target {
    pub descriptor: CoilDescriptor,
    pub settings: args::RunSettings,
    pub command: args::RunCommand,
}

/// [Stage 1.]
/// Check the shared arguments and load the coil descriptor.
/// Returns a `CoilsimResult` with the `Target` or an `Err`.
pub fn build_target(cli_args: args::CoilsimCli) -> CoilsimResult<Target> {
    let settings = cli_args.shared_args.settings()?;
    info!("Loading coil descriptor: {}...", cli_args.input_path);
    let descriptor = coil::load_descriptor(&cli_args.input_path)?;

    Ok(Target{
        descriptor,
        settings,
        command: cli_args.command,
    })
}

/// [Stage 2.]
/// Run the requested command on the target.
/// Returns a `CoilsimResult` with `()` or an `Err`.
pub fn run_process(target: Target) -> CoilsimResult<()> {
    let Target{descriptor, settings, command} = target;
    match command {
        args::RunCommand::Discrete => run_discrete(&descriptor, &settings),
        args::RunCommand::Grid(grid_args) => run_grid(&descriptor, &settings, &grid_args),
        args::RunCommand::Trace(trace_args) => run_trace(&descriptor, &trace_args),
        args::RunCommand::Optimize(optimize_args) => run_optimize(&descriptor, &settings, &optimize_args),
    }
}

/// Print the discrete sensor table, warning about non-uniform sensors.
fn run_discrete(descriptor: &CoilDescriptor, settings: &args::RunSettings) -> CoilsimResult<()> {
    let coil = Coil::new(descriptor)?;
    let report = DiscreteFieldReport::new(&coil, &settings.solver, settings.observer_height)?;
    print_discrete(&coil, &report, settings.allowable_error);
    Ok(())
}

/// Solve both observer grids, print their statistics and optionally save them.
fn run_grid(descriptor: &CoilDescriptor, settings: &args::RunSettings, grid_args: &args::GridCli) -> CoilsimResult<()> {
    let coil = Coil::new(descriptor)?;
    let bound = match grid_args.bound_mm {
        Some(bound_mm) => bound_mm / MM_PER_M,
        None => field::grid::DEFAULT_BOUND,
    };
    let report = GridFieldReport::new(&coil, &settings.solver, grid_args.resolution, bound, settings.observer_height)?;
    print_discrete(&coil, &report.discrete, settings.allowable_error);

    let (top, side) = report.summary()?;
    println!();
    println!("Grid: {0} x {0} observers over {1:.1} mm", report.resolution, report.bound * MM_PER_M);
    println!("             Min            |    Max            |    Mean");
    print_grid_row("Top:", &top);
    print_grid_row("Side:", &side);

    if let Some(output_path) = &grid_args.output_path {
        println!("Saving grid fields to {}...", output_path);
        io::write_cfg_file(output_path, &report.data()?)?;
    }
    Ok(())
}

/// Print the generated geometry and optionally save it.
fn run_trace(descriptor: &CoilDescriptor, trace_args: &args::TraceCli) -> CoilsimResult<()> {
    let coil = Coil::new(descriptor)?;
    let summary = coil.summary();

    println!("Coil: {} ({} Layer{}, {} Turns)", summary.name, summary.layers, if summary.layers != 1 { "s" } else { "" }, summary.turns);
    println!("Base polygon ({} vertices, mm):", summary.polygon.len());
    for vertex in summary.polygon.iter() {
        println!("    {:.3}", vertex);
    }
    println!("Trace points: {}", summary.trace.len());
    println!("Size:         {:.3} x {:.3} mm", summary.size.x, summary.size.y);
    println!("Wire length:  {:.3} mm", summary.total_length);
    println!("Resistance:   {:.6} Ohm", summary.resistance);
    println!("Current:      {:.6} A", summary.current);
    println!("Power:        {:.6} W", coil.power());

    if let Some(output_path) = &trace_args.output_path {
        println!("Saving coil geometry to {}...", output_path);
        io::write_cfg_file(output_path, &summary)?;
    }
    Ok(())
}

/// Sweep the descriptor placeholders, print the best configuration and optionally save it.
fn run_optimize(
    descriptor: &CoilDescriptor,
    settings: &args::RunSettings,
    optimize_args: &args::OptimizeCli,
) -> CoilsimResult<()> {
    let range = optimize::SweepRange::new(optimize_args.lower, optimize_args.upper, optimize_args.steps)?;
    let result = optimize::optimize(
        descriptor,
        &range,
        optimize_args.over,
        &settings.solver,
        settings.observer_height,
    )?;

    let coil = Coil::new(&result.descriptor)?;
    let report = DiscreteFieldReport::new(&coil, &settings.solver, settings.observer_height)?;
    println!(
        "Best value: {} ({} objective: {:2.7} mT)",
        result.x, optimize_args.over, result.score * 1000.0,
    );
    if result.skipped > 0 {
        println!("Skipped {} of {} samples", result.skipped, range.steps);
    }
    println!();
    print_discrete(&coil, &report, settings.allowable_error);

    if let Some(output_path) = &optimize_args.output_path {
        println!("Saving best descriptor to {}...", output_path);
        coil::save_descriptor(&result.descriptor, output_path)?;
    }
    Ok(())
}

fn print_discrete(coil: &Coil, report: &DiscreteFieldReport, allowable_error: f64) {
    println!("{}", report.table(&coil.analysis_title()));
    for warning in report.uniformity_warnings(allowable_error) {
        warn!("{}", warning);
    }
}

fn print_grid_row(label: &str, summary: &GridSummary) {
    println!(
        "{:<12} {:2.7} mT    |    {:2.7} mT    |    {:2.7} mT",
        label, summary.min * 1000.0, summary.max * 1000.0, summary.mean * 1000.0,
    );
}
