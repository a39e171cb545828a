use clap::Parser;
use tracing::Level;

fn main() {

    // 1. Parse commandline arguments and start logging
    let cli_args = coilsim::args::CoilsimCli::parse();
    let level = match cli_args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // 2. Load the descriptor and check the shared arguments
    let target = match coilsim::build_target(cli_args) {
        Ok(target) => target,
        Err(err) => {
            eprintln!("CLI ERROR!");
            eprintln!("{}", err);
            std::process::exit(1);
        },
    };

    // 3. Run the command on the target
    if let Err(err) = coilsim::run_process(target) {
        eprintln!("PROCESS ERROR!");
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
