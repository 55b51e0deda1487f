use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    grid::{self, GridArgs},
    plot::{self, PlotArgs},
    sweep::{self, SweepArgs},
    version::{self, VersionArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "unnu-bench", about = "Parameter sweeps and trisurf figures for the unnu benchmark")]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the benchmark over the configured (n, m) grid into a new result file.
    Sweep(SweepArgs),
    /// Print the invocations a sweep would perform without running them.
    Grid(GridArgs),
    /// Render one result file as a 3D surface.
    Plot(PlotArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    match cli.command {
        Command::Sweep(args) => sweep::run(&args),
        Command::Grid(args) => grid::run(&args),
        Command::Plot(args) => plot::run(&args),
        Command::Version(args) => version::run(&args),
    }
}
