use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use unnu_sweep::{run_sweep, ProcessBenchmark};

use super::load_config;

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// YAML sweep configuration; compiled-in defaults when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &SweepArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.config.as_ref())?;
    let mut benchmark = ProcessBenchmark::new(&config.executable_path);
    let summary = run_sweep(&config, &mut benchmark)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
