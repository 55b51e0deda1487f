use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Args;
use unnu_sweep::planned_invocations;

use super::load_config;

#[derive(Args, Debug)]
pub struct GridArgs {
    /// YAML sweep configuration; compiled-in defaults when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &GridArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.config.as_ref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "n,m,command")?;
    for invocation in planned_invocations(&config) {
        writeln!(
            out,
            "{},{},{}",
            invocation.pair.n,
            invocation.pair.m,
            invocation.command_line(&config.executable_path)
        )?;
    }
    out.flush()?;
    Ok(())
}
