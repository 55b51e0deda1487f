use std::error::Error;
use std::process::Command;

use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit extended metadata including git and toolchain information.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    git_commit: String,
    rustc: String,
    features: Vec<String>,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(&gather_info())?);
    Ok(())
}

fn gather_info() -> VersionInfo {
    let mut features = Vec::new();
    if cfg!(feature = "window") {
        features.push("window".into());
    }
    if cfg!(feature = "ttf") {
        features.push("ttf".into());
    }
    if features.is_empty() {
        features.push("default".into());
    }
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").into(),
        git_commit: tool_output("git", &["rev-parse", "HEAD"]).unwrap_or_else(|| "unknown".into()),
        rustc: tool_output("rustc", &["--version"]).unwrap_or_else(|| "rustc unavailable".into()),
        features,
    }
}

fn tool_output(program: &str, args: &[&str]) -> Option<String> {
    let out = Command::new(program).args(args).output().ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
}
