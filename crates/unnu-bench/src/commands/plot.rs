use std::error::Error;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use unnu_plot::{plot, FigureStyle, PlotOptions, PlotTarget, SurfaceMode};

#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Result file produced by `unnu-bench sweep`.
    pub result_file: PathBuf,
    /// Write the figure to an image (.svg, .png, .bmp, .jpg) instead of
    /// opening a window.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Open the plot window even when `--out` is given.
    #[arg(long)]
    pub show: bool,
    /// Column on the horizontal axis.
    #[arg(long, default_value = "n")]
    pub x: String,
    /// Column on the depth axis.
    #[arg(long, default_value = "max")]
    pub y: String,
    /// Measured column drawn as height and color.
    #[arg(long, default_value = "unnu")]
    pub z: String,
    #[arg(long, value_enum, default_value_t = SurfaceArg::Trisurf)]
    pub surface: SurfaceArg,
    /// Upper bound on mesh lines per axis for `--surface grid`.
    #[arg(long, default_value_t = 64)]
    pub grid_lines: usize,
    #[arg(long, default_value_t = 1024)]
    pub width: u32,
    #[arg(long, default_value_t = 768)]
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SurfaceArg {
    Trisurf,
    Grid,
}

impl From<SurfaceArg> for SurfaceMode {
    fn from(arg: SurfaceArg) -> Self {
        match arg {
            SurfaceArg::Trisurf => SurfaceMode::Trisurf,
            SurfaceArg::Grid => SurfaceMode::Grid,
        }
    }
}

pub fn run(args: &PlotArgs) -> Result<(), Box<dyn Error>> {
    let target = PlotTarget::from_flags(args.out.clone(), args.show);
    let options = PlotOptions {
        x: args.x.clone(),
        y: args.y.clone(),
        z: args.z.clone(),
        surface: args.surface.into(),
        grid_lines: args.grid_lines,
        style: FigureStyle {
            width: args.width,
            height: args.height,
            ..FigureStyle::default()
        },
    };
    let report = plot(&args.result_file, &target, &options)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
