//! Thin driver around `strobo_core`: builds a configuration from the
//! command line, runs the requested computation and hands the resulting
//! arrays to an external plotting frontend as JSON. No rendering happens
//! here.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use strobo_core::config::{MapMode, SimulationConfig};
use strobo_core::equilibrium::{analyze_equilibrium, EquilibriumReport};
use strobo_core::field::{sample_field, FieldAxisSpec, FlowField};
use strobo_core::flow::{CanonicalFlow, ClassicalLotkaVolterra};
use strobo_core::map::{MapSolution, StroboscopicMap};
use strobo_core::sampler::StroboscopicSample;

#[derive(Parser)]
#[command(name = "strobo")]
#[command(about = "Stroboscopic maps of a periodically forced planar flow", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate the forced flow and emit the trajectory plus section points
    Map(MapArgs),
    /// Sample a planar vector field on a grid
    Field(FieldArgs),
    /// Report the linearization at a chart's equilibrium
    Equilibrium(EquilibriumArgs),
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Theta,
    Time,
    Both,
}

impl ModeArg {
    fn modes(self) -> &'static [MapMode] {
        match self {
            ModeArg::Theta => &[MapMode::Theta],
            ModeArg::Time => &[MapMode::Time],
            ModeArg::Both => &[MapMode::Theta, MapMode::Time],
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ChartArg {
    /// Classical predator-prey coordinates
    Classical,
    /// Canonical coordinates of the angle-clock map
    Theta,
    /// Canonical coordinates of the time-clock map
    Time,
}

#[derive(Args)]
struct ConfigArgs {
    /// Number of independent orbits
    #[arg(long, default_value_t = 10)]
    orbits: usize,

    /// Number of integration steps
    #[arg(long, default_value_t = 10_000)]
    size: usize,

    /// Integration time step
    #[arg(long, default_value_t = 0.01)]
    dt: f64,

    /// x coordinate of the equilibrium point
    #[arg(long, default_value_t = 1.0)]
    a: f64,

    /// y coordinate of the equilibrium point
    #[arg(long, default_value_t = 1.0)]
    b: f64,

    /// Amplitude of the periodic perturbation
    #[arg(long, default_value_t = 0.1)]
    e: f64,

    /// Forcing period in units of dt; doubles as the stroboscopic stride
    #[arg(long, default_value_t = 100)]
    k: usize,

    /// Seed for the orbits' initial positions
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Wrap the phase into one forcing period
    #[arg(long)]
    modular: bool,

    /// Leave the section points out of the output
    #[arg(long)]
    no_strobe: bool,

    /// Drop the projection hint the presenter reads for its 3D overlay
    #[arg(long)]
    no_projection: bool,
}

impl ConfigArgs {
    fn to_config(&self) -> SimulationConfig {
        SimulationConfig {
            orbits: self.orbits,
            size: self.size,
            dt: self.dt,
            a: self.a,
            b: self.b,
            e: self.e,
            k: self.k,
            seed: self.seed,
            stroboscopic: !self.no_strobe,
            modular: self.modular,
            projection: !self.no_projection,
        }
    }
}

#[derive(Args)]
struct MapArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Which parameterization(s) to run
    #[arg(long, value_enum, default_value_t = ModeArg::Both)]
    mode: ModeArg,

    /// Directory receiving one JSON document per mode (stdout when absent)
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Args)]
struct FieldArgs {
    #[command(flatten)]
    config: ConfigArgs,

    #[arg(long, value_enum, default_value_t = ChartArg::Classical)]
    chart: ChartArg,

    /// Forcing phase at which to freeze the field
    #[arg(long, default_value_t = 0.0)]
    t: f64,

    #[arg(long, default_value_t = -5.0)]
    x_min: f64,

    #[arg(long, default_value_t = 5.0)]
    x_max: f64,

    #[arg(long, default_value_t = -5.0)]
    y_min: f64,

    #[arg(long, default_value_t = 5.0)]
    y_max: f64,

    /// Grid nodes per axis
    #[arg(long, default_value_t = 41)]
    samples: usize,

    /// Output file (stdout when absent)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args)]
struct EquilibriumArgs {
    #[command(flatten)]
    config: ConfigArgs,

    #[arg(long, value_enum, default_value_t = ChartArg::Classical)]
    chart: ChartArg,

    /// Output file (stdout when absent)
    #[arg(long)]
    out: Option<PathBuf>,
}

/// What the presenter receives for one run: the solution (config echo,
/// mode, trajectory arrays) plus the section points unless the config
/// opted out of the overlay.
#[derive(Serialize)]
struct MapDocument<'a> {
    #[serde(flatten)]
    solution: &'a MapSolution,
    #[serde(skip_serializing_if = "Option::is_none")]
    sample: Option<StroboscopicSample>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Map(args) => run_map(&args),
        Commands::Field(args) => run_field(&args),
        Commands::Equilibrium(args) => run_equilibrium(&args),
    }
}

fn run_map(args: &MapArgs) -> Result<()> {
    let config = args.config.to_config();

    for &mode in args.mode.modes() {
        // A fresh map per mode: both parameterizations of one
        // configuration start from the same seeded initial condition,
        // never from each other's endpoint.
        let map = StroboscopicMap::new(config)?;
        info!("integrating {} mode", mode.as_str());
        let solution = map.integrate(mode)?;

        let sample = config.stroboscopic.then(|| solution.stroboscopic());
        let document = MapDocument {
            solution: &solution,
            sample,
        };

        let path = args
            .out_dir
            .as_ref()
            .map(|dir| dir.join(format!("strobo_{}.json", mode.as_str())));
        write_json(&document, path.as_deref())?;
        if let Some(path) = &path {
            info!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn run_field(args: &FieldArgs) -> Result<()> {
    let config = args.config.to_config();
    config.validate()?;

    let x_axis = FieldAxisSpec {
        min: args.x_min,
        max: args.x_max,
        samples: args.samples,
    };
    let y_axis = FieldAxisSpec {
        min: args.y_min,
        max: args.y_max,
        samples: args.samples,
    };

    let field: FlowField = match args.chart {
        ChartArg::Classical => {
            let flow = ClassicalLotkaVolterra {
                a: config.a,
                b: config.b,
            };
            sample_field(&flow, args.t, x_axis, y_axis)?
        }
        ChartArg::Theta => {
            let flow = CanonicalFlow::new(MapMode::Theta, &config);
            sample_field(&flow, args.t, x_axis, y_axis)?
        }
        ChartArg::Time => {
            let flow = CanonicalFlow::new(MapMode::Time, &config);
            sample_field(&flow, args.t, x_axis, y_axis)?
        }
    };

    info!(
        "sampled {}x{} field nodes",
        field.x.len(),
        field.y.len()
    );
    write_json(&field, args.out.as_deref())
}

fn run_equilibrium(args: &EquilibriumArgs) -> Result<()> {
    let config = args.config.to_config();
    config.validate()?;

    let report: EquilibriumReport = match args.chart {
        ChartArg::Classical => analyze_equilibrium(&ClassicalLotkaVolterra {
            a: config.a,
            b: config.b,
        })?,
        ChartArg::Theta => analyze_equilibrium(&CanonicalFlow::new(MapMode::Theta, &config))?,
        ChartArg::Time => analyze_equilibrium(&CanonicalFlow::new(MapMode::Time, &config))?,
    };

    write_json(&report, args.out.as_deref())
}

fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, value)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer(&mut handle, value)?;
            handle.write_all(b"\n")?;
        }
    }
    Ok(())
}
