//! pnj - p-n junction I-V model
//!
//! Computes junction quantities and I-V curves and prints them as CSV.
//!
//! # Usage
//!
//! ```bash
//! pnj barrier --bias -0.5
//! pnj sweep --config hj_light.toml --parallel > model.csv
//! pnj family --vary rs --values 0.1,1,10,100 --rp 10000 --jcc 0 > rs_family.csv
//! pnj measure "2505071 HJ 4 cm2_avec_masque.txt"
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use pn_junction::{
    error::Result,
    measurement::{read_measurements, CellCharacteristics},
    output::CsvWriter,
    physics::DEFAULT_BETA,
    solver::{linspace, ParameterSweep},
    telemetry, CurveSweeper, ScenarioConfig,
};

/// p-n junction model
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Built-in potential, depletion widths and saturation current at one bias
    Barrier {
        #[arg(short, long, value_name = "SCENARIO")]
        config: Option<PathBuf>,
        /// Applied bias in V
        #[arg(short, long, default_value_t = 0.0, allow_hyphen_values = true)]
        bias: f64,
    },

    /// Potential profile across the depletion region
    Profile {
        #[arg(short, long, value_name = "SCENARIO")]
        config: Option<PathBuf>,
        /// Applied bias in V
        #[arg(short, long, default_value_t = 0.0, allow_hyphen_values = true)]
        bias: f64,
        /// Steepness of the tanh blend in 1/m
        #[arg(long, default_value_t = DEFAULT_BETA)]
        beta: f64,
        /// Number of positions
        #[arg(short, long, default_value_t = 500)]
        points: usize,
        /// Extra span on each side, as a multiple of the total depletion width
        #[arg(long, default_value_t = 1.0)]
        margin: f64,
    },

    /// I-V curve for one set of circuit parameters
    Sweep {
        #[arg(short, long, value_name = "SCENARIO")]
        config: Option<PathBuf>,
        #[command(flatten)]
        circuit: CircuitOverrides,
        /// Solve voltage samples on all cores
        #[arg(long)]
        parallel: bool,
    },

    /// One I-V curve per value of a circuit parameter
    Family {
        #[arg(short, long, value_name = "SCENARIO")]
        config: Option<PathBuf>,
        #[command(flatten)]
        circuit: CircuitOverrides,
        /// Parameter to vary
        #[arg(long, value_enum)]
        vary: Varied,
        /// Values of the varied parameter
        #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
        values: Vec<f64>,
        #[arg(long)]
        parallel: bool,
    },

    /// Figures of merit of a measured curve
    Measure {
        /// Two-column measurement file
        #[arg(value_name = "MEASUREMENT_FILE")]
        file: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct CircuitOverrides {
    /// Series resistance in Ω·cm²
    #[arg(long)]
    rs: Option<f64>,
    /// Shunt resistance in Ω·cm²
    #[arg(long)]
    rp: Option<f64>,
    /// Photocurrent density in A/cm²
    #[arg(long)]
    jcc: Option<f64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Varied {
    Rs,
    Rp,
    Jcc,
}

fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init_subscriber(args.log_level.as_str())?;

    match args.command {
        Command::Barrier { config, bias } => barrier(config.as_deref(), bias),
        Command::Profile {
            config,
            bias,
            beta,
            points,
            margin,
        } => profile(config.as_deref(), bias, beta, points, margin),
        Command::Sweep {
            config,
            circuit,
            parallel,
        } => sweep(config.as_deref(), &circuit, parallel),
        Command::Family {
            config,
            circuit,
            vary,
            values,
            parallel,
        } => family(config.as_deref(), &circuit, vary, values, parallel),
        Command::Measure { file } => measure(&file),
    }
}

fn load_scenario(path: Option<&Path>) -> Result<ScenarioConfig> {
    match path {
        Some(path) => ScenarioConfig::from_file(path),
        None => Ok(ScenarioConfig::default()),
    }
}

fn apply_overrides(scenario: &mut ScenarioConfig, overrides: &CircuitOverrides) {
    if let Some(rs) = overrides.rs {
        scenario.circuit.series_resistance = rs;
    }
    if let Some(rp) = overrides.rp {
        scenario.circuit.shunt_resistance = rp;
    }
    if let Some(jcc) = overrides.jcc {
        scenario.circuit.photocurrent = jcc;
    }
}

fn barrier(config: Option<&Path>, bias: f64) -> Result<()> {
    let junction = load_scenario(config)?.junction()?;
    let widths = junction.depletion_widths(bias)?;
    let js = junction.saturation_current_density(bias)?;

    let mut out = CsvWriter::stdout();
    out.write_table(
        &["bias", "built_in_potential", "n_width", "p_width", "saturation_current_density"],
        [vec![bias, junction.built_in_potential(), widths.n_side, widths.p_side, js]],
    )?;
    out.flush()
}

fn profile(config: Option<&Path>, bias: f64, beta: f64, points: usize, margin: f64) -> Result<()> {
    let junction = load_scenario(config)?.junction()?;
    let widths = junction.depletion_widths(bias)?;
    let span = margin * widths.total();
    let x = linspace(-widths.p_side - span, widths.n_side + span, points);
    let phi = junction.potential_profile(&x, bias, beta)?;

    let mut out = CsvWriter::stdout();
    out.write_table(&["position", "potential"], x.iter().zip(&phi).map(|(&x, &p)| vec![x, p]))?;
    out.flush()
}

fn sweep(config: Option<&Path>, overrides: &CircuitOverrides, parallel: bool) -> Result<()> {
    let mut scenario = load_scenario(config)?;
    apply_overrides(&mut scenario, overrides);

    let sweeper = CurveSweeper::new(scenario.circuit_solver()?).with_parallel(parallel);
    let curve = sweeper.sweep(&scenario.sweep.voltages()?, &scenario.circuit)?;

    let mut out = CsvWriter::stdout();
    out.write_curve(&curve)?;
    out.flush()
}

fn family(
    config: Option<&Path>,
    overrides: &CircuitOverrides,
    vary: Varied,
    values: Vec<f64>,
    parallel: bool,
) -> Result<()> {
    let mut scenario = load_scenario(config)?;
    apply_overrides(&mut scenario, overrides);

    let family = match vary {
        Varied::Rs => ParameterSweep::SeriesResistance(values),
        Varied::Rp => ParameterSweep::ShuntResistance(values),
        Varied::Jcc => ParameterSweep::Photocurrent(values),
    };
    let sweeper = CurveSweeper::new(scenario.circuit_solver()?).with_parallel(parallel);
    let curves = sweeper.sweep_family(&scenario.sweep.voltages()?, &family.variants(&scenario.circuit))?;

    let labels: Vec<String> = family
        .values()
        .iter()
        .map(|v| format!("{}={v}", family.label()))
        .collect();
    let mut out = CsvWriter::stdout();
    out.write_family(&labels, &curves)?;
    out.flush()
}

fn measure(file: &Path) -> Result<()> {
    let curve = read_measurements(file)?;
    tracing::info!(samples = curve.len(), file = %file.display(), "read measurement");

    let mut out = CsvWriter::stdout();
    match CellCharacteristics::from_samples(curve.pairs()) {
        Some(cell) => out.write_table(
            &[
                "samples",
                "mpp_voltage",
                "mpp_current",
                "max_power_mw",
                "open_circuit_voltage",
                "short_circuit_current",
                "fill_factor",
            ],
            [vec![
                curve.len() as f64,
                cell.max_power.voltage,
                cell.max_power.current,
                cell.max_power.power,
                cell.open_circuit_voltage,
                cell.short_circuit_current,
                cell.fill_factor,
            ]],
        )?,
        None => {
            tracing::warn!("curve has no power-generating quadrant");
            out.write_table(&["samples"], [vec![curve.len() as f64]])?;
        }
    }
    out.flush()
}
