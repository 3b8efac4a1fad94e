//! pooltest - efficiency of one-round pooled testing
//!
//! Thin command-line consumer of `pool-core`:
//! - `simulate`: one random trial
//! - `analytical`: closed-form expected efficiency
//! - `optimize`: sweep group sizes for the best efficiency
//! - `config show`: print the resolved sweep configuration

use clap::{Args, Parser, Subcommand};
use pool_common::{format_error_human, Error, OutputFormat, Result, StructuredError};
use pool_config::{load_sweep_config, LoadedConfig, SweepMode};
use pool_core::exit_codes::ExitCode;
use pool_core::logging::{generate_run_id, init_logging, LogConfig, LogFormat, LogLevel};
use pool_core::output::{render, AnalyticalReport, OptimizeReport, Report, SimulateReport};
use pool_core::{
    analytical_efficiency_curve, best_point, find_max_analytical_efficiency,
    find_max_efficiency, find_max_mean_efficiency, mean_efficiency_curve, seeded_rng, simulate,
    simulated_efficiency_curve, OptimalGroupSize, SweepPoint,
};
use pool_math::binomial::test_count_moments;
use pool_math::{analytical_efficiency, group_positive_probability};
use serde::Serialize;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;

/// Estimate how many tests pooled screening saves over individual testing
#[derive(Parser)]
#[command(name = "pooltest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to a sweep.json configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Log output format (human or jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

impl GlobalOpts {
    fn log_level(&self) -> Option<LogLevel> {
        if self.quiet {
            return Some(LogLevel::Off);
        }
        match self.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run one random trial of pooled testing
    Simulate(SimulateArgs),

    /// Closed-form expected efficiency for one group size
    Analytical(AnalyticalArgs),

    /// Sweep group sizes 2..=d_max and report the most efficient
    Optimize(OptimizeArgs),

    /// Configuration inspection
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the resolved configuration and where it came from
    Show,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Individuals per group (d)
    #[arg(long, short = 'd', allow_negative_numbers = true)]
    group_size: i64,

    /// Number of groups (n) [default: from config]
    #[arg(long, short = 'n', allow_negative_numbers = true)]
    groups: Option<i64>,

    /// Prevalence in [0, 1] [default: from config]
    #[arg(long, short = 'p', allow_negative_numbers = true)]
    prevalence: Option<f64>,

    /// Seed for a reproducible trial
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct AnalyticalArgs {
    /// Individuals per group (d)
    #[arg(long, short = 'd', allow_negative_numbers = true)]
    group_size: i64,

    /// Prevalence in [0, 1] [default: from config]
    #[arg(long, short = 'p', allow_negative_numbers = true)]
    prevalence: Option<f64>,
}

#[derive(Args, Debug)]
struct OptimizeArgs {
    /// Largest group size to try (d_max) [default: from config]
    #[arg(long, allow_negative_numbers = true)]
    max_group_size: Option<i64>,

    /// Number of groups per simulated trial [default: from config]
    #[arg(long, short = 'n', allow_negative_numbers = true)]
    groups: Option<i64>,

    /// Prevalence in [0, 1] [default: from config]
    #[arg(long, short = 'p', allow_negative_numbers = true)]
    prevalence: Option<f64>,

    /// Use the closed-form model instead of simulation
    #[arg(long)]
    analytical: bool,

    /// Trials averaged per group size [default: from config]
    #[arg(long, allow_negative_numbers = true)]
    trials: Option<i64>,

    /// Seed for a reproducible sweep
    #[arg(long)]
    seed: Option<u64>,

    /// Include every swept point in the output
    #[arg(long)]
    curve: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_env(cli.global.log_level(), cli.global.log_format);
    init_logging(&log_config);

    let run_id = generate_run_id();
    let format = cli.global.format;
    let use_color = !cli.global.no_color && std::io::stderr().is_terminal();

    let code = match run(&cli, &run_id) {
        Ok(()) => ExitCode::Ok,
        Err(err) => {
            tracing::debug!(run_id = %run_id, code = err.code(), "command failed");
            if format.is_machine() {
                let structured = StructuredError::from(&err).with_context("run_id", &run_id);
                // Stdout may be the thing that failed; stderr still gets the report.
                let _ = writeln!(std::io::stdout(), "{}", structured.to_json());
            }
            eprintln!("{}", format_error_human(&err, use_color));
            ExitCode::from(&err)
        }
    };

    std::process::exit(code.as_i32());
}

fn run(cli: &Cli, run_id: &str) -> Result<()> {
    let loaded = load_sweep_config(cli.global.config.as_deref())?;
    tracing::debug!(
        run_id,
        source = %loaded.source,
        path = ?loaded.path,
        "configuration resolved"
    );

    match &cli.command {
        Commands::Simulate(args) => cmd_simulate(args, &loaded, run_id, cli.global.format),
        Commands::Analytical(args) => cmd_analytical(args, &loaded, run_id, cli.global.format),
        Commands::Optimize(args) => cmd_optimize(args, &loaded, run_id, cli.global.format),
        Commands::Config { command } => match command {
            ConfigCommands::Show => cmd_config_show(&loaded, cli.global.format),
        },
    }
}

/// Negative counts are argument errors, not parse errors.
fn count(name: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| Error::invalid(name, format!("must be a positive integer, got {value}")))
}

fn emit<R: Report>(report: &R, format: OutputFormat) -> Result<()> {
    let rendered = render(report, format)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", rendered)?;
    stdout.flush()?;
    Ok(())
}

fn cmd_simulate(
    args: &SimulateArgs,
    loaded: &LoadedConfig,
    run_id: &str,
    format: OutputFormat,
) -> Result<()> {
    let d = count("group_size", args.group_size)?;
    let n = match args.groups {
        Some(n) => count("group_count", n)?,
        None => loaded.config.group_count,
    };
    let p = args.prevalence.unwrap_or(loaded.config.prevalence);
    let seed = args.seed.or(loaded.config.seed);

    let mut rng = seeded_rng(seed);
    let outcome = simulate(d, n, p, &mut rng)?;
    let moments = test_count_moments(d, n, p)?;

    emit(
        &SimulateReport {
            run_id: run_id.to_string(),
            prevalence: p,
            seed,
            outcome,
            expected_tests: moments.mean,
            tests_std_dev: moments.std_dev(),
        },
        format,
    )
}

fn cmd_analytical(
    args: &AnalyticalArgs,
    loaded: &LoadedConfig,
    run_id: &str,
    format: OutputFormat,
) -> Result<()> {
    let d = count("group_size", args.group_size)?;
    let p = args.prevalence.unwrap_or(loaded.config.prevalence);

    emit(
        &AnalyticalReport {
            run_id: run_id.to_string(),
            group_size: d,
            prevalence: p,
            group_positive_probability: group_positive_probability(d, p)?,
            efficiency: analytical_efficiency(d, p)?,
        },
        format,
    )
}

fn cmd_optimize(
    args: &OptimizeArgs,
    loaded: &LoadedConfig,
    run_id: &str,
    format: OutputFormat,
) -> Result<()> {
    let config = &loaded.config;
    let d_max = match args.max_group_size {
        Some(d_max) => count("max_group_size", d_max)?,
        None => config.max_group_size,
    };
    let p = args.prevalence.unwrap_or(config.prevalence);
    let mode = if args.analytical {
        SweepMode::Analytical
    } else {
        config.mode
    };

    tracing::info!(run_id, %mode, d_max, prevalence = p, "starting sweep");

    let report = match mode {
        SweepMode::Analytical => {
            let (best, curve) = if args.curve {
                with_curve(d_max, analytical_efficiency_curve(d_max, p)?)?
            } else {
                (find_max_analytical_efficiency(d_max, p)?, None)
            };
            OptimizeReport {
                run_id: run_id.to_string(),
                mode,
                prevalence: p,
                max_group_size: d_max,
                group_count: None,
                trials: None,
                seed: None,
                best,
                curve,
            }
        }
        SweepMode::Simulated => {
            let n = match args.groups {
                Some(n) => count("group_count", n)?,
                None => config.group_count,
            };
            let trials = match args.trials {
                Some(trials) => count("trials", trials)?,
                None => config.trials,
            };
            let seed = args.seed.or(config.seed);
            let mut rng = seeded_rng(seed);

            let (best, curve) = match (trials, args.curve) {
                (1, false) => (find_max_efficiency(d_max, n, p, &mut rng)?, None),
                (1, true) => with_curve(d_max, simulated_efficiency_curve(d_max, n, p, &mut rng)?)?,
                (_, false) => (find_max_mean_efficiency(d_max, n, p, trials, &mut rng)?, None),
                (_, true) => with_curve(
                    d_max,
                    mean_efficiency_curve(d_max, n, p, trials, &mut rng)?,
                )?,
            };
            OptimizeReport {
                run_id: run_id.to_string(),
                mode,
                prevalence: p,
                max_group_size: d_max,
                group_count: Some(n),
                trials: Some(trials),
                seed,
                best,
                curve,
            }
        }
    };

    emit(&report, format)
}

fn with_curve(
    d_max: usize,
    curve: Vec<SweepPoint>,
) -> Result<(OptimalGroupSize, Option<Vec<SweepPoint>>)> {
    let best = best_point(&curve).ok_or(Error::EmptySearchSpace { d_max })?;
    Ok((best, Some(curve)))
}

#[derive(Serialize)]
struct ConfigShow<'a> {
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    config: &'a pool_config::SweepConfig,
}

impl Report for ConfigShow<'_> {
    fn summary(&self) -> String {
        format!(
            "{} ({}): p={} n={} d_max={} trials={} mode={}",
            self.path.as_deref().unwrap_or("defaults"),
            self.source,
            self.config.prevalence,
            self.config.group_count,
            self.config.max_group_size,
            self.config.trials,
            self.config.mode,
        )
    }

    fn markdown(&self) -> String {
        format!(
            "## Sweep configuration\n\nSource: {}\n\n```\n{}\n```\n",
            self.source,
            serde_json::to_string_pretty(self.config).unwrap_or_default()
        )
    }
}

fn cmd_config_show(loaded: &LoadedConfig, format: OutputFormat) -> Result<()> {
    emit(
        &ConfigShow {
            source: loaded.source.to_string(),
            path: loaded.path.as_ref().map(|p| p.display().to_string()),
            config: &loaded.config,
        },
        format,
    )
}
