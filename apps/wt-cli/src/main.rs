use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wt_config::TunnelConfig;
use wt_core::{Bounds, Clock, MonotonicClock};
use wt_sim::{Panel, PollCadence, PollSchedule, ReadingSet};

mod error;
mod render;
mod session;

use error::{CliError, CliResult};
use session::{SessionPlan, run_session, seconds};

#[derive(Parser)]
#[command(name = "wt-cli")]
#[command(about = "Wind tunnel simulator - polls a simulated tunnel and prints its instruments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
    Dashboard,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the tunnel and poll it for a while
    Run {
        /// Tunnel config file (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Session length in seconds
        #[arg(long, default_value_t = 5.0)]
        duration_s: f64,
        /// Poll rate override (Hz)
        #[arg(long)]
        rate_hz: Option<f64>,
        /// Initial fan speed (%)
        #[arg(long)]
        fan: Option<f64>,
        /// Initial angle of attack (deg)
        #[arg(long)]
        aoa: Option<f64>,
        /// Noise seed override
        #[arg(long)]
        seed: Option<u64>,
        /// Press +fan and +AOA every this many seconds
        #[arg(long)]
        ramp_every_s: Option<f64>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Write JSON/CSV output here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Take a single reading and print it as JSON
    Snapshot {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        fan: Option<f64>,
        #[arg(long)]
        aoa: Option<f64>,
        #[arg(long)]
        seed: Option<u64>,
        /// Leave the tunnel stopped
        #[arg(long)]
        stopped: bool,
    },
    /// Stream the free-running ambient flow generator
    Ambient {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long, default_value_t = 5.0)]
        duration_s: f64,
        #[arg(long)]
        rate_hz: Option<f64>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Noise-free lift/drag table over an angle sweep
    Polar {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Fan speed setting the airspeed (%)
        #[arg(long, default_value_t = 100.0)]
        fan: f64,
        #[arg(long, default_value_t = -20.0, allow_negative_numbers = true)]
        from: f64,
        #[arg(long, default_value_t = 20.0, allow_negative_numbers = true)]
        to: f64,
        #[arg(long, default_value_t = 2.0)]
        step: f64,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Config file helpers
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Write the default config to a file
    Init {
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Check a config file
    Validate { path: PathBuf },
    /// Print the effective config as YAML
    Show {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = dispatch(cli.command) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn dispatch(command: Commands) -> CliResult<()> {
    match command {
        Commands::Run {
            config,
            duration_s,
            rate_hz,
            fan,
            aoa,
            seed,
            ramp_every_s,
            format,
            output,
        } => {
            let config = load_config(config.as_deref())?;
            let opts = RunOptions {
                duration_s,
                rate_hz,
                fan,
                aoa,
                seed,
                ramp_every_s,
                format,
                output,
            };
            cmd_run(&config, &opts)
        }
        Commands::Snapshot {
            config,
            fan,
            aoa,
            seed,
            stopped,
        } => cmd_snapshot(&load_config(config.as_deref())?, fan, aoa, seed, stopped),
        Commands::Ambient {
            config,
            duration_s,
            rate_hz,
            seed,
        } => cmd_ambient(&load_config(config.as_deref())?, duration_s, rate_hz, seed),
        Commands::Polar {
            config,
            fan,
            from,
            to,
            step,
            json,
        } => cmd_polar(&load_config(config.as_deref())?, fan, from, to, step, json),
        Commands::Config(ConfigCommands::Init { path, force }) => cmd_config_init(&path, force),
        Commands::Config(ConfigCommands::Validate { path }) => cmd_config_validate(&path),
        Commands::Config(ConfigCommands::Show { config }) => {
            let config = load_config(config.as_deref())?;
            print!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> CliResult<TunnelConfig> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            Ok(wt_config::load(path)?)
        }
        None => Ok(TunnelConfig::default()),
    }
}

fn cadence(config: &TunnelConfig, rate_hz: Option<f64>) -> CliResult<PollCadence> {
    match rate_hz {
        Some(hz) => Ok(PollCadence::from_frequency(hz)?),
        None => Ok(wt_config::poll_cadence(config)?),
    }
}

struct RunOptions {
    duration_s: f64,
    rate_hz: Option<f64>,
    fan: Option<f64>,
    aoa: Option<f64>,
    seed: Option<u64>,
    ramp_every_s: Option<f64>,
    format: OutputFormat,
    output: Option<PathBuf>,
}

fn cmd_run(config: &TunnelConfig, opts: &RunOptions) -> CliResult<()> {
    let cadence = cadence(config, opts.rate_hz)?;
    let plan = SessionPlan {
        duration: seconds("duration", opts.duration_s)?,
        ramp_every: opts
            .ramp_every_s
            .map(|s| seconds("ramp interval", s))
            .transpose()?,
        fan_step_pct: config.controls.fan_step_pct,
        aoa_step_deg: config.controls.aoa_step_deg,
    };

    let mut tunnel = wt_config::build_tunnel(config, MonotonicClock, opts.seed);
    if let Some(fan) = opts.fan {
        tunnel.set_fan_speed(fan);
    }
    if let Some(aoa) = opts.aoa {
        tunnel.set_angle_of_attack(aoa);
    }
    tunnel.start();

    let mut log = wt_config::reading_log(config)?;
    // Machine formats own stdout unless they go to a file.
    let machine = matches!(opts.format, OutputFormat::Json | OutputFormat::Csv);
    let chatty = !machine || opts.output.is_some();
    if chatty {
        println!(
            "Session started {} at {:.1} Hz for {:.1} s",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            cadence.frequency(),
            opts.duration_s
        );
    }

    let mut csv = match (opts.format, &opts.output) {
        (OutputFormat::Csv, Some(path)) => {
            let file: Box<dyn Write> = Box::new(BufWriter::new(File::create(path)?));
            Some(render::CsvStream::new(file)?)
        }
        (OutputFormat::Csv, None) => {
            let out: Box<dyn Write> = Box::new(io::stdout());
            Some(render::CsvStream::new(out)?)
        }
        _ => None,
    };

    let mut panel = Panel::new();
    let mut stdout = io::stdout().lock();
    if opts.format == OutputFormat::Table {
        writeln!(stdout, "{}", render::table_header())?;
    }

    let mut all: Vec<ReadingSet> = Vec::new();
    let polls = run_session(
        &mut tunnel,
        cadence,
        &plan,
        std::thread::sleep,
        |reading| {
            log.push(*reading);
            match opts.format {
                OutputFormat::Table => writeln!(stdout, "{}", render::table_row(reading))?,
                OutputFormat::Csv => {
                    if let Some(csv) = csv.as_mut() {
                        csv.write(reading)?;
                    }
                }
                OutputFormat::Json => all.push(*reading),
                OutputFormat::Dashboard => {
                    panel.update(reading);
                    // One easing frame per poll.
                    panel.animate();
                    write!(stdout, "\x1b[2J\x1b[H{}", render::dashboard(&panel, reading))?;
                }
            }
            stdout.flush()?;
            Ok(())
        },
    )?;
    drop(stdout);

    tunnel.stop();
    tracing::info!(polls, "session finished");

    match (opts.format, &opts.output) {
        (OutputFormat::Json, Some(path)) => {
            serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), &all)?;
            println!("✓ Wrote {} readings to {}", all.len(), path.display());
        }
        (OutputFormat::Json, None) => {
            println!("{}", serde_json::to_string_pretty(&all)?);
        }
        _ => {}
    }
    if let Some(csv) = csv {
        let rows = csv.rows();
        csv.finish()?;
        if let Some(path) = &opts.output {
            println!("✓ Wrote {} readings to {}", rows, path.display());
        }
    }

    if chatty {
        print_summary(&log);
    }
    Ok(())
}

fn print_summary(log: &wt_sim::ReadingLog) {
    match log.summary() {
        Some(s) => {
            println!("\nSession summary:");
            println!("  Samples:        {}", s.samples);
            println!("  Span:           {:.2} s", s.span_s);
            println!(
                "  Airspeed:       mean {:.2} mph, max {:.2} mph",
                s.mean_airspeed_mph, s.max_airspeed_mph
            );
            println!("  Mean lift:      {:.4} N", s.mean_lift_n);
            println!("  Mean drag:      {:.4} N", s.mean_drag_n);
            println!("  Mean fan out:   {:.1} %", s.mean_fan_output_pct);
        }
        None => println!("\nNo readings taken"),
    }
}

fn cmd_snapshot(
    config: &TunnelConfig,
    fan: Option<f64>,
    aoa: Option<f64>,
    seed: Option<u64>,
    stopped: bool,
) -> CliResult<()> {
    let mut tunnel = wt_config::build_tunnel(config, MonotonicClock, seed);
    if let Some(fan) = fan {
        tunnel.set_fan_speed(fan);
    }
    if let Some(aoa) = aoa {
        tunnel.set_angle_of_attack(aoa);
    }
    if !stopped {
        tunnel.start();
    }
    let reading = tunnel.poll();
    println!("{}", serde_json::to_string_pretty(&reading)?);
    Ok(())
}

fn cmd_ambient(
    config: &TunnelConfig,
    duration_s: f64,
    rate_hz: Option<f64>,
    seed: Option<u64>,
) -> CliResult<()> {
    let cadence = cadence(config, rate_hz)?;
    let duration = seconds("duration", duration_s)?;
    let clock = MonotonicClock;
    let generator = wt_config::ambient_generator(config, &clock);
    let mut noise = wt_config::noise_source(config, seed);

    let begin = clock.now();
    let mut schedule = PollSchedule::new(cadence, begin);
    println!("{}", render::ambient_header());
    while clock.now().saturating_duration_since(begin) < duration {
        let now = clock.now();
        if !schedule.is_due(now) {
            std::thread::sleep(schedule.time_until_due(now));
            continue;
        }
        schedule.advance(now);
        println!("{}", render::ambient_row(&generator.sample(now, &mut noise)));
    }
    Ok(())
}

fn cmd_polar(
    config: &TunnelConfig,
    fan: f64,
    from: f64,
    to: f64,
    step: f64,
    json: bool,
) -> CliResult<()> {
    wt_sim::ANGLE_OF_ATTACK_LIMITS.check(from, "polar start angle")?;
    wt_sim::ANGLE_OF_ATTACK_LIMITS.check(to, "polar end angle")?;
    let range = Bounds::new(from, to, "polar angle sweep")?;
    let angles = render::sweep(range, step)
        .ok_or_else(|| CliError::InvalidArg(format!("bad sweep step: {step}")))?;
    let model = wt_config::aero_model(config).noiseless();
    let mut noise = wt_sim::SilentNoise;
    let airspeed = model.airspeed_mph(
        wt_sim::FAN_SPEED_LIMITS.clamp(fan),
        true,
        &mut noise,
    );
    let points = render::polar(&model, airspeed, &angles);

    if json {
        println!("{}", serde_json::to_string_pretty(&points)?);
    } else {
        println!("Polar at {:.1} mph", airspeed);
        println!("{}", render::polar_header());
        for p in &points {
            println!("{}", render::polar_row(p));
        }
    }
    Ok(())
}

fn cmd_config_init(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::InvalidArg(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    wt_config::save(path, &TunnelConfig::default())?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}

fn cmd_config_validate(path: &Path) -> CliResult<()> {
    println!("Validating config: {}", path.display());
    wt_config::load(path)?;
    println!("✓ Config is valid");
    Ok(())
}
