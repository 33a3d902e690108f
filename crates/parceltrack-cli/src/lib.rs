use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use parceltrack::prelude::initial_bearing_degrees;
use parceltrack::ParceltrackError;
use parceltrack_access::{has_capability, Capability, Role, User};
use parceltrack_config::{LogFormat, LoggingConfig, ParceltrackConfig};
use parceltrack_core::{GeoPoint, PackageStatus, RouteSnapshot, Shipment};
use parceltrack_progress::{compute_progress, marker_position, AnimationState, ProgressResult};
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "parceltrack",
    version,
    about = "Shipment progress estimation and diagnostics for ParcelTrack"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Optional path to parceltrack YAML config")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Estimate(EstimateArgs),
    Animate(AnimateArgs),
    Status(StatusArgs),
    Can(CanArgs),
    Schema,
    Validate(ValidateArgs),
}

#[derive(Debug, Clone, Args)]
pub struct RouteArgs {
    #[arg(long, help = "Route origin as `Label@lat,lon`")]
    pub origin: Option<String>,
    #[arg(long, help = "Route destination as `Label@lat,lon`")]
    pub destination: Option<String>,
    #[arg(long, help = "Current position as `Label@lat,lon`; defaults to the origin")]
    pub current: Option<String>,
    #[arg(long)]
    pub delivered: bool,
    #[arg(
        long,
        conflicts_with_all = ["origin", "destination", "current", "delivered"],
        help = "Shipment JSON file to read the route from"
    )]
    pub shipment: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub route: RouteArgs,
    #[arg(long, help = "Print the estimate as JSON")]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct AnimateArgs {
    #[command(flatten)]
    pub route: RouteArgs,
    #[arg(long, default_value_t = 10, help = "Frames per second to sample")]
    pub fps: u32,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    #[arg(help = "Package status value, e.g. out_for_delivery")]
    pub value: String,
}

#[derive(Debug, Args)]
pub struct CanArgs {
    #[arg(long)]
    pub role: String,
    #[arg(long)]
    pub capability: String,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long, help = "Config file to validate")]
    pub input: PathBuf,
}

pub fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.logging)?;
    tracing::debug!(command = ?cli.command, "dispatching command");

    let output = execute_command(cli.command, &config)?;
    write_stdout(&output)
}

fn execute_command(command: Command, config: &ParceltrackConfig) -> Result<String, CliError> {
    match command {
        Command::Estimate(args) => {
            let route = resolve_route(&args.route)?;
            let result = compute_progress(&route, &config.estimator_config());
            render_estimate(&route, &result, args.json)
        }
        Command::Animate(args) => {
            let route = resolve_route(&args.route)?;
            run_animate(&route, config, args.fps)
        }
        Command::Status(args) => {
            let status = args
                .value
                .parse::<PackageStatus>()
                .map_err(ParceltrackError::from)?;
            Ok(format!(
                "{} ({}){}\n",
                status.label(),
                status.as_str(),
                if status.is_terminal() { ", terminal" } else { "" }
            ))
        }
        Command::Can(args) => run_can(&args),
        Command::Schema => {
            let schema = parceltrack_config::json_schema();
            serde_json::to_string_pretty(&schema)
                .map(|text| text + "\n")
                .map_err(CliError::Json)
        }
        Command::Validate(args) => {
            load_config(Some(&args.input))?;
            Ok(format!("{}: ok\n", args.input.display()))
        }
    }
}

fn run_can(args: &CanArgs) -> Result<String, CliError> {
    let role = args.role.parse::<Role>().map_err(ParceltrackError::from)?;
    let capability = args
        .capability
        .parse::<Capability>()
        .map_err(ParceltrackError::from)?;

    let user = User::new("cli", role);
    if !has_capability(&user, capability) {
        return Err(CliError::CapabilityDenied { role, capability });
    }

    Ok(format!("{role} may {capability}\n"))
}

fn run_animate(
    route: &RouteSnapshot,
    config: &ParceltrackConfig,
    fps: u32,
) -> Result<String, CliError> {
    if fps == 0 {
        return Err(CliError::ZeroFps);
    }

    let target = compute_progress(route, &config.estimator_config()).percent_complete;
    let mut output = String::new();
    for frame in animation_frames(config, target, route.delivered, fps) {
        let marker = marker_position(route, frame.displayed_percent)
            .map_err(ParceltrackError::from)?;
        output.push_str(&format!(
            "{:>7.0}ms {:>6.2}% marker={:.4},{:.4}\n",
            frame.elapsed_ms,
            frame.displayed_percent,
            marker.latitude(),
            marker.longitude()
        ));
    }
    Ok(output)
}

/// Samples one animation run at `fps` until it completes.
fn animation_frames(
    config: &ParceltrackConfig,
    target_percent: f64,
    delivered: bool,
    fps: u32,
) -> Vec<AnimationState> {
    let mut animator = config.animator();
    animator.retarget(target_percent, delivered);

    let frame_ms = 1_000.0 / f64::from(fps);
    let mut frames = Vec::new();
    let mut frame_index: u32 = 0;
    loop {
        let elapsed_ms = (f64::from(frame_index) * frame_ms).min(animator.duration_ms());
        frames.push(animator.tick(elapsed_ms));
        if animator.is_complete() {
            return frames;
        }
        frame_index += 1;
    }
}

#[derive(Debug, Serialize)]
struct EstimateReport<'a> {
    origin: &'a str,
    destination: &'a str,
    current: &'a str,
    delivered: bool,
    percent_complete: f64,
    traveled_miles: f64,
    remaining_miles: f64,
    heading_degrees: f64,
    eta: String,
}

fn render_estimate(
    route: &RouteSnapshot,
    result: &ProgressResult,
    json: bool,
) -> Result<String, CliError> {
    let heading = initial_bearing_degrees(&route.current, &route.destination);
    if json {
        let report = EstimateReport {
            origin: route.origin.label(),
            destination: route.destination.label(),
            current: route.current.label(),
            delivered: route.delivered,
            percent_complete: result.percent_complete,
            traveled_miles: result.traveled_miles_rounded(),
            remaining_miles: result.remaining_miles_rounded(),
            heading_degrees: heading.round(),
            eta: result.eta_label(),
        };
        return serde_json::to_string(&report)
            .map(|text| text + "\n")
            .map_err(CliError::Json);
    }

    Ok(format!(
        "{} -> {} (now at {})\nprogress:  {}%\ntraveled:  {} mi\nremaining: {} mi\nheading:   {:.0} deg\neta:       {}\n",
        route.origin.label(),
        route.destination.label(),
        route.current.label(),
        result.percent_rounded(),
        result.traveled_miles_rounded(),
        result.remaining_miles_rounded(),
        heading,
        result.eta_label()
    ))
}

fn resolve_route(args: &RouteArgs) -> Result<RouteSnapshot, CliError> {
    if let Some(path) = args.shipment.as_deref() {
        return Ok(read_shipment(path)?.snapshot());
    }

    let (Some(origin), Some(destination)) = (args.origin.as_deref(), args.destination.as_deref())
    else {
        return Err(CliError::MissingRoute);
    };

    let origin = parse_point("origin", origin)?;
    let destination = parse_point("destination", destination)?;
    let current = match args.current.as_deref() {
        Some(raw) => parse_point("current", raw)?,
        None => origin.clone(),
    };

    Ok(RouteSnapshot::new(origin, destination, current, args.delivered))
}

fn read_shipment(path: &Path) -> Result<Shipment, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::InputRead {
        path: path.display().to_string(),
        source,
    })?;
    let shipment: Shipment = serde_json::from_str(&text).map_err(CliError::Json)?;
    shipment.validate().map_err(ParceltrackError::from)?;
    tracing::debug!(
        tracking_number = shipment.tracking_number(),
        status = %shipment.status,
        events = shipment.events.len(),
        "loaded shipment"
    );
    Ok(shipment)
}

/// Parses `Label@lat,lon`; a bare `lat,lon` is labeled with its own text.
fn parse_point(field: &'static str, raw: &str) -> Result<GeoPoint, CliError> {
    let (label, coordinates) = match raw.rsplit_once('@') {
        Some((label, coordinates)) => (label.trim(), coordinates),
        None => (raw.trim(), raw),
    };

    let invalid = || CliError::InvalidPoint {
        field,
        value: raw.to_owned(),
    };
    let (latitude, longitude) = coordinates.split_once(',').ok_or_else(invalid)?;
    let latitude = latitude.trim().parse::<f64>().map_err(|_| invalid())?;
    let longitude = longitude.trim().parse::<f64>().map_err(|_| invalid())?;

    GeoPoint::validated(latitude, longitude, label)
        .map_err(|source| CliError::Facade(ParceltrackError::from(source)))
}

fn load_config(path: Option<&Path>) -> Result<ParceltrackConfig, CliError> {
    match path {
        Some(path) => ParceltrackConfig::load(path)
            .map_err(|source| CliError::Facade(ParceltrackError::Config(source))),
        None => Ok(ParceltrackConfig::default()),
    }
}

/// Installs the global subscriber; `RUST_LOG` overrides the configured level.
fn init_logging(config: &LoggingConfig) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_directive()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    installed.map_err(|error| CliError::Logging {
        reason: error.to_string(),
    })
}

fn write_stdout(output: &str) -> Result<(), CliError> {
    io::stdout()
        .write_all(output.as_bytes())
        .map_err(|source| CliError::StdoutWrite { source })
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Facade(#[from] ParceltrackError),

    #[error("a route needs `--origin` and `--destination`, or `--shipment <file>`")]
    MissingRoute,

    #[error("invalid {field} point `{value}`; expected `Label@lat,lon`")]
    InvalidPoint { field: &'static str, value: String },

    #[error("`--fps` must be greater than zero")]
    ZeroFps,

    #[error("role `{role}` may not {capability}")]
    CapabilityDenied { role: Role, capability: Capability },

    #[error("failed to read input file `{path}`: {source}")]
    InputRead { path: String, source: io::Error },

    #[error("json error: {0}")]
    Json(serde_json::Error),

    #[error("failed to initialise logging: {reason}")]
    Logging { reason: String },

    #[error("failed to write stdout: {source}")]
    StdoutWrite { source: io::Error },
}

impl CliError {
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::MissingRoute | Self::InvalidPoint { .. } | Self::ZeroFps => 2,
            _ => 1,
        }
    }
}
