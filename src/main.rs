//! CLI entry point for the air exposure toolkit.
//!
//! Provides subcommands for summarising daily exposure CSVs, generating
//! cleaner route alternatives, fetching dashboard data through the Python
//! data scripts, and managing the stored user profile.

use air_exposure::{
    config::AppConfig,
    dashboard::{DashboardConfig, FetchOptions, PythonRunner, fast_dashboard, refresh_sources},
    exposure::{ExposureRecord, calculate_exposure_summary, health::health_impacts},
    fetch::BasicClient,
    outcome::Outcome,
    output::{SummaryRow, append_summary, print_pretty, write_json},
    parser::load_records,
    profile::{
        Frequency, JsonFileStore, LocationCoordinates, NewRoute, ProfileSession, ProfileUpdate,
        RouteUpdate, TransportMode, locations::find_location,
    },
    routes::{optimize_routes, sample_base_routes},
};
use anyhow::{Result, anyhow, bail};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "air_exposure")]
#[command(about = "Air quality exposure toolkit for Kathmandu Valley", long_about = None)]
struct Cli {
    /// Profile JSON file (overrides AIR_EXPOSURE_PROFILE_PATH)
    #[arg(long, global = true)]
    profile_path: Option<PathBuf>,

    /// Directory holding the data scripts (overrides AIR_EXPOSURE_PROJECT_DIR)
    #[arg(long, global = true)]
    project_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a daily exposure CSV from a file or URL
    Summary {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// CSV file to append the summary row to
        #[arg(short, long)]
        append: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Generate cleaner alternatives for the sample commute routes
    Routes,
    /// Fetch dashboard data through the fast data script
    Dashboard {
        /// Ask the script to bypass its cache
        #[arg(short, long, default_value_t = false)]
        force: bool,

        /// Serve the built-in mock payload without running the script
        #[arg(short, long, default_value_t = false)]
        mock: bool,
    },
    /// Refresh every upstream data source
    Refresh,
    /// Inspect or edit the stored user profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Print the current profile
    Show,
    /// Update profile details
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Known location name for home
        #[arg(long)]
        home: Option<String>,
        /// Known location name for work
        #[arg(long)]
        work: Option<String>,
    },
    /// Add a commute route between two known locations
    AddRoute {
        #[arg(long)]
        name: String,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Intermediate stops, in order
        #[arg(long)]
        via: Vec<String>,
        #[arg(long, value_enum, default_value_t = Frequency::Weekdays)]
        frequency: Frequency,
        #[arg(long, value_enum, default_value_t = TransportMode::PublicTransport)]
        mode: TransportMode,
        #[arg(long)]
        departure: Option<String>,
        #[arg(long = "return")]
        return_time: Option<String>,
    },
    /// Change fields of an existing route
    UpdateRoute {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_enum)]
        frequency: Option<Frequency>,
        #[arg(long, value_enum)]
        mode: Option<TransportMode>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Remove a route
    DeleteRoute { id: String },
    /// Most visited locations and their typical exposure
    Visits {
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let config = AppConfig::from_env()?;

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = config
        .log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = config
        .log_file_path
        .file_name()
        .unwrap_or(OsStr::new("air_exposure.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let profile_path = cli.profile_path.unwrap_or(config.profile_path);
    let project_dir = cli.project_dir.unwrap_or(config.project_dir);

    match cli.command {
        Commands::Summary {
            source,
            append,
            json,
        } => summary(&source, append.as_deref(), json).await?,
        Commands::Routes => {
            let optimized = optimize_routes(&sample_base_routes());
            info!(routes = optimized.len(), "Route alternatives generated");
            write_json(std::io::stdout().lock(), &optimized)?;
        }
        Commands::Dashboard { force, mock } => {
            let dashboard = DashboardConfig::new(&project_dir);
            let runner = PythonRunner::new(&project_dir, config.script_timeout);
            let outcome = fast_dashboard(&dashboard, &runner, FetchOptions { force, mock }).await;
            if let Some(reason) = outcome.fallback_reason() {
                warn!(reason = %reason, "Dashboard served from fallback data");
            }
            match outcome {
                Outcome::Ok(response) | Outcome::Fallback { data: response, .. } => {
                    write_json(std::io::stdout().lock(), &response)?
                }
                Outcome::Error(e) => bail!("dashboard unavailable: {e}"),
            }
        }
        Commands::Refresh => {
            let dashboard = DashboardConfig::new(&project_dir);
            let runner = PythonRunner::new(&project_dir, config.script_timeout);
            match refresh_sources(&dashboard, &runner).await {
                Outcome::Ok(report) | Outcome::Fallback { data: report, .. } => {
                    write_json(std::io::stdout().lock(), &report)?
                }
                Outcome::Error(e) => bail!("refresh failed: {e}"),
            }
        }
        Commands::Profile { command } => {
            let mut session = ProfileSession::open(JsonFileStore::new(&profile_path));
            profile(&mut session, command)?;
        }
    }

    Ok(())
}

/// Loads daily exposure records and reports their summary.
#[tracing::instrument(skip(append, json))]
async fn summary(source: &str, append: Option<&Path>, json: bool) -> Result<()> {
    let client = BasicClient::new();
    let records: Vec<ExposureRecord> = match load_records(&client, source).await {
        Outcome::Ok(records) | Outcome::Fallback { data: records, .. } => records,
        Outcome::Error(e) => bail!("could not load {source}: {e}"),
    };

    let Some(summary) = calculate_exposure_summary(&records) else {
        warn!(source, "No exposure records to summarise");
        return Ok(());
    };
    info!(
        records = records.len(),
        daily_average = summary.daily_average,
        current_aqi = summary.current_aqi,
        "Exposure summary calculated"
    );
    for impact in health_impacts(&summary) {
        info!(impact, "Health impact");
    }

    if json {
        write_json(std::io::stdout().lock(), &summary)?;
    } else {
        print_pretty(&summary);
        println!(
            "daily average {:.1} µg/m³, trend {} ({}), peak {:.1} at {}, above WHO {}, AQI {}",
            summary.daily_average,
            summary.weekly_trend,
            summary.weekly_trend_direction.as_str(),
            summary.highest_value,
            summary.highest_location,
            summary.exposure_above_who,
            summary.current_aqi,
        );
    }

    if let Some(path) = append {
        append_summary(path, &SummaryRow::new(source, records.len(), &summary))?;
        info!(path = %path.display(), "Summary appended");
    }
    Ok(())
}

fn known_location(name: &str) -> Result<LocationCoordinates> {
    find_location(name)
        .map(|l| l.coordinates())
        .ok_or_else(|| anyhow!("unknown location {name:?}"))
}

fn profile(session: &mut ProfileSession<JsonFileStore>, command: ProfileCommand) -> Result<()> {
    if let Some(reason) = session.fallback_reason() {
        info!(reason = %reason, path = %session.store().path().display(), "Using default profile");
    }

    match command {
        ProfileCommand::Show => write_json(std::io::stdout().lock(), session.profile())?,
        ProfileCommand::Update {
            name,
            email,
            home,
            work,
        } => {
            let update = ProfileUpdate {
                name,
                email,
                home_location: home.as_deref().map(known_location).transpose()?,
                work_location: work.as_deref().map(known_location).transpose()?,
                ..Default::default()
            };
            let updated = session.update_profile(update)?;
            write_json(std::io::stdout().lock(), updated)?;
        }
        ProfileCommand::AddRoute {
            name,
            from,
            to,
            via,
            frequency,
            mode,
            departure,
            return_time,
        } => {
            let route = NewRoute {
                name,
                start: known_location(&from)?,
                end: known_location(&to)?,
                via: via
                    .iter()
                    .map(|v| known_location(v))
                    .collect::<Result<_>>()?,
                frequency,
                departure_time: departure,
                return_time,
                transport_mode: mode,
            };
            let added = session.add_route(route)?;
            info!(id = %added.id, "Route added");
            write_json(std::io::stdout().lock(), added)?;
        }
        ProfileCommand::UpdateRoute {
            id,
            name,
            frequency,
            mode,
            active,
        } => {
            let update = RouteUpdate {
                name,
                frequency,
                transport_mode: mode,
                active,
                ..Default::default()
            };
            let updated = session.update_route(&id, update)?;
            write_json(std::io::stdout().lock(), updated)?;
        }
        ProfileCommand::DeleteRoute { id } => {
            let removed = session.delete_route(&id)?;
            info!(id = %removed.id, name = %removed.name, "Route deleted");
        }
        ProfileCommand::Visits { limit } => {
            let exposure = session.personalized_location_exposure(limit);
            if exposure.is_empty() {
                warn!("Profile has no routes; add one to see personalised exposure");
            }
            write_json(std::io::stdout().lock(), &exposure)?;
        }
    }
    Ok(())
}

