use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use serde::Serialize;
use tracing::{error, warn};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use transit_planner::domain::parse_departure;
use transit_planner::dto::{ErrorResponse, PlanJourneyResponse};
use transit_planner::feed::Feed;
use transit_planner::planner::{JourneyRequest, Planner, PlannerConfig};

/// Feed directory used when `TRANSIT_FEED_DIR` is not set.
const DEFAULT_FEED_DIR: &str = "data";

const USAGE: &str = "usage: transit-planner <from-node-id> <to-node-id> [YYYY-MM-DDTHH:MM]";

fn init_logger() {
    let default_level = LevelFilter::INFO;
    let rust_log =
        env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_level.to_string());
    let env_filter = EnvFilter::try_new(rust_log).unwrap_or_else(|err| {
        eprintln!(
            "invalid {}, falling back to level '{}' - {}",
            EnvFilter::DEFAULT_ENV,
            default_level,
            err,
        );
        EnvFilter::new(default_level.to_string())
    });

    // Logs go to stderr; stdout carries the JSON response only
    let result = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .try_init();
    if let Err(err) = result {
        eprintln!("failed to set global tracing subscriber - {err}");
    }
}

fn planner_config() -> PlannerConfig {
    let Ok(value) = env::var("TRANSIT_MAX_ROUNDS") else {
        return PlannerConfig::default();
    };
    match value.parse() {
        Ok(max_rounds) => PlannerConfig::new(max_rounds),
        Err(err) => {
            warn!(value = %value, error = %err, "Invalid TRANSIT_MAX_ROUNDS, using default");
            PlannerConfig::default()
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> bool {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            true
        }
        Err(err) => {
            error!(error = %err, "Failed to serialize response");
            false
        }
    }
}

fn main() -> ExitCode {
    init_logger();

    let args: Vec<String> = env::args().skip(1).collect();
    let (from, to, departure) = match args.as_slice() {
        [from, to] => (from, to, None),
        [from, to, departure] => (from, to, Some(departure)),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    let mut request = JourneyRequest::new(from.as_str(), to.as_str());
    if let Some(departure) = departure {
        match parse_departure(departure, Local::now().date_naive()) {
            Ok(departure) => request = request.departing_at(departure),
            Err(err) => {
                eprintln!("{err}\n{USAGE}");
                return ExitCode::from(2);
            }
        }
    }

    let feed_dir = env::var("TRANSIT_FEED_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_FEED_DIR));
    let feed = match Feed::load_dir(&feed_dir) {
        Ok(feed) => feed,
        Err(err) => {
            error!(dir = %feed_dir.display(), error = %err, "Failed to load feed");
            return ExitCode::FAILURE;
        }
    };

    let config = planner_config();
    let planner = Planner::new(&feed, &config);

    match planner.plan(&request) {
        Ok(result) => {
            if print_json(&PlanJourneyResponse::from_result(&feed, &result)) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            print_json(&ErrorResponse {
                error: err.to_string(),
            });
            ExitCode::FAILURE
        }
    }
}
