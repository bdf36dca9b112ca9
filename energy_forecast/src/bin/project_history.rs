use energy_forecast::logger::initialize_logger;
use energy_forecast::{DataLoader, ProjectionConfig, ProjectionError, ProjectionStrategy, Projector};
use log::error;
use std::collections::BTreeSet;
use std::env;
use std::process;

const USAGE: &str = "Usage: project_history <history.csv> [--horizon N] \
[--strategy linear_drift|pattern_repeat] [--config config.json] [--seed N] [--metric NAME]...";

#[derive(Debug, Default)]
struct Args {
    csv_path: String,
    config_path: Option<String>,
    horizon: Option<i64>,
    strategy: Option<ProjectionStrategy>,
    seed: Option<u64>,
    metrics: Vec<String>,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Args, ProjectionError> {
    let mut parsed = Args::default();
    let mut csv_path = None;

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next().ok_or_else(|| {
                ProjectionError::InvalidParameter(format!("{} needs a value", flag))
            })
        };

        match arg.as_str() {
            "--horizon" => {
                let raw = value("--horizon")?;
                parsed.horizon = Some(raw.parse().map_err(|_| {
                    ProjectionError::ParseError(format!("Invalid horizon: {}", raw))
                })?);
            }
            "--strategy" => parsed.strategy = Some(value("--strategy")?.parse()?),
            "--config" => parsed.config_path = Some(value("--config")?),
            "--seed" => {
                let raw = value("--seed")?;
                parsed.seed = Some(raw.parse().map_err(|_| {
                    ProjectionError::ParseError(format!("Invalid seed: {}", raw))
                })?);
            }
            "--metric" => parsed.metrics.push(value("--metric")?),
            flag if flag.starts_with("--") => {
                return Err(ProjectionError::InvalidParameter(format!(
                    "Unknown option {}",
                    flag
                )))
            }
            _ if csv_path.is_some() => {
                return Err(ProjectionError::InvalidParameter(format!(
                    "Unexpected argument {}",
                    arg
                )))
            }
            _ => csv_path = Some(arg.clone()),
        }
    }

    parsed.csv_path = csv_path.ok_or_else(|| {
        ProjectionError::InvalidParameter("Missing history CSV path".to_string())
    })?;
    Ok(parsed)
}

fn run(args: Args) -> Result<(), ProjectionError> {
    let mut config = match &args.config_path {
        Some(path) => ProjectionConfig::from_path(path)?,
        None => ProjectionConfig::default(),
    };
    if let Some(horizon) = args.horizon {
        config.horizon = horizon;
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let history = DataLoader::from_csv(&args.csv_path)?;

    let metrics: Vec<String> = if args.metrics.is_empty() {
        history
            .iter()
            .flat_map(|record| record.metric_names())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    } else {
        args.metrics
    };

    let predicted = Projector::new(config)?.project(&history, &metrics)?;
    println!("{}", serde_json::to_string_pretty(&predicted)?);

    Ok(())
}

fn main() {
    initialize_logger();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        error!("Projection failed: {}", e);
        process::exit(1);
    }
}
