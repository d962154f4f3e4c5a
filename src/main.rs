//! Command-line front end: parse a logger file and print one channel as CSV.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sensorplot::data::export::{save_series_csv, write_series_csv};
use sensorplot::{ChannelKey, LogParser, SensorPlotConfig, SensorPlotError, SeriesView};

#[derive(Parser)]
#[command(name = "sensorplot")]
#[command(about = "Parse a sensor log and print one channel as CSV")]
struct Cli {
    /// Logger text file (`HH:MM:SS, temperature, pressure, humidity, light` per line)
    log: PathBuf,

    /// Channel to print: temperature, pressure, humidity, light or none
    channel: Option<String>,

    /// YAML or JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the CSV to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<(), SensorPlotError> {
    let config = match &cli.config {
        Some(p) => SensorPlotConfig::load_from_path(p)?,
        None => SensorPlotConfig::default(),
    };

    let parser = LogParser::new(config.parser.clone());
    let parsed = parser.parse_file(&cli.log)?;

    let mut view = SeriesView::with_padding(config.view.x_padding_fraction);
    view.load(parsed.timeline, parsed.channels)?;
    match &cli.channel {
        Some(key) => view.set_active_channel(key)?,
        None => view.select(Some(config.view.default_channel.unwrap_or(ChannelKey::Temperature))),
    }

    let series = view.current_series();
    match series.x_bounds {
        Some((lo, hi)) => {
            let axis = config.view.axis_formatter();
            eprintln!(
                "{} samples, {} rejected lines, {} rollovers; x range {} .. {}",
                parsed.report.accepted,
                parsed.report.rejected(),
                parsed.report.rollovers,
                axis.format(lo, (lo, hi)),
                axis.format(hi, (lo, hi))
            );
        }
        None => eprintln!("no channel selected"),
    }

    match &cli.output {
        Some(path) => save_series_csv(path, series),
        None => {
            let stdout = std::io::stdout();
            write_series_csv(stdout.lock(), series).map_err(|source| SensorPlotError::Io {
                path: PathBuf::from("<stdout>"),
                source,
            })
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(SensorPlotError::Format { .. }) => {
            eprintln!("No valid data found in the file.");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
