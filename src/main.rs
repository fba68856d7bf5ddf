//! bikestat - Explore US bikeshare trip data from local CSV files

use bikestat::{
    aggregation::CityReport,
    cli::{parse_city, parse_filter, Cli, Command},
    data_loader::{CitySources, TripLoader},
    error::Result,
    interactive,
    output::get_formatter,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. The --quiet flag should override RUST_LOG.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("warn")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bikestat=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let sources = match &cli.data_dir {
        Some(dir) => CitySources::from_dir(dir),
        None => CitySources::from_env(),
    };
    let loader = TripLoader::new(sources);

    match cli.command {
        Some(Command::Report {
            city,
            month,
            day,
            json,
        }) => {
            info!("Running one-shot report");

            let city = parse_city(&city)?;
            let filter = parse_filter(&month, &day)?;
            let table = loader.load(city, &filter)?;

            if table.is_empty() {
                eprintln!("No trips matched that filter.");
                return Ok(());
            }

            let report = CityReport::from_table(&table)?;
            let formatter = get_formatter(json);
            println!("{}", formatter.format_city_report(&report));
        }

        Some(Command::Interactive) | None => {
            info!("Starting interactive session");
            interactive::run(loader)?;
        }
    }

    Ok(())
}
