//! CLI entry point: fetch each configured feed, ingest it, and exit.
//!
//! Feeds are published per entity kind, so each source flag enables exactly
//! that kind. Decode problems are recorded in the database and do not fail
//! the run; storage and fetch errors do.

use clap::Parser;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

use gtfs_rtdb::error::Error;
use gtfs_rtdb::fetch;
use gtfs_rtdb::ingest::{self, EntityKinds, IngestOutcome};

#[derive(Parser)]
#[command(name = "gtfs-rtdb")]
#[command(about = "Load GTFS-realtime feeds into a database", long_about = None)]
struct Cli {
    /// Database connection string; falls back to DATABASE_URL
    #[arg(short, long, value_name = "URL")]
    database: Option<String>,

    /// Alerts feed URL or file path
    #[arg(short, long, value_name = "SOURCE")]
    alerts: Option<String>,

    /// Trip updates feed URL or file path
    #[arg(short, long, value_name = "SOURCE")]
    trip_updates: Option<String>,

    /// Vehicle positions feed URL or file path
    #[arg(short = 'p', long, value_name = "SOURCE")]
    vehicle_positions: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::try_init().ok();

    let cli = Cli::parse();

    let database = cli
        .database
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .ok_or_else(|| {
            Error::Config("no database specified (use --database or DATABASE_URL)".to_owned())
        })?;

    let feeds = [
        (cli.alerts, EntityKinds::only_alerts()),
        (cli.trip_updates, EntityKinds::only_trip_updates()),
        (cli.vehicle_positions, EntityKinds::only_vehicle_positions()),
    ];

    if feeds.iter().all(|(source, _)| source.is_none()) {
        return Err(Error::Config(
            "no alerts, trip updates, or vehicle positions sources were specified".to_owned(),
        ));
    }

    let db = Database::connect(database.as_str()).await?;

    log::info!("migrating database");
    Migrator::up(&db, None).await?;

    for (source, kinds) in feeds {
        let Some(source) = source else { continue };

        log::debug!("fetching {}", source);
        let bytes = fetch::load_bytes(&source).await?;

        match ingest::ingest(&db, &bytes, &source, kinds).await? {
            IngestOutcome::Written { message_id, stats } => {
                log::info!(
                    "archived {} as message {}: {} alerts, {} trip updates, \
                     {} stop time updates, {} vehicle positions",
                    source,
                    message_id,
                    stats.alerts,
                    stats.trip_updates,
                    stats.stop_time_updates,
                    stats.vehicle_positions
                );
            }
            IngestOutcome::AlreadyArchived => {
                log::info!("{} already archived, nothing to do", source);
            }
            IngestOutcome::Failed { error } => {
                log::error!("could not ingest {}: {}", source, error);
            }
        }
    }

    Ok(())
}
