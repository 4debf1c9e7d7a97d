//! Parking service runtime.
//!
//! Provides [`ParkingRuntime`] that owns the service lifecycle: database
//! connection, migrations, spot seeding and shutdown. The CLI binary builds
//! a [`ParkingService`] from it and hands that to the console shell.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{info, warn};

use crate::application::{InputSource, ParkingService};
use crate::config::{AppConfig, LotSection};
use crate::domain::{AppResult, FarePolicy, ParkingSpot, RepositoryProvider};
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the parking service.
pub struct RuntimeOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Keep everything in memory instead of opening the database.
    pub in_memory: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            in_memory: false,
        }
    }
}

// ── ParkingRuntime ─────────────────────────────────────────────────

/// Handle to a started parking service.
pub struct ParkingRuntime {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the runtime was started with.
    pub config: AppConfig,

    fare_policy: FarePolicy,
    db: Option<DatabaseConnection>,
}

impl ParkingRuntime {
    /// Start the parking service with the given options.
    ///
    /// This will:
    /// 1. Validate the configuration and build the fare policy
    /// 2. Connect to the database and run migrations (unless in-memory)
    /// 3. Seed the spot layout from `[lot]` when no spots exist yet
    pub async fn start(opts: RuntimeOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting parking service...");

        let fare_policy = app_cfg.fare_policy()?;

        let (repos, db): (Arc<dyn RepositoryProvider>, Option<DatabaseConnection>) =
            if opts.in_memory {
                info!("Using in-memory storage, nothing will be persisted");
                (Arc::new(InMemoryRepositoryProvider::new()), None)
            } else {
                let db_config = DatabaseConfig {
                    url: app_cfg.database.connection_url(),
                };
                let db = init_database(&db_config).await?;

                if opts.auto_migrate {
                    info!("Running database migrations...");
                    Migrator::up(&db, None).await?;
                    info!("Migrations completed");
                }

                (Arc::new(SeaOrmRepositoryProvider::new(db.clone())), Some(db))
            };

        let seeded = seed_spots(repos.as_ref(), &app_cfg.lot).await?;
        if seeded > 0 {
            info!(
                car_spots = app_cfg.lot.car_spots,
                bike_spots = app_cfg.lot.bike_spots,
                "Seeded parking spot layout"
            );
        }

        info!("Parking service started");

        Ok(Self {
            repos,
            config: app_cfg,
            fare_policy,
            db,
        })
    }

    /// Parking service reading operator input from `input`.
    pub fn service(&self, input: Arc<dyn InputSource>) -> ParkingService {
        ParkingService::new(self.repos.clone(), input, self.fare_policy.clone())
    }

    pub fn fare_policy(&self) -> &FarePolicy {
        &self.fare_policy
    }

    /// Close the database connection.
    pub async fn shutdown(self) {
        info!("Shutting down parking service...");

        if let Some(db) = self.db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("Database connection closed");
            }
        }

        info!("Parking service shutdown complete");
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Insert the `[lot]` layout when the lot has no spots. Returns the number
/// of spots inserted.
pub async fn seed_spots(repos: &dyn RepositoryProvider, lot: &LotSection) -> AppResult<u64> {
    let spots = repos.spots();
    if spots.count().await? > 0 {
        return Ok(0);
    }

    let mut inserted = 0;
    for spot in ParkingSpot::layout(lot.car_spots, lot.bike_spots) {
        spots.insert(spot).await?;
        inserted += 1;
    }
    Ok(inserted)
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ParkingRuntime::start`]).
/// Logs go to stderr; stdout belongs to the console shell.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VehicleClass;

    fn sqlite_memory() -> RuntimeOptions {
        let mut config = AppConfig::default();
        config.database.url = Some("sqlite::memory:".to_string());
        RuntimeOptions {
            config,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn in_memory_runtime_seeds_layout() {
        let runtime = ParkingRuntime::start(RuntimeOptions {
            in_memory: true,
            ..Default::default()
        })
        .await
        .unwrap();

        let spots = runtime.repos.spots().find_all().await.unwrap();
        let classes: Vec<VehicleClass> = spots.iter().map(|s| s.class).collect();
        assert_eq!(
            classes,
            vec![
                VehicleClass::Car,
                VehicleClass::Car,
                VehicleClass::Car,
                VehicleClass::Bike,
                VehicleClass::Bike,
            ]
        );
        assert!(spots.iter().all(|s| s.available));
        assert_eq!(runtime.fare_policy(), &FarePolicy::standard());
        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn sqlite_runtime_migrates_and_seeds() {
        let runtime = ParkingRuntime::start(sqlite_memory()).await.unwrap();
        assert_eq!(runtime.repos.spots().count().await.unwrap(), 5);
        runtime.shutdown().await;
    }

    #[tokio::test]
    async fn seeding_skips_a_populated_lot() {
        let repos = InMemoryRepositoryProvider::with_spots(ParkingSpot::layout(1, 0));
        let lot = LotSection::default();
        assert_eq!(seed_spots(&repos, &lot).await.unwrap(), 0);
        assert_eq!(repos.spots().count().await.unwrap(), 1);

        let empty = InMemoryRepositoryProvider::new();
        assert_eq!(seed_spots(&empty, &lot).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn invalid_fares_refuse_to_start() {
        let mut opts = RuntimeOptions {
            in_memory: true,
            ..Default::default()
        };
        opts.config.fares.hourly_rates.clear();
        assert!(ParkingRuntime::start(opts).await.is_err());
    }
}
