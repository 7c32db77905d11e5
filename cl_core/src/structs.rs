pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type FrameworkContext<'a> = poise::FrameworkContext<'a, Data, Error>;
pub type Command = poise::Command<Data, Error>;

use crate::catalog::{Catalog, CollectibleType, SpecialType};
use crate::config::Config;
use crate::db::CollectorDb;
use crate::threshold::Thresholds;
use parking_lot::RwLock;
use sqlx::SqlitePool;
use tracing::info;

pub struct Data {
    pub config: Config,
    pub collector: CollectorDb,
    /// Collectibles and specials, replaced wholesale on reload.
    pub catalog: RwLock<Catalog>,
    pub thresholds: Thresholds,
}

impl Data {
    /// Prepares the database and loads everything the commands need.
    ///
    /// Fails if the collector special isn't registered, so a misconfigured bot never starts.
    pub async fn load(config: Config, pool: &SqlitePool) -> Result<Self, Error> {
        let collector = CollectorDb::new(pool);
        collector.create_schema().await?;

        let catalog = collector.load_catalog(&config.collector_special).await?;

        let thresholds = match &config.thresholds_path {
            Some(path) => {
                let thresholds = Thresholds::load(path)?;
                info!(path = %path, "loaded collector threshold overrides");
                thresholds
            }
            None => Thresholds::default(),
        };

        Ok(Data {
            config,
            collector,
            catalog: RwLock::new(catalog),
            thresholds,
        })
    }

    /// Rebuilds the catalog from the database, keeping the current one if the new one is invalid.
    ///
    /// Returns the number of collectibles loaded.
    pub async fn reload_catalog(&self) -> Result<usize, Error> {
        let catalog = self
            .collector
            .load_catalog(&self.config.collector_special)
            .await?;
        let len = catalog.len();
        *self.catalog.write() = catalog;

        Ok(len)
    }

    /// Clones out an enabled collectible and the collector special so no lock is held across awaits.
    #[must_use]
    pub fn collector_card(&self, country: &str) -> Option<(CollectibleType, SpecialType)> {
        let catalog = self.catalog.read();
        let ball = catalog.find_enabled(country)?.clone();
        Some((ball, catalog.collector().clone()))
    }
}
