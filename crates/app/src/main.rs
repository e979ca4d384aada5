use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use settings::Storage;
use store::{DbStore, FileStore, Store};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "pintrack={level},server={level},store={level}",
            level = settings.app.level
        ))
        .init();

    let store = build_store(&settings.server.storage).await?;

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    server::run_with_listener(store, listener).await?;

    Ok(())
}

async fn build_store(
    storage: &Storage,
) -> Result<Arc<dyn Store>, Box<dyn std::error::Error + Send + Sync>> {
    Ok(match storage {
        Storage::Memory => Arc::new(DbStore::new(connect("sqlite::memory:").await?)),
        Storage::Sqlite { path } => {
            let url = format!("sqlite:{path}?mode=rwc");
            Arc::new(DbStore::new(connect(&url).await?))
        }
        Storage::File { path } => {
            tracing::info!("using JSON document store at {path}");
            Arc::new(FileStore::open(path)?)
        }
    })
}

async fn connect(url: &str) -> Result<sea_orm::DatabaseConnection, sea_orm::DbErr> {
    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
