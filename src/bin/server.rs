use anyhow::{Context, Result};
use cotacao::{QuotationStore, ServerConfig, service};
use log::info;

#[actix_web::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env()?;

    let store = QuotationStore::connect(&config.database_url)
        .await
        .with_context(|| format!("Can't open database {}", config.database_url))?;
    store
        .prepare()
        .await
        .context("Can't create database tables")?;

    let served = service::serve(&config, store.clone()).await;

    store.close().await;
    info!("Database closed");

    served
}
