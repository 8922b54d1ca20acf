use anyhow::{Context, Result};
use cotacao::{ClientConfig, client};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ClientConfig::from_env()?;

    let bid = client::run(&config)
        .await
        .with_context(|| format!("Can't record the quotation from {}", config.server_url))?;
    println!("{}: {}", client::LABEL, bid);

    Ok(())
}
