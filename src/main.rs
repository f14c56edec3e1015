use dex_sync::datasource::{CanisterPoolSource, PriceClient};
use dex_sync::{config::Config, run_until, AnonymousActorFactory, AppError, SyncState};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        eprintln!("Sync error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), AppError> {
    let factory = AnonymousActorFactory::new(config.ic_host.clone(), config.fetch_root_key);

    let pool_handle = factory
        .create_read_only_handle(&config.pool_canister_id)
        .await?;
    let price_handle = factory
        .create_read_only_handle(&config.price_canister_id)
        .await?;

    let pool_source = Arc::new(CanisterPoolSource::new(
        pool_handle,
        config.pool_query_method.clone(),
    ));
    let prices = PriceClient::new(price_handle, config.price_query);
    let state = SyncState::new(pool_source);

    tracing::info!(
        "Syncing from {} every {}ms (prices via {})",
        config.ic_host,
        config.refresh_interval_ms,
        config.price_query
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Cannot listen for Ctrl-C, running until killed: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let prices = &prices;
    run_until(
        &state,
        config.refresh_interval(),
        move || async move {
            match prices.fetch_prices().await {
                Ok(quotes) => tracing::info!("Fetched {} token prices", quotes.len()),
                Err(e) => tracing::warn!("Price fetch failed: {}", e),
            }
        },
        shutdown,
    )
    .await;

    Ok(())
}
