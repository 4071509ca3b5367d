use mimalloc::MiMalloc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use trip_pack::{Config, CredentialHasher, db::Store};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        loglevel = %cfg.loglevel,
        password_memory_kib = cfg.password_memory_kib,
        password_iterations = cfg.password_iterations,
        password_parallelism = cfg.password_parallelism,
    );

    // Reject an unusable hash cost at startup rather than on first signup.
    CredentialHasher::new(cfg.hash_cost())?;

    let store = Store::connect(&cfg.database_url).await?;
    store.init_schema().await?;
    let tables = store.existing_tables().await?;
    info!(count = tables.len(), tables = ?tables, "database ready");

    store.close().await;
    Ok(())
}
