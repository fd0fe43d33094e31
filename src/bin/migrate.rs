//! Standalone migration runner: loads configuration, connects and brings
//! the schema up to date.

use anyhow::Context;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = kardex_core::config::load_config().context("failed to load configuration")?;
    kardex_core::config::init_tracing(cfg.log_level(), cfg.log_json);

    let pool = kardex_core::db::establish_connection_from_app_config(&cfg)
        .await
        .context("failed to connect to database")?;

    kardex_core::db::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    info!("Schema is up to date");
    kardex_core::db::close_pool(pool).await?;

    Ok(())
}
