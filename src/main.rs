mod client;
mod logging;
mod shutdown;

use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let (config, config_path) = kitbot::kit::config::init_config()?;
    info!(
        "Loaded {} kits, cooldown {}s",
        config.kits.len(),
        config.cooldown_seconds
    );

    let mut client = client::create_serenity_client(config, config_path).await?;
    let shard_manager = client.shard_manager.clone();
    shutdown::run_until_shutdown(client.start(), || async move {
        shard_manager.shutdown_all().await;
    })
    .await
}
