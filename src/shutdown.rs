use anyhow::Context;
use poise::serenity_prelude as serenity;
use tracing::info;

/// Drives the bot until either the event loop ends or a termination signal
/// arrives, then runs the cleanup hook exactly once.
pub async fn run_until_shutdown<C, F, Fut>(client_future: C, cleanup: F) -> anyhow::Result<()>
where
    C: Future<Output = Result<(), serenity::Error>>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    let run_result = tokio::select! {
        term_result = termination() => {
            info!("Bot is shutting down!");
            term_result.context("Termination signal handler failed.")
        }
        client_result = client_future => {
            client_result.context("Bot event loop closed unexpectedly.")
        }
    };
    cleanup().await;
    run_result
}

#[cfg(windows)]
async fn termination() -> tokio::io::Result<()> {
    tokio::signal::ctrl_c().await
}

#[cfg(unix)]
async fn termination() -> tokio::io::Result<()> {
    let sigint = tokio::signal::ctrl_c();
    let sigterm = sigterm();
    tokio::select! {
        res = sigint => res,
        res = sigterm => res
    }
}

#[cfg(unix)]
async fn sigterm() -> tokio::io::Result<()> {
    tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?
        .recv()
        .await;
    Ok(())
}
