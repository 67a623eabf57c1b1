use poise::serenity_prelude::{Context, FullEvent};
use tracing::{info, warn};

use crate::{Error, infrastructure::botdata::Data};

pub async fn event_handler(
    _ctx: &Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        FullEvent::Ready { data_about_bot, .. } => {
            info!("Bot is ready. Logged in as {}", data_about_bot.user.name);
            let dispatcher = data.dispatcher.lock().await;
            info!("{} kits configured", dispatcher.config().kits.len());
            if !dispatcher.grant_service_available().await {
                warn!(
                    "Kit service did not answer its health probe; grants will fail until it comes up."
                );
            }
        }
        _ => {}
    }
    Ok(())
}
