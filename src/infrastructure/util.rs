use poise::serenity_prelude::Typing;

use crate::{Context as KitbotContext, Error};

/// Appropriately indicates to the end user that kitbot is working on a response.
/// - For application (/) commands, the interaction response is deferred.
/// - For prefix commands, the typing hint is shown until the returned handle
///   is dropped or `Typing::stop()` is called.
pub async fn defer_or_broadcast(
    ctx: KitbotContext<'_>,
    ephemeral: bool,
) -> Result<Option<Typing>, Error> {
    match ctx {
        poise::Context::Application(appctx) => {
            appctx.defer_response(ephemeral).await?;
            Ok(None)
        }
        poise::Context::Prefix(prefixctx) => Ok(Some(
            prefixctx
                .msg
                .channel_id
                .start_typing(&prefixctx.serenity_context.http),
        )),
    }
}
