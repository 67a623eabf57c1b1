use std::time::SystemTime;

use poise::{CreateReply, serenity_prelude::CreateEmbed};
use tracing::trace;

use crate::{
    Context, Error,
    infrastructure::{colors, util::defer_or_broadcast},
    kit::{
        config,
        dispatcher::KitOutcome,
        grant::HttpKitService,
        messages::DEFAULT_LOCALE,
        permissions::{KitRequester, RoleGate},
    },
};

async fn requester_from_ctx(ctx: Context<'_>) -> Result<KitRequester, Error> {
    let member = ctx
        .author_member()
        .await
        .ok_or("This command is only available in guilds")?;
    Ok(KitRequester {
        id: ctx.author().id.get(),
        role_ids: member.roles.iter().map(|role| role.get()).collect(),
    })
}

fn outcome_color(outcome: &KitOutcome) -> poise::serenity_prelude::Colour {
    match outcome {
        KitOutcome::Granted { .. } => colors::green(),
        KitOutcome::OnCooldown { .. } => colors::orange(),
        KitOutcome::Denied | KitOutcome::GrantFailed => colors::red(),
        KitOutcome::NoKitsAvailable => colors::slate(),
    }
}

/// Requests a random kit from the configured kit list.
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    category = "Kits",
    track_edits,
    track_deletion
)]
pub async fn randomkit(
    ctx: Context<'_>,
    #[description = "Visible to you only? (default: false)"] ephemeral: Option<bool>,
) -> Result<(), Error> {
    let _typing = defer_or_broadcast(ctx, ephemeral.unwrap_or_default()).await?;

    let requester = requester_from_ctx(ctx).await?;
    let outcome = ctx
        .data()
        .dispatcher
        .lock()
        .await
        .request_random_kit(&requester, SystemTime::now())
        .await;
    trace!(user_id = requester.id, "Kit request finished: {:?}", outcome);

    let locale = ctx.locale().unwrap_or(DEFAULT_LOCALE);
    let message = ctx.data().messages.render(locale, &outcome);
    let reply = CreateReply::default()
        .embed(
            CreateEmbed::new()
                .title("Random Kit")
                .description(message)
                .color(outcome_color(&outcome)),
        )
        .ephemeral(ephemeral.unwrap_or(false));
    ctx.send(reply).await?;
    Ok(())
}

/// Reloads the kit configuration from disk into the running dispatcher.
#[poise::command(
    slash_command,
    prefix_command,
    owners_only,
    hide_in_help,
    category = "Kits"
)]
pub async fn reloadkits(ctx: Context<'_>) -> Result<(), Error> {
    let config = config::load_or_create(&ctx.data().config_path)?;
    let kit_count = config.kits.len();
    trace!("Reloaded config: {:?}", config);

    let mut dispatcher = ctx.data().dispatcher.lock().await;
    dispatcher.set_permission_gate(RoleGate::new(config.required_role));
    dispatcher.set_grant_service(HttpKitService::new(config.kit_service_url.clone()));
    dispatcher.apply_config(config);
    drop(dispatcher);

    ctx.send(
        CreateReply::default()
            .content(format!("Reloaded kit configuration ({} kits).", kit_count))
            .ephemeral(true),
    )
    .await?;
    Ok(())
}
