use std::{
    collections::HashSet,
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use kitbot::{
    infrastructure::{botdata::Data, environment, environment::env_var_with_context},
    kit::{
        config::KitConfig, dispatcher::KitDispatcher, grant::HttpKitService,
        messages::MessageCatalog, permissions::RoleGate,
    },
};
use poise::serenity_prelude::{self as serenity, GatewayIntents, UserId};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

pub async fn create_serenity_client(
    config: KitConfig,
    config_path: PathBuf,
) -> anyhow::Result<serenity::Client> {
    let token = env_var_with_context(environment::DISCORD_TOKEN)?;
    let intents = serenity::GatewayIntents::non_privileged()
        .union(GatewayIntents::MESSAGE_CONTENT)
        .union(GatewayIntents::GUILD_MEMBERS);
    let framework = create_poise_framework(config, config_path);

    serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .context("Failed to create serenity client")
}

fn create_poise_framework(
    config: KitConfig,
    config_path: PathBuf,
) -> poise::Framework<Data, kitbot::Error> {
    let initialize_owners: bool;
    let owners: HashSet<UserId>;
    match try_get_owners_env() {
        Ok(owners_vec) => {
            initialize_owners = false;
            owners = HashSet::from_iter(owners_vec);
        }
        Err(error) => {
            if let OwnerParseError::UserIdParseError(e) = error {
                warn!("Invalid UserId in {}: {}", environment::OWNERS, e);
            }
            initialize_owners = true;
            owners = HashSet::new();
        }
    }
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: get_enabled_commands(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some("!".into()),
                mention_as_prefix: true,
                edit_tracker: Some(Arc::new(poise::EditTracker::for_timespan(
                    Duration::from_secs(3600),
                ))),
                ..Default::default()
            },
            initialize_owners,
            owners,
            pre_command: |ctx| {
                Box::pin(async move {
                    info!(
                        "Executing Command: {:?} for {} ({})",
                        ctx.command().name,
                        ctx.author()
                            .clone()
                            .member
                            .and_then(|m| m.nick)
                            .unwrap_or(ctx.author().display_name().to_string()),
                        ctx.author().name,
                    );

                    if let Ok(mut invoc_time) = ctx.data().invoc_time.write() {
                        invoc_time.insert(ctx.id(), Instant::now());
                    }
                })
            },
            post_command: |ctx| {
                Box::pin(async move {
                    if let Ok(invoc_time_map) = ctx.data().invoc_time.read() {
                        match invoc_time_map.get(&ctx.id()) {
                            Some(start_time) => {
                                let duration = start_time.elapsed();
                                debug!("Command {} finished in {:?}", ctx.command().name, duration);
                            }
                            None => {
                                error!(
                                    "Post-command hook called for command without a start-time set."
                                );
                            }
                        }
                    }
                })
            },
            on_error: |error| {
                Box::pin(async move {
                    if let Err(e) = poise::builtins::on_error(error).await {
                        error!("{:?}", e);
                    }
                })
            },
            event_handler: |_ctx, event, _framework, _data| {
                Box::pin(kitbot::infrastructure::event_handler::event_handler(
                    _ctx, event, _framework, _data,
                ))
            },
            ..Default::default()
        })
        .setup(move |_ctx, _ready, _framework| {
            Box::pin(async move {
                let permissions = RoleGate::new(config.required_role);
                let grants = HttpKitService::new(config.kit_service_url.clone());
                Ok(Data {
                    dispatcher: Mutex::new(KitDispatcher::new(config, permissions, grants)),
                    messages: MessageCatalog::new(),
                    config_path,
                    invoc_time: Default::default(),
                })
            })
        })
        .build();

    for cmd in framework.options().commands.iter() {
        info!("Loaded command: {:#?}", cmd.name);
    }

    framework
}

fn get_enabled_commands() -> Vec<poise::Command<Data, kitbot::Error>> {
    let default_commands = vec![
        kitbot::commands::builtins::help(),
        kitbot::commands::builtins::register(),
        kitbot::commands::randomkit::randomkit(),
        kitbot::commands::randomkit::reloadkits(),
    ];

    // Commands disabled by environment variable
    let disable_commands_env =
        std::env::var(environment::COMMAND_DISABLE_LIST).unwrap_or_default();
    let disabled_commands = disable_commands_env.split(",");

    let disabled_commands_info: HashSet<String> = disabled_commands
        .clone()
        .map(|s| s.to_lowercase())
        .filter(|s| {
            !s.is_empty()
                && default_commands
                    .iter()
                    .any(|cmd| cmd.name.to_lowercase() == *s)
        })
        .collect();
    if disabled_commands_info.is_empty() {
        info!("Loading default commands");
    } else {
        info!("Disabled commands: {:?}", disabled_commands_info);
    }

    default_commands
        .into_iter()
        .filter(|cmd| {
            !disabled_commands
                .clone()
                .into_iter()
                .any(|disabled| cmd.name.to_uppercase() == disabled.to_uppercase())
        })
        .collect()
}

enum OwnerParseError {
    MissingEnvVar,
    UserIdParseError(String),
}

fn try_get_owners_env() -> Result<Vec<UserId>, OwnerParseError> {
    let env_var = std::env::var(environment::OWNERS).map_err(|_| OwnerParseError::MissingEnvVar)?;
    env_var
        .split(',')
        .map(|value| {
            value
                .trim()
                .parse::<u64>()
                .map(UserId::new)
                .map_err(|e| OwnerParseError::UserIdParseError(e.to_string()))
        })
        .collect()
}
