// This is the entry point of the Discord bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (Roblox API, tier file)
// - `discord/` = Discord-specific adapters (commands, interactions, roles)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework
// 4. Register commands and event handlers

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with several mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

mod config;

use std::sync::Arc;

use anyhow::Context as _;
use poise::serenity_prelude as serenity;

use crate::config::BotConfig;
use crate::core::verification::{AccessTiers, AccessVerifier};
use crate::discord::commands::{access, presence};
use crate::discord::verification::{handle_interaction, GuildRoleManager};
use crate::discord::{Data, Error};
use crate::infra::access_tiers::load_tiers;
use crate::infra::roblox::RobloxApiClient;

/// Event handler for non-framework Discord events.
/// Slash commands and modal submissions both arrive here as interactions.
async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    if let serenity::FullEvent::InteractionCreate { interaction } = event {
        // A failed reply only affects this member; keep serving everyone else.
        if let Err(e) = handle_interaction(ctx, data, interaction).await {
            tracing::error!("Error handling interaction: {}", e);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = BotConfig::from_env()?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let tiers = match &config.tiers_file {
        Some(path) => load_tiers(path)
            .with_context(|| format!("Failed to load access tiers from {}", path.display()))?,
        None => AccessTiers::builtin(),
    };
    tracing::info!(count = tiers.all().len(), "Access tiers loaded");

    let roblox = RobloxApiClient::new(&config.users_api_url, &config.inventory_api_url)
        .context("Failed to create Roblox API client")?;

    let guild_id = serenity::GuildId::new(config.guild_id);

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    // Member lookups and role grants go over HTTP, so guild events are all we need.
    let intents = serenity::GatewayIntents::GUILDS;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, _framework| {
            Box::pin(async move {
                tracing::info!("Logged in as {}!", ready.user.name);

                access::register_in_guild(ctx, guild_id, &tiers).await?;
                presence::on_ready(ctx);

                let roles = GuildRoleManager::new(ctx.http.clone(), guild_id);
                let verifier = AccessVerifier::new(tiers, roblox.clone(), roblox, roles);

                Ok(Data {
                    verifier: Arc::new(verifier),
                })
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await
        .context("Error creating client")?;

    client.start().await.context("Error running bot")?;
    Ok(())
}
