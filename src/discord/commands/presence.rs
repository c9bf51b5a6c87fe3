// This module handles bot presence and lifecycle events.
//
// Discord-layer glue only: we set a fixed activity so members can see what
// the bot is for at a glance.

use poise::serenity_prelude as serenity;

/// Sets the default "Watching ..." status.
pub fn reset_status(ctx: &serenity::Context) {
    let activity = serenity::ActivityData::watching("for Roblox shirt owners");
    ctx.set_presence(Some(activity), serenity::OnlineStatus::Online);
}

/// Called once the bot is ready.
pub fn on_ready(ctx: &serenity::Context) {
    reset_status(ctx);
}
