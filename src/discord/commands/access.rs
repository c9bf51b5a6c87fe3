// Slash commands for the access tiers.
//
// The commands take no options. Each one only exists so the interaction
// handler can open the username modal for the matching tier.

use poise::serenity_prelude as serenity;

use crate::core::verification::AccessTiers;
use crate::discord::Error;

/// One argument-less slash command per tier.
pub fn build_commands(tiers: &AccessTiers) -> Vec<serenity::CreateCommand> {
    tiers
        .all()
        .iter()
        .map(|tier| serenity::CreateCommand::new(&tier.command).description(&tier.description))
        .collect()
}

/// Replace the guild's command set with the tier commands.
pub async fn register_in_guild(
    ctx: &serenity::Context,
    guild_id: serenity::GuildId,
    tiers: &AccessTiers,
) -> Result<(), Error> {
    tracing::info!(guild_id = guild_id.get(), "Started refreshing application (/) commands");

    let registered = guild_id.set_commands(ctx, build_commands(tiers)).await?;

    tracing::info!(
        count = registered.len(),
        "Successfully reloaded application (/) commands"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_command_per_tier_without_options() {
        let commands = build_commands(&AccessTiers::builtin());
        assert_eq!(commands.len(), 3);

        let first = serde_json::to_value(&commands[0]).unwrap();
        assert_eq!(first["name"], "exclusive-access");
        assert_eq!(first["description"], "Check exclusive access shirt ownership");
        assert!(first["options"]
            .as_array()
            .map(|o| o.is_empty())
            .unwrap_or(true));
    }
}
