use std::sync::Arc;

use async_trait::async_trait;
use poise::serenity_prelude as serenity;

use crate::core::verification::{RoleError, RoleManager};

const AUDIT_LOG_REASON: &str = "Verified Roblox shirt ownership";

/// Role operations against the single guild the bot is configured for.
pub struct GuildRoleManager {
    http: Arc<serenity::Http>,
    guild_id: serenity::GuildId,
}

impl GuildRoleManager {
    pub fn new(http: Arc<serenity::Http>, guild_id: serenity::GuildId) -> Self {
        Self { http, guild_id }
    }
}

#[async_trait]
impl RoleManager for GuildRoleManager {
    async fn member_roles(&self, member_id: u64) -> Result<Vec<u64>, RoleError> {
        // Always hit the API so a stale cache can't hide a freshly granted role.
        let member = self
            .http
            .get_member(self.guild_id, serenity::UserId::new(member_id))
            .await
            .map_err(|e| {
                tracing::debug!(member_id, "get_member failed: {}", e);
                RoleError::MemberNotFound(member_id)
            })?;

        Ok(member.roles.iter().map(|r| r.get()).collect())
    }

    async fn add_role(&self, member_id: u64, role_id: u64) -> Result<(), RoleError> {
        self.http
            .add_member_role(
                self.guild_id,
                serenity::UserId::new(member_id),
                serenity::RoleId::new(role_id),
                Some(AUDIT_LOG_REASON),
            )
            .await
            .map_err(|e| RoleError::Rejected(e.to_string()))
    }
}
