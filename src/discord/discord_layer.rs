// Discord layer - commands and event handlers.

use std::sync::Arc;

use crate::core::verification::AccessVerifier;
use crate::infra::roblox::RobloxApiClient;

#[path = "commands/command_catalog.rs"]
pub mod commands;

#[path = "verification/mod.rs"]
pub mod verification;

use verification::GuildRoleManager;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

pub type Verifier = AccessVerifier<RobloxApiClient, RobloxApiClient, GuildRoleManager>;

/// Data shared with every event handler invocation.
pub struct Data {
    pub verifier: Arc<Verifier>,
}
