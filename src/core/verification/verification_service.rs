// Verification workflow - the business logic behind the access commands.
//
// Discord hands us a command name, we hand back a modal. Discord hands us the
// filled-in modal, we resolve the username, check the shirt, and grant the role.
// Nothing here knows about serenity; the ports are injected.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use super::access_tiers::AccessTiers;
use super::verification_models::{
    CommandResponse, UsernameModal, VerificationOutcome, VerificationRequest,
};
use super::verification_ports::{AccountDirectory, InventoryLookup, RoleManager};

/// Per-(member, role) locks so duplicate submissions cannot both pass the "not yet granted" check.
type GrantLocks = DashMap<(u64, u64), Arc<Mutex<()>>>;

pub struct AccessVerifier<A, I, R>
where
    A: AccountDirectory,
    I: InventoryLookup,
    R: RoleManager,
{
    tiers: AccessTiers,
    accounts: A,
    inventory: I,
    roles: R,
    grant_locks: GrantLocks,
}

impl<A, I, R> AccessVerifier<A, I, R>
where
    A: AccountDirectory,
    I: InventoryLookup,
    R: RoleManager,
{
    pub fn new(tiers: AccessTiers, accounts: A, inventory: I, roles: R) -> Self {
        Self {
            tiers,
            accounts,
            inventory,
            roles,
            grant_locks: DashMap::new(),
        }
    }

    /// A slash command either opens the username modal or is rejected outright.
    pub fn handle_command(&self, command_name: &str) -> CommandResponse {
        if !self.tiers.contains(command_name) {
            tracing::warn!(command = command_name, "Unknown access command");
            return CommandResponse::UnknownCommand;
        }

        CommandResponse::ShowModal(UsernameModal::for_command(command_name))
    }

    /// Run one verification to completion. Every path ends in exactly one outcome.
    pub async fn handle_modal_submit(&self, request: &VerificationRequest) -> VerificationOutcome {
        let username = request.raw_username.as_str();

        let roblox_user_id = match self.resolve(username).await {
            Some(id) => id,
            None => {
                return VerificationOutcome::NotFound {
                    username: username.to_string(),
                }
            }
        };

        let tier = match self.tiers.get(&request.command_name) {
            Some(tier) => tier,
            None => {
                tracing::error!(
                    command = %request.command_name,
                    "Modal submitted for a command with no access tier"
                );
                return VerificationOutcome::ConfigError {
                    command: request.command_name.clone(),
                };
            }
        };

        if !self.owns(roblox_user_id, &tier.good_id).await {
            return VerificationOutcome::Ineligible {
                username: username.to_string(),
            };
        }

        self.grant(request.member_id, tier.role_id).await
    }

    async fn resolve(&self, username: &str) -> Option<u64> {
        if username.is_empty() {
            return None;
        }

        match self.accounts.resolve_username(username).await {
            Ok(Some(id)) => {
                tracing::debug!(username, roblox_user_id = id, "Resolved Roblox user");
                Some(id)
            }
            Ok(None) => {
                tracing::info!(username, "Roblox user not found");
                None
            }
            Err(e) => {
                tracing::warn!(username, "Roblox username lookup failed: {}", e);
                None
            }
        }
    }

    /// Lookup failures count as "does not own".
    async fn owns(&self, roblox_user_id: u64, good_id: &str) -> bool {
        match self.inventory.owns_asset(roblox_user_id, good_id).await {
            Ok(owned) => owned,
            Err(e) => {
                tracing::warn!(
                    roblox_user_id,
                    good_id,
                    "Inventory lookup failed, treating as not owned: {}",
                    e
                );
                false
            }
        }
    }

    async fn grant(&self, member_id: u64, role_id: u64) -> VerificationOutcome {
        let key = (member_id, role_id);
        let lock = self
            .grant_locks
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let outcome = {
            let _guard = lock.lock().await;
            self.grant_locked(member_id, role_id).await
        };

        drop(lock);
        self.grant_locks
            .remove_if(&key, |_, lock| Arc::strong_count(lock) == 1);

        outcome
    }

    async fn grant_locked(&self, member_id: u64, role_id: u64) -> VerificationOutcome {
        let current_roles = match self.roles.member_roles(member_id).await {
            Ok(roles) => roles,
            Err(e) => {
                tracing::warn!(member_id, "Failed to fetch guild member: {}", e);
                return VerificationOutcome::MemberNotFound;
            }
        };

        if current_roles.contains(&role_id) {
            return VerificationOutcome::AlreadyGranted;
        }

        match self.roles.add_role(member_id, role_id).await {
            Ok(()) => {
                tracing::info!(member_id, role_id, "Access role granted");
                VerificationOutcome::Granted { role_id }
            }
            Err(e) => {
                tracing::error!(member_id, role_id, "Failed to assign role: {}", e);
                VerificationOutcome::GrantFailed { role_id }
            }
        }
    }
}
