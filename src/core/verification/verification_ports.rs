use async_trait::async_trait;

/// Errors raised while talking to Roblox.
#[derive(Debug, thiserror::Error)]
pub enum RobloxError {
    #[error("Roblox request failed: {0}")]
    Http(String),
    #[error("Roblox returned {0}")]
    Status(u16),
    #[error("Unexpected Roblox response: {0}")]
    Decode(String),
}

/// Errors raised while reading or changing guild roles.
#[derive(Debug, thiserror::Error)]
pub enum RoleError {
    #[error("Member {0} not found in guild")]
    MemberNotFound(u64),
    #[error("Role update rejected: {0}")]
    Rejected(String),
}

/// Maps a typed username to a stable Roblox user id.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// `Ok(None)` means the lookup worked but no account carries that name.
    async fn resolve_username(&self, username: &str) -> Result<Option<u64>, RobloxError>;
}

/// Answers "does this account own that asset".
#[async_trait]
pub trait InventoryLookup: Send + Sync {
    async fn owns_asset(&self, roblox_user_id: u64, asset_id: &str) -> Result<bool, RobloxError>;
}

/// Role operations on the one guild the bot serves.
#[async_trait]
pub trait RoleManager: Send + Sync {
    /// Fetch the member's current roles.
    async fn member_roles(&self, member_id: u64) -> Result<Vec<u64>, RoleError>;
    async fn add_role(&self, member_id: u64, role_id: u64) -> Result<(), RoleError>;
}
