// Roblox infra layer.
// - `roblox_client.rs` talks to the users and inventory web APIs.

#[path = "roblox_client.rs"]
pub mod roblox_client;

pub use roblox_client::RobloxApiClient;
