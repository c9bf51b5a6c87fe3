// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "roblox/mod.rs"]
pub mod roblox;

#[path = "access_tiers/mod.rs"]
pub mod access_tiers;
