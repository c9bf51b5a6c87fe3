// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "verification/mod.rs"]
pub mod verification;
