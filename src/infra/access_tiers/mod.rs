// Access tier loading.
// - `json_tier_file.rs` reads an operator-supplied tier table from disk.

#[path = "json_tier_file.rs"]
pub mod json_tier_file;

pub use json_tier_file::load_tiers;
