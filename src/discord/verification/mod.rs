// Discord side of the shirt verification flow.

pub mod interaction_handler;
pub mod role_manager;

pub use interaction_handler::handle_interaction;
pub use role_manager::GuildRoleManager;
