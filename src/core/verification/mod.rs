pub mod access_tiers;
pub mod verification_models;
pub mod verification_ports;
pub mod verification_service;

pub use access_tiers::{AccessTier, AccessTiers};
pub use verification_models::{CommandResponse, InteractionEvent, UsernameModal, VerificationRequest};
pub use verification_ports::{AccountDirectory, InventoryLookup, RobloxError, RoleError, RoleManager};
pub use verification_service::AccessVerifier;
