// Discord commands module.
// Each feature gets its own command file.

pub mod access;

// Bot presence management
pub mod presence;
