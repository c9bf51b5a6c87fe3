// Access tier definitions
//
// A tier ties one slash command to the shirt that unlocks it and the role it grants.
// The table is built once at startup and never mutated afterwards.

use serde::Deserialize;

/// One gated tier: `/command` checks `good_id` and grants `role_id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessTier {
    pub command: String,
    pub description: String,
    /// Roblox asset id of the shirt, kept as a string to match the inventory comparison.
    pub good_id: String,
    pub role_id: u64,
}

impl AccessTier {
    pub fn new(command: &str, description: &str, good_id: &str, role_id: u64) -> Self {
        Self {
            command: command.to_string(),
            description: description.to_string(),
            good_id: good_id.to_string(),
            role_id,
        }
    }
}

/// Immutable command -> (good, role) mapping.
#[derive(Debug, Clone)]
pub struct AccessTiers {
    tiers: Vec<AccessTier>,
}

impl AccessTiers {
    pub fn new(tiers: Vec<AccessTier>) -> Self {
        Self { tiers }
    }

    /// The three tiers the community ships with.
    pub fn builtin() -> Self {
        Self::new(vec![
            AccessTier::new(
                "exclusive-access",
                "Check exclusive access shirt ownership",
                "135228117983216",
                1309964451025391646,
            ),
            AccessTier::new(
                "full-access",
                "Check full access shirt ownership",
                "93281202894558",
                1309964453403557920,
            ),
            AccessTier::new(
                "half-access",
                "Check half access shirt ownership",
                "90784589610250",
                1309964460177363005,
            ),
        ])
    }

    pub fn get(&self, command: &str) -> Option<&AccessTier> {
        self.tiers.iter().find(|t| t.command == command)
    }

    pub fn contains(&self, command: &str) -> bool {
        self.get(command).is_some()
    }

    pub fn all(&self) -> &[AccessTier] {
        &self.tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tiers_cover_the_three_commands() {
        let tiers = AccessTiers::builtin();
        assert_eq!(tiers.all().len(), 3);
        assert!(tiers.contains("exclusive-access"));
        assert!(tiers.contains("full-access"));
        assert!(tiers.contains("half-access"));
    }

    #[test]
    fn half_access_maps_to_its_shirt_and_role() {
        let tiers = AccessTiers::builtin();
        let tier = tiers.get("half-access").unwrap();
        assert_eq!(tier.good_id, "90784589610250");
        assert_eq!(tier.role_id, 1309964460177363005);
    }

    #[test]
    fn unknown_command_has_no_tier() {
        let tiers = AccessTiers::builtin();
        assert!(tiers.get("quarter-access").is_none());
        assert!(!tiers.contains(""));
    }
}
