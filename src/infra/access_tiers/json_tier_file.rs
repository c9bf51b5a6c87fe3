use std::collections::HashSet;
use std::path::Path;

use crate::core::verification::{AccessTier, AccessTiers};

#[derive(Debug, thiserror::Error)]
pub enum TierFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Tier file defines no tiers")]
    Empty,
    #[error("Command `{0}` is defined more than once")]
    Duplicate(String),
    #[error("`{0}` is not a valid slash command name")]
    InvalidCommand(String),
    #[error("Command `{command}` needs a description of 1-100 characters")]
    InvalidDescription { command: String },
    #[error("Command `{command}` has good_id `{good_id}`, expected a numeric Roblox asset id")]
    InvalidGoodId { command: String, good_id: String },
    #[error("Command `{command}` has role_id {role_id}, which is not a Discord id")]
    InvalidRoleId { command: String, role_id: u64 },
}

/// Load the tier table from a JSON array of tiers, replacing the built-in set.
pub fn load_tiers(path: impl AsRef<Path>) -> Result<AccessTiers, TierFileError> {
    let file = std::fs::File::open(path.as_ref())?;
    let tiers: Vec<AccessTier> = serde_json::from_reader(file)?;
    validate(&tiers)?;
    Ok(AccessTiers::new(tiers))
}

fn validate(tiers: &[AccessTier]) -> Result<(), TierFileError> {
    if tiers.is_empty() {
        return Err(TierFileError::Empty);
    }

    let mut seen = HashSet::new();
    for tier in tiers {
        if !is_valid_command_name(&tier.command) {
            return Err(TierFileError::InvalidCommand(tier.command.clone()));
        }
        if !seen.insert(tier.command.as_str()) {
            return Err(TierFileError::Duplicate(tier.command.clone()));
        }
        if !(1..=100).contains(&tier.description.chars().count()) {
            return Err(TierFileError::InvalidDescription {
                command: tier.command.clone(),
            });
        }
        if !is_asset_id(&tier.good_id) {
            return Err(TierFileError::InvalidGoodId {
                command: tier.command.clone(),
                good_id: tier.good_id.clone(),
            });
        }
        // serenity ids are non-zero and panic on u64::MAX.
        if tier.role_id == 0 || tier.role_id == u64::MAX {
            return Err(TierFileError::InvalidRoleId {
                command: tier.command.clone(),
                role_id: tier.role_id,
            });
        }
    }
    Ok(())
}

// Inventory matching compares against the decimal form of the asset id.
fn is_asset_id(good_id: &str) -> bool {
    good_id
        .parse::<u64>()
        .is_ok_and(|id| id != 0 && id.to_string() == good_id)
}

// Discord accepts 1-32 lowercase letters, digits, dashes and underscores.
fn is_valid_command_name(name: &str) -> bool {
    (1..=32).contains(&name.len())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(contents: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(contents.as_bytes()).unwrap();
        tmp
    }

    #[test]
    fn loads_tiers_from_json() {
        let tmp = write_file(
            r#"[
                {"command": "vip-access", "description": "Check VIP shirt", "good_id": "111", "role_id": 222}
            ]"#,
        );

        let tiers = load_tiers(tmp.path()).unwrap();
        let tier = tiers.get("vip-access").unwrap();
        assert_eq!(tier.good_id, "111");
        assert_eq!(tier.role_id, 222);
        assert!(tiers.get("half-access").is_none());
    }

    #[test]
    fn duplicate_commands_are_rejected() {
        let tmp = write_file(
            r#"[
                {"command": "vip", "description": "a", "good_id": "1", "role_id": 2},
                {"command": "vip", "description": "b", "good_id": "3", "role_id": 4}
            ]"#,
        );

        assert!(matches!(
            load_tiers(tmp.path()),
            Err(TierFileError::Duplicate(name)) if name == "vip"
        ));
    }

    #[test]
    fn uppercase_command_is_rejected() {
        let tmp = write_file(
            r#"[{"command": "VIP", "description": "a", "good_id": "1", "role_id": 2}]"#,
        );
        assert!(matches!(
            load_tiers(tmp.path()),
            Err(TierFileError::InvalidCommand(_))
        ));
    }

    #[test]
    fn non_numeric_good_id_is_rejected() {
        let tmp = write_file(
            r#"[{"command": "vip", "description": "a", "good_id": "not-a-number", "role_id": 2}]"#,
        );
        assert!(matches!(
            load_tiers(tmp.path()),
            Err(TierFileError::InvalidGoodId { good_id, .. }) if good_id == "not-a-number"
        ));

        let padded = write_file(
            r#"[{"command": "vip", "description": "a", "good_id": "0042", "role_id": 2}]"#,
        );
        assert!(matches!(
            load_tiers(padded.path()),
            Err(TierFileError::InvalidGoodId { .. })
        ));
    }

    #[test]
    fn out_of_range_role_ids_are_rejected() {
        let max = write_file(
            r#"[{"command": "vip", "description": "a", "good_id": "1", "role_id": 18446744073709551615}]"#,
        );
        assert!(matches!(
            load_tiers(max.path()),
            Err(TierFileError::InvalidRoleId { role_id: u64::MAX, .. })
        ));

        let zero = write_file(
            r#"[{"command": "vip", "description": "a", "good_id": "1", "role_id": 0}]"#,
        );
        assert!(matches!(
            load_tiers(zero.path()),
            Err(TierFileError::InvalidRoleId { role_id: 0, .. })
        ));
    }

    #[test]
    fn description_must_fit_discord_limits() {
        let empty = write_file(
            r#"[{"command": "vip", "description": "", "good_id": "1", "role_id": 2}]"#,
        );
        assert!(matches!(
            load_tiers(empty.path()),
            Err(TierFileError::InvalidDescription { .. })
        ));

        let long = format!(
            r#"[{{"command": "vip", "description": "{}", "good_id": "1", "role_id": 2}}]"#,
            "x".repeat(101)
        );
        let long = write_file(&long);
        assert!(matches!(
            load_tiers(long.path()),
            Err(TierFileError::InvalidDescription { .. })
        ));
    }

    #[test]
    fn builtin_tiers_would_pass_validation() {
        assert!(validate(AccessTiers::builtin().all()).is_ok());
    }

    #[test]
    fn empty_and_missing_files_fail() {
        let tmp = write_file("[]");
        assert!(matches!(load_tiers(tmp.path()), Err(TierFileError::Empty)));

        let path = tmp.path().to_owned();
        drop(tmp);
        assert!(matches!(load_tiers(&path), Err(TierFileError::Io(_))));
    }
}
