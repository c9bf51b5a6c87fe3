// Verification domain models.
//
// These types are independent of serenity. The Discord layer normalizes raw
// interactions into `InteractionEvent` and renders `CommandResponse` /
// `VerificationOutcome` back into Discord builders.

/// Prefix of every modal custom id we create. The command name follows it.
pub const MODAL_ID_PREFIX: &str = "roblox_username_modal_";

/// Custom id of the single text field inside the modal.
pub const USERNAME_INPUT_ID: &str = "username_input";

pub const USERNAME_MIN_LEN: u16 = 3;
pub const USERNAME_MAX_LEN: u16 = 20;

/// A Discord interaction reduced to the parts the verifier cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionEvent {
    SlashCommand {
        name: String,
    },
    ModalSubmit {
        custom_id: String,
        username: Option<String>,
        member_id: u64,
    },
    /// Buttons, autocomplete, pings and anything else we never asked for.
    Other,
}

/// Description of the username prompt. Rendering is left to the Discord layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsernameModal {
    pub custom_id: String,
    pub title: &'static str,
    pub input_id: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub min_length: u16,
    pub max_length: u16,
    pub required: bool,
}

impl UsernameModal {
    pub fn for_command(command: &str) -> Self {
        Self {
            custom_id: format!("{}{}", MODAL_ID_PREFIX, command),
            title: "Enter your Roblox username",
            input_id: USERNAME_INPUT_ID,
            label: "Roblox Username",
            placeholder: "Your Roblox username",
            min_length: USERNAME_MIN_LEN,
            max_length: USERNAME_MAX_LEN,
            required: true,
        }
    }
}

/// What to do in response to a slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResponse {
    ShowModal(UsernameModal),
    UnknownCommand,
}

impl CommandResponse {
    pub const UNKNOWN_COMMAND_MESSAGE: &'static str = "Unknown command!";
}

/// One modal submission waiting to be verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    pub command_name: String,
    pub raw_username: String,
    pub member_id: u64,
}

impl VerificationRequest {
    /// Build a request from a modal submission.
    ///
    /// Returns `None` when the modal is not one of ours, so the caller can ignore it.
    pub fn from_modal(custom_id: &str, username: Option<&str>, member_id: u64) -> Option<Self> {
        let command_name = custom_id.strip_prefix(MODAL_ID_PREFIX)?;
        Some(Self {
            command_name: command_name.to_string(),
            raw_username: username.unwrap_or_default().trim().to_string(),
            member_id,
        })
    }
}

/// Terminal state of a single verification. Exactly one is produced per submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    NotFound { username: String },
    ConfigError { command: String },
    Ineligible { username: String },
    MemberNotFound,
    AlreadyGranted,
    Granted { role_id: u64 },
    GrantFailed { role_id: u64 },
}

impl VerificationOutcome {
    /// The ephemeral reply shown to the member.
    pub fn message(&self) -> String {
        match self {
            VerificationOutcome::NotFound { username } => {
                format!("Could not find Roblox user **{}**.", username)
            }
            VerificationOutcome::ConfigError { command } => {
                format!("Configuration error for command {}.", command)
            }
            VerificationOutcome::Ineligible { username } => {
                format!("User **{}** does NOT own the required shirt.", username)
            }
            VerificationOutcome::MemberNotFound => "Member not found in guild.".to_string(),
            VerificationOutcome::AlreadyGranted => "You already have the role!".to_string(),
            VerificationOutcome::Granted { .. } => "Role assigned successfully!".to_string(),
            VerificationOutcome::GrantFailed { .. } => {
                "Failed to assign role. Do I have permission?".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modal_is_bounded_and_required() {
        let modal = UsernameModal::for_command("full-access");
        assert_eq!(modal.custom_id, "roblox_username_modal_full-access");
        assert_eq!(modal.input_id, "username_input");
        assert_eq!((modal.min_length, modal.max_length), (3, 20));
        assert!(modal.required);
    }

    #[test]
    fn foreign_modals_are_not_requests() {
        assert!(VerificationRequest::from_modal("feedback_modal", Some("builderman"), 1).is_none());
    }

    #[test]
    fn request_carries_command_and_trimmed_username() {
        let request =
            VerificationRequest::from_modal("roblox_username_modal_half-access", Some(" Roblox "), 9)
                .unwrap();
        assert_eq!(request.command_name, "half-access");
        assert_eq!(request.raw_username, "Roblox");
        assert_eq!(request.member_id, 9);
    }

    #[test]
    fn missing_username_becomes_empty() {
        let request =
            VerificationRequest::from_modal("roblox_username_modal_half-access", None, 9).unwrap();
        assert!(request.raw_username.is_empty());
    }

    #[test]
    fn outcome_messages_match_the_replies() {
        assert_eq!(
            VerificationOutcome::NotFound {
                username: "ghost".into()
            }
            .message(),
            "Could not find Roblox user **ghost**."
        );
        assert_eq!(
            VerificationOutcome::Granted { role_id: 1 }.message(),
            "Role assigned successfully!"
        );
        assert_eq!(
            VerificationOutcome::GrantFailed { role_id: 1 }.message(),
            "Failed to assign role. Do I have permission?"
        );
    }
}
