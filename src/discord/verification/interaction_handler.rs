// Interaction glue for the access commands.
//
// Raw serenity interactions are reduced to an `InteractionEvent`, the core
// verifier decides what happens, and the result is rendered back with the
// serenity builders. Every reply is ephemeral.

use poise::serenity_prelude as serenity;

use crate::core::verification::verification_models::USERNAME_INPUT_ID;
use crate::core::verification::{
    CommandResponse, InteractionEvent, UsernameModal, VerificationRequest,
};
use crate::discord::{Data, Error};

/// Entry point called from the framework event handler for every interaction.
pub async fn handle_interaction(
    ctx: &serenity::Context,
    data: &Data,
    interaction: &serenity::Interaction,
) -> Result<(), Error> {
    match normalize(interaction) {
        InteractionEvent::SlashCommand { name } => {
            if let Some(command) = interaction.as_command() {
                respond_to_command(ctx, data, command, &name).await?;
            }
        }
        InteractionEvent::ModalSubmit {
            custom_id,
            username,
            member_id,
        } => {
            let Some(request) =
                VerificationRequest::from_modal(&custom_id, username.as_deref(), member_id)
            else {
                // Someone else's modal.
                return Ok(());
            };
            if let Some(modal) = interaction.as_modal_submit() {
                respond_to_modal(ctx, data, modal, request).await?;
            }
        }
        InteractionEvent::Other => {}
    }

    Ok(())
}

fn normalize(interaction: &serenity::Interaction) -> InteractionEvent {
    match interaction {
        serenity::Interaction::Command(command) => InteractionEvent::SlashCommand {
            name: command.data.name.clone(),
        },
        serenity::Interaction::Modal(modal) => InteractionEvent::ModalSubmit {
            custom_id: modal.data.custom_id.clone(),
            username: input_value(&modal.data.components, USERNAME_INPUT_ID),
            member_id: modal.user.id.get(),
        },
        _ => InteractionEvent::Other,
    }
}

fn input_value(rows: &[serenity::ActionRow], input_id: &str) -> Option<String> {
    rows.iter()
        .flat_map(|row| row.components.iter())
        .find_map(|component| match component {
            serenity::ActionRowComponent::InputText(input) if input.custom_id == input_id => {
                input.value.clone()
            }
            _ => None,
        })
}

async fn respond_to_command(
    ctx: &serenity::Context,
    data: &Data,
    command: &serenity::CommandInteraction,
    name: &str,
) -> Result<(), Error> {
    let response = match data.verifier.handle_command(name) {
        CommandResponse::ShowModal(modal) => {
            tracing::debug!(command = name, user_id = command.user.id.get(), "Showing username modal");
            serenity::CreateInteractionResponse::Modal(build_modal(&modal))
        }
        CommandResponse::UnknownCommand => serenity::CreateInteractionResponse::Message(
            serenity::CreateInteractionResponseMessage::new()
                .content(CommandResponse::UNKNOWN_COMMAND_MESSAGE)
                .ephemeral(true),
        ),
    };

    command.create_response(ctx, response).await?;
    Ok(())
}

async fn respond_to_modal(
    ctx: &serenity::Context,
    data: &Data,
    modal: &serenity::ModalInteraction,
    request: VerificationRequest,
) -> Result<(), Error> {
    // Roblox can be slow; acknowledge within Discord's three second window first.
    modal.defer_ephemeral(ctx).await?;

    tracing::info!(
        command = %request.command_name,
        member_id = request.member_id,
        username = %request.raw_username,
        "Verifying shirt ownership"
    );

    let outcome = data.verifier.handle_modal_submit(&request).await;

    modal
        .edit_response(
            ctx,
            serenity::EditInteractionResponse::new().content(outcome.message()),
        )
        .await?;
    Ok(())
}

fn build_modal(modal: &UsernameModal) -> serenity::CreateModal {
    let input = serenity::CreateInputText::new(
        serenity::InputTextStyle::Short,
        modal.label,
        modal.input_id,
    )
    .placeholder(modal.placeholder)
    .min_length(modal.min_length)
    .max_length(modal.max_length)
    .required(modal.required);

    serenity::CreateModal::new(modal.custom_id.clone(), modal.title)
        .components(vec![serenity::CreateActionRow::InputText(input)])
}
