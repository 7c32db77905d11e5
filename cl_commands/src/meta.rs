use crate::{Command, Context, Error};
use tracing::info;

/// Registers or removes the slash commands; the builtin only answers bot owners.
#[poise::command(prefix_command, hide_in_help)]
pub async fn register(ctx: Context<'_>) -> Result<(), Error> {
    info!(user = %ctx.author().id, "command registration requested");
    poise::builtins::register_application_commands_buttons(ctx).await?;

    Ok(())
}

pub fn commands() -> [Command; 1] {
    [register()]
}
