use cl_core::structs::{Error, FrameworkContext};
use poise::serenity_prelude as serenity;
use tracing::info;

/// # Errors
///
/// Currently this cannot error because we are not doing anything that can.
#[allow(clippy::unused_async)]
pub async fn handler(
    event: &serenity::FullEvent,
    framework: FrameworkContext<'_>,
) -> Result<(), Error> {
    if let serenity::FullEvent::Ready { data_about_bot, .. } = event {
        info!(
            commands = framework.options().commands.len(),
            "Logged in as {}; run `register` to publish the slash commands.",
            data_about_bot.user.tag()
        );
    }
    Ok(())
}
