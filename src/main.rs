use cl_core::config::Config;
use cl_core::structs::{Data, Error};
use poise::serenity_prelude as serenity;
use sqlx::sqlite::SqlitePoolOptions;
use std::future::Future;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod events;

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().qualified_name, error);
            let _ = ctx.say("Something went wrong while running this command.").await;
        }
        poise::FrameworkError::CommandCheckFailed { error, ctx, .. } => {
            let error_msg = error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "You cannot execute this command.".to_owned());
            let _ = ctx.say(error_msg).await;
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let token: serenity::Token = config.token.parse()?;
    let intents = serenity::GatewayIntents::non_privileged();

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    // Refuses to start when the collector special is missing.
    let data = Data::load(config, &pool).await?;

    let options = poise::FrameworkOptions {
        commands: cl_commands::commands(),
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(data.config.prefix.clone().into()),
            ..Default::default()
        },
        on_error: |error| Box::pin(on_error(error)),
        event_handler: |framework, event| Box::pin(events::handler(event, framework)),
        ..Default::default()
    };

    let framework = poise::Framework::new(options);

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .data(Arc::new(data) as _)
        .await?;

    let result = run_until_shutdown(client.start(), tokio::signal::ctrl_c()).await;
    pool.close().await;

    result
}

/// Drives the client until it stops on its own or `shutdown` fires, whichever comes first.
async fn run_until_shutdown<E, S>(
    client: impl Future<Output = Result<(), E>>,
    shutdown: impl Future<Output = S>,
) -> Result<(), Error>
where
    E: Into<Error>,
{
    tokio::select! {
        result = client => {
            let result = result.map_err(Into::into);
            if let Err(why) = &result {
                error!("Client ended: {:?}", why);
            }
            result
        }
        _ = shutdown => {
            info!("Received Ctrl-C, shutting down.");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::{pending, ready};

    #[tokio::test]
    async fn client_failure_ends_the_process() {
        let client = ready(Err::<(), Error>("invalid token".into()));

        let err = run_until_shutdown(client, pending::<()>()).await.unwrap_err();
        assert_eq!(err.to_string(), "invalid token");
    }

    #[tokio::test]
    async fn shutdown_signal_stops_a_running_client() {
        let client = pending::<Result<(), Error>>();

        assert!(run_until_shutdown(client, ready(())).await.is_ok());
    }

    #[tokio::test]
    async fn clean_client_exit_is_ok() {
        assert!(run_until_shutdown(ready(Ok::<(), Error>(())), pending::<()>()).await.is_ok());
    }
}
