use crate::paginate::{self, FieldPageSource};
use crate::{Context, Error};
use cl_core::collector::{PER_PAGE, claim_card, collector_entries, list_title, no_collectibles};
use poise::CreateReply;
use poise::serenity_prelude as serenity;
use std::collections::HashMap;
use std::sync::atomic::Ordering;
use tracing::warn;

/// Collector commands.
#[allow(clippy::unused_async)]
#[poise::command(slash_command, subcommands("card", "list", "reload"), subcommand_required)]
pub async fn collector(_: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Get the collector card for a collectible.
#[poise::command(slash_command, guild_only)]
pub async fn card(
    ctx: Context<'_>,
    #[description = "The collectible you want to obtain the collector card for"]
    #[autocomplete = "autocomplete_collectible"]
    countryball: String,
) -> Result<(), Error> {
    if let Context::Application(actx) = ctx {
        if actx.has_sent_initial_response.load(Ordering::SeqCst) {
            return Ok(());
        }
    }

    ctx.defer_ephemeral().await?;

    let Some((ball, collector)) = ctx.data().collector_card(&countryball) else {
        ctx.send(
            CreateReply::new()
                .content("The collectible could not be found.")
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    };

    let outcome = {
        let data = ctx.data();
        claim_card(
            &data.collector,
            &data.thresholds,
            ctx.author().id,
            &ball,
            &collector,
        )
        .await?
    };

    ctx.send(CreateReply::new().content(outcome.to_string()).ephemeral(true))
        .await?;

    Ok(())
}

/// Show the collector card list of the dex - inspired by GamingadlerHD
#[poise::command(slash_command)]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    let (entries, bot_name) = {
        let data = ctx.data();
        let catalog = data.catalog.read();
        let emojis = cached_emojis(ctx.cache(), catalog.enabled().filter_map(|b| b.emoji()));
        (
            collector_entries(&catalog, &data.thresholds, |id| emojis.get(&id).cloned()),
            data.config.bot_name.clone(),
        )
    };

    if entries.is_empty() {
        ctx.send(
            CreateReply::new()
                .content(no_collectibles(&bot_name))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }

    let author = ctx.author();
    let source = FieldPageSource::new(entries, PER_PAGE)
        .description(list_title(&bot_name))
        .author(author.display_name().to_owned(), author.face());

    paginate::start(ctx, &source, true).await
}

/// Renders the wanted emojis found in any cached guild.
fn cached_emojis(
    cache: &serenity::Cache,
    wanted: impl Iterator<Item = serenity::EmojiId>,
) -> HashMap<serenity::EmojiId, String> {
    let wanted: Vec<_> = wanted.collect();
    let mut found = HashMap::with_capacity(wanted.len());

    for guild_id in cache.guilds() {
        let Some(guild) = cache.guild(guild_id) else {
            continue;
        };

        for id in &wanted {
            if let Some(emoji) = guild.emojis.get(id) {
                found.entry(*id).or_insert_with(|| emoji.to_string());
            }
        }
    }

    found
}

/// Reload collectibles and specials from the database.
#[poise::command(slash_command, owners_only)]
pub async fn reload(ctx: Context<'_>) -> Result<(), Error> {
    match ctx.data().reload_catalog().await {
        Ok(count) => {
            ctx.say(format!("Reloaded {count} collectibles.")).await?;
        }
        Err(e) => {
            warn!("catalog reload failed: {e}");
            ctx.say(format!("The catalog was not reloaded: {e}")).await?;
        }
    }

    Ok(())
}

#[allow(clippy::unused_async)]
async fn autocomplete_collectible<'a>(
    ctx: Context<'a>,
    partial: &'a str,
) -> serenity::CreateAutocompleteResponse<'a> {
    let choices: Vec<_> = {
        let data = ctx.data();
        let catalog = data.catalog.read();
        let partial = partial.to_lowercase();

        catalog
            .enabled()
            .map(|b| b.country.clone())
            .filter(|name| name.to_lowercase().contains(&partial))
            .take(25)
            .map(serenity::AutocompleteChoice::from)
            .collect()
    };

    serenity::CreateAutocompleteResponse::new().set_choices(choices)
}

pub fn commands() -> [crate::Command; 1] {
    [collector()]
}
