use aformat::{ToArrayString, aformat};
use std::borrow::Cow;
use std::time::{Duration, Instant};

use crate::{Context, Error};
use poise::{
    CreateReply,
    serenity_prelude::{
        self as serenity, ComponentInteractionCollector, CreateActionRow, CreateButton,
        CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter, CreateInteractionResponse,
        CreateInteractionResponseMessage,
    },
};

/// How long the buttons wait for the next press.
const IDLE_TIMEOUT: Duration = Duration::from_secs(180);
/// Interaction tokens expire after 15 minutes, after which the reply can't be edited.
const SESSION_LIMIT: Duration = Duration::from_secs(14 * 60);

/// Embed fields split across pages, each page rendered as one embed.
pub struct FieldPageSource {
    entries: Vec<(String, String)>,
    per_page: usize,
    description: Option<String>,
    author: Option<(String, String)>,
}

impl FieldPageSource {
    #[must_use]
    pub fn new(entries: Vec<(String, String)>, per_page: usize) -> Self {
        FieldPageSource {
            entries,
            per_page: per_page.max(1),
            description: None,
            author: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    #[must_use]
    pub fn author(mut self, name: String, icon_url: String) -> Self {
        self.author = Some((name, icon_url));
        self
    }

    /// Always at least one, an empty source still renders a page.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.entries.len().div_ceil(self.per_page).max(1)
    }

    #[must_use]
    pub fn page(&self, index: usize) -> &[(String, String)] {
        self.entries
            .chunks(self.per_page)
            .nth(index)
            .unwrap_or_default()
    }

    fn embed(&self, index: usize) -> CreateEmbed<'_> {
        let mut embed = CreateEmbed::new().colour(serenity::Colour::BLURPLE);

        if let Some(description) = &self.description {
            embed = embed.description(description.as_str());
        }

        if let Some((name, icon_url)) = &self.author {
            embed = embed.author(CreateEmbedAuthor::new(name.as_str()).icon_url(icon_url.as_str()));
        }

        for (name, value) in self.page(index) {
            embed = embed.field(name.as_str(), value.as_str(), false);
        }

        let pages = self.page_count();
        if pages > 1 {
            embed = embed.footer(CreateEmbedFooter::new(format!(
                "Page {}/{pages}",
                index + 1
            )));
        }

        embed
    }
}

/// Sends the first page and lets the invoker flip through the rest until the buttons go quiet.
pub async fn start(ctx: Context<'_>, source: &FieldPageSource, ephemeral: bool) -> Result<(), Error> {
    let builder = CreateReply::new().embed(source.embed(0)).ephemeral(ephemeral);

    let pages = source.page_count();
    if pages == 1 {
        ctx.send(builder).await?;
        return Ok(());
    }

    let ctx_id = ctx.id();
    let previous_id = aformat!("{ctx_id}previous");
    let next_id = aformat!("{ctx_id}next");

    let components = [CreateActionRow::Buttons(Cow::Owned(vec![
        CreateButton::new(previous_id.as_str()).emoji('◀'),
        CreateButton::new(next_id.as_str()).emoji('▶'),
    ]))];

    let builder = builder.components(&components);

    let msg = ctx.send(builder).await?;

    let author_id = ctx.author().id;
    let started = Instant::now();
    let mut current_page = 0;
    loop {
        let Some(timeout) = press_timeout(started.elapsed()) else {
            break;
        };

        let Some(press) = ComponentInteractionCollector::new(ctx.serenity_context().shard.clone())
            .filter(move |press| {
                press
                    .data
                    .custom_id
                    .starts_with(ctx_id.to_arraystring().as_str())
            })
            .author_id(author_id)
            .timeout(timeout)
            .await
        else {
            break;
        };

        if *press.data.custom_id == *next_id {
            current_page = next_page(current_page, pages);
        } else if *press.data.custom_id == *previous_id {
            current_page = previous_page(current_page, pages);
        } else {
            continue;
        }

        let _ = press
            .create_response(
                ctx.http(),
                CreateInteractionResponse::UpdateMessage(
                    CreateInteractionResponseMessage::default().embed(source.embed(current_page)),
                ),
            )
            .await;
    }

    let no_components: [CreateActionRow<'_>; 0] = [];
    let _ = msg
        .edit(
            ctx,
            CreateReply::new()
                .embed(source.embed(current_page))
                .components(&no_components),
        )
        .await;

    Ok(())
}

/// The wait for the next press, or `None` once the session has run out.
fn press_timeout(elapsed: Duration) -> Option<Duration> {
    let remaining = SESSION_LIMIT.checked_sub(elapsed)?;
    if remaining.is_zero() {
        return None;
    }
    Some(remaining.min(IDLE_TIMEOUT))
}

fn next_page(current: usize, pages: usize) -> usize {
    if current + 1 >= pages { 0 } else { current + 1 }
}

fn previous_page(current: usize, pages: usize) -> usize {
    current.checked_sub(1).unwrap_or(pages - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: usize) -> Vec<(String, String)> {
        (0..n).map(|i| (format!("name {i}"), format!("value {i}"))).collect()
    }

    #[test]
    fn partial_last_page() {
        let source = FieldPageSource::new(entries(12), 5);
        assert_eq!(source.page_count(), 3);
        assert_eq!(source.page(0).len(), 5);
        assert_eq!(source.page(2).len(), 2);
        assert_eq!(source.page(2)[1].0, "name 11");
        assert!(source.page(3).is_empty());
    }

    #[test]
    fn exact_pages() {
        let source = FieldPageSource::new(entries(10), 5);
        assert_eq!(source.page_count(), 2);
        assert_eq!(source.page(1)[0].0, "name 5");
    }

    #[test]
    fn small_and_empty_sources_have_one_page() {
        assert_eq!(FieldPageSource::new(entries(3), 5).page_count(), 1);
        assert_eq!(FieldPageSource::new(Vec::new(), 5).page_count(), 1);
        assert_eq!(FieldPageSource::new(entries(3), 0).page_count(), 3);
    }

    #[test]
    fn session_is_capped_below_token_expiry() {
        assert_eq!(press_timeout(Duration::ZERO), Some(IDLE_TIMEOUT));
        assert_eq!(
            press_timeout(Duration::from_secs(13 * 60)),
            Some(Duration::from_secs(60))
        );
        assert_eq!(press_timeout(SESSION_LIMIT), None);
        assert_eq!(press_timeout(Duration::from_secs(20 * 60)), None);
        assert!(SESSION_LIMIT < Duration::from_secs(15 * 60));
    }

    #[test]
    fn navigation_wraps() {
        assert_eq!(next_page(0, 3), 1);
        assert_eq!(next_page(2, 3), 0);
        assert_eq!(previous_page(0, 3), 2);
        assert_eq!(previous_page(2, 3), 1);
    }
}
