use crate::Error;
use crate::catalog::{Catalog, CollectibleType, SpecialType};
use crate::db::{CollectorDb, Redemption};
use crate::threshold::Thresholds;
use itertools::Itertools;
use poise::serenity_prelude::{EmojiId, UserId};
use std::fmt;

/// Collectibles shown on each page of the collector list.
pub const PER_PAGE: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum CardOutcome {
    AlreadyCollector {
        country: String,
    },
    Redeemed {
        country: String,
    },
    Insufficient {
        country: String,
        required: i64,
        owned: i64,
    },
}

impl fmt::Display for CardOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardOutcome::AlreadyCollector { country } => {
                write!(f, "You already have a {country} collector ball.")
            }
            CardOutcome::Redeemed { country } => {
                write!(f, "Congrats! You are now a {country} collector.")
            }
            CardOutcome::Insufficient {
                country,
                required,
                owned,
            } => write!(
                f,
                "You need {required} {country} to create a special collector card. You currently have {owned}"
            ),
        }
    }
}

/// Gives `user_id` the collector card of `ball` if they own enough of it.
pub async fn claim_card(
    db: &CollectorDb,
    thresholds: &Thresholds,
    user_id: UserId,
    ball: &CollectibleType,
    collector: &SpecialType,
) -> Result<CardOutcome, Error> {
    let required = thresholds.required_for(ball);
    let country = ball.country.clone();

    let outcome = match db.redeem(user_id, ball.id, collector.id, required).await? {
        Redemption::AlreadyCollector => CardOutcome::AlreadyCollector { country },
        Redemption::Redeemed { .. } => CardOutcome::Redeemed { country },
        Redemption::Insufficient { owned } => CardOutcome::Insufficient {
            country,
            required,
            owned,
        },
    };

    Ok(outcome)
}

/// One `(name, value)` field per enabled collectible, rarest first.
///
/// `resolve_emoji` renders an emoji the bot can see; anything it can't resolve shows as `N/A`.
pub fn collector_entries(
    catalog: &Catalog,
    thresholds: &Thresholds,
    resolve_emoji: impl Fn(EmojiId) -> Option<String>,
) -> Vec<(String, String)> {
    catalog
        .enabled()
        .sorted_by(|a, b| a.rarity.total_cmp(&b.rarity))
        .map(|ball| {
            let emote = ball
                .emoji()
                .and_then(&resolve_emoji)
                .unwrap_or_else(|| "N/A".to_owned());
            let required = thresholds.required_for(ball);
            (ball.country.clone(), format!("{emote} Amount required: {required}"))
        })
        .collect()
}

#[must_use]
pub fn list_title(bot_name: &str) -> String {
    format!("__**{bot_name} Collector Card List**__")
}

#[must_use]
pub fn no_collectibles(bot_name: &str) -> String {
    format!("There are no collectibles registered in {bot_name} yet.")
}
