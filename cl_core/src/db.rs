#![allow(clippy::cast_possible_wrap)]

use crate::Error;
use crate::catalog::{Catalog, CollectibleType, SpecialType};
use crate::schema::SCHEMA;
use poise::serenity_prelude::UserId;
use sqlx::{SqliteConnection, SqlitePool, query, query_as, query_scalar};
use tracing::{debug, info};

/// A player, keyed by their discord id.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Player {
    pub id: i64,
    pub discord_id: i64,
}

/// A single collectible owned by a player.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct OwnedInstance {
    pub id: i64,
    pub ball_id: i64,
    pub player_id: i64,
    pub special_id: Option<i64>,
    pub attack_bonus: i64,
    pub health_bonus: i64,
    pub catch_date: i64,
}

/// What happened when a player tried to claim a collector card.
#[derive(Debug, Clone, PartialEq)]
pub enum Redemption {
    /// The player already holds this collector card, nothing was written.
    AlreadyCollector,
    /// The player owned too few of the collectible.
    Insufficient { owned: i64 },
    Redeemed { instance: OwnedInstance },
}

pub struct CollectorDb {
    /// The inner pool shared with the rest of the bot.
    db: SqlitePool,
}

impl CollectorDb {
    #[must_use]
    pub fn new(pool: &SqlitePool) -> Self {
        CollectorDb { db: pool.clone() }
    }

    /// Creates any missing tables.
    pub async fn create_schema(&self) -> Result<(), Error> {
        for statement in SCHEMA {
            query(statement).execute(&self.db).await?;
        }

        Ok(())
    }

    /// Reads every collectible and special and builds a validated [`Catalog`].
    pub async fn load_catalog(&self, collector_name: &str) -> Result<Catalog, Error> {
        let balls = query_as::<_, CollectibleType>(
            "SELECT id, country, rarity, enabled, emoji_id FROM balls",
        )
        .fetch_all(&self.db)
        .await?;

        let specials = query_as::<_, SpecialType>("SELECT id, name, emoji FROM specials")
            .fetch_all(&self.db)
            .await?;

        let catalog = Catalog::new(balls, specials, collector_name)?;
        info!(
            collectibles = catalog.len(),
            enabled = catalog.enabled().count(),
            "loaded catalog"
        );

        Ok(catalog)
    }

    /// Claims the `special` card of `ball` for `user` if they own at least `required` of it.
    ///
    /// Everything happens in one transaction. A concurrent claim for the same card trips the
    /// `collector_claims` primary key and is reported as [`Redemption::AlreadyCollector`].
    pub async fn redeem(
        &self,
        user_id: UserId,
        ball_id: i64,
        special_id: i64,
        required: i64,
    ) -> Result<Redemption, Error> {
        let discord_id = user_id.get() as i64;
        let mut transaction = self.db.begin().await?;

        // Writing first takes the write lock, so the counts below can't go stale.
        let player = get_or_create_player(&mut transaction, discord_id).await?;

        let already = count_instances(&mut transaction, discord_id, ball_id, Some(special_id)).await?;
        if already >= 1 {
            transaction.commit().await?;
            return Ok(Redemption::AlreadyCollector);
        }

        let owned = count_instances(&mut transaction, discord_id, ball_id, None).await?;
        if owned < required {
            transaction.commit().await?;
            return Ok(Redemption::Insufficient { owned });
        }

        let instance = query_as::<_, OwnedInstance>(
            r#"
            INSERT INTO ball_instances (ball_id, player_id, special_id, attack_bonus, health_bonus, catch_date)
            VALUES (?, ?, ?, 0, 0, ?)
            RETURNING id, ball_id, player_id, special_id, attack_bonus, health_bonus, catch_date
            "#,
        )
        .bind(ball_id)
        .bind(player.id)
        .bind(special_id)
        .bind(chrono::Utc::now().timestamp())
        .fetch_one(&mut *transaction)
        .await?;

        let claim = query(
            "INSERT INTO collector_claims (player_id, ball_id, special_id, instance_id) VALUES (?, ?, ?, ?)",
        )
        .bind(player.id)
        .bind(ball_id)
        .bind(special_id)
        .bind(instance.id)
        .execute(&mut *transaction)
        .await;

        match claim {
            Ok(_) => {}
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                transaction.rollback().await?;
                debug!(discord_id, ball_id, "lost collector claim race");
                return Ok(Redemption::AlreadyCollector);
            }
            Err(e) => return Err(e.into()),
        }

        transaction.commit().await?;
        info!(discord_id, ball_id, instance = instance.id, "created collector card");

        Ok(Redemption::Redeemed { instance })
    }
}

async fn get_or_create_player(
    conn: &mut SqliteConnection,
    discord_id: i64,
) -> Result<Player, sqlx::Error> {
    query(
        r#"
        INSERT INTO players (discord_id)
        VALUES (?)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(discord_id)
    .execute(&mut *conn)
    .await?;

    query_as::<_, Player>("SELECT id, discord_id FROM players WHERE discord_id = ?")
        .bind(discord_id)
        .fetch_one(&mut *conn)
        .await
}

/// Counts a player's instances of a collectible, only those with `special_id` when given.
async fn count_instances(
    conn: &mut SqliteConnection,
    discord_id: i64,
    ball_id: i64,
    special_id: Option<i64>,
) -> Result<i64, sqlx::Error> {
    query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM
            ball_instances bi
        JOIN
            players p ON p.id = bi.player_id
        WHERE
            p.discord_id = ?
            AND bi.ball_id = ?
            AND (? IS NULL OR bi.special_id = ?)
        "#,
    )
    .bind(discord_id)
    .bind(ball_id)
    .bind(special_id)
    .bind(special_id)
    .fetch_one(&mut *conn)
    .await
}
