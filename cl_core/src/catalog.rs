use poise::serenity_prelude::EmojiId;
use std::collections::HashMap;

/// A collectible players can own instances of.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CollectibleType {
    pub id: i64,
    pub country: String,
    /// Lower is rarer.
    pub rarity: f64,
    pub enabled: bool,
    pub emoji_id: Option<i64>,
}

impl CollectibleType {
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn emoji(&self) -> Option<EmojiId> {
        self.emoji_id.filter(|id| *id > 0).map(|id| EmojiId::new(id as u64))
    }
}

/// A named edition attached to owned instances, such as "Collector".
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SpecialType {
    pub id: i64,
    pub name: String,
    pub emoji: Option<String>,
}

#[derive(Debug)]
pub enum CatalogError {
    /// No special with this name exists.
    MissingSpecial(String),
    /// Two specials share a name, so lookups by name would be ambiguous.
    DuplicateSpecial(String),
}

impl std::error::Error for CatalogError {}
impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::MissingSpecial(name) => {
                write!(f, "No special named \"{name}\" is registered.")
            }
            CatalogError::DuplicateSpecial(name) => {
                write!(f, "More than one special is named \"{name}\".")
            }
        }
    }
}

/// Read-only registry of every collectible and special, built once and swapped on reload.
#[derive(Debug)]
pub struct Catalog {
    balls: Vec<CollectibleType>,
    collector: SpecialType,
}

impl Catalog {
    /// Builds the registry, failing if the collector special is not present.
    pub fn new(
        mut balls: Vec<CollectibleType>,
        specials: Vec<SpecialType>,
        collector_name: &str,
    ) -> Result<Self, CatalogError> {
        let mut by_name = HashMap::with_capacity(specials.len());
        for special in specials {
            let name = special.name.clone();
            if by_name.insert(name.clone(), special).is_some() {
                return Err(CatalogError::DuplicateSpecial(name));
            }
        }

        let collector = by_name
            .remove(collector_name)
            .ok_or_else(|| CatalogError::MissingSpecial(collector_name.to_owned()))?;

        balls.sort_by_key(|b| b.id);

        Ok(Catalog { balls, collector })
    }

    #[must_use]
    pub fn collector(&self) -> &SpecialType {
        &self.collector
    }

    pub fn enabled(&self) -> impl Iterator<Item = &CollectibleType> {
        self.balls.iter().filter(|b| b.enabled)
    }

    /// Finds an enabled collectible by its name, ignoring case.
    #[must_use]
    pub fn find_enabled(&self, country: &str) -> Option<&CollectibleType> {
        let country = country.trim();
        self.enabled()
            .find(|b| b.country.eq_ignore_ascii_case(country))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.balls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }
}
