/// Startup settings, read from the environment (and `.env`, loaded by the binary).
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub database_url: String,
    /// Shown in the collector list and its empty message.
    pub bot_name: String,
    /// Name of the special given to collector cards.
    pub collector_special: String,
    /// Path to a JSON file of per-collectible amounts.
    pub thresholds_path: Option<String>,
    pub prefix: String,
}

#[derive(Debug)]
pub struct MissingVar(pub &'static str);

impl std::error::Error for MissingVar {}
impl std::fmt::Display for MissingVar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "missing {} in the environment", self.0)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, MissingVar> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, MissingVar> {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        let token = lookup("DISCORD_TOKEN")
            .filter(|v| !v.trim().is_empty())
            .ok_or(MissingVar("DISCORD_TOKEN"))?;

        Ok(Config {
            token,
            database_url: var("DATABASE_URL", "sqlite://collector.sqlite3?mode=rwc"),
            bot_name: var("BOT_NAME", "BallsDex"),
            collector_special: var("COLLECTOR_SPECIAL", "Collector"),
            thresholds_path: lookup("COLLECTOR_THRESHOLDS").filter(|v| !v.trim().is_empty()),
            prefix: var("COMMAND_PREFIX", "c!"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, MissingVar> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn token_is_required() {
        let err = config(&[]).unwrap_err();
        assert_eq!(err.to_string(), "missing DISCORD_TOKEN in the environment");
        assert!(config(&[("DISCORD_TOKEN", "  ")]).is_err());
    }

    #[test]
    fn defaults() {
        let config = config(&[("DISCORD_TOKEN", "abc")]).unwrap();
        assert_eq!(config.token, "abc");
        assert_eq!(config.database_url, "sqlite://collector.sqlite3?mode=rwc");
        assert_eq!(config.bot_name, "BallsDex");
        assert_eq!(config.collector_special, "Collector");
        assert_eq!(config.thresholds_path, None);
        assert_eq!(config.prefix, "c!");
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("DISCORD_TOKEN", "abc"),
            ("BOT_NAME", "PlayersDex"),
            ("COLLECTOR_SPECIAL", "Hoarder"),
            ("COLLECTOR_THRESHOLDS", "collector.json"),
            ("DATABASE_URL", "sqlite::memory:"),
        ])
        .unwrap();
        assert_eq!(config.bot_name, "PlayersDex");
        assert_eq!(config.collector_special, "Hoarder");
        assert_eq!(config.thresholds_path.as_deref(), Some("collector.json"));
        assert_eq!(config.database_url, "sqlite::memory:");
    }
}
