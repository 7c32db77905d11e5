pub const CREATE_PLAYERS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS players (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    discord_id INTEGER NOT NULL UNIQUE
)";

pub const CREATE_BALLS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS balls (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    country TEXT NOT NULL UNIQUE,
    rarity REAL NOT NULL,
    enabled BOOLEAN NOT NULL DEFAULT 1,
    emoji_id INTEGER
)";

pub const CREATE_SPECIALS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS specials (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    emoji TEXT
)";

pub const CREATE_BALL_INSTANCES_TABLE: &str = "
CREATE TABLE IF NOT EXISTS ball_instances (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    ball_id INTEGER NOT NULL REFERENCES balls (id),
    player_id INTEGER NOT NULL REFERENCES players (id),
    special_id INTEGER REFERENCES specials (id),
    attack_bonus INTEGER NOT NULL DEFAULT 0,
    health_bonus INTEGER NOT NULL DEFAULT 0,
    catch_date INTEGER NOT NULL
)";

pub const CREATE_BALL_INSTANCES_INDEX: &str = "
CREATE INDEX IF NOT EXISTS ball_instances_owner ON ball_instances (player_id, ball_id)";

// One collector card per player, collectible and special.
pub const CREATE_COLLECTOR_CLAIMS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS collector_claims (
    player_id INTEGER NOT NULL REFERENCES players (id),
    ball_id INTEGER NOT NULL REFERENCES balls (id),
    special_id INTEGER NOT NULL REFERENCES specials (id),
    instance_id INTEGER NOT NULL REFERENCES ball_instances (id),
    PRIMARY KEY (player_id, ball_id, special_id)
)";

pub const SCHEMA: [&str; 6] = [
    CREATE_PLAYERS_TABLE,
    CREATE_BALLS_TABLE,
    CREATE_SPECIALS_TABLE,
    CREATE_BALL_INSTANCES_TABLE,
    CREATE_BALL_INSTANCES_INDEX,
    CREATE_COLLECTOR_CLAIMS_TABLE,
];
