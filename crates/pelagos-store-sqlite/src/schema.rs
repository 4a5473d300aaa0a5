//! SQL schema for the Pelagos SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Auth entries. Identity fields (display name, avatar, role) live here as
-- user metadata; there is no separate profile table.
CREATE TABLE IF NOT EXISTS accounts (
    user_id       TEXT PRIMARY KEY,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,   -- argon2 PHC string
    display_name  TEXT NOT NULL,
    avatar_url    TEXT,
    role          TEXT NOT NULL DEFAULT 'user',  -- 'user' | 'researcher' | 'admin'
    is_banned     INTEGER NOT NULL DEFAULT 0,
    created_at    TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS sessions (
    token      TEXT PRIMARY KEY,
    user_id    TEXT NOT NULL REFERENCES accounts(user_id),
    created_at TEXT NOT NULL
);

-- Favorite edges: existence only, at most one per (user, species) pair.
CREATE TABLE IF NOT EXISTS favorites (
    user_id    TEXT NOT NULL REFERENCES accounts(user_id),
    species_id TEXT NOT NULL,
    PRIMARY KEY (user_id, species_id)
);

CREATE TABLE IF NOT EXISTS resources (
    id        TEXT PRIMARY KEY,
    title     TEXT NOT NULL,
    category  TEXT NOT NULL,   -- 'Research' | 'Conservation' | 'Discovery' | 'Documentary' | 'Education'
    excerpt   TEXT NOT NULL,
    author    TEXT NOT NULL,
    image_url TEXT NOT NULL,
    read_time TEXT NOT NULL,
    published TEXT NOT NULL,   -- display date string
    featured  INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS sessions_user_idx  ON sessions(user_id);
CREATE INDEX IF NOT EXISTS favorites_user_idx ON favorites(user_id);

PRAGMA user_version = 1;
";

/// Tables exposed to the diagnostic probe.
pub const TABLES: &[&str] = &["accounts", "sessions", "favorites", "resources"];
