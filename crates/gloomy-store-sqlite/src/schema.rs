//! SQL schema for the gloomy SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    email        TEXT NOT NULL UNIQUE,
    name         TEXT NOT NULL,
    join_status  TEXT NOT NULL,   -- 'active' | 'inactive'
    created_at   TEXT NOT NULL    -- ISO 8601 UTC
);

-- Every authored table carries either user_id or the non_user_* pair.
CREATE TABLE IF NOT EXISTS feeds (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    content           TEXT NOT NULL,
    category          TEXT NOT NULL,   -- 'ALL' | 'CHAT' | 'FAMILY' | 'FRIEND'
    user_id           INTEGER REFERENCES users(id),
    non_user_name     TEXT,
    non_user_password TEXT,            -- argon2 PHC string
    status            TEXT NOT NULL,
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL,
    deleted_at        TEXT,
    CHECK ((user_id IS NULL) != (non_user_password IS NULL))
);

CREATE TABLE IF NOT EXISTS comments (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    feed_id           INTEGER NOT NULL REFERENCES feeds(id),
    content           TEXT NOT NULL,
    user_id           INTEGER REFERENCES users(id),
    non_user_name     TEXT,
    non_user_password TEXT,
    status            TEXT NOT NULL,
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL,
    deleted_at        TEXT,
    CHECK ((user_id IS NULL) != (non_user_password IS NULL))
);

CREATE TABLE IF NOT EXISTS replies (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    feed_id           INTEGER NOT NULL REFERENCES feeds(id),
    comment_id        INTEGER NOT NULL REFERENCES comments(id) ON DELETE CASCADE,
    content           TEXT NOT NULL,
    user_id           INTEGER REFERENCES users(id),
    non_user_name     TEXT,
    non_user_password TEXT,
    status            TEXT NOT NULL,
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL,
    deleted_at        TEXT,
    CHECK ((user_id IS NULL) != (non_user_password IS NULL))
);

-- source_id points into comments or replies depending on kind; no FK.
CREATE TABLE IF NOT EXISTS notices (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    feed_id       INTEGER NOT NULL REFERENCES feeds(id),
    recipient_id  INTEGER REFERENCES users(id),
    kind          TEXT NOT NULL,   -- 'COMMENT' | 'REPLY'
    source_id     INTEGER NOT NULL,
    is_read       INTEGER NOT NULL DEFAULT 0,
    created_at    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS comments_feed_idx    ON comments(feed_id, status);
CREATE INDEX IF NOT EXISTS comments_user_idx    ON comments(user_id, status);
CREATE INDEX IF NOT EXISTS replies_comment_idx  ON replies(comment_id, status);
CREATE INDEX IF NOT EXISTS notices_recipient_idx ON notices(recipient_id);

PRAGMA user_version = 1;
";
