//! SQL schema for the campus SQLite store.
//!
//! Executed once at connection startup. `users`, `schools` and `comments` are
//! written by other services sharing the database; this crate only creates
//! them so a fresh file is usable.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS schools (
    school_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    user_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    school_id   INTEGER REFERENCES schools(school_id),
    created_at  TEXT NOT NULL        -- RFC 3339 UTC
);

-- Posts are inserted and deleted, never updated.
CREATE TABLE IF NOT EXISTS posts (
    post_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    content     TEXT NOT NULL CHECK (content != ''),
    school_id   INTEGER REFERENCES schools(school_id),
    locations   TEXT,                -- raw JSON as submitted, or NULL
    user_id     INTEGER NOT NULL REFERENCES users(user_id),
    created_at  TEXT NOT NULL,
    CHECK (school_id IS NOT NULL OR locations IS NOT NULL)
);

CREATE TABLE IF NOT EXISTS comments (
    comment_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id     INTEGER NOT NULL REFERENCES posts(post_id) ON DELETE CASCADE,
    user_id     INTEGER NOT NULL REFERENCES users(user_id),
    content     TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS comments_post_idx ON comments(post_id);

PRAGMA user_version = 1;
";
