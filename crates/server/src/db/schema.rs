//! SQL schema for the records store.
//!
//! Executed once at connection startup; idempotent thanks to
//! `CREATE TABLE IF NOT EXISTS`. Future migrations will be gated on
//! `PRAGMA user_version`.

pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS family_members (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE,  -- backs atomic get-or-create
    relation    TEXT,                  -- e.g. Father, Mother, Self
    gender      TEXT,
    birth_date  TEXT,                  -- ISO date or NULL
    created_at  TEXT NOT NULL          -- RFC 3339 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS medical_reports (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    member_id     INTEGER REFERENCES family_members(id),
    file_path     TEXT NOT NULL,
    hospital_name TEXT,
    report_date   TEXT,                -- ISO date or NULL
    report_type   TEXT,                -- e.g. Blood Test, CT Scan
    summary       TEXT,
    created_at    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS reports_member_idx  ON medical_reports(member_id);
CREATE INDEX IF NOT EXISTS reports_created_idx ON medical_reports(created_at);

PRAGMA user_version = 1;
";
