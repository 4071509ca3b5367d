//! SQL DDL for the trip planner tables.
//! SQLite-first; every statement is idempotent so it can run on each startup.

/// Tables, in dependency order:
/// - `users`: one row per account; `password_hash` is an Argon2 PHC string, `salt` its salt
/// - `trips`, `packing_lists`: owned by a user (nullable owner, as rows may be created first)
/// - `items`, `activities`: shared catalogue
/// - `packlist_items`, `activity_items`, `trip_activities`: join tables
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    salt TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS trips (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NULL REFERENCES users(id),
    name TEXT NOT NULL,
    destination TEXT NULL,
    start_date TEXT NULL, -- YYYY-MM-DD
    end_date TEXT NULL
);

CREATE INDEX IF NOT EXISTS idx_trips_user_id ON trips(user_id);
CREATE INDEX IF NOT EXISTS idx_trips_name ON trips(name);

CREATE TABLE IF NOT EXISTS packing_lists (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NULL REFERENCES users(id),
    trip_id INTEGER NULL REFERENCES trips(id)
);

CREATE INDEX IF NOT EXISTS idx_packing_lists_user_id ON packing_lists(user_id);
CREATE INDEX IF NOT EXISTS idx_packing_lists_trip_id ON packing_lists(trip_id);

CREATE TABLE IF NOT EXISTS items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS packlist_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    packing_list_id INTEGER NOT NULL REFERENCES packing_lists(id),
    item_id INTEGER NOT NULL REFERENCES items(id)
);

CREATE INDEX IF NOT EXISTS idx_packlist_items_list ON packlist_items(packing_list_id);

CREATE TABLE IF NOT EXISTS activities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS activity_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    item_id INTEGER NOT NULL REFERENCES items(id),
    activity_id INTEGER NOT NULL REFERENCES activities(id)
);

CREATE INDEX IF NOT EXISTS idx_activity_items_activity ON activity_items(activity_id);

CREATE TABLE IF NOT EXISTS trip_activities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    trip_id INTEGER NOT NULL REFERENCES trips(id),
    activity_id INTEGER NOT NULL REFERENCES activities(id)
);

CREATE INDEX IF NOT EXISTS idx_trip_activities_trip ON trip_activities(trip_id);
"#;

/// Table names created by [`SQLITE_INIT`].
pub const TABLES: [&str; 8] = [
    "users",
    "trips",
    "packing_lists",
    "items",
    "packlist_items",
    "activities",
    "activity_items",
    "trip_activities",
];
