//! Database module: models, schema, and typed queries over SQLite.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows, typed ids, creation payloads
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pool, per-operation sessions, schema init
//! - `users.rs`, `trips.rs`, `packing.rs`, `activities.rs`: lookups per table

pub mod activities;
pub mod models;
pub mod packing;
pub mod schema;
pub mod sqlite;
pub mod trips;
pub mod users;

pub use models::{
    Activity, ActivityId, ActivityItem, Item, ItemId, NewTrip, NewUser, PackListItem, PackingList,
    PackingListId, Trip, TripActivity, TripId, User, UserId,
};
pub use schema::SQLITE_INIT;
pub use sqlite::{Session, SqlitePool, Store};
