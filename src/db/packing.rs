//! Packing lists, the item catalogue, and the list/item join table.

use crate::db::models::{
    ItemId, PackingList, PackingListId, SHORT_TEXT_MAX, TripId, UserId, check_text,
};
use crate::db::trips::get_trip_by_name;
use crate::error::TripError;
use sqlx::SqliteConnection;
use std::collections::BTreeSet;
use tracing::debug;

pub async fn create_item(conn: &mut SqliteConnection, name: &str) -> Result<ItemId, TripError> {
    check_text("item name", name, SHORT_TEXT_MAX, true)?;
    let rec: (i64,) = sqlx::query_as("INSERT INTO items (name) VALUES (?) RETURNING id")
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;
    Ok(ItemId(rec.0))
}

/// Fails with a foreign-key violation if the user or trip does not exist.
pub async fn create_packing_list(
    conn: &mut SqliteConnection,
    user_id: UserId,
    trip_id: TripId,
) -> Result<PackingListId, TripError> {
    let rec: (i64,) = sqlx::query_as(
        "INSERT INTO packing_lists (user_id, trip_id) VALUES (?, ?) RETURNING id",
    )
    .bind(user_id)
    .bind(trip_id)
    .fetch_one(&mut *conn)
    .await?;
    debug!(packing_list_id = rec.0, %user_id, %trip_id, "packing list created");
    Ok(PackingListId(rec.0))
}

/// Put an item on a packing list. Returns the join row id.
pub async fn create_packlist_item(
    conn: &mut SqliteConnection,
    packing_list_id: PackingListId,
    item_id: ItemId,
) -> Result<i64, TripError> {
    let rec: (i64,) = sqlx::query_as(
        "INSERT INTO packlist_items (packing_list_id, item_id) VALUES (?, ?) RETURNING id",
    )
    .bind(packing_list_id)
    .bind(item_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(rec.0)
}

pub async fn get_user_packing_list_ids(
    conn: &mut SqliteConnection,
    user_id: UserId,
) -> Result<Vec<PackingListId>, TripError> {
    let rows: Vec<(PackingListId,)> =
        sqlx::query_as("SELECT id FROM packing_lists WHERE user_id = ? ORDER BY id")
            .bind(user_id)
            .fetch_all(&mut *conn)
            .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

pub async fn get_trip_packing_lists(
    conn: &mut SqliteConnection,
    trip_id: TripId,
) -> Result<Vec<PackingList>, TripError> {
    let lists = sqlx::query_as::<_, PackingList>(
        "SELECT id, user_id, trip_id FROM packing_lists WHERE trip_id = ? ORDER BY id",
    )
    .bind(trip_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(lists)
}

/// Item names on a list, in the order they were added. Duplicates are kept.
pub async fn get_packing_list_item_names(
    conn: &mut SqliteConnection,
    packing_list_id: PackingListId,
) -> Result<Vec<String>, TripError> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"SELECT i.name FROM packlist_items pi
           JOIN items i ON i.id = pi.item_id
           WHERE pi.packing_list_id = ?
           ORDER BY pi.id"#,
    )
    .bind(packing_list_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows.into_iter().map(|(name,)| name).collect())
}

/// Distinct item names on a list.
pub async fn get_packing_item_set(
    conn: &mut SqliteConnection,
    packing_list_id: PackingListId,
) -> Result<BTreeSet<String>, TripError> {
    Ok(get_packing_list_item_names(conn, packing_list_id)
        .await?
        .into_iter()
        .collect())
}

/// Items across every packing list of the first trip named `trip_name`.
/// Empty when no such trip exists.
pub async fn get_items_by_trip_name(
    conn: &mut SqliteConnection,
    trip_name: &str,
) -> Result<Vec<String>, TripError> {
    let Some(trip) = get_trip_by_name(conn, trip_name).await? else {
        return Ok(Vec::new());
    };
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"SELECT i.name FROM packing_lists pl
           JOIN packlist_items pi ON pi.packing_list_id = pl.id
           JOIN items i ON i.id = pi.item_id
           WHERE pl.trip_id = ?
           ORDER BY pl.id, pi.id"#,
    )
    .bind(trip.id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows.into_iter().map(|(name,)| name).collect())
}

pub async fn list_item_names(conn: &mut SqliteConnection) -> Result<Vec<String>, TripError> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT name FROM items ORDER BY id")
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows.into_iter().map(|(name,)| name).collect())
}

pub async fn item_name_set(conn: &mut SqliteConnection) -> Result<BTreeSet<String>, TripError> {
    Ok(list_item_names(conn).await?.into_iter().collect())
}

pub async fn get_item_name_by_id(
    conn: &mut SqliteConnection,
    id: ItemId,
) -> Result<Option<String>, TripError> {
    let rec: Option<(String,)> = sqlx::query_as("SELECT name FROM items WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(rec.map(|(name,)| name))
}
