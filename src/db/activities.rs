use crate::db::models::{Activity, ActivityId, Item, ItemId, LONG_TEXT_MAX, TripId, check_text};
use crate::error::TripError;
use sqlx::SqliteConnection;

pub async fn create_activity(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<ActivityId, TripError> {
    check_text("activity name", name, LONG_TEXT_MAX, true)?;
    let rec: (i64,) = sqlx::query_as("INSERT INTO activities (name) VALUES (?) RETURNING id")
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;
    Ok(ActivityId(rec.0))
}

/// Mark an item as needed for an activity. Returns the join row id.
pub async fn create_activity_item(
    conn: &mut SqliteConnection,
    item_id: ItemId,
    activity_id: ActivityId,
) -> Result<i64, TripError> {
    let rec: (i64,) = sqlx::query_as(
        "INSERT INTO activity_items (item_id, activity_id) VALUES (?, ?) RETURNING id",
    )
    .bind(item_id)
    .bind(activity_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(rec.0)
}

pub async fn create_trip_activity(
    conn: &mut SqliteConnection,
    trip_id: TripId,
    activity_id: ActivityId,
) -> Result<i64, TripError> {
    let rec: (i64,) = sqlx::query_as(
        "INSERT INTO trip_activities (trip_id, activity_id) VALUES (?, ?) RETURNING id",
    )
    .bind(trip_id)
    .bind(activity_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(rec.0)
}

pub async fn get_activities_by_trip(
    conn: &mut SqliteConnection,
    trip_id: TripId,
) -> Result<Vec<Activity>, TripError> {
    let activities = sqlx::query_as::<_, Activity>(
        r#"SELECT a.id, a.name FROM trip_activities ta
           JOIN activities a ON a.id = ta.activity_id
           WHERE ta.trip_id = ?
           ORDER BY ta.id"#,
    )
    .bind(trip_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(activities)
}

pub async fn get_items_by_activity(
    conn: &mut SqliteConnection,
    activity_id: ActivityId,
) -> Result<Vec<Item>, TripError> {
    let items = sqlx::query_as::<_, Item>(
        r#"SELECT i.id, i.name FROM activity_items ai
           JOIN items i ON i.id = ai.item_id
           WHERE ai.activity_id = ?
           ORDER BY ai.id"#,
    )
    .bind(activity_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(items)
}
