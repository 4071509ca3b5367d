use crate::db::models::{NewTrip, Trip, TripId, UserId};
use crate::error::TripError;
use sqlx::SqliteConnection;
use tracing::debug;

const TRIP_COLUMNS: &str = "id, user_id, name, destination, start_date, end_date";

pub async fn create_trip(conn: &mut SqliteConnection, new: NewTrip) -> Result<TripId, TripError> {
    new.validate()?;
    let rec: (i64,) = sqlx::query_as(
        r#"INSERT INTO trips (user_id, name, destination, start_date, end_date)
           VALUES (?, ?, ?, ?, ?) RETURNING id"#,
    )
    .bind(new.user_id)
    .bind(&new.name)
    .bind(new.destination)
    .bind(new.start_date)
    .bind(new.end_date)
    .fetch_one(&mut *conn)
    .await?;
    debug!(trip_id = rec.0, name = %new.name, "trip created");
    Ok(TripId(rec.0))
}

pub async fn get_trip_by_id(
    conn: &mut SqliteConnection,
    id: TripId,
) -> Result<Option<Trip>, TripError> {
    let trip = sqlx::query_as::<_, Trip>(&format!("SELECT {TRIP_COLUMNS} FROM trips WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(trip)
}

/// First trip (lowest id) with this name.
pub async fn get_trip_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<Option<Trip>, TripError> {
    let trip = sqlx::query_as::<_, Trip>(&format!(
        "SELECT {TRIP_COLUMNS} FROM trips WHERE name = ? ORDER BY id LIMIT 1"
    ))
    .bind(name)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(trip)
}

pub async fn get_user_trips(
    conn: &mut SqliteConnection,
    user_id: UserId,
) -> Result<Vec<Trip>, TripError> {
    let trips = sqlx::query_as::<_, Trip>(&format!(
        "SELECT {TRIP_COLUMNS} FROM trips WHERE user_id = ? ORDER BY id"
    ))
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(trips)
}

pub async fn get_user_trip_names(
    conn: &mut SqliteConnection,
    user_id: UserId,
) -> Result<Vec<String>, TripError> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT name FROM trips WHERE user_id = ? ORDER BY id")
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows.into_iter().map(|(name,)| name).collect())
}
