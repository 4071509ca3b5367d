//! Account queries. Every function borrows the caller's connection.

use crate::credential::{Credential, CredentialHasher, PasswordAuth};
use crate::db::models::{NewUser, TripId, User, UserId};
use crate::error::TripError;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tracing::{debug, info};

const USER_COLUMNS: &str = "id, email, username, password_hash, salt";

/// Validate, hash the password under a fresh salt and insert. Returns the new id.
pub async fn create_user(
    conn: &mut SqliteConnection,
    hasher: &CredentialHasher,
    new: NewUser,
) -> Result<UserId, TripError> {
    new.validate()?;
    let mut user = User::new(new.email, new.username);
    user.set_password(hasher, &new.password)?;
    let cred = credential_of(&user)?;

    let rec: (i64,) = sqlx::query_as(
        r#"INSERT INTO users (email, username, password_hash, salt)
           VALUES (?, ?, ?, ?) RETURNING id"#,
    )
    .bind(&user.email)
    .bind(&user.username)
    .bind(cred.hash())
    .bind(cred.salt())
    .fetch_one(&mut *conn)
    .await?;

    info!(user_id = rec.0, username = %user.username, "user created");
    Ok(UserId(rec.0))
}

/// Persist the user's current credential (after `set_password`).
pub async fn save_credential(conn: &mut SqliteConnection, user: &User) -> Result<(), TripError> {
    let cred = credential_of(user)?;
    let res = sqlx::query("UPDATE users SET password_hash = ?, salt = ? WHERE id = ?")
        .bind(cred.hash())
        .bind(cred.salt())
        .bind(user.id)
        .execute(&mut *conn)
        .await?;
    if res.rows_affected() == 0 {
        return Err(sqlx::Error::RowNotFound.into());
    }
    debug!(user_id = %user.id, "credential updated");
    Ok(())
}

pub async fn get_user_by_id(
    conn: &mut SqliteConnection,
    id: UserId,
) -> Result<Option<User>, TripError> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    row.map(row_to_model).transpose()
}

pub async fn get_user_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<User>, TripError> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?"))
        .bind(username)
        .fetch_optional(&mut *conn)
        .await?;
    row.map(row_to_model).transpose()
}

/// Owner of a trip; `None` when the trip is missing or unowned.
pub async fn get_user_by_trip_id(
    conn: &mut SqliteConnection,
    trip_id: TripId,
) -> Result<Option<User>, TripError> {
    let row = sqlx::query(
        r#"SELECT u.id, u.email, u.username, u.password_hash, u.salt
           FROM trips t JOIN users u ON u.id = t.user_id
           WHERE t.id = ?"#,
    )
    .bind(trip_id)
    .fetch_optional(&mut *conn)
    .await?;
    row.map(row_to_model).transpose()
}

pub async fn email_exists(conn: &mut SqliteConnection, email: &str) -> Result<bool, TripError> {
    let rec: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
        .bind(email)
        .fetch_one(&mut *conn)
        .await?;
    Ok(rec.0)
}

pub async fn username_exists(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<bool, TripError> {
    let rec: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
        .bind(username)
        .fetch_one(&mut *conn)
        .await?;
    Ok(rec.0)
}

/// Login check. `None` for an unknown user or a wrong password; the two are
/// indistinguishable to the caller and cost one hash each.
pub async fn validate_user(
    conn: &mut SqliteConnection,
    hasher: &CredentialHasher,
    username: &str,
    password: &str,
) -> Result<Option<UserId>, TripError> {
    let Some(user) = get_user_by_username(conn, username).await? else {
        hasher.burn(password);
        debug!(%username, "login rejected: unknown user");
        return Ok(None);
    };

    if user.authenticate(password)? {
        debug!(user_id = %user.id, "login accepted");
        Ok(Some(user.id))
    } else {
        debug!(user_id = %user.id, "login rejected: password mismatch");
        Ok(None)
    }
}

/// Delete the user and its credential. Returns false if no such user.
pub async fn delete_user(conn: &mut SqliteConnection, id: UserId) -> Result<bool, TripError> {
    let res = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(res.rows_affected() > 0)
}

fn credential_of(user: &User) -> Result<&Credential, TripError> {
    user.credential
        .as_ref()
        .ok_or(TripError::InvalidCredentialState(
            "user has no password to store",
        ))
}

fn row_to_model(row: SqliteRow) -> Result<User, TripError> {
    let id: i64 = row.try_get("id")?;
    let email: String = row.try_get("email")?;
    let username: String = row.try_get("username")?;
    let password_hash: String = row.try_get("password_hash")?;
    let salt: String = row.try_get("salt")?;

    Ok(User {
        id: UserId(id),
        email,
        username,
        credential: Some(Credential::from_parts(salt, password_hash)),
    })
}
