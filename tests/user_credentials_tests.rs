mod common;

use common::{TestDb, fast_hasher};
use trip_pack::db::models::{NewTrip, NewUser, UserId};
use trip_pack::db::{trips, users};
use trip_pack::{PasswordAuth, TripError};

fn new_user(username: &str, password: &str) -> NewUser {
    NewUser {
        email: format!("{username}@example.com"),
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn stored_user_round_trips_password_change() {
    let db = TestDb::new("pw-change").await;
    let hasher = fast_hasher();
    let mut conn = db.store.session().await.expect("session");

    let id = users::create_user(&mut conn, &hasher, new_user("traveler", "Tr1p!2024"))
        .await
        .expect("create user");

    let mut user = users::get_user_by_id(&mut conn, id)
        .await
        .expect("query")
        .expect("user exists");
    assert_eq!(user.id(), id);
    assert!(user.authenticate("Tr1p!2024").expect("auth"));
    assert!(!user.authenticate("wrong-pass").expect("auth"));

    let old_salt = user.credential.as_ref().expect("cred").salt().to_string();
    user.set_password(&hasher, "NewPass9!").expect("set password");
    users::save_credential(&mut conn, &user)
        .await
        .expect("save credential");

    let reloaded = users::get_user_by_id(&mut conn, id)
        .await
        .expect("query")
        .expect("user exists");
    assert_ne!(
        reloaded.credential.as_ref().expect("cred").salt(),
        old_salt
    );
    assert!(!reloaded.authenticate("Tr1p!2024").expect("auth"));
    assert!(reloaded.authenticate("NewPass9!").expect("auth"));
}

#[tokio::test]
async fn plaintext_is_never_stored() {
    let db = TestDb::new("no-plaintext").await;
    let mut conn = db.store.session().await.expect("session");
    users::create_user(&mut conn, &fast_hasher(), new_user("quiet", "hunter2-plain"))
        .await
        .expect("create user");

    let (hash, salt): (String, String) =
        sqlx::query_as("SELECT password_hash, salt FROM users WHERE username = ?")
            .bind("quiet")
            .fetch_one(&mut *conn)
            .await
            .expect("row");
    assert!(hash.starts_with("$argon2id$"));
    assert!(hash.contains(&salt));
    assert!(!hash.contains("hunter2-plain"));
    assert!(!salt.contains("hunter2-plain"));
}

#[tokio::test]
async fn validate_user_accepts_only_matching_credentials() {
    let db = TestDb::new("validate").await;
    let hasher = fast_hasher();
    let mut conn = db.store.session().await.expect("session");
    let id = users::create_user(&mut conn, &hasher, new_user("alice", "s3cret!"))
        .await
        .expect("create user");

    assert_eq!(
        users::validate_user(&mut conn, &hasher, "alice", "s3cret!")
            .await
            .expect("validate"),
        Some(id)
    );
    assert_eq!(
        users::validate_user(&mut conn, &hasher, "alice", "S3cret!")
            .await
            .expect("validate"),
        None
    );
    assert_eq!(
        users::validate_user(&mut conn, &hasher, "nobody", "s3cret!")
            .await
            .expect("validate"),
        None
    );
}

#[tokio::test]
async fn corrupted_stored_hash_surfaces_invalid_state() {
    let db = TestDb::new("corrupt").await;
    let hasher = fast_hasher();
    let mut conn = db.store.session().await.expect("session");
    users::create_user(&mut conn, &hasher, new_user("broken", "pw"))
        .await
        .expect("create user");
    sqlx::query("UPDATE users SET password_hash = 'not-a-phc-string' WHERE username = 'broken'")
        .execute(&mut *conn)
        .await
        .expect("corrupt row");

    let res = users::validate_user(&mut conn, &hasher, "broken", "pw").await;
    assert!(matches!(res, Err(TripError::InvalidCredentialState(_))));
}

#[tokio::test]
async fn save_credential_requires_a_password() {
    let db = TestDb::new("no-cred").await;
    let mut conn = db.store.session().await.expect("session");
    let user = trip_pack::db::User::new("x@example.com", "x");
    let res = users::save_credential(&mut conn, &user).await;
    assert!(matches!(res, Err(TripError::InvalidCredentialState(_))));
}

#[tokio::test]
async fn existence_checks_and_lookups() {
    let db = TestDb::new("exists").await;
    let mut conn = db.store.session().await.expect("session");
    let id = users::create_user(&mut conn, &fast_hasher(), new_user("bea", "pw"))
        .await
        .expect("create user");

    assert!(users::email_exists(&mut conn, "bea@example.com").await.expect("q"));
    assert!(!users::email_exists(&mut conn, "zed@example.com").await.expect("q"));
    assert!(users::username_exists(&mut conn, "bea").await.expect("q"));
    assert!(!users::username_exists(&mut conn, "zed").await.expect("q"));

    let by_name = users::get_user_by_username(&mut conn, "bea")
        .await
        .expect("q")
        .expect("found");
    assert_eq!(by_name.id, id);
    assert_eq!(by_name.email, "bea@example.com");
    assert!(
        users::get_user_by_username(&mut conn, "zed")
            .await
            .expect("q")
            .is_none()
    );
    assert!(
        users::get_user_by_id(&mut conn, UserId(9999))
            .await
            .expect("q")
            .is_none()
    );
}

#[tokio::test]
async fn duplicate_username_is_a_constraint_violation() {
    let db = TestDb::new("dup").await;
    let hasher = fast_hasher();
    let mut conn = db.store.session().await.expect("session");
    users::create_user(&mut conn, &hasher, new_user("dup", "pw"))
        .await
        .expect("first insert");

    let mut again = new_user("dup", "pw2");
    again.email = "other@example.com".to_string();
    let err = users::create_user(&mut conn, &hasher, again)
        .await
        .expect_err("second insert must fail");
    assert!(err.is_constraint_violation());
}

#[tokio::test]
async fn invalid_fields_are_rejected_before_hashing() {
    let db = TestDb::new("fields").await;
    let mut conn = db.store.session().await.expect("session");
    let res = users::create_user(&mut conn, &fast_hasher(), new_user("", "pw")).await;
    assert!(matches!(res, Err(TripError::InvalidField { .. })));
}

#[tokio::test]
async fn user_by_trip_follows_owner() {
    let db = TestDb::new("by-trip").await;
    let mut conn = db.store.session().await.expect("session");
    let owner = users::create_user(&mut conn, &fast_hasher(), new_user("owner", "pw"))
        .await
        .expect("create user");

    let owned = trips::create_trip(
        &mut conn,
        NewTrip {
            user_id: Some(owner),
            ..NewTrip::named("Alps")
        },
    )
    .await
    .expect("trip");
    let orphan = trips::create_trip(&mut conn, NewTrip::named("Nowhere"))
        .await
        .expect("trip");

    let found = users::get_user_by_trip_id(&mut conn, owned)
        .await
        .expect("q")
        .expect("owner found");
    assert_eq!(found.id, owner);
    assert!(
        users::get_user_by_trip_id(&mut conn, orphan)
            .await
            .expect("q")
            .is_none()
    );
}

#[tokio::test]
async fn delete_user_removes_credential_and_respects_references() {
    let db = TestDb::new("delete").await;
    let hasher = fast_hasher();
    let mut conn = db.store.session().await.expect("session");
    let lone = users::create_user(&mut conn, &hasher, new_user("lone", "pw"))
        .await
        .expect("create");
    let busy = users::create_user(&mut conn, &hasher, new_user("busy", "pw"))
        .await
        .expect("create");
    trips::create_trip(
        &mut conn,
        NewTrip {
            user_id: Some(busy),
            ..NewTrip::named("Held")
        },
    )
    .await
    .expect("trip");

    assert!(users::delete_user(&mut conn, lone).await.expect("delete"));
    assert!(!users::delete_user(&mut conn, lone).await.expect("delete"));
    assert_eq!(
        users::validate_user(&mut conn, &hasher, "lone", "pw")
            .await
            .expect("validate"),
        None
    );

    let err = users::delete_user(&mut conn, busy)
        .await
        .expect_err("trip still references user");
    assert!(err.is_constraint_violation());
}
