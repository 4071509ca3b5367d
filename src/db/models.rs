use crate::credential::{Credential, CredentialHasher, PasswordAuth};
use crate::error::TripError;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

macro_rules! row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
            sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

row_id!(
    /// Primary key of `users`.
    UserId
);
row_id!(
    /// Primary key of `trips`.
    TripId
);
row_id!(
    /// Primary key of `packing_lists`.
    PackingListId
);
row_id!(
    /// Primary key of `items`.
    ItemId
);
row_id!(
    /// Primary key of `activities`.
    ActivityId
);

/// Widths carried over from the column definitions.
pub const SHORT_TEXT_MAX: usize = 64;
pub const LONG_TEXT_MAX: usize = 100;

pub(crate) fn check_text(
    field: &'static str,
    value: &str,
    max: usize,
    required: bool,
) -> Result<(), TripError> {
    if required && value.trim().is_empty() {
        return Err(TripError::InvalidField {
            field,
            reason: "must not be empty",
        });
    }
    if value.chars().count() > max {
        return Err(TripError::InvalidField {
            field,
            reason: "is too long",
        });
    }
    Ok(())
}

/// Account record. The credential is skipped on serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub credential: Option<Credential>,
}

impl User {
    /// Unsaved user without a credential; `id` is assigned on insert.
    pub fn new(email: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: UserId(0),
            email: email.into(),
            username: username.into(),
            credential: None,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }
}

impl PasswordAuth for User {
    fn set_password(
        &mut self,
        hasher: &CredentialHasher,
        plaintext: &str,
    ) -> Result<(), TripError> {
        self.credential = Some(hasher.derive(plaintext)?);
        Ok(())
    }

    fn authenticate(&self, plaintext: &str) -> Result<bool, TripError> {
        self.credential
            .as_ref()
            .ok_or(TripError::InvalidCredentialState(
                "no password has been set for this user",
            ))?
            .verify(plaintext)
    }
}

/// Registration payload.
#[derive(Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), TripError> {
        check_text("email", &self.email, SHORT_TEXT_MAX, true)?;
        check_text("username", &self.username, SHORT_TEXT_MAX, true)
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: TripId,
    pub user_id: Option<UserId>,
    pub name: String,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Trip {
    /// Every day from `start_date` to `end_date`, both inclusive.
    pub fn date_range(&self) -> Vec<NaiveDate> {
        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return Vec::new();
        };
        start
            .iter_days()
            .take_while(|day| *day <= end)
            .collect()
    }

    /// Number of days covered by [`Trip::date_range`].
    pub fn length_in_days(&self) -> u64 {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start <= end => {
                (end - start).num_days().unsigned_abs() + 1
            }
            _ => 0,
        }
    }

    /// Last day of the trip if it starts on `start` and lasts `days` days.
    pub fn end_for(start: NaiveDate, days: u64) -> Option<NaiveDate> {
        start.checked_add_days(Days::new(days.checked_sub(1)?))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTrip {
    pub user_id: Option<UserId>,
    pub name: String,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl NewTrip {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), TripError> {
        check_text("trip name", &self.name, SHORT_TEXT_MAX, true)?;
        if let Some(dest) = self.destination.as_deref() {
            check_text("destination", dest, LONG_TEXT_MAX, false)?;
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date)
            && end < start
        {
            return Err(TripError::InvalidField {
                field: "end_date",
                reason: "is before start_date",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PackingList {
    pub id: PackingListId,
    pub user_id: Option<UserId>,
    pub trip_id: Option<TripId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PackListItem {
    pub id: i64,
    pub packing_list_id: PackingListId,
    pub item_id: ItemId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ActivityItem {
    pub id: i64,
    pub item_id: ItemId,
    pub activity_id: ActivityId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TripActivity {
    pub id: i64,
    pub trip_id: TripId,
    pub activity_id: ActivityId,
}
