pub mod config;
pub mod credential;
pub mod db;
pub mod error;

pub use config::Config;
pub use credential::{Credential, CredentialHasher, HashCost, PasswordAuth};
pub use error::TripError;
