//! Runtime configuration.
//!
//! Values come from built-in defaults, overridden by `TRIP_PACK_*` environment
//! variables (a `.env` file is honoured by the binary through `dotenvy`).

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::credential::HashCost;
use crate::error::TripError;

pub const ENV_PREFIX: &str = "TRIP_PACK_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub loglevel: String,
    /// Argon2 memory cost in KiB.
    pub password_memory_kib: u32,
    pub password_iterations: u32,
    pub password_parallelism: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:trip_pack.db".to_string(),
            loglevel: "info".to_string(),
            password_memory_kib: 19 * 1024,
            password_iterations: 2,
            password_parallelism: 1,
        }
    }
}

impl Config {
    /// Load defaults merged with the process environment.
    pub fn load() -> Result<Self, TripError> {
        Self::from_figment(Self::figment())
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, TripError> {
        Ok(figment.extract()?)
    }

    pub fn hash_cost(&self) -> HashCost {
        HashCost {
            memory_kib: self.password_memory_kib,
            iterations: self.password_iterations,
            parallelism: self.password_parallelism,
        }
    }
}
