//! Password credentials: per-user salts, Argon2id hashing and constant-time verification.
//!
//! A [`Credential`] is the (salt, hash) pair stored on a user row. The hash is a PHC
//! string, so it carries the algorithm, version and cost it was produced with;
//! verification always re-derives with those stored parameters, which lets the
//! configured [`HashCost`] change without invalidating existing accounts.

use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher, Version};
use rand::rngs::OsRng;
use subtle::ConstantTimeEq;

use crate::error::TripError;

/// Argon2id work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashCost {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashCost {
    /// 19 MiB, 2 passes, 1 lane.
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Stored salt and PHC-encoded hash. Never holds plaintext.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    salt: String,
    hash: String,
}

impl Credential {
    /// Rebuild a credential read back from storage.
    pub fn from_parts(salt: String, hash: String) -> Self {
        Self { salt, hash }
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Recompute the hash of `plaintext` with the stored salt and parameters and compare
    /// the digests in constant time.
    pub fn verify(&self, plaintext: &str) -> Result<bool, TripError> {
        let stored = PasswordHash::new(&self.hash)
            .map_err(|_| TripError::InvalidCredentialState("stored hash is not a PHC string"))?;
        let salt = SaltString::from_b64(&self.salt)
            .map_err(|_| TripError::InvalidCredentialState("stored salt is malformed"))?;

        let algorithm = Algorithm::try_from(stored.algorithm)
            .map_err(|_| TripError::InvalidCredentialState("unsupported hash algorithm"))?;
        let version = match stored.version {
            Some(v) => Version::try_from(v)
                .map_err(|_| TripError::InvalidCredentialState("unsupported hash version"))?,
            None => Version::default(),
        };
        let params = Params::try_from(&stored)
            .map_err(|_| TripError::InvalidCredentialState("stored hash parameters are invalid"))?;
        let stored_output = stored
            .hash
            .ok_or(TripError::InvalidCredentialState("stored hash has no digest"))?;

        let attempt = Argon2::new(algorithm, version, params)
            .hash_password(plaintext.as_bytes(), &salt)?;
        let attempt_output = attempt
            .hash
            .ok_or(TripError::InvalidCredentialState("recomputed hash has no digest"))?;

        Ok(bool::from(
            attempt_output
                .as_bytes()
                .ct_eq(stored_output.as_bytes()),
        ))
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential").finish_non_exhaustive()
    }
}

/// Derives new credentials at a fixed cost.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    pub fn new(cost: HashCost) -> Result<Self, TripError> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(argon2::password_hash::Error::from)?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Fresh OS-random salt and the Argon2id hash of the UTF-8 plaintext under it.
    pub fn derive(&self, plaintext: &str) -> Result<Credential, TripError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)?
            .to_string();
        Ok(Credential {
            salt: salt.as_str().to_string(),
            hash,
        })
    }

    /// Spend one hash at the configured cost and discard it.
    pub fn burn(&self, plaintext: &str) {
        let _ = self.derive(plaintext);
    }
}

/// Password management exposed on an account record.
pub trait PasswordAuth {
    /// Replace the credential with one derived from `plaintext` under a fresh salt.
    fn set_password(&mut self, hasher: &CredentialHasher, plaintext: &str)
    -> Result<(), TripError>;

    /// `Ok(false)` on mismatch; `Err(InvalidCredentialState)` if no credential is set.
    fn authenticate(&self, plaintext: &str) -> Result<bool, TripError>;
}
