//! Password hashing and bearer token issue/validation.

pub mod password;
pub mod token;

pub use password::{
    hash_password, spawn_hash, spawn_verify, verify_password, HashingError, UNKNOWN_USER_HASH,
};
pub use token::{SigningError, TokenError, TokenService};
