//! Error types for the Proxlock core library

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProxlockError>;

#[derive(Error, Debug)]
pub enum ProxlockError {
    #[error("No boot-keyboard usage for password key: {0:?}")]
    UnsupportedKey(char),

    #[error("No authorized credentials configured")]
    EmptyAuthorizedSet,
}
