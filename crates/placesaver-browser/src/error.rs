use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error("Page responded with HTTP status {0}")]
    HttpStatus(u16),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Timed out after {timeout:?} waiting for {what}")]
    ElementTimeout { what: String, timeout: Duration },

    #[error("Element not found: {0}")]
    ElementMissing(String),

    #[error("List \"{name}\" did not become visible after {attempts} attempt(s)")]
    ListStalled { name: String, attempts: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
