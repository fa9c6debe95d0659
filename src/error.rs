use thiserror::Error;
use tokio::sync::AcquireError;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Request for app {app_id} failed with HTTP status {status}")]
    HttpStatus { app_id: u32, status: u16 },
    #[error("Couldn't decode the review page: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),
    #[error("The worker pool semaphore was closed.")]
    RuntimeSemaphoreClosed,

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl From<AcquireError> for Error {
    fn from(_value: AcquireError) -> Self {
        Error::RuntimeSemaphoreClosed
    }
}
