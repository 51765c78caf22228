// Library surface shared by the binary and the integration tests.
// The analysis core (sample, speed_history, tremor, score, summary) is pure
// and has no terminal dependencies.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod export;
pub mod filter;
pub mod runtime;
pub mod sample;
pub mod score;
pub mod session;
pub mod speed_history;
pub mod summary;
pub mod tremor;
pub mod ui;
pub mod util;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
