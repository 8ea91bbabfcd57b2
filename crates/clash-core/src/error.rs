//! Error type for caller mistakes.
//!
//! Policy rejections (a shot inside the cooldown, a spawn before the
//! interval) are not errors and never surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClashError {
    /// Unknown ship identifier or an out-of-range tuning value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration text could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Host-side I/O: reading a config file or starting the loop thread.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("game loop thread panicked")]
    LoopPanicked,
}

pub type ClashResult<T> = Result<T, ClashError>;
