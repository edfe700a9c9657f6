use std::time::Duration;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("reset delay must be positive, got {0:?}")]
    InvalidResetDelay(Duration),
}
