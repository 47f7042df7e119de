use media_track_services::ServiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("rating must be between 1 and 10, got {0}")]
    InvalidRating(u8),

    #[error("item {0} is not on the seen list")]
    NotSeen(u64),

    #[error(transparent)]
    Service(#[from] ServiceError),
}
