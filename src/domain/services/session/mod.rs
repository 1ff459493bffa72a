use thiserror::Error;

use super::matching_engine::MatchingError;
use super::validation::ValidationError;

pub mod matching_session;

pub use self::matching_session::{MatchingSession, StepReport};

/// Errors that can occur while starting or resetting a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The configuration was rejected by the validator
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    /// The engine could not be built from the configuration
    #[error("Matching engine error: {0}")]
    Matching(#[from] MatchingError),
}

/// Type alias for Result with SessionError
pub type SessionResult<T> = Result<T, SessionError>;
