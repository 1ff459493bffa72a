use thiserror::Error;

use crate::domain::models::types::Group;

pub mod agent;
pub mod matching_engine;

/// Re-export key types for convenience
pub use self::agent::{Agent, NameIndex};
pub use self::matching_engine::{IterationOutcome, MatchingEngine};

/// Errors that can occur while building a matching engine.
///
/// `iterate()` itself never fails; every error surfaces at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchingError {
    /// The same name is used by two agents
    #[error("Agent name {0:?} is used more than once")]
    DuplicateName(String),

    /// A preference list names an agent that does not exist
    #[error("Unknown agent {0:?} in preference list")]
    UnknownAgent(String),

    /// A preference list names an agent of the wrong group
    #[error("Agent {name:?} is a {actual}, expected a {expected}")]
    WrongGroup {
        name: String,
        expected: Group,
        actual: Group,
    },

    /// A preference list ranks the same agent twice
    #[error("Agent {agent:?} ranks {preference:?} more than once")]
    DuplicatePreference {
        agent: String,
        preference: String,
    },
}

/// Type alias for Result with MatchingError
pub type MatchingResult<T> = Result<T, MatchingError>;
