//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Validation of a configuration before any engine is built. The engine assumes a
// structurally valid configuration; this module is the collaborator that guarantees it.
//
// | Component                | Description                                                |
// |--------------------------|-----------------------------------------------------------|
// | ValidationLimits         | Group size and name length bounds                         |
// | ConfigurationValidator   | Runs every check in a fixed order                         |
// | ValidationError          | First rule a configuration violates                       |
//--------------------------------------------------------------------------------------------------

use thiserror::Error;

use crate::domain::models::types::Group;

pub mod validator;

pub use self::validator::ConfigurationValidator;

/// Minimum number of agents per group.
pub const DEFAULT_MIN_ENTITIES: usize = 1;
/// Maximum number of agents per group.
pub const DEFAULT_MAX_ENTITIES: usize = 10;
/// Maximum number of characters in an agent name.
pub const DEFAULT_MAX_NAME_LENGTH: usize = 12;

/// Bounds applied by [`ConfigurationValidator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationLimits {
    pub min_entities: usize,
    pub max_entities: usize,
    pub max_name_length: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            min_entities: DEFAULT_MIN_ENTITIES,
            max_entities: DEFAULT_MAX_ENTITIES,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }
}

/// Reasons a configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A group has too few or too many agents
    #[error("The {group} group has {size} agents, expected between {min} and {max}")]
    GroupSize {
        group: Group,
        size: usize,
        min: usize,
        max: usize,
    },

    /// An agent has an empty name
    #[error("A {0} has an empty name")]
    EmptyName(Group),

    /// A name is longer than allowed
    #[error("Name {name:?} is longer than {max} characters")]
    NameTooLong { name: String, max: usize },

    /// A name contains something other than ASCII letters
    #[error("Name {0:?} must only contain letters")]
    InvalidName(String),

    /// Two agents share a name
    #[error("Name {0:?} is used more than once")]
    DuplicateName(String),

    /// A preference names nobody in the opposite group
    #[error("{agent:?} ranks {preference:?}, who is not in the opposite group")]
    UnknownPreference { agent: String, preference: String },

    /// Mention counts differ between agents of the same group
    #[error("Agents of the {0} group are not mentioned an equal number of times")]
    UnbalancedOccurrences(Group),

    /// A preference list ranks the same agent twice
    #[error("{agent:?} ranks {preference:?} more than once")]
    DuplicatePreference { agent: String, preference: String },

    /// A preference list leaves out part of the opposite group
    #[error("{agent:?} does not rank {missing:?}")]
    MissingPreference { agent: String, missing: String },
}

/// Type alias for Result with ValidationError
pub type ValidationResult<T> = Result<T, ValidationError>;
