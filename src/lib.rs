// Expose the modules
pub mod config;
pub mod domain;

// Re-export key types for easier usage
pub use config::{Config, ConfigError};
pub use domain::models::defaults::{random_configuration, reference_configuration};
pub use domain::models::types::{AgentSpec, Configuration, Group, Pairing};
pub use domain::services::events::{
    EventError, EventHandler, EventKind, EventLog, EventLogger, EventResult, Marks, MatchingEvent,
    PersistenceEventHandler, replay,
};
pub use domain::services::matching_engine::{
    Agent, IterationOutcome, MatchingEngine, MatchingError, MatchingResult, NameIndex,
};
pub use domain::services::session::{MatchingSession, SessionError, SessionResult, StepReport};
pub use domain::services::validation::{
    ConfigurationValidator, ValidationError, ValidationLimits, ValidationResult,
};
