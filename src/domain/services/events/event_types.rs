//--------------------------------------------------------------------------------------------------
// STRUCTS & ENUMS
//--------------------------------------------------------------------------------------------------
// | Name                    | Description                                       | Key Methods       |
// |-------------------------|---------------------------------------------------|------------------|
// | MatchingEvent           | Lifecycle events recorded by the matching engine | kind, proposer    |
// | EventKind               | Tag of an event without its payload              | as_str            |
// | EventError              | Error types for event processing                 | error, from       |
//--------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur in the event system
#[derive(Error, Debug)]
pub enum EventError {
    /// Failed to serialize an event
    #[error("Failed to serialize event: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Failed to write an event to storage
    #[error("Failed to persist event: {0}")]
    PersistenceError(#[from] std::io::Error),

    /// Failed to process an event
    #[error("Failed to process event: {0}")]
    ProcessingError(String),
}

/// Type alias for Result with EventError
pub type EventResult<T> = Result<T, EventError>;

/// The tag of a [`MatchingEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Prepare,
    Engage,
    Break,
    Reject,
    Done,
    Exhausted,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prepare => "prepare",
            Self::Engage => "engage",
            Self::Break => "break",
            Self::Reject => "reject",
            Self::Done => "done",
            Self::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents one step of the deferred acceptance process.
///
/// Payloads carry agent names so a consumer can replay the trace without access
/// to the engine. Serialized with a `kind` tag, e.g.
/// `{"kind":"break","proposer":"Oliver","receiver":"Olivia","dumped":"William"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MatchingEvent {
    /// A proposer is about to propose to its best remaining receiver
    Prepare {
        proposer: String,
        receiver: String,
    },

    /// A free receiver accepted the proposal
    Engage {
        proposer: String,
        receiver: String,
    },

    /// The receiver traded up, dumping its previous partner
    Break {
        /// The new partner of the receiver
        proposer: String,
        receiver: String,
        /// The proposer that was displaced
        dumped: String,
    },

    /// The receiver kept its current partner and rejected the proposer
    Reject {
        proposer: String,
        receiver: String,
    },

    /// Closes an iteration; names the last pair examined
    Done {
        proposer: String,
        receiver: String,
    },

    /// The proposer was rejected by every receiver and leaves the queue
    Exhausted {
        proposer: String,
    },
}

impl MatchingEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Prepare { .. } => EventKind::Prepare,
            Self::Engage { .. } => EventKind::Engage,
            Self::Break { .. } => EventKind::Break,
            Self::Reject { .. } => EventKind::Reject,
            Self::Done { .. } => EventKind::Done,
            Self::Exhausted { .. } => EventKind::Exhausted,
        }
    }

    /// The proposer involved in the event.
    pub fn proposer(&self) -> &str {
        match self {
            Self::Prepare { proposer, .. }
            | Self::Engage { proposer, .. }
            | Self::Break { proposer, .. }
            | Self::Reject { proposer, .. }
            | Self::Done { proposer, .. }
            | Self::Exhausted { proposer } => proposer,
        }
    }

    /// The receiver involved in the event, if any.
    pub fn receiver(&self) -> Option<&str> {
        match self {
            Self::Prepare { receiver, .. }
            | Self::Engage { receiver, .. }
            | Self::Break { receiver, .. }
            | Self::Reject { receiver, .. }
            | Self::Done { receiver, .. } => Some(receiver),
            Self::Exhausted { .. } => None,
        }
    }
}

impl fmt::Display for MatchingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Break { proposer, receiver, dumped } => {
                write!(f, "break: {} -> {} (dumped {})", proposer, receiver, dumped)
            }
            Self::Exhausted { proposer } => write!(f, "exhausted: {}", proposer),
            other => {
                let receiver = other.receiver().unwrap_or_default();
                write!(f, "{}: {} -> {}", other.kind(), other.proposer(), receiver)
            }
        }
    }
}
