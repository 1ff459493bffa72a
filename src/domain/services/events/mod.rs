//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module records how a matching was reached, so that a consumer can replay the
// deferred acceptance process step by step after (or while) the engine runs.
//
// | Component                | Description                                                |
// |--------------------------|-----------------------------------------------------------|
// | MatchingEvent            | Enum representing every lifecycle event of an iteration   |
// | EventLog                 | Append-only history with per-iteration segment marks      |
// | EventHandler             | Trait for components that consume replayed events         |
// | EventLogger              | Handler that traces and buffers events in memory          |
// | PersistenceEventHandler  | Handler that writes events as JSON lines                  |
//--------------------------------------------------------------------------------------------------

mod event_types;
mod event_log;
mod handlers;


// Re-exports
pub use event_types::{MatchingEvent, EventKind, EventError, EventResult};
pub use event_log::{EventLog, Marks};
pub use handlers::{EventHandler, EventLogger, PersistenceEventHandler, replay};
