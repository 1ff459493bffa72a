//--------------------------------------------------------------------------------------------------
// STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name                    | Description                                       | Key Methods       |
// |-------------------------|---------------------------------------------------|------------------|
// | MatchingSession         | Owns one configuration and the engine run on it  | start, step, run  |
// |                         |                                                   | reset             |
// | StepReport              | Outcome and events of a single step              |                   |
//--------------------------------------------------------------------------------------------------

use tracing::{debug, info};

use crate::domain::models::types::Configuration;
use crate::domain::services::events::MatchingEvent;
use crate::domain::services::matching_engine::{IterationOutcome, MatchingEngine};
use crate::domain::services::validation::ConfigurationValidator;

use super::SessionResult;

/// Outcome of one step, with the events it appended to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub outcome: IterationOutcome,
    pub events: Vec<MatchingEvent>,
}

/// A single run of the matching process, owned by the caller.
///
/// A session is created per run and thrown away (or reset) afterwards; it holds the
/// validated configuration so the run can be replayed from scratch.
#[derive(Debug, Clone)]
pub struct MatchingSession {
    configuration: Configuration,
    engine: MatchingEngine,
}

impl MatchingSession {
    /// Validates the configuration and builds a fresh engine for it.
    ///
    /// # Errors
    ///
    /// * `SessionError::Validation` if the configuration breaks a validation rule
    /// * `SessionError::Matching` if the engine cannot index the preferences
    pub fn start(configuration: Configuration, validator: &ConfigurationValidator) -> SessionResult<Self> {
        validator.validate(&configuration)?;
        let engine = MatchingEngine::new(&configuration)?;

        info!(
            "Started matching session with {} proposers and {} receivers",
            configuration.proposers.len(),
            configuration.receivers.len()
        );

        Ok(Self { configuration, engine })
    }

    /// Runs one iteration. `None` once the session is done.
    pub fn step(&mut self) -> Option<StepReport> {
        let outcome = self.engine.iterate()?;
        let events = self.engine.log().slice_current().to_vec();

        debug!("Step {} produced {} events", self.engine.iterations(), events.len());

        Some(StepReport { outcome, events })
    }

    /// Runs the remaining iterations and returns how many were performed.
    pub fn run(&mut self) -> usize {
        self.engine.run_to_completion()
    }

    pub fn is_done(&self) -> bool {
        self.engine.is_done()
    }

    /// Discards all progress and starts again from the stored configuration.
    pub fn reset(&mut self) -> SessionResult<()> {
        self.engine = MatchingEngine::new(&self.configuration)?;
        debug!("Matching session reset");
        Ok(())
    }

    pub fn engine(&self) -> &MatchingEngine {
        &self.engine
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }
}
