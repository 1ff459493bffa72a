//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module implements the deferred acceptance state machine. Each call to `iterate()`
// lets the proposer at the front of the queue propose to its best receiver that has not
// rejected it yet, and records the outcome in the engine's event log.
//
// | Component                | Description                                                |
// |--------------------------|-----------------------------------------------------------|
// | MatchingEngine           | Owns all agents, the proposer queue and the event log     |
// | IterationOutcome         | What a single `iterate()` call decided                    |
//
//--------------------------------------------------------------------------------------------------
// STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name                    | Description                                       | Key Methods       |
// |-------------------------|---------------------------------------------------|------------------|
// | MatchingEngine          | Deferred acceptance engine                        | iterate          |
// |                         |                                                   | is_done          |
// |                         |                                                   | matching         |
// |                         |                                                   | blocking_pairs   |
//--------------------------------------------------------------------------------------------------

use std::collections::{BTreeMap, VecDeque};
use tracing::{debug, info};

use crate::domain::models::types::{Configuration, Group, Pairing};
use crate::domain::services::events::{EventLog, MatchingEvent};

use super::agent::{Agent, NameIndex};
use super::MatchingResult;

/// What a single `iterate()` call decided. Indices refer to the engine's groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationOutcome {
    /// A free receiver accepted the proposer
    Engaged { proposer: usize, receiver: usize },
    /// The receiver traded its partner `dumped` for the proposer
    Replaced { proposer: usize, receiver: usize, dumped: usize },
    /// The receiver kept its partner and rejected the proposer
    Rejected { proposer: usize, receiver: usize },
    /// The proposer had no receiver left to propose to
    Exhausted { proposer: usize },
}

/// The deferred acceptance (Gale-Shapley) engine.
///
/// # Overview
///
/// The engine is built once from a configuration snapshot and then driven by repeated
/// calls to [`iterate`](Self::iterate) until [`is_done`](Self::is_done) returns true.
/// Driving it eagerly with [`run_to_completion`](Self::run_to_completion) or one step
/// at a time yields the same event trace, since no randomness or clock is involved.
///
/// # Guarantees
///
/// * Partner relations are always symmetric
/// * Rejections are permanent, so no proposer proposes to the same receiver twice
/// * The result is the proposer-optimal stable matching
///
/// # Examples
///
/// ```
/// use stable_matching::{AgentSpec, Configuration, MatchingEngine};
///
/// let configuration = Configuration::new(
///     vec![AgentSpec::new("Adam", ["Eve"])],
///     vec![AgentSpec::new("Eve", ["Adam"])],
/// );
///
/// let mut engine = MatchingEngine::new(&configuration).unwrap();
/// engine.run_to_completion();
///
/// assert_eq!(engine.partner_of("Adam"), Some("Eve"));
/// ```
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    /// Group A, index is identity
    proposers: Vec<Agent>,

    /// Group B, index is identity
    receivers: Vec<Agent>,

    /// Name lookup shared with the agents at construction
    names: NameIndex,

    /// Proposers still needing to propose; the front is being processed
    unmatched: VecDeque<usize>,

    /// Proposers rejected by every receiver
    exhausted: Vec<usize>,

    /// Trace of every iteration
    log: EventLog,

    /// Number of effective `iterate()` calls
    iterations: usize,
}

impl MatchingEngine {
    /// Creates an engine with every proposer queued in configuration order.
    ///
    /// The configuration is expected to have passed validation already; construction
    /// only fails when preferences cannot be indexed.
    ///
    /// # Errors
    ///
    /// Returns `MatchingError` if:
    /// * A name appears twice (`DuplicateName`)
    /// * A preference names an unknown agent (`UnknownAgent`) or one of the same group (`WrongGroup`)
    /// * A preference list repeats a name (`DuplicatePreference`)
    pub fn new(configuration: &Configuration) -> MatchingResult<Self> {
        let names = NameIndex::build(configuration)?;

        let proposers = Self::build_group(configuration, Group::Proposer, &names)?;
        let receivers = Self::build_group(configuration, Group::Receiver, &names)?;
        let unmatched = (0..proposers.len()).collect();

        debug!(
            "Created matching engine with {} proposers and {} receivers",
            proposers.len(),
            receivers.len()
        );

        Ok(Self {
            proposers,
            receivers,
            names,
            unmatched,
            exhausted: Vec::new(),
            log: EventLog::new(),
            iterations: 0,
        })
    }

    fn build_group(configuration: &Configuration, group: Group, names: &NameIndex) -> MatchingResult<Vec<Agent>> {
        let opposite_len = configuration.group(group.opposite()).len();

        configuration
            .group(group)
            .iter()
            .enumerate()
            .map(|(index, spec)| Agent::new(&spec.name, group, index, &spec.preferences, opposite_len, names))
            .collect()
    }

    /// Runs the algorithm by one step.
    ///
    /// # Step Flow
    ///
    /// 1. Opens a new log segment
    /// 2. Takes the proposer at the front of the queue without removing it
    /// 3. Moves it to the exhausted bucket if every receiver rejected it
    /// 4. Otherwise proposes to its best viable receiver, which either accepts (free),
    ///    trades up (dumping its partner to the back of the queue) or rejects
    /// 5. Closes the segment with a `done` event
    ///
    /// # Returns
    ///
    /// The decision taken, or `None` if the engine was already done.
    pub fn iterate(&mut self) -> Option<IterationOutcome> {
        let proposer = *self.unmatched.front()?;

        self.log.begin_process();
        self.iterations += 1;

        let Some(receiver) = self.proposers[proposer].next_viable_candidate_index() else {
            self.unmatched.pop_front();
            self.exhausted.push(proposer);
            debug!("{} was rejected by every receiver", self.proposers[proposer].name());

            self.log.add_process(MatchingEvent::Exhausted {
                proposer: self.proposers[proposer].name().to_string(),
            });
            self.log.end_process();
            self.log_completion();
            return Some(IterationOutcome::Exhausted { proposer });
        };

        let proposer_name = self.proposers[proposer].name().to_string();
        let receiver_name = self.receivers[receiver].name().to_string();

        self.log.add_process(MatchingEvent::Prepare {
            proposer: proposer_name.clone(),
            receiver: receiver_name.clone(),
        });

        let outcome = match self.receivers[receiver].partner() {
            None => {
                self.engage(proposer, receiver);
                self.unmatched.pop_front();
                debug!("{} engaged to free receiver {}", proposer_name, receiver_name);

                self.log.add_process(MatchingEvent::Engage {
                    proposer: proposer_name.clone(),
                    receiver: receiver_name.clone(),
                });
                IterationOutcome::Engaged { proposer, receiver }
            }
            Some(dumped) if self.receivers[receiver].prefers_over_current_partner(proposer) => {
                self.proposers[dumped].record_mutual_rejection(&mut self.receivers[receiver]);
                self.proposers[dumped].set_partner(None);
                self.unmatched.push_back(dumped);

                self.engage(proposer, receiver);
                self.unmatched.pop_front();

                let dumped_name = self.proposers[dumped].name().to_string();
                debug!("{} left {} for {}", receiver_name, dumped_name, proposer_name);

                self.log.add_process(MatchingEvent::Break {
                    proposer: proposer_name.clone(),
                    receiver: receiver_name.clone(),
                    dumped: dumped_name,
                });
                IterationOutcome::Replaced { proposer, receiver, dumped }
            }
            Some(_) => {
                self.proposers[proposer].record_mutual_rejection(&mut self.receivers[receiver]);
                debug!("{} rejected {}", receiver_name, proposer_name);

                self.log.add_process(MatchingEvent::Reject {
                    proposer: proposer_name.clone(),
                    receiver: receiver_name.clone(),
                });
                IterationOutcome::Rejected { proposer, receiver }
            }
        };

        self.log.add_process(MatchingEvent::Done {
            proposer: proposer_name,
            receiver: receiver_name,
        });
        self.log.end_process();
        self.log_completion();

        Some(outcome)
    }

    fn log_completion(&self) {
        if self.is_done() {
            info!(
                "Matching completed after {} iterations ({} exhausted)",
                self.iterations,
                self.exhausted.len()
            );
        }
    }

    /// True once no proposer is left in the queue.
    ///
    /// Does not distinguish "all matched" from "matched or exhausted"; see [`exhausted`](Self::exhausted).
    #[inline]
    pub fn is_done(&self) -> bool {
        self.unmatched.is_empty()
    }

    /// Drives `iterate()` until done and returns the number of iterations performed by this call.
    pub fn run_to_completion(&mut self) -> usize {
        let mut performed = 0;
        while self.iterate().is_some() {
            performed += 1;
        }
        performed
    }

    fn engage(&mut self, proposer: usize, receiver: usize) {
        self.proposers[proposer].set_partner(Some(receiver));
        self.receivers[receiver].set_partner(Some(proposer));
    }

    // ========================================================================
    // Read-only views
    // ========================================================================

    pub fn proposers(&self) -> &[Agent] {
        &self.proposers
    }

    pub fn receivers(&self) -> &[Agent] {
        &self.receivers
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Upper bound on `iterate()` calls: one per (proposer, receiver) pair, plus one
    /// exhaustion step for each proposer that cannot be seated.
    pub fn max_iterations(&self) -> usize {
        self.proposers.len() * self.receivers.len()
            + self.proposers.len().saturating_sub(self.receivers.len())
    }

    /// Looks up an agent of either group by name.
    pub fn agent(&self, name: &str) -> Option<&Agent> {
        match self.names.lookup(name)? {
            (Group::Proposer, index) => self.proposers.get(index),
            (Group::Receiver, index) => self.receivers.get(index),
        }
    }

    /// Name of the current partner of `name`, from either group.
    pub fn partner_of(&self, name: &str) -> Option<&str> {
        let agent = self.agent(name)?;
        let partner = agent.partner()?;
        let opposite = match agent.group() {
            Group::Proposer => &self.receivers,
            Group::Receiver => &self.proposers,
        };
        opposite.get(partner).map(Agent::name)
    }

    /// Every agent name mapped to its partner's name, or `None` when unmatched.
    pub fn matching(&self) -> BTreeMap<String, Option<String>> {
        self.proposers
            .iter()
            .chain(self.receivers.iter())
            .map(|agent| {
                let partner = self.partner_of(agent.name()).map(str::to_string);
                (agent.name().to_string(), partner)
            })
            .collect()
    }

    /// Current engagements in proposer order.
    pub fn pairings(&self) -> Vec<Pairing> {
        self.proposers
            .iter()
            .filter_map(|proposer| {
                let receiver = self.receivers.get(proposer.partner()?)?;
                Some(Pairing {
                    proposer: proposer.name().to_string(),
                    receiver: receiver.name().to_string(),
                })
            })
            .collect()
    }

    /// Names of proposers rejected by every receiver, in the order they were given up.
    pub fn exhausted(&self) -> Vec<&str> {
        self.exhausted
            .iter()
            .map(|&index| self.proposers[index].name())
            .collect()
    }

    /// Names of proposers still waiting in the queue, front first.
    pub fn unmatched(&self) -> Vec<&str> {
        self.unmatched
            .iter()
            .map(|&index| self.proposers[index].name())
            .collect()
    }

    /// Every (proposer, receiver) pair that would both rather be with each other than
    /// with their current partners. Empty for a stable matching.
    pub fn blocking_pairs(&self) -> Vec<Pairing> {
        let mut blocking = Vec::new();

        for proposer in &self.proposers {
            for receiver in &self.receivers {
                if proposer.partner() == Some(receiver.index()) {
                    continue;
                }
                let proposer_wants = proposer.preference_rank(receiver.index()).is_some()
                    && proposer.prefers_over_current_partner(receiver.index());
                let receiver_wants = receiver.preference_rank(proposer.index()).is_some()
                    && receiver.prefers_over_current_partner(proposer.index());

                if proposer_wants && receiver_wants {
                    blocking.push(Pairing {
                        proposer: proposer.name().to_string(),
                        receiver: receiver.name().to_string(),
                    });
                }
            }
        }

        blocking
    }
}

//--------------------------------------------------------------------------------------------------
// TESTS
//--------------------------------------------------------------------------------------------------
// | Name                                   | Description                                     |
// |----------------------------------------|-------------------------------------------------|
// | test_single_pair_converges_in_one_step | 1x1 emits prepare, engage, done                 |
// | test_break_pushes_dumped_to_back       | Trading up requeues the dumped proposer         |
// | test_reject_keeps_proposer_at_front    | Rejected proposer stays first in the queue      |
// | test_exhaustion_is_logged              | Unseatable proposer leaves the queue            |
// | test_iterate_after_done_is_noop        | No events are added once done                   |
// | test_unknown_preference_fails_fast     | Construction errors on unresolvable names       |
//--------------------------------------------------------------------------------------------------
