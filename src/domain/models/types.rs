//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module defines the core data types used throughout the matching service,
// including the input configuration and the pairings reported back to callers.
//
// | Section            | Description                                                      |
// |--------------------|------------------------------------------------------------------|
// | ENUMS              | Defines which side of the market an agent belongs to.            |
// | STRUCTS            | Defines agent specifications, configurations and pairings.       |
// | TESTS              | Contains unit tests for the defined types.                       |
//--------------------------------------------------------------------------------------------------

//--------------------------------------------------------------------------------------------------
//  ENUMS
//--------------------------------------------------------------------------------------------------
// | Name          | Description                                         |
// |---------------|-----------------------------------------------------|
// | Group         | Proposer side (A) or receiver side (B) of a market. |
//--------------------------------------------------------------------------------------------------
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the group an agent belongs to.
///
/// Proposers always make offers; receivers accept, reject or trade up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    /// The proposing side (group A).
    Proposer,
    /// The receiving side (group B).
    Receiver,
}

impl Group {
    pub fn opposite(&self) -> Self {
        match self {
            Self::Proposer => Self::Receiver,
            Self::Receiver => Self::Proposer,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proposer => write!(f, "proposer"),
            Self::Receiver => write!(f, "receiver"),
        }
    }
}

//--------------------------------------------------------------------------------------------------
//  STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name          | Description                                              |
// |---------------|----------------------------------------------------------|
// | AgentSpec     | Name and ranked preferences of one agent.                |
// | Configuration | Both groups of agents, as supplied by the caller.        |
// | Pairing       | A proposer/receiver pair in a (partial) matching.        |
//--------------------------------------------------------------------------------------------------

/// Input description of a single agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSpec {
    /// Unique name across both groups.
    pub name: String,
    /// Names from the opposite group, most preferred first.
    pub preferences: Vec<String>,
}

impl AgentSpec {
    pub fn new<N, I, S>(name: N, preferences: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            preferences: preferences.into_iter().map(Into::into).collect(),
        }
    }
}

/// A complete matching problem: the proposing group and the receiving group.
///
/// The `male`/`female` keys used by older exports are accepted on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Agents that propose (group A).
    #[serde(alias = "male")]
    pub proposers: Vec<AgentSpec>,
    /// Agents that receive proposals (group B).
    #[serde(alias = "female")]
    pub receivers: Vec<AgentSpec>,
}

impl Configuration {
    pub fn new(proposers: Vec<AgentSpec>, receivers: Vec<AgentSpec>) -> Self {
        Self { proposers, receivers }
    }

    /// Returns the agents of the given group.
    pub fn group(&self, group: Group) -> &[AgentSpec] {
        match group {
            Group::Proposer => &self.proposers,
            Group::Receiver => &self.receivers,
        }
    }

    /// Iterates over every agent of both groups, proposers first.
    pub fn agents(&self) -> impl Iterator<Item = (Group, &AgentSpec)> {
        self.proposers
            .iter()
            .map(|spec| (Group::Proposer, spec))
            .chain(self.receivers.iter().map(|spec| (Group::Receiver, spec)))
    }
}

/// A proposer engaged to a receiver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pairing {
    pub proposer: String,
    pub receiver: String,
}

impl fmt::Display for Pairing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.proposer, self.receiver)
    }
}

//--------------------------------------------------------------------------------------------------
//  TESTS
//--------------------------------------------------------------------------------------------------
// | Name                          | Description                                         |
// |-------------------------------|-----------------------------------------------------|
// | test_group_opposite           | Opposite group flips proposer and receiver.         |
// | test_configuration_aliases    | Legacy male/female keys deserialize into groups.    |
// | test_configuration_agents     | Agents iterate proposers first, then receivers.     |
//--------------------------------------------------------------------------------------------------
