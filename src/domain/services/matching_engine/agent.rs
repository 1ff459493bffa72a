//--------------------------------------------------------------------------------------------------
// STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name                    | Description                                       | Key Methods       |
// |-------------------------|---------------------------------------------------|------------------|
// | NameIndex               | Immutable name -> (group, index) lookup table    | lookup, resolve   |
// | Agent                   | One member of either group                       | preference_rank   |
// |                         |                                                   | next_viable_...   |
// |                         |                                                   | record_mutual_... |
//--------------------------------------------------------------------------------------------------

use std::collections::{BTreeSet, HashMap};

use crate::domain::models::types::{Configuration, Group};

use super::{MatchingError, MatchingResult};

/// Lookup table from agent name to its group and position inside that group.
///
/// Built once per engine and handed to every [`Agent`] at construction.
#[derive(Debug, Clone, Default)]
pub struct NameIndex {
    entries: HashMap<String, (Group, usize)>,
}

impl NameIndex {
    /// Indexes every agent of the configuration.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if a name appears more than once across both groups.
    pub fn build(configuration: &Configuration) -> MatchingResult<Self> {
        let mut entries = HashMap::with_capacity(
            configuration.proposers.len() + configuration.receivers.len(),
        );

        for group in [Group::Proposer, Group::Receiver] {
            for (index, spec) in configuration.group(group).iter().enumerate() {
                if entries.insert(spec.name.clone(), (group, index)).is_some() {
                    return Err(MatchingError::DuplicateName(spec.name.clone()));
                }
            }
        }

        Ok(Self { entries })
    }

    #[inline]
    pub fn lookup(&self, name: &str) -> Option<(Group, usize)> {
        self.entries.get(name).copied()
    }

    /// Resolves a name that must belong to `expected`.
    pub fn resolve(&self, name: &str, expected: Group) -> MatchingResult<usize> {
        match self.lookup(name) {
            Some((group, index)) if group == expected => Ok(index),
            Some((group, _)) => Err(MatchingError::WrongGroup {
                name: name.to_string(),
                expected,
                actual: group,
            }),
            None => Err(MatchingError::UnknownAgent(name.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One member of either group.
///
/// Indices stored in `preference_order`, `rejections` and `partner` always refer to
/// positions in the opposite group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    name: String,
    group: Group,
    index: usize,
    /// Opposite-group indices, best first. Never mutated after construction.
    preference_order: Vec<usize>,
    /// `ranks[other]` is the position of `other` in `preference_order`.
    ranks: Vec<Option<usize>>,
    /// For a proposer: receivers that rejected it. For a receiver: proposers it rejected.
    rejections: BTreeSet<usize>,
    partner: Option<usize>,
}

impl Agent {
    /// Creates an agent, translating its preference names through `names`.
    ///
    /// # Errors
    ///
    /// * `UnknownAgent` / `WrongGroup` if a preference cannot be resolved to the opposite group
    /// * `DuplicatePreference` if a name is ranked twice
    pub fn new(
        name: &str,
        group: Group,
        index: usize,
        preferences: &[String],
        opposite_len: usize,
        names: &NameIndex,
    ) -> MatchingResult<Self> {
        let mut preference_order = Vec::with_capacity(preferences.len());
        let mut ranks = vec![None; opposite_len];

        for (rank, preferred) in preferences.iter().enumerate() {
            let other = names.resolve(preferred, group.opposite())?;
            let slot = ranks.get_mut(other).ok_or_else(|| MatchingError::UnknownAgent(preferred.clone()))?;
            if slot.is_some() {
                return Err(MatchingError::DuplicatePreference {
                    agent: name.to_string(),
                    preference: preferred.clone(),
                });
            }
            *slot = Some(rank);
            preference_order.push(other);
        }

        Ok(Self {
            name: name.to_string(),
            group,
            index,
            preference_order,
            ranks,
            rejections: BTreeSet::new(),
            partner: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> Group {
        self.group
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn preference_order(&self) -> &[usize] {
        &self.preference_order
    }

    pub fn rejections(&self) -> &BTreeSet<usize> {
        &self.rejections
    }

    /// Whether a rejection between this agent and `other` has been recorded.
    pub fn has_rejection(&self, other: usize) -> bool {
        self.rejections.contains(&other)
    }

    pub fn partner(&self) -> Option<usize> {
        self.partner
    }

    pub(crate) fn set_partner(&mut self, partner: Option<usize>) {
        self.partner = partner;
    }

    /// Position of `other` in this agent's ranking; lower is better.
    ///
    /// `None` when `other` is not ranked at all.
    #[inline]
    pub fn preference_rank(&self, other: usize) -> Option<usize> {
        self.ranks.get(other).copied().flatten()
    }

    /// True when this agent holds no partner, or strictly prefers `candidate` to it.
    ///
    /// An unranked candidate never wins against a current partner.
    pub fn prefers_over_current_partner(&self, candidate: usize) -> bool {
        let Some(partner) = self.partner else {
            return true;
        };

        match (self.preference_rank(candidate), self.preference_rank(partner)) {
            (Some(candidate_rank), Some(partner_rank)) => candidate_rank < partner_rank,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Records a permanent rejection on both sides.
    pub fn record_mutual_rejection(&mut self, other: &mut Agent) {
        self.rejections.insert(other.index);
        other.rejections.insert(self.index);
    }

    /// The best-ranked opposite index that has not rejected this agent.
    ///
    /// `None` once every ranked candidate has rejected it.
    pub fn next_viable_candidate_index(&self) -> Option<usize> {
        self.preference_order
            .iter()
            .copied()
            .find(|candidate| !self.rejections.contains(candidate))
    }
}
