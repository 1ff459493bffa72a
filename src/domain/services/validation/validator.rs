//--------------------------------------------------------------------------------------------------
// STRUCTS
//--------------------------------------------------------------------------------------------------
// | Name                    | Description                                       | Key Methods       |
// |-------------------------|---------------------------------------------------|------------------|
// | ConfigurationValidator  | Checks a configuration against ValidationLimits  | validate          |
//--------------------------------------------------------------------------------------------------

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::config::Config;
use crate::domain::models::types::{AgentSpec, Configuration, Group};

use super::{ValidationError, ValidationLimits, ValidationResult};

/// Validates configurations before an engine is built from them.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationValidator {
    limits: ValidationLimits,
}

impl ConfigurationValidator {
    pub fn new(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    /// Creates a validator using the limits of the application config.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.limits())
    }

    pub fn limits(&self) -> ValidationLimits {
        self.limits
    }

    /// Checks a configuration and reports the first violated rule.
    ///
    /// # Validation Order
    ///
    /// 1. Group sizes lie within the configured bounds
    /// 2. Names are non-empty, alphabetic and short enough
    /// 3. Names are unique across both groups
    /// 4. Preferences only name agents of the opposite group
    /// 5. Every agent of a group is mentioned equally often
    /// 6. Every preference list is a permutation of the opposite group
    pub fn validate(&self, configuration: &Configuration) -> ValidationResult<()> {
        for group in [Group::Proposer, Group::Receiver] {
            self.check_group_size(group, configuration.group(group).len())?;
        }

        for (group, spec) in configuration.agents() {
            self.check_name(group, &spec.name)?;
        }

        let mut seen = HashSet::new();
        for (_, spec) in configuration.agents() {
            if !seen.insert(spec.name.as_str()) {
                return Err(ValidationError::DuplicateName(spec.name.clone()));
            }
        }

        for (group, spec) in configuration.agents() {
            let opposite = configuration.group(group.opposite());
            if let Some(preference) = spec
                .preferences
                .iter()
                .find(|preference| !opposite.iter().any(|other| &other.name == *preference))
            {
                return Err(ValidationError::UnknownPreference {
                    agent: spec.name.clone(),
                    preference: preference.clone(),
                });
            }
        }

        check_occurrence_balance(configuration)?;

        for (group, spec) in configuration.agents() {
            check_permutation(spec, configuration.group(group.opposite()))?;
        }

        debug!(
            "Configuration with {} proposers and {} receivers is valid",
            configuration.proposers.len(),
            configuration.receivers.len()
        );
        Ok(())
    }

    fn check_group_size(&self, group: Group, size: usize) -> ValidationResult<()> {
        let ValidationLimits { min_entities, max_entities, .. } = self.limits;
        if size < min_entities || size > max_entities {
            return Err(ValidationError::GroupSize {
                group,
                size,
                min: min_entities,
                max: max_entities,
            });
        }
        Ok(())
    }

    fn check_name(&self, group: Group, name: &str) -> ValidationResult<()> {
        if name.is_empty() {
            return Err(ValidationError::EmptyName(group));
        }
        if name.chars().count() > self.limits.max_name_length {
            return Err(ValidationError::NameTooLong {
                name: name.to_string(),
                max: self.limits.max_name_length,
            });
        }
        if !name.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidName(name.to_string()));
        }
        Ok(())
    }
}

/// Each agent counts once for itself and once per mention in the opposite group's
/// lists; within a group all counts must be equal.
fn check_occurrence_balance(configuration: &Configuration) -> ValidationResult<()> {
    let mut counts: HashMap<Group, HashMap<&str, usize>> = HashMap::new();

    for (group, spec) in configuration.agents() {
        *counts.entry(group).or_default().entry(spec.name.as_str()).or_default() += 1;
        for preference in &spec.preferences {
            *counts
                .entry(group.opposite())
                .or_default()
                .entry(preference.as_str())
                .or_default() += 1;
        }
    }

    for group in [Group::Proposer, Group::Receiver] {
        let Some(group_counts) = counts.get(&group) else {
            continue;
        };
        let mut values = group_counts.values();
        if let Some(first) = values.next() {
            if values.any(|count| count != first) {
                return Err(ValidationError::UnbalancedOccurrences(group));
            }
        }
    }

    Ok(())
}

fn check_permutation(spec: &AgentSpec, opposite: &[AgentSpec]) -> ValidationResult<()> {
    let mut ranked = HashSet::with_capacity(spec.preferences.len());
    for preference in &spec.preferences {
        if !ranked.insert(preference.as_str()) {
            return Err(ValidationError::DuplicatePreference {
                agent: spec.name.clone(),
                preference: preference.clone(),
            });
        }
    }

    if let Some(missing) = opposite.iter().find(|other| !ranked.contains(other.name.as_str())) {
        return Err(ValidationError::MissingPreference {
            agent: spec.name.clone(),
            missing: missing.name.clone(),
        });
    }

    Ok(())
}
