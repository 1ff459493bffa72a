//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Default inputs for the matching service: the reference five-by-five configuration,
// the name pools used for random initialisation, and a seeded random generator.
//
// | Name                      | Description                                            |
// |---------------------------|--------------------------------------------------------|
// | reference_configuration   | Five proposers and five receivers with fixed rankings  |
// | PROPOSER_NAMES            | 50 proposer names sorted alphabetically                |
// | RECEIVER_NAMES            | 50 receiver names sorted alphabetically                |
// | random_configuration      | Random names and shuffled rankings for each group      |
//--------------------------------------------------------------------------------------------------

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::warn;

use super::types::{AgentSpec, Configuration};

/// Proposer names available for random configurations.
pub const PROPOSER_NAMES: [&str; 50] = [
    "Aiden", "Alexander", "Andrew", "Anthony", "Asher", "Benjamin", "Caleb", "Carter",
    "Christopher", "Daniel", "David", "Dylan", "Elijah", "Ethan", "Gabriel", "Grayson",
    "Henry", "Issac", "Jack", "Jackson", "Jacob", "James", "Jaxon", "Jayden", "John",
    "Joseph", "Joshua", "Julian", "Leo", "Levi", "Liam", "Lincoln", "Logan", "Lucas",
    "Luke", "Mason", "Mateo", "Matthew", "Michael", "Nathan", "Noah", "Oliver", "Owen",
    "Ryan", "Samuel", "Sebastian", "Theodore", "Thomas", "William", "Wyatt",
];

/// Receiver names available for random configurations.
pub const RECEIVER_NAMES: [&str; 50] = [
    "Abigail", "Addison", "Amelia", "Aria", "Aubrey", "Audrey", "Aurora", "Ava", "Avery",
    "Bella", "Brooklyn", "Camila", "Charlotte", "Chloe", "Claire", "Eleanor", "Elizabeth",
    "Ella", "Ellie", "Emily", "Emma", "Evelyn", "Grace", "Hannah", "Harper", "Hazel",
    "Isabella", "Layla", "Leah", "Lillian", "Lily", "Luna", "Madison", "Mia", "Mila",
    "Natalie", "Nora", "Olivia", "Penelope", "Riley", "Savannah", "Scarlett", "Skylar",
    "Sofia", "Sophia", "Stella", "Victoria", "Violet", "Zoe", "Zoey",
];

/// The reference configuration: five proposers and five receivers.
pub fn reference_configuration() -> Configuration {
    Configuration::new(
        vec![
            AgentSpec::new("Conrad", ["Sophie", "Nicole", "Emma", "Olivia", "Ava"]),
            AgentSpec::new("Joshua", ["Ava", "Nicole", "Sophie", "Emma", "Olivia"]),
            AgentSpec::new("William", ["Sophie", "Olivia", "Nicole", "Ava", "Emma"]),
            AgentSpec::new("Lucas", ["Nicole", "Emma", "Ava", "Sophie", "Olivia"]),
            AgentSpec::new("Oliver", ["Olivia", "Emma", "Nicole", "Ava", "Sophie"]),
        ],
        vec![
            AgentSpec::new("Ava", ["Conrad", "Joshua", "William", "Lucas", "Oliver"]),
            AgentSpec::new("Emma", ["Joshua", "William", "Conrad", "Lucas", "Oliver"]),
            AgentSpec::new("Nicole", ["Oliver", "Conrad", "Lucas", "William", "Joshua"]),
            AgentSpec::new("Olivia", ["Oliver", "Lucas", "Joshua", "William", "Conrad"]),
            AgentSpec::new("Sophie", ["Lucas", "Joshua", "Oliver", "Conrad", "William"]),
        ],
    )
}

/// Builds a configuration with randomly drawn names and shuffled preference lists.
///
/// Group sizes larger than the name pools are capped at the pool size. The result is
/// fully determined by the state of `rng`, so a seeded generator reproduces it.
pub fn random_configuration<R: Rng + ?Sized>(
    proposer_count: usize,
    receiver_count: usize,
    rng: &mut R,
) -> Configuration {
    let proposer_names = draw_names(&PROPOSER_NAMES, proposer_count, rng);
    let receiver_names = draw_names(&RECEIVER_NAMES, receiver_count, rng);

    let proposers = proposer_names
        .iter()
        .map(|name| AgentSpec::new(name.clone(), shuffled(&receiver_names, rng)))
        .collect();
    let receivers = receiver_names
        .iter()
        .map(|name| AgentSpec::new(name.clone(), shuffled(&proposer_names, rng)))
        .collect();

    Configuration::new(proposers, receivers)
}

fn draw_names<R: Rng + ?Sized>(pool: &[&str], count: usize, rng: &mut R) -> Vec<String> {
    if count > pool.len() {
        warn!("Requested {} names but only {} are available", count, pool.len());
    }
    pool.choose_multiple(rng, count.min(pool.len()))
        .map(|name| name.to_string())
        .collect()
}

fn shuffled<R: Rng + ?Sized>(names: &[String], rng: &mut R) -> Vec<String> {
    let mut names = names.to_vec();
    names.shuffle(rng);
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_reference_configuration_shape() {
        let configuration = reference_configuration();
        assert_eq!(configuration.proposers.len(), 5);
        assert_eq!(configuration.receivers.len(), 5);
        assert_eq!(configuration.proposers[0].name, "Conrad");
        assert_eq!(configuration.receivers[4].name, "Sophie");
    }

    #[test]
    fn test_random_configuration_is_complete() {
        let mut rng = StdRng::seed_from_u64(7);
        let configuration = random_configuration(4, 6, &mut rng);

        assert_eq!(configuration.proposers.len(), 4);
        assert_eq!(configuration.receivers.len(), 6);

        let receiver_names: HashSet<&str> =
            configuration.receivers.iter().map(|spec| spec.name.as_str()).collect();
        for proposer in &configuration.proposers {
            let ranked: HashSet<&str> = proposer.preferences.iter().map(String::as_str).collect();
            assert_eq!(ranked, receiver_names);
            assert_eq!(proposer.preferences.len(), 6);
        }
        for receiver in &configuration.receivers {
            assert_eq!(receiver.preferences.len(), 4);
        }
    }

    #[test]
    fn test_random_configuration_is_seeded() {
        let first = random_configuration(5, 5, &mut StdRng::seed_from_u64(42));
        let second = random_configuration(5, 5, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_configuration_caps_group_size() {
        let mut rng = StdRng::seed_from_u64(1);
        let configuration = random_configuration(80, 1, &mut rng);
        assert_eq!(configuration.proposers.len(), PROPOSER_NAMES.len());
    }
}
