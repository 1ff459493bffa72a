//--------------------------------------------------------------------------------------------------
// TEST MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Integration tests for the matching engine through the public API.
// Covers stability, proposer-optimality against brute force, the termination bound,
// determinism, monotonic rejection and the boundary cases of the algorithm.
//--------------------------------------------------------------------------------------------------

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::{BTreeSet, HashMap};

use stable_matching::{
    AgentSpec, Configuration, ConfigurationValidator, EventKind, IterationOutcome, MatchingEngine,
    MatchingEvent, MatchingSession, Pairing, random_configuration, reference_configuration,
};

/// Builds an engine for a configuration that is known to be valid.
fn engine_for(configuration: &Configuration) -> MatchingEngine {
    ConfigurationValidator::default()
        .validate(configuration)
        .expect("test configuration should be valid");
    MatchingEngine::new(configuration).expect("engine should build")
}

fn pairing(proposer: &str, receiver: &str) -> Pairing {
    Pairing {
        proposer: proposer.to_string(),
        receiver: receiver.to_string(),
    }
}

fn rank_of(spec: &AgentSpec, name: &str) -> usize {
    spec.preferences
        .iter()
        .position(|preferred| preferred == name)
        .expect("complete preference list")
}

/// Every permutation of `0..n`.
fn permutations(n: usize) -> Vec<Vec<usize>> {
    fn extend(current: &mut Vec<usize>, used: &mut Vec<bool>, out: &mut Vec<Vec<usize>>) {
        if current.len() == used.len() {
            out.push(current.clone());
            return;
        }
        for candidate in 0..used.len() {
            if !used[candidate] {
                used[candidate] = true;
                current.push(candidate);
                extend(current, used, out);
                current.pop();
                used[candidate] = false;
            }
        }
    }

    let mut out = Vec::new();
    extend(&mut Vec::with_capacity(n), &mut vec![false; n], &mut out);
    out
}

/// All stable perfect matchings of an equal-size configuration; entry `p` is the receiver of proposer `p`.
fn brute_force_stable_matchings(configuration: &Configuration) -> Vec<Vec<usize>> {
    let proposers = &configuration.proposers;
    let receivers = &configuration.receivers;

    permutations(proposers.len())
        .into_iter()
        .filter(|assignment| {
            let mut owner = vec![0; receivers.len()];
            for (p, &r) in assignment.iter().enumerate() {
                owner[r] = p;
            }

            (0..proposers.len()).all(|p| {
                (0..receivers.len()).all(|r| {
                    if assignment[p] == r {
                        return true;
                    }
                    let proposer_wants = rank_of(&proposers[p], &receivers[r].name)
                        < rank_of(&proposers[p], &receivers[assignment[p]].name);
                    let receiver_wants = rank_of(&receivers[r], &proposers[p].name)
                        < rank_of(&receivers[r], &proposers[owner[r]].name);
                    !(proposer_wants && receiver_wants)
                })
            })
        })
        .collect()
}

#[test]
fn test_reference_configuration_matching() {
    let mut engine = engine_for(&reference_configuration());
    let iterations = engine.run_to_completion();

    assert!(engine.is_done());
    assert!(iterations <= 25);
    assert!(engine.exhausted().is_empty());
    assert_eq!(
        engine.pairings(),
        vec![
            pairing("Conrad", "Sophie"),
            pairing("Joshua", "Ava"),
            pairing("William", "Emma"),
            pairing("Lucas", "Nicole"),
            pairing("Oliver", "Olivia"),
        ]
    );
    assert!(engine.blocking_pairs().is_empty());

    // Every agent of both groups is matched
    assert!(engine.matching().values().all(Option::is_some));
}

#[test]
fn test_reference_trace_shape() {
    let mut engine = engine_for(&reference_configuration());
    engine.run_to_completion();

    let history = engine.log().history();
    let breaks: Vec<&MatchingEvent> = history
        .iter()
        .filter(|event| event.kind() == EventKind::Break)
        .collect();
    assert_eq!(
        breaks,
        vec![&MatchingEvent::Break {
            proposer: "Oliver".into(),
            receiver: "Olivia".into(),
            dumped: "William".into(),
        }]
    );

    // Every iteration is prepare, decision, done
    assert_eq!(history.len(), engine.iterations() * 3);
    for segment in history.chunks(3) {
        assert_eq!(segment[0].kind(), EventKind::Prepare);
        assert_eq!(segment[2].kind(), EventKind::Done);
        assert_eq!(segment[0].proposer(), segment[2].proposer());
        assert_eq!(segment[0].receiver(), segment[2].receiver());
    }

    // The last segment is the one the marks point at
    assert_eq!(engine.log().slice_current(), &history[history.len() - 3..]);
    assert!(engine.log().slice_after().is_empty());
}

#[test]
fn test_single_pair_boundary() {
    let configuration = Configuration::new(
        vec![AgentSpec::new("Adam", ["Eve"])],
        vec![AgentSpec::new("Eve", ["Adam"])],
    );
    let mut engine = engine_for(&configuration);

    assert_eq!(engine.run_to_completion(), 1);
    let kinds: Vec<EventKind> = engine.log().history().iter().map(MatchingEvent::kind).collect();
    assert_eq!(kinds, vec![EventKind::Prepare, EventKind::Engage, EventKind::Done]);
    assert_eq!(engine.pairings(), vec![pairing("Adam", "Eve")]);
}

#[test]
fn test_exhausted_proposer_is_never_retried() {
    let configuration = Configuration::new(
        vec![
            AgentSpec::new("Adam", ["Eve", "Ann"]),
            AgentSpec::new("Bob", ["Eve", "Ann"]),
            AgentSpec::new("Carl", ["Eve", "Ann"]),
        ],
        vec![
            AgentSpec::new("Eve", ["Carl", "Bob", "Adam"]),
            AgentSpec::new("Ann", ["Bob", "Carl", "Adam"]),
        ],
    );
    let mut engine = engine_for(&configuration);

    let mut outcomes = Vec::new();
    while let Some(outcome) = engine.iterate() {
        outcomes.push(outcome);
    }

    assert_eq!(engine.exhausted(), vec!["Adam"]);
    let exhaustions = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, IterationOutcome::Exhausted { .. }))
        .count();
    assert_eq!(exhaustions, 1);
    assert!(engine.is_done());
    assert!(engine.iterations() <= engine.max_iterations());
    assert_eq!(engine.partner_of("Adam"), None);
    assert_eq!(
        engine.pairings(),
        vec![pairing("Bob", "Ann"), pairing("Carl", "Eve")]
    );
    assert!(engine.blocking_pairs().is_empty());

    let exhausted_events: Vec<&MatchingEvent> = engine
        .log()
        .history()
        .iter()
        .filter(|event| event.kind() == EventKind::Exhausted)
        .collect();
    assert_eq!(exhausted_events, vec![&MatchingEvent::Exhausted { proposer: "Adam".into() }]);
}

#[test]
fn test_random_configurations_are_stable_and_bounded() {
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let proposers = 1 + (seed as usize % 10);
        let receivers = 1 + (seed as usize * 7 % 10);
        let configuration = random_configuration(proposers, receivers, &mut rng);

        let mut engine = engine_for(&configuration);
        let iterations = engine.run_to_completion();

        assert!(engine.is_done(), "seed {seed}");
        assert!(iterations <= engine.max_iterations(), "seed {seed}");
        assert!(engine.blocking_pairs().is_empty(), "seed {seed}");
        assert_eq!(engine.pairings().len(), proposers.min(receivers), "seed {seed}");
        assert_eq!(
            engine.exhausted().len(),
            proposers.saturating_sub(receivers),
            "seed {seed}"
        );

        if proposers == receivers {
            assert!(iterations <= proposers * receivers, "seed {seed}");
        }
    }
}

#[test]
fn test_partner_relation_is_symmetric_at_every_step() {
    let mut rng = StdRng::seed_from_u64(11);
    let configuration = random_configuration(6, 6, &mut rng);
    let mut engine = engine_for(&configuration);

    while engine.iterate().is_some() {
        for proposer in engine.proposers() {
            if let Some(receiver) = proposer.partner() {
                assert_eq!(engine.receivers()[receiver].partner(), Some(proposer.index()));
            }
        }
        for receiver in engine.receivers() {
            if let Some(proposer) = receiver.partner() {
                assert_eq!(engine.proposers()[proposer].partner(), Some(receiver.index()));
            }
        }
    }
}

#[test]
fn test_proposer_optimal_against_brute_force() {
    for seed in 0..60 {
        let size = 1 + (seed as usize % 4);
        let mut rng = StdRng::seed_from_u64(1_000 + seed);
        let configuration = random_configuration(size, size, &mut rng);

        let stable = brute_force_stable_matchings(&configuration);
        assert!(!stable.is_empty(), "seed {seed}");

        let mut engine = engine_for(&configuration);
        engine.run_to_completion();

        for (p, spec) in configuration.proposers.iter().enumerate() {
            let best_rank = stable
                .iter()
                .map(|assignment| rank_of(spec, &configuration.receivers[assignment[p]].name))
                .min()
                .expect("at least one stable matching");
            let partner = engine.partner_of(&spec.name).expect("proposer is matched");
            assert_eq!(rank_of(spec, partner), best_rank, "seed {seed}, proposer {}", spec.name);
        }
    }
}

#[test]
fn test_identical_configurations_give_identical_traces() {
    let mut rng = StdRng::seed_from_u64(99);
    let configuration = random_configuration(8, 7, &mut rng);

    let mut eager = engine_for(&configuration);
    eager.run_to_completion();

    // Interleave stepping with reads, as an animated consumer would
    let mut stepped = engine_for(&configuration);
    let mut replayed = Vec::new();
    while stepped.iterate().is_some() {
        replayed.extend_from_slice(stepped.log().slice_current());
        let _ = stepped.matching();
    }

    assert_eq!(eager.log().history(), stepped.log().history());
    assert_eq!(replayed.as_slice(), eager.log().history());
    assert_eq!(eager.matching(), stepped.matching());
    assert_eq!(eager.exhausted(), stepped.exhausted());
}

#[test]
fn test_rejections_are_monotonic() {
    let mut rng = StdRng::seed_from_u64(5);
    let configuration = random_configuration(7, 7, &mut rng);
    let mut engine = engine_for(&configuration);

    let snapshot = |engine: &MatchingEngine| -> Vec<BTreeSet<usize>> {
        engine.proposers().iter().map(|agent| agent.rejections().clone()).collect()
    };
    let receiver_index: HashMap<&str, usize> = configuration
        .receivers
        .iter()
        .enumerate()
        .map(|(index, spec)| (spec.name.as_str(), index))
        .collect();

    let mut previous = snapshot(&engine);
    while engine.iterate().is_some() {
        // The proposal of this step never targets a receiver that already rejected the proposer
        if let Some(MatchingEvent::Prepare { proposer, receiver }) = engine.log().slice_current().first() {
            let agent = engine.agent(proposer).expect("known proposer");
            assert!(!previous[agent.index()].contains(&receiver_index[receiver.as_str()]));
        }

        let current = snapshot(&engine);
        for (before, after) in previous.iter().zip(&current) {
            assert!(before.is_subset(after));
        }
        previous = current;
    }
}

#[test]
fn test_session_drives_to_same_result() {
    let mut session =
        MatchingSession::start(reference_configuration(), &ConfigurationValidator::default()).unwrap();

    let mut steps = 0;
    while let Some(report) = session.step() {
        assert!(!report.events.is_empty());
        steps += 1;
    }

    let mut engine = engine_for(&reference_configuration());
    assert_eq!(engine.run_to_completion(), steps);
    assert_eq!(session.engine().pairings(), engine.pairings());
}
