use pathsnake_core::{CellCoord, Event, Fallback, GameConfig, TickOutcome};
use pathsnake_system_agent::Session;

#[test]
fn deterministic_replay_produces_identical_runs() {
    let first = replay(scripted_config(), 400);
    let second = replay(scripted_config(), 400);

    assert_eq!(first, second, "replay diverged between runs");
    assert!(
        first.outcomes.contains(&TickOutcome::TargetReached),
        "scripted run should consume at least one target"
    );
}

#[test]
fn different_seeds_place_targets_differently() {
    let first = replay(scripted_config(), 200);
    let second = replay(
        GameConfig {
            seed: 0xdead_beef,
            ..scripted_config()
        },
        200,
    );

    assert_ne!(first.targets, second.targets);
}

fn scripted_config() -> GameConfig {
    GameConfig {
        grid_size: 12,
        snake: vec![CellCoord::new(0, 0)],
        target: None,
        seed: 0x0bad_5eed,
        fallback: Fallback::FirstLegalNeighbor,
    }
}

fn replay(config: GameConfig, ticks: usize) -> ReplayOutcome {
    let mut session = Session::new(&config).expect("valid config");
    let mut outcomes = Vec::with_capacity(ticks);
    let mut targets = vec![session.target_cell()];
    let mut events = Vec::new();

    for _ in 0..ticks {
        let outcome = session.tick().expect("tick");
        outcomes.push(outcome);
        events.extend(session.events().iter().cloned());
        if outcome == TickOutcome::TargetReached {
            targets.push(session.target_cell());
        }
        if session.is_over() {
            break;
        }
    }

    ReplayOutcome {
        outcomes,
        targets,
        events,
        snake: session.snake_cells(),
    }
}

#[derive(Debug, PartialEq, Eq)]
struct ReplayOutcome {
    outcomes: Vec<TickOutcome>,
    targets: Vec<CellCoord>,
    events: Vec<Event>,
    snake: Vec<CellCoord>,
}
