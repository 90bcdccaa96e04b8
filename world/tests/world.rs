use pathsnake_core::{
    CellCoord, Command, Direction, Event, GameConfig, GameOverReason, StepResult,
};
use pathsnake_world::{self as world, query, World};

fn cells(raw: &[(u32, u32)]) -> Vec<CellCoord> {
    raw.iter()
        .map(|&(column, row)| CellCoord::new(column, row))
        .collect()
}

fn build(grid_size: u32, snake: &[(u32, u32)], target: Option<(u32, u32)>, seed: u64) -> World {
    let config = GameConfig {
        grid_size,
        snake: cells(snake),
        target: target.map(|(column, row)| CellCoord::new(column, row)),
        seed,
        ..GameConfig::default()
    };
    World::new(&config).expect("valid config")
}

#[test]
fn stepping_off_the_board_ends_the_game_without_moving() {
    let mut world = build(5, &[(0, 2)], Some((4, 4)), 1);
    let before = query::snake_cells(&world);
    let mut events = Vec::new();

    let result = world::step(&mut world, Direction::West, &mut events);

    assert_eq!(result, StepResult::Collided { cell: None });
    assert!(query::is_over(&world));
    assert_eq!(query::game_over_reason(&world), Some(GameOverReason::Collision));
    assert_eq!(query::snake_cells(&world), before);
    assert_eq!(
        events,
        vec![Event::GameOver {
            reason: GameOverReason::Collision
        }]
    );
}

#[test]
fn stepping_past_the_far_edge_ends_the_game() {
    let mut world = build(5, &[(4, 1)], Some((0, 0)), 1);
    let mut events = Vec::new();

    let result = world::step(&mut world, Direction::East, &mut events);

    assert_eq!(
        result,
        StepResult::Collided {
            cell: Some(CellCoord::new(5, 1))
        }
    );
    assert_eq!(query::snake_cells(&world), cells(&[(4, 1)]));
}

#[test]
fn stepping_into_the_body_ends_the_game_without_moving() {
    let body = [(1, 1), (2, 1), (2, 2), (1, 2)];
    let mut world = build(5, &body, Some((4, 4)), 1);
    let mut events = Vec::new();

    let result = world::step(&mut world, Direction::South, &mut events);

    assert_eq!(
        result,
        StepResult::Collided {
            cell: Some(CellCoord::new(1, 2))
        }
    );
    assert!(query::is_over(&world));
    assert_eq!(query::snake_cells(&world), cells(&body));
}

#[test]
fn over_world_is_frozen() {
    let mut world = build(5, &[(0, 0)], Some((4, 4)), 1);
    let mut events = Vec::new();
    let _ = world::step(&mut world, Direction::North, &mut events);
    events.clear();

    let result = world::step(&mut world, Direction::East, &mut events);

    assert_eq!(result, StepResult::Frozen);
    assert!(events.is_empty());
    assert_eq!(query::snake_cells(&world), cells(&[(0, 0)]));
    assert_eq!(query::steps_taken(&world), 0);
}

#[test]
fn reaching_the_target_grows_the_snake_and_moves_the_target() {
    let mut world = build(5, &[(2, 2), (2, 1)], Some((2, 3)), 17);
    let mut events = Vec::new();

    let result = world::step(&mut world, Direction::South, &mut events);

    assert_eq!(result, StepResult::TargetReached);
    assert_eq!(query::snake_len(&world), 3);
    assert_eq!(query::snake_cells(&world), cells(&[(2, 3), (2, 2), (2, 1)]));

    let target = query::target_cell(&world);
    assert!(!query::snake_cells(&world).contains(&target));
    assert!(query::is_legal(&world, target));
    assert_eq!(query::targets_reached(&world), 1);
    assert_eq!(
        events,
        vec![
            Event::SnakeAdvanced {
                from: CellCoord::new(2, 2),
                to: CellCoord::new(2, 3),
            },
            Event::TargetReached {
                cell: CellCoord::new(2, 3)
            },
            Event::TargetRelocated { cell: target },
        ]
    );
}

#[test]
fn filling_the_board_ends_the_game_as_a_win() {
    let mut world = build(2, &[(0, 0), (1, 0), (1, 1)], Some((0, 1)), 5);
    let mut events = Vec::new();

    let result = world::step(&mut world, Direction::South, &mut events);

    assert_eq!(result, StepResult::BoardFilled);
    assert_eq!(query::snake_len(&world), 4);
    assert_eq!(query::free_cell_count(&world), 0);
    assert_eq!(query::game_over_reason(&world), Some(GameOverReason::BoardFilled));
    assert_eq!(
        events.last(),
        Some(&Event::GameOver {
            reason: GameOverReason::BoardFilled
        })
    );
}

#[test]
fn seeded_target_placement_is_reproducible() {
    let first = build(9, &[(4, 4), (4, 5)], None, 0xfeed);
    let second = build(9, &[(4, 4), (4, 5)], None, 0xfeed);

    assert_eq!(query::target_cell(&first), query::target_cell(&second));
    assert!(query::is_legal(&first, query::target_cell(&first)));
}

#[test]
fn repeated_growth_never_places_target_on_the_snake() {
    // Walk a serpentine over a 4x4 board; each target the world places is
    // moved onto the head's next cell so every step is a growth step.
    let mut world = build(4, &[(0, 0)], Some((1, 0)), 99);
    let route = [
        Direction::East,
        Direction::East,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::West,
        Direction::West,
        Direction::South,
        Direction::East,
        Direction::East,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::West,
    ];

    for (index, direction) in route.iter().enumerate() {
        let mut events = Vec::new();
        let result = world::step(&mut world, *direction, &mut events);
        assert_eq!(result, StepResult::TargetReached, "step {index}");

        let target = query::target_cell(&world);
        assert!(!query::snake_cells(&world).contains(&target));

        if let Some(next) = route.get(index + 1) {
            let upcoming = query::head(&world)
                .neighbor(*next)
                .expect("route stays on the board");
            world::apply(
                &mut world,
                Command::RelocateTarget { cell: upcoming },
                &mut events,
            );
            assert_eq!(query::target_cell(&world), upcoming);
        }
    }

    assert_eq!(query::snake_len(&world), 15);
    assert_eq!(query::free_cell_count(&world), 1);
}

#[test]
fn relocating_the_target_broadcasts_the_new_cell() {
    let mut world = build(5, &[(0, 0)], Some((4, 4)), 1);
    let mut events = Vec::new();

    world::apply(
        &mut world,
        Command::RelocateTarget {
            cell: CellCoord::new(3, 1),
        },
        &mut events,
    );

    assert_eq!(query::target_cell(&world), CellCoord::new(3, 1));
    assert_eq!(
        events,
        vec![Event::TargetRelocated {
            cell: CellCoord::new(3, 1)
        }]
    );
}

#[test]
fn step_command_matches_direct_step() {
    let mut via_command = build(5, &[(1, 1)], Some((4, 4)), 1);
    let mut via_step = build(5, &[(1, 1)], Some((4, 4)), 1);
    let mut command_events = Vec::new();
    let mut step_events = Vec::new();

    world::apply(
        &mut via_command,
        Command::StepSnake {
            direction: Direction::East,
        },
        &mut command_events,
    );
    let _ = world::step(&mut via_step, Direction::East, &mut step_events);

    assert_eq!(command_events, step_events);
    assert_eq!(
        query::snake_cells(&via_command),
        query::snake_cells(&via_step)
    );
}
