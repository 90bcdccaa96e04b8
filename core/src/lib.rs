#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the pathsnake engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually happened. The agent system turns the world's state into a single
//! [`TickOutcome`] per tick for the presentation layer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest board edge that leaves room for a snake and a distinct target.
pub const MIN_GRID_SIZE: u32 = 2;
/// Largest board edge accepted by [`GameConfig::validate`].
pub const MAX_GRID_SIZE: u32 = 1_024;

const DEFAULT_GRID_SIZE: u32 = 15;
const DEFAULT_TARGET: CellCoord = CellCoord::new(7, 5);
const DEFAULT_SEED: u64 = 0x5eed_0f_5a4e_c0de;

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Cell reached by moving one unit in `direction`.
    ///
    /// Returns `None` when the move would leave the non-negative quadrant.
    /// Upper bounds are not checked here; that is the world's legality rule.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<CellCoord> {
        match direction {
            Direction::North => self
                .row
                .checked_sub(1)
                .map(|row| CellCoord::new(self.column, row)),
            Direction::East => self
                .column
                .checked_add(1)
                .map(|column| CellCoord::new(column, self.row)),
            Direction::South => self
                .row
                .checked_add(1)
                .map(|row| CellCoord::new(self.column, row)),
            Direction::West => self
                .column
                .checked_sub(1)
                .map(|column| CellCoord::new(column, self.row)),
        }
    }
}

/// Cardinal movement directions available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Fixed expansion order: +column, -column, +row, -row.
    ///
    /// Search tie-breaking depends on this order, so it must never change
    /// between runs.
    pub const ALL: [Direction; 4] = [
        Direction::East,
        Direction::West,
        Direction::South,
        Direction::North,
    ];

    /// Unit vector of the direction as `(column, row)` deltas.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Direction of the single unit step leading from `from` to `to`.
    ///
    /// Returns `None` unless the cells are orthogonally adjacent.
    #[must_use]
    pub fn between(from: CellCoord, to: CellCoord) -> Option<Direction> {
        let column_diff = from.column().abs_diff(to.column());
        let row_diff = from.row().abs_diff(to.row());

        if column_diff + row_diff != 1 {
            return None;
        }

        if column_diff == 1 {
            if to.column() > from.column() {
                Some(Direction::East)
            } else {
                Some(Direction::West)
            }
        } else if to.row() > from.row() {
            Some(Direction::South)
        } else {
            Some(Direction::North)
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the snake advance a single step in the specified direction.
    StepSnake {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that the target move to the provided cell.
    RelocateTarget {
        /// Cell the target should occupy.
        cell: CellCoord,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that the snake head moved between two cells.
    SnakeAdvanced {
        /// Cell the head occupied before moving.
        from: CellCoord,
        /// Cell the head occupies after completing the move.
        to: CellCoord,
    },
    /// Announces that the snake head landed on the target and grew.
    TargetReached {
        /// Cell where the target was consumed.
        cell: CellCoord,
    },
    /// Announces that the target now occupies a new cell.
    TargetRelocated {
        /// Cell the target moved to.
        cell: CellCoord,
    },
    /// Reports that a relocation request named an illegal cell.
    TargetRelocationRejected {
        /// Cell provided in the rejected request.
        cell: CellCoord,
    },
    /// Announces that the simulation reached its terminal state.
    GameOver {
        /// Why the game ended.
        reason: GameOverReason,
    },
}

/// Reasons the world may stop accepting moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameOverReason {
    /// The snake attempted to leave the board or enter its own body.
    Collision,
    /// The snake occupies every cell, leaving nowhere to place a target.
    BoardFilled,
}

/// Result of applying a single step to the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepResult {
    /// The head moved onto a free cell and the tail followed.
    Moved,
    /// The head landed on the target, the snake grew and a new target was placed.
    TargetReached,
    /// The move was illegal; the world is now over and the snake is unchanged.
    Collided {
        /// Cell the head tried to enter, or `None` when it fell off the low edge.
        cell: Option<CellCoord>,
    },
    /// The head landed on the target and no free cell remained for a new one.
    BoardFilled,
    /// The world was already over; nothing changed.
    Frozen,
}

/// Outcome of one agent tick as observed by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TickOutcome {
    /// The snake moved one cell along its path.
    Advanced,
    /// The snake consumed the target this tick.
    TargetReached,
    /// The game is over; the tick did nothing.
    GameOver,
    /// No path to the target exists; the snake stayed put.
    NoPathIdle,
    /// The snake filled the board.
    BoardFilled,
}

/// Policy applied when the target is unreachable from the snake head.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// Stay put and retry next tick.
    #[default]
    Idle,
    /// Step onto the first legal neighbour in expansion order, if any.
    FirstLegalNeighbor,
}

/// Construction parameters for a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Edge length of the square board measured in cells.
    pub grid_size: u32,
    /// Initial snake body, head first.
    pub snake: Vec<CellCoord>,
    /// Initial target cell; `None` places it at a seeded random free cell.
    pub target: Option<CellCoord>,
    /// Seed for target placement.
    pub seed: u64,
    /// Behaviour when no path to the target exists.
    pub fallback: Fallback,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            snake: vec![CellCoord::new(0, 0)],
            target: Some(DEFAULT_TARGET),
            seed: DEFAULT_SEED,
            fallback: Fallback::Idle,
        }
    }
}

impl GameConfig {
    /// Checks that the configuration describes a playable board.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, checked in declaration order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.grid_size;
        if size < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall { size });
        }
        if size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge { size });
        }

        if self.snake.is_empty() {
            return Err(ConfigError::EmptySnake);
        }

        let mut seen = HashSet::with_capacity(self.snake.len());
        let mut previous: Option<CellCoord> = None;
        for &cell in &self.snake {
            if !within(cell, size) {
                return Err(ConfigError::SnakeOutOfBounds { cell });
            }
            if !seen.insert(cell) {
                return Err(ConfigError::SnakeOverlaps { cell });
            }
            if let Some(prev) = previous {
                if prev.manhattan_distance(cell) != 1 {
                    return Err(ConfigError::SnakeDisconnected { from: prev, to: cell });
                }
            }
            previous = Some(cell);
        }

        let cell_count = u64::from(size) * u64::from(size);
        if self.snake.len() as u64 >= cell_count {
            return Err(ConfigError::NoRoomForTarget { size });
        }

        if let Some(target) = self.target {
            if !within(target, size) {
                return Err(ConfigError::TargetOutOfBounds { cell: target });
            }
            if seen.contains(&target) {
                return Err(ConfigError::TargetOnSnake { cell: target });
            }
        }

        Ok(())
    }
}

fn within(cell: CellCoord, size: u32) -> bool {
    cell.column() < size && cell.row() < size
}

/// Reasons a [`GameConfig`] cannot produce a playable board.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The board edge is below [`MIN_GRID_SIZE`].
    #[error("grid size {size} is too small; at least {} is required", MIN_GRID_SIZE)]
    GridTooSmall {
        /// Requested board edge.
        size: u32,
    },
    /// The board edge exceeds [`MAX_GRID_SIZE`].
    #[error("grid size {size} exceeds the maximum of {}", MAX_GRID_SIZE)]
    GridTooLarge {
        /// Requested board edge.
        size: u32,
    },
    /// The snake body has no cells.
    #[error("the snake must occupy at least one cell")]
    EmptySnake,
    /// A snake cell lies outside the board.
    #[error("snake cell {cell:?} lies outside the board")]
    SnakeOutOfBounds {
        /// Offending cell.
        cell: CellCoord,
    },
    /// A snake cell appears more than once.
    #[error("snake cell {cell:?} appears more than once")]
    SnakeOverlaps {
        /// Repeated cell.
        cell: CellCoord,
    },
    /// Two consecutive snake cells are not orthogonally adjacent.
    #[error("snake cells {from:?} and {to:?} are not adjacent")]
    SnakeDisconnected {
        /// Earlier cell in the body.
        from: CellCoord,
        /// Following cell in the body.
        to: CellCoord,
    },
    /// The target lies outside the board.
    #[error("target {cell:?} lies outside the board")]
    TargetOutOfBounds {
        /// Offending cell.
        cell: CellCoord,
    },
    /// The target coincides with a snake cell.
    #[error("target {cell:?} overlaps the snake")]
    TargetOnSnake {
        /// Offending cell.
        cell: CellCoord,
    },
    /// The snake already covers the whole board.
    #[error("a {size}x{size} board has no free cell left for the target")]
    NoRoomForTarget {
        /// Board edge.
        size: u32,
    },
}
