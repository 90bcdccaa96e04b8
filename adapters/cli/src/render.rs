//! Plain-text frames for terminal presentation.

use std::fmt::Write as _;

use pathsnake_core::{CellCoord, TickOutcome};
use pathsnake_system_agent::Session;
use pathsnake_world::query;

/// ANSI sequence that clears the screen and homes the cursor.
pub(crate) const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

const HEAD: char = '@';
const BODY: char = 'o';
const TARGET: char = '*';
const PLANNED: char = '+';
const EMPTY: char = '.';

/// Draws the board one row per line, row zero at the top.
pub(crate) fn frame(session: &Session) -> String {
    let size = session.grid_size();
    let snake = session.snake_cells();
    let planned = session.planned_path();
    let target = session.target_cell();

    let mut out = String::with_capacity(((size + 1) * size) as usize);
    for row in 0..size {
        for column in 0..size {
            let cell = CellCoord::new(column, row);
            let glyph = if snake.first() == Some(&cell) {
                HEAD
            } else if snake.contains(&cell) {
                BODY
            } else if cell == target {
                TARGET
            } else if planned.contains(&cell) {
                PLANNED
            } else {
                EMPTY
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// One-paragraph report printed when the run stops.
pub(crate) fn summary(session: &Session, last: TickOutcome) -> String {
    let stats = session.stats();
    let world = session.world();
    let mut out = String::new();

    let _ = writeln!(out, "final outcome: {last:?}");
    let _ = writeln!(out, "ticks: {}", stats.ticks);
    let _ = writeln!(out, "snake length: {}", query::snake_len(world));
    let _ = writeln!(out, "targets reached: {}", query::targets_reached(world));
    let _ = writeln!(out, "searches: {}", stats.replans);
    let _ = writeln!(out, "idle ticks: {}", stats.idle_ticks);
    out
}
