#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the pathsnake agent in a terminal.

mod config;
mod render;

use std::{
    io::{self, Write},
    thread,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use pathsnake_core::TickOutcome;
use pathsnake_system_agent::Session;

use crate::config::{Args, Settings};

/// Entry point for the pathsnake command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = Args::parse().resolve()?;
    let mut session = Session::new(&settings.game).context("invalid game configuration")?;

    run(&mut session, &settings)
}

fn run(session: &mut Session, settings: &Settings) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut last = None;

    for tick in 1..=settings.max_ticks {
        let outcome = session
            .tick()
            .with_context(|| format!("agent failed on tick {tick}"))?;
        for event in session.events() {
            debug!("tick {tick}: {event:?}");
        }
        last = Some(outcome);

        if !settings.headless {
            write!(out, "{}", render::CLEAR_SCREEN)?;
            write!(out, "{}", render::frame(session))?;
            writeln!(out, "tick {tick}: {outcome:?}")?;
            out.flush()?;
            thread::sleep(settings.tick_interval);
        }

        if session.is_over() {
            break;
        }
    }

    write!(out, "{}", render::summary(session, last.unwrap_or(TickOutcome::NoPathIdle)))?;
    out.flush()?;
    Ok(())
}
