//! Headless replay runner (default binary).
//!
//! Runs a comma-separated action script through a fresh session and prints the
//! final board and score:
//!
//! ```text
//! tetris-rules --seed 7 --rotation srs l,l,x,h,r,h,g,g
//! ```
//!
//! Set `RUST_LOG=debug` to see locks, clears and level changes as they happen.

use anyhow::Result;

use tetris_rules::replay::{parse_replay_args, render_board, run_replay};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_replay_args(&args)?;
    log::info!(
        "replaying {} steps (seed {}, rotation {})",
        config.script.len(),
        config.rules.seed,
        config.rules.rotation_system.as_str()
    );

    let report = run_replay(&config)?;

    if config.print_events {
        for event in &report.events {
            println!("{:?}", event);
        }
    }

    let snapshot = &report.snapshot;
    print!("{}", render_board(snapshot));
    println!(
        "score {}  level {}  lines {}  interval {}ms{}",
        snapshot.score,
        snapshot.level,
        snapshot.lines,
        snapshot.drop_interval_ms,
        if snapshot.game_over { "  GAME OVER" } else { "" }
    );
    Ok(())
}
