use anyhow::{anyhow, Context, Result};

use crate::core::{CoreEvent, Game, GameSnapshot, RotationSystem, RulesConfig, StepOutcome};
use crate::types::{GameAction, BOARD_HEIGHT, BOARD_WIDTH};

/// Script step: a player action, or `g` for one gravity tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayStep {
    Action(GameAction),
    Gravity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayConfig {
    pub rules: RulesConfig,
    pub script: Vec<ReplayStep>,
    pub print_events: bool,
}

/// Parse `[--seed N] [--rotation simple|srs] [--events] [SCRIPT]`
///
/// Defaults come from the `TETRIS_RULES_*` environment; flags override them.
pub fn parse_replay_args(args: &[String]) -> Result<ReplayConfig> {
    parse_replay_args_with(args, RulesConfig::from_env())
}

pub fn parse_replay_args_with(args: &[String], mut rules: RulesConfig) -> Result<ReplayConfig> {
    let mut script = Vec::new();
    let mut print_events = false;
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("replay: missing value for --seed"))?;
                rules.seed = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("replay: invalid --seed value: {}", v))?;
            }
            "--rotation" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("replay: missing value for --rotation"))?;
                rules.rotation_system = v
                    .parse::<RotationSystem>()
                    .with_context(|| format!("replay: invalid --rotation value: {}", v))?;
            }
            "--events" => print_events = true,
            other if other.starts_with("--") => {
                return Err(anyhow!("replay: unknown argument: {}", other));
            }
            other => script.extend(parse_script(other)?),
        }
        i += 1;
    }

    rules.validate().context("replay: invalid rules configuration")?;
    Ok(ReplayConfig {
        rules,
        script,
        print_events,
    })
}

/// Parse a comma-separated script such as `l,l,x,h` or `moveLeft,hardDrop,g`
pub fn parse_script(script: &str) -> Result<Vec<ReplayStep>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|token| {
            if token == "g" || token == "gravity" {
                return Ok(ReplayStep::Gravity);
            }
            token
                .parse::<GameAction>()
                .map(ReplayStep::Action)
                .map_err(|e| anyhow!("replay: {}", e))
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ReplayReport {
    pub snapshot: GameSnapshot,
    pub events: Vec<CoreEvent>,
    /// Steps executed; play steps between game over and a restart are skipped
    pub steps_run: usize,
}

/// Run a script against a fresh session
pub fn run_replay(config: &ReplayConfig) -> Result<ReplayReport> {
    let mut game = Game::with_sink(config.rules.clone(), Vec::new())?;
    game.start();

    let mut steps_run = 0;
    for step in &config.script {
        if game.game_over() && *step != ReplayStep::Action(GameAction::Restart) {
            log::debug!("game over, skipping {:?}", step);
            continue;
        }
        match step {
            ReplayStep::Action(action) => {
                if !game.apply_action(*action) {
                    log::debug!("{} had no effect", action.as_str());
                }
            }
            ReplayStep::Gravity => {
                if let StepOutcome::Locked(result) = game.gravity_step() {
                    log::debug!("gravity locked piece, {} lines", result.lines_cleared);
                }
            }
        }
        steps_run += 1;
    }

    Ok(ReplayReport {
        snapshot: game.snapshot(),
        events: std::mem::take(game.sink_mut()),
        steps_run,
    })
}

/// Text picture of a snapshot: `.` empty, `#` locked, `@` active, `:` ghost
pub fn render_board(snapshot: &GameSnapshot) -> String {
    let width = BOARD_WIDTH as usize;
    let height = BOARD_HEIGHT as usize;
    let mut grid: Vec<Vec<char>> = snapshot
        .board
        .iter()
        .map(|row| row.iter().map(|&c| if c == 0 { '.' } else { '#' }).collect())
        .collect();

    if let Some(active) = snapshot.active {
        let mut paint = |cells: &[(i8, i8)], ch: char| {
            for &(x, y) in cells {
                if (0..width as i8).contains(&x) && (0..height as i8).contains(&y) {
                    let cell = &mut grid[y as usize][x as usize];
                    if *cell == '.' || ch == '@' {
                        *cell = ch;
                    }
                }
            }
        };
        if let Some(ghost_row) = snapshot.ghost_row {
            let ghost = crate::core::ActiveSnapshot {
                row: ghost_row,
                ..active
            };
            paint(&ghost.cells(), ':');
        }
        paint(&active.cells(), '@');
    }

    let mut out = String::with_capacity((width + 1) * height);
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let config = parse_replay_args_with(
            &args(&["--seed", "42", "--rotation", "simple", "l,x", "h"]),
            RulesConfig::default(),
        )
        .unwrap();
        assert_eq!(config.rules.seed, 42);
        assert_eq!(config.rules.rotation_system, RotationSystem::Simple);
        assert_eq!(
            config.script,
            vec![
                ReplayStep::Action(GameAction::MoveLeft),
                ReplayStep::Action(GameAction::RotateCw),
                ReplayStep::Action(GameAction::HardDrop),
            ]
        );
        assert!(!config.print_events);
    }

    #[test]
    fn test_parse_args_errors() {
        let defaults = RulesConfig::default();
        assert!(parse_replay_args_with(&args(&["--seed"]), defaults.clone()).is_err());
        assert!(parse_replay_args_with(&args(&["--seed", "x"]), defaults.clone()).is_err());
        assert!(parse_replay_args_with(&args(&["--rotation", "ars"]), defaults.clone()).is_err());
        assert!(parse_replay_args_with(&args(&["--fast"]), defaults.clone()).is_err());
        assert!(parse_replay_args_with(&args(&["jump"]), defaults).is_err());
    }

    #[test]
    fn test_parse_script_gravity_and_blanks() {
        let steps = parse_script(" d, g ,,hardDrop").unwrap();
        assert_eq!(
            steps,
            vec![
                ReplayStep::Action(GameAction::SoftDrop),
                ReplayStep::Gravity,
                ReplayStep::Action(GameAction::HardDrop),
            ]
        );
    }

    #[test]
    fn test_run_replay_hard_drops() {
        let config = ReplayConfig {
            rules: RulesConfig::default(),
            script: parse_script("h,h,h").unwrap(),
            print_events: false,
        };
        let report = run_replay(&config).unwrap();
        assert_eq!(report.steps_run, 3);
        let locks = report
            .events
            .iter()
            .filter(|e| matches!(e, CoreEvent::PieceLocked { .. }))
            .count();
        assert_eq!(locks, 3);
        assert!(report.snapshot.score > 0);

        let picture = render_board(&report.snapshot);
        assert_eq!(picture.lines().count(), BOARD_HEIGHT as usize);
        assert_eq!(picture.matches('#').count(), 12);
        assert_eq!(picture.matches('@').count(), 4);
    }

    #[test]
    fn test_restart_step_runs_after_game_over() {
        let mut script = vec!["h"; 60];
        script.extend(["restart", "h"]);
        let config = ReplayConfig {
            rules: RulesConfig::default(),
            script: parse_script(&script.join(",")).unwrap(),
            print_events: false,
        };
        let report = run_replay(&config).unwrap();

        assert!(!report.snapshot.game_over);
        assert!(report.steps_run < 62);
        assert_eq!(report.snapshot.board.iter().flatten().filter(|&&c| c != 0).count(), 4);
        assert!(report
            .events
            .iter()
            .any(|e| matches!(e, CoreEvent::SpawnBlocked { .. })));
    }
}
