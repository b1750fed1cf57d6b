mod bot_controller;
mod console_broadcaster;
mod console_input;

use std::path::{Path, PathBuf};

use clap::Parser;
use common::audio::SoundBoard;
use common::games::snake::{BoundaryMode, GameConfig, SnakeDriver};
use common::games::{GameBroadcaster, Scheduler, SessionRng, TokioScheduler};
use common::input::{DirectionThrottle, KeyCommand};
use common::records::{self, GameSettings, ScoreRecord};
use common::{RECORDS_FILE_NAME, SETTINGS_FILE_NAME, log, logger};
use tokio::io::{AsyncBufReadExt, BufReader};

use bot_controller::BotController;
use console_broadcaster::ConsoleBroadcaster;
use console_input::ConsoleCommand;

#[derive(Parser)]
#[command(name = "snake_runner", about = "Plays one game of Snake in the terminal")]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long, default_value = "Player")]
    player: String,

    /// Let the bot steer.
    #[arg(long)]
    autopilot: bool,

    /// Speed percentage, 0 (slowest) to 100 (fastest). Overrides saved settings.
    #[arg(long)]
    speed: Option<u8>,

    /// Wrap around the edges instead of dying on them. Overrides saved settings.
    #[arg(long)]
    wrap: bool,

    #[arg(long)]
    seed: Option<u64>,

    /// Write the effective settings back to the settings file.
    #[arg(long)]
    save_settings: bool,

    #[arg(long, default_value = SETTINGS_FILE_NAME)]
    settings: PathBuf,

    #[arg(long, default_value = RECORDS_FILE_NAME)]
    records: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Snake".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let settings = load_settings(&args);
    let config = GameConfig::default();
    let options = settings.engine_options(&config);
    let rng = args.seed.map(SessionRng::new).unwrap_or_else(SessionRng::from_random);
    log!("Session seed {}", rng.seed());

    let (scheduler, mut timer_rx) = TokioScheduler::create();
    let broadcaster = ConsoleBroadcaster::new(SoundBoard::new(settings.audio_settings()));
    let mut throttle = DirectionThrottle::new(config.direction_cooldown);
    let mut driver = SnakeDriver::new(config, options, rng, scheduler, broadcaster)?;

    let mut stdin_lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    log!("Controls: w/a/s/d or arrows, p to pause, speed <0-100>, wrap, walls, music on|off, q to quit");
    driver.start();

    while driver.is_running() {
        tokio::select! {
            Some(handle) = timer_rx.recv() => {
                if args.autopilot
                    && let Some(direction) = BotController::calculate_move(&driver.snapshot())
                {
                    driver.set_direction(direction);
                }
                driver.on_timer(handle);
            }
            line = stdin_lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => match ConsoleCommand::parse(&line) {
                        Some(command) => apply_command(&mut driver, &mut throttle, command),
                        None => log!("Unknown command: {}", line.trim()),
                    },
                    Ok(None) => stdin_open = false,
                    Err(e) => {
                        log!("Failed to read input: {}", e);
                        stdin_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log!("Interrupted");
                driver.quit();
            }
        }
    }

    let snapshot = driver.snapshot();
    let reason = snapshot
        .game_over_reason
        .map(|reason| reason.to_string())
        .unwrap_or_else(|| "ended".to_string());
    log!(
        "Game over ({}): score {}, length {}, {} ticks",
        reason,
        snapshot.score,
        snapshot.len(),
        driver.tick_count()
    );

    let record = final_record(&args.player, &driver);
    if let Err(e) = save_record(&args.records, record) {
        log!("Failed to save score: {}", e);
    }

    Ok(())
}

fn load_settings(args: &Args) -> GameSettings {
    let manager = records::settings_manager(&args.settings);
    let mut settings = manager.get_config().unwrap_or_else(|e| {
        log!("Using default settings: {}", e);
        GameSettings::default()
    });

    if let Some(speed) = args.speed {
        settings.speed_percentage = speed.min(100);
    }
    if args.wrap {
        settings.boundary_mode = BoundaryMode::Wrap;
    }

    if args.save_settings {
        match manager.set_config(&settings) {
            Ok(()) => log!("Settings saved to {}", args.settings.display()),
            Err(e) => log!("Failed to save settings: {}", e),
        }
    }

    settings
}

fn apply_command<S: Scheduler>(
    driver: &mut SnakeDriver<S, ConsoleBroadcaster>,
    throttle: &mut DirectionThrottle,
    command: ConsoleCommand,
) {
    match command {
        ConsoleCommand::Key(KeyCommand::Turn(direction)) => {
            if let Some(direction) = throttle.accept(direction) {
                driver.set_direction(direction);
            }
        }
        ConsoleCommand::Key(KeyCommand::TogglePause) => {
            driver.pause();
        }
        ConsoleCommand::Speed(percentage) => {
            let interval = driver.state().config().interval_for_speed_percentage(percentage);
            let applied = driver.set_speed(interval);
            log!("Speed {}% ({}ms per tick)", percentage, applied.as_millis());
        }
        ConsoleCommand::Boundary(mode) => {
            driver.set_boundary_mode(mode);
            log!("Boundary mode: {:?}", mode);
        }
        ConsoleCommand::Music(enabled) => {
            let broadcaster = driver.broadcaster_mut();
            if let Some(cue) = broadcaster.sound_board_mut().set_bg_music_enabled(enabled) {
                broadcaster.play(cue);
            }
        }
        ConsoleCommand::Quit => driver.quit(),
    }
}

/// Scores the game with the pace and edge policy in effect when it ended.
fn final_record<S: Scheduler, B: GameBroadcaster>(player: &str, driver: &SnakeDriver<S, B>) -> ScoreRecord {
    let snapshot = driver.snapshot();
    let speed_percentage = driver
        .state()
        .config()
        .speed_percentage_for_interval(driver.tick_interval());
    ScoreRecord::new(player, snapshot.score, snapshot.boundary_mode, speed_percentage)
}

fn save_record(path: &Path, record: ScoreRecord) -> Result<(), String> {
    let manager = records::record_book_manager(path);
    let mut book = manager.get_config()?;

    let score = record.score;
    match book.add(record) {
        Some(rank) => {
            manager.set_config(&book)?;
            log!("New high score #{} with {} points", rank + 1, score);
        }
        None => log!("{} points did not make the top {}", score, book.len()),
    }

    for (idx, entry) in book.records().iter().enumerate() {
        log!("{:>2}. {}", idx + 1, entry.display_text());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::games::snake::EngineOptions;
    use common::games::{ManualScheduler, RecordingBroadcaster};

    #[test]
    fn test_final_record_uses_settings_in_effect_at_game_end() {
        let config = GameConfig::default();
        let options = EngineOptions::from_config(&config);
        let mut driver = SnakeDriver::new(
            config.clone(),
            options,
            SessionRng::new(3),
            ManualScheduler::new(),
            RecordingBroadcaster::new(),
        )
        .unwrap();
        driver.start();

        driver.set_speed(config.interval_for_speed_percentage(90));
        driver.set_boundary_mode(BoundaryMode::Wrap);
        driver.quit();

        let record = final_record("Ann", &driver);
        assert_eq!(record.player_name, "Ann");
        assert_eq!(record.score, 0);
        assert_eq!(record.boundary_mode, BoundaryMode::Wrap);
        assert_eq!(record.speed_percentage, 90);
    }
}
