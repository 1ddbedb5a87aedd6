//! Dinoish headless runner
//!
//! Drives a session from a stepped clock, optionally with the autopilot at the
//! keys, and prints how the run went. Rendering hosts embed the library instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result, bail};
    use clap::Parser;
    use serde::Serialize;

    use dinoish::autopilot::Autopilot;
    use dinoish::leaderboard::{InMemoryLeaderboard, PeriodKind, ReportStatus};
    use dinoish::persistence::{JsonFileStore, MemoryStore, ScoreStore};
    use dinoish::platform::{Clock, ManualClock};
    use dinoish::sim::{GameEvent, GameState, Intent, RunState};
    use dinoish::{Session, Settings};

    #[derive(Parser, Debug)]
    #[command(name = "dinoish")]
    #[command(about = "Run the dino runner simulation headless")]
    pub struct Cli {
        /// Spawn RNG seed
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Stop after this much simulated time
        #[arg(long, default_value_t = 60.0)]
        seconds: f64,
        /// Nominal frame rate of the stepped clock
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        /// Vary frame spacing by up to this many milliseconds
        #[arg(long, default_value_t = 0.0)]
        jitter_ms: f64,
        /// JSON file holding the best score (in-memory if omitted)
        #[arg(long)]
        best_file: Option<PathBuf>,
        /// JSON file with player preferences
        #[arg(long)]
        settings_file: Option<PathBuf>,
        /// Nickname for leaderboard submissions (saved to the settings file)
        #[arg(long)]
        name: Option<String>,
        /// Leaderboard period: all, daily or weekly
        #[arg(long, value_parser = parse_period)]
        period: Option<PeriodKind>,
        /// Print a JSON summary instead of text
        #[arg(long)]
        json: bool,
        /// Just start the run and let it play out with no input
        #[arg(long)]
        no_autopilot: bool,
    }

    fn parse_period(s: &str) -> Result<PeriodKind, String> {
        PeriodKind::from_str(s).ok_or_else(|| format!("unknown period {s:?} (all, daily, weekly)"))
    }

    #[derive(Serialize)]
    struct Summary {
        seed: u64,
        frames: u64,
        jumps: u64,
        spawned: u64,
        game_over: bool,
        final_state: serde_json::Value,
        leaderboard: Vec<String>,
    }

    pub fn run(cli: Cli) -> Result<()> {
        if cli.fps.is_nan() || cli.fps <= 0.0 || cli.fps.is_infinite() {
            bail!("--fps must be a positive number, got {}", cli.fps);
        }
        if cli.seconds.is_nan() || cli.seconds < 0.0 {
            bail!("--seconds must not be negative, got {}", cli.seconds);
        }

        let mut settings = match &cli.settings_file {
            Some(path) => Settings::load_from(path),
            None => Settings::default(),
        };
        if let Some(name) = &cli.name {
            settings.set_player_name(name);
        }
        if let Some(period) = cli.period {
            settings.period = period;
        }
        if let (Some(path), true) = (&cli.settings_file, cli.name.is_some() || cli.period.is_some()) {
            settings
                .save_to(path)
                .with_context(|| format!("saving settings to {}", path.display()))?;
        }

        match &cli.best_file {
            Some(path) => play(&cli, &settings, JsonFileStore::new(path)),
            None => play(&cli, &settings, MemoryStore::default()),
        }
    }

    fn play<S: ScoreStore>(cli: &Cli, settings: &Settings, store: S) -> Result<()> {
        log::info!("Dinoish headless run, seed {}", cli.seed);

        let mut session = Session::new(GameState::new(cli.seed), store);

        let reporter = settings
            .reporter(InMemoryLeaderboard::new())
            .map(|(reporter, status)| {
                let (commands, handle) = reporter.spawn();
                session.attach_reporter(commands);
                (handle, status)
            });

        let autopilot = (!cli.no_autopilot).then(Autopilot::default);
        let mut clock = ManualClock::new(1000.0 / cli.fps).with_jitter(cli.jitter_ms);
        let limit_ms = cli.seconds * 1000.0;

        session.apply(Intent::Start);
        let (mut frames, mut jumps, mut spawned) = (0u64, 0u64, 0u64);
        while session.state().phase == RunState::Running {
            let now = clock.now_ms();
            if now > limit_ms {
                break;
            }
            if let Some(bot) = &autopilot {
                for intent in bot.next_intents(session.state()) {
                    if session.apply(intent).contains(&GameEvent::Jumped) {
                        jumps += 1;
                    }
                }
            }
            for event in session.frame(now) {
                if let GameEvent::ObstacleSpawned { .. } = event {
                    spawned += 1;
                }
            }
            frames += 1;
        }

        if let Some(status) = session.status() {
            log::warn!("{}", status);
        }

        let game_over = session.state().phase == RunState::GameOver;
        let snapshot = session.snapshot();
        let (score, best) = (snapshot.score, snapshot.best);
        let final_state = serde_json::to_value(&snapshot)?;

        let mut leaderboard = Vec::new();
        drop(session);
        if let Some((handle, status)) = reporter {
            // the session held the only command sender, so the reporter winds down
            handle
                .join()
                .map_err(|_| anyhow::anyhow!("score reporter thread panicked"))?;
            for update in status.try_iter() {
                match update {
                    ReportStatus::Loaded(rows) => {
                        leaderboard = rows
                            .iter()
                            .enumerate()
                            .map(|(i, row)| format!("{}. {} {}", i + 1, row.display_name(), row.score))
                            .collect();
                    }
                    other => {
                        let message = other.message();
                        if !message.is_empty() {
                            log::info!("{}", message);
                        }
                    }
                }
            }
        }

        if cli.json {
            let summary = Summary {
                seed: cli.seed,
                frames,
                jumps,
                spawned,
                game_over,
                final_state,
                leaderboard,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            let outcome = if game_over { "game over" } else { "still running" };
            println!("seed {}: {} after {} frames", cli.seed, outcome, frames);
            println!("score {}  best {}", score, best);
            println!("{} jumps, {} obstacles spawned", jumps, spawned);
            for line in &leaderboard {
                println!("{line}");
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    native::run(native::Cli::parse())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The page loads the library and drives `dinoish::web::WebGame`
}
