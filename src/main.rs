//! Grid Breakout - terminal entry point
//!
//! Usage: `grid-breakout [CONFIG.json] [reset|terminate]`. The optional
//! loss policy overrides the one in the config. Log output goes to stderr;
//! set `RUST_LOG` and redirect stderr to a file to see it while playing.

use anyhow::{Context, Result};

use grid_breakout::{Config, LossPolicy};

#[cfg(unix)]
fn main() -> Result<()> {
    use grid_breakout::platform::FrameClock;
    use grid_breakout::platform::terminal::Terminal;
    use grid_breakout::{GameState, Scene};

    env_logger::init();

    let config = load_config()?;
    let seed: u64 = rand::random();
    log::info!("Grid Breakout starting ({}x{}, seed {})", config.columns, config.rows, seed);

    let mut state = GameState::new(config, seed).context("invalid config")?;
    let mut clock = FrameClock::new(state.config().frame_rate);
    let mut terminal = Terminal::open().context("failed to open terminal")?;

    loop {
        let input = terminal.poll_input();
        if state.update(&input) {
            break;
        }
        terminal.draw(&Scene::capture(&state)).context("failed to draw frame")?;
        clock.tick();
    }

    drop(terminal);
    log::info!("Exited after {} frames (seed {})", state.frame_count(), state.seed());
    Ok(())
}

#[cfg(not(unix))]
fn main() -> Result<()> {
    env_logger::init();
    let config = load_config()?;
    log::error!(
        "The terminal front-end needs a unix terminal; config {}x{} loaded but nothing to run",
        config.columns,
        config.rows
    );
    Ok(())
}

/// Defaults or a JSON file, plus an optional loss policy override
fn load_config() -> Result<Config> {
    let mut path = None;
    let mut loss_policy = None;
    for arg in std::env::args().skip(1) {
        match LossPolicy::from_str(&arg) {
            Some(policy) => loss_policy = Some(policy),
            None => path = Some(arg),
        }
    }

    let mut config = match path {
        Some(path) => {
            Config::load(&path).with_context(|| format!("failed to load config from {path}"))?
        }
        None => {
            log::info!("Using default config");
            Config::default()
        }
    };
    if let Some(policy) = loss_policy {
        log::info!("Loss policy: {}", policy.as_str());
        config.loss_policy = policy;
    }
    Ok(config)
}
