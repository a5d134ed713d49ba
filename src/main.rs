/// Entry point: load config and assets, then run the frame loop.

mod config;
mod domain;
mod error;
mod sim;
mod ui;

use std::fs::File;
use std::process::ExitCode;

use config::{GameConfig, LogConfig};
use error::StartupError;
use sim::assets;
use sim::session::GameSession;
use ui::input::KeyboardInput;
use ui::present::FramePresenter;
use ui::terminal::TerminalDisplay;

fn main() -> ExitCode {
    let config = GameConfig::load();
    init_logging(&config.log);
    match &config.source {
        Some(path) => log::info!("config: {}", path.display()),
        None => log::info!("config: defaults"),
    }

    match run(&config) {
        Ok(hiscore) => {
            println!();
            println!("Thanks for playing Cyber Heist!");
            println!("High Score: {hiscore}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins over the configured level.
fn init_logging(cfg: &LogConfig) {
    let env = env_logger::Env::default().default_filter_or(cfg.level.as_str());
    let mut builder = env_logger::Builder::from_env(env);

    // The terminal is in raw mode while the game runs; stderr output would
    // land in the middle of the picture unless redirected.
    if let Some(path) = &cfg.file {
        match File::create(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Warning: cannot open log file {}: {e}", path.display()),
        }
    }
    builder.init();
}

/// Returns the session's high score.
fn run(config: &GameConfig) -> Result<u32, StartupError> {
    let palette = assets::load_palette(&config.assets.palette)?;
    let sprites = assets::load_sprites(&config.assets)?;

    let mut presenter = FramePresenter::new(TerminalDisplay::new(&config.display))?;
    let mut input = KeyboardInput::new(&config.gamepad);
    let mut session = GameSession::new();

    // Text mode is restored however the game ends.
    let result = presenter
        .start(&palette.to_vga())
        .and_then(|()| presenter.run(&mut session, &sprites, &mut input));
    let restored = presenter.shutdown();

    result?;
    restored?;
    Ok(session.hiscore)
}
