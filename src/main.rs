pub mod audio;
pub mod cli;
pub mod config;
pub mod controller;
pub mod game;
pub mod media;
pub mod ui;

use clap::Parser;
use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use eframe::egui;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::process::ExitCode;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;
use crate::config::Config;
use crate::controller::joystick::{listing, JoystickInfo};
use crate::controller::{
    list_joysticks, ControllerError, ControllerHandle, ControllerSettings, Guid,
};
use crate::ui::render::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::ui::{GameApp, GameSettings};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup(cli.verbose)?;

    run(cli, list_joysticks, &mut std::io::stdout()).await
}

/// Everything after logging is set up. `list` enumerates the attached
/// joysticks for `--list-joysticks`, which exits before any configuration
/// is read or written.
async fn run(
    cli: Cli,
    list: impl FnOnce() -> Result<Vec<JoystickInfo>, ControllerError>,
    out: &mut impl Write,
) -> Result<ExitCode> {
    if cli.list_joysticks {
        let joysticks = list().wrap_err("Failed to enumerate joysticks")?;
        for line in listing(&joysticks) {
            writeln!(out, "{}", line)?;
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = setup_config(&cli).await?;

    let joystick = config
        .joystick
        .as_deref()
        .map(str::parse::<Guid>)
        .transpose()
        .wrap_err("Invalid joystick GUID in the configuration")?;

    let controller_settings = ControllerSettings {
        bindings: config.button_map.clone(),
        joystick,
    };

    let (controller_output_sender, controller_output_receiver) = mpsc::channel(1000);

    let controller = match ControllerHandle::spawn(controller_settings, controller_output_sender) {
        Ok(controller) => controller,
        Err(ControllerError::SelectionError(e)) => {
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(eyre!("Failed to spawn controller: {}", e)),
    };

    let active = controller.joystick();
    writeln!(out, "Using the joystick: {} {}", active.name, active.guid)?;

    let rng = match cli.seed {
        Some(seed) => {
            info!("Seeding the game with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let game_settings = GameSettings {
        fps: config.fps,
        allow_arrow_keys: config.allow_arrow_keys,
        media_dir: config.media_dir.clone().or_else(media::default_media_dir),
    };
    debug!("Game settings: {:?}", game_settings);

    let mut native_options = eframe::NativeOptions::default();
    native_options.viewport = egui::ViewportBuilder::default()
        .with_title("dance-cat-to-mouse")
        .with_inner_size([CANVAS_WIDTH, CANVAS_HEIGHT])
        .with_fullscreen(config.fullscreen);

    let start = Instant::now();
    let window = controller
        .while_collecting(|cancel| {
            eframe::run_native(
                "dance-cat-to-mouse",
                native_options,
                Box::new(move |cc| {
                    Ok(Box::new(GameApp::new(
                        cc,
                        game_settings,
                        controller_output_receiver,
                        cancel,
                        rng,
                    )))
                }),
            )
        })
        .await;
    debug!("Game ran for {:?}", start.elapsed());
    window.map_err(|e| eyre!("Failed to run the game window: {}", e))?;

    writeln!(out, "Quitting the game...")?;
    writeln!(out, "Goodbye.")?;

    Ok(ExitCode::SUCCESS)
}

fn setup(verbose: bool) -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    setup_logging_env(if verbose { Level::DEBUG } else { Level::INFO });
    Ok(())
}

fn setup_logging_env(level: Level) {
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .pretty()
        .init();
}

async fn setup_config(cli: &Cli) -> Result<Config> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };

    let mut config = Config::load_or_init(&path)
        .await
        .wrap_err_with(|| format!("Failed to load the configuration {}", path.display()))?;
    cli.apply(&mut config);

    Ok(config)
}
