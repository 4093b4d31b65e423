pub mod app;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod controller;
pub mod errors;
pub mod fsm;
pub mod hotkeys;
pub mod live;
pub mod log_retention;
pub mod logging;
pub mod parallax;
pub mod rng;
pub mod runtime;
pub mod tui;
pub mod types;

use app::{AppSignal, QuestApp};
use clap::{error::ErrorKind, Parser};
use config::{load_config, AppConfig, CliOverrides};
use controller::QuestController;
use errors::QuestError;
use logging::{structured_fallback_line, JsonlLogger};
use rng::rng_for_seed;
use runtime::ProductionRuntime;
use tui::render_quest;
use types::RunMode;

#[derive(Debug, Clone, Parser)]
#[command(name = "chef-quest")]
#[command(about = "Chef Quest: a recipe treasure hunt kiosk for the terminal")]
pub struct Cli {
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,
    /// Replay a key sequence instead of reading the keyboard, e.g. "1sfffu".
    #[arg(long)]
    pub keys: Option<String>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub width: Option<u16>,
    #[arg(long)]
    pub height: Option<u16>,
    #[arg(long, default_value_t = false)]
    pub no_log: bool,
}

pub fn run() -> Result<i32, QuestError> {
    let args = std::env::args_os().collect::<Vec<_>>();
    let cwd = std::env::current_dir().map_err(|e| QuestError::Io(e.to_string()))?;
    let runtime = ProductionRuntime::new();
    run_with_runtime(&args, &cwd, &runtime)
}

pub fn run_with_runtime(
    args: &[std::ffi::OsString],
    cwd: &std::path::Path,
    runtime: &ProductionRuntime,
) -> Result<i32, QuestError> {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{error}");
                return Ok(0);
            }
            _ => return Err(QuestError::Cli(error.to_string())),
        },
    };

    let overrides = CliOverrides {
        config_path: cli.config.clone(),
        seed: cli.seed,
        width: cli.width,
        height: cli.height,
        no_log: cli.no_log,
    };
    let cfg = load_config(&overrides, cwd, runtime.file_system.as_ref())?;
    let mut app = build_app(&cfg);

    let mode = if cli.keys.is_some() {
        RunMode::Scripted
    } else if runtime.terminal.stdin_is_tty() {
        RunMode::Interactive
    } else {
        RunMode::Snapshot
    };

    match mode {
        RunMode::Scripted => {
            let keys = cli.keys.as_deref().unwrap_or_default();
            run_scripted(&mut app, &cfg, runtime, keys)?;
        }
        RunMode::Interactive => {
            live::run_interactive(
                &mut app,
                runtime.process_runner.as_ref(),
                cfg.surface.parallax,
            )?;
        }
        RunMode::Snapshot => {
            draw_frame(&app, &cfg, runtime)?;
            runtime.terminal.write_line(&structured_fallback_line(
                &app.controller.session(),
                "non-interactive terminal, showing start screen",
            ))?;
        }
    }

    Ok(0)
}

pub fn build_app(cfg: &AppConfig) -> QuestApp {
    let mut controller = QuestController::new(rng_for_seed(cfg.quest.seed));
    if cfg.logging.enabled {
        let mut logger = JsonlLogger::new(&cfg.logging.path);
        logger.max_payload_bytes = cfg.logging.max_payload_bytes;
        logger.budget_bytes = cfg.logging.budget_bytes;
        controller = controller.with_logger(logger);
    }
    QuestApp::new(controller, cfg.contact.clone()).with_parallax(cfg.surface.parallax)
}

/// Feeds `keys` through the same dispatch as the live loop, drawing a frame
/// after every key. Separators (whitespace and commas) are skipped.
pub fn run_scripted(
    app: &mut QuestApp,
    cfg: &AppConfig,
    runtime: &ProductionRuntime,
    keys: &str,
) -> Result<usize, QuestError> {
    draw_frame(app, cfg, runtime)?;
    let mut handled = 0;
    for key in keys.chars().filter(|ch| !ch.is_whitespace() && *ch != ',') {
        handled += 1;
        let signal = app.handle_key(key, runtime.process_runner.as_ref())?;
        if signal == AppSignal::Quit {
            break;
        }
        draw_frame(app, cfg, runtime)?;
    }
    runtime.terminal.write_line(&structured_fallback_line(
        &app.controller.session(),
        &format!("script complete keys={handled}"),
    ))?;
    Ok(handled)
}

fn draw_frame(
    app: &QuestApp,
    cfg: &AppConfig,
    runtime: &ProductionRuntime,
) -> Result<(), QuestError> {
    let frame = render_quest(&app.view(), cfg.surface.width, cfg.surface.height)?;
    runtime.terminal.draw(&frame)
}
