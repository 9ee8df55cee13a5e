use std::process::ExitCode;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};

use tricube_engine::config::{AppConfig, WindowConfig};
use tricube_engine::logging::{LoggingConfig, init_logging};
use tricube_engine::platform::FullscreenFallback;
use tricube_engine::scene::ProjectionMode;
use tricube_engine::window::Runtime;

fn cli() -> Command {
    Command::new("tricube")
        .about("Three lit cubes in a native window")
        .arg(
            Arg::new("fullscreen")
                .long("fullscreen")
                .help("Start in fullscreen at the window size")
                .action(ArgAction::SetTrue)
                .conflicts_with("windowed"),
        )
        .arg(
            Arg::new("windowed")
                .long("windowed")
                .help("Start in a decorated window (default)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("on-fallback")
                .long("on-fallback")
                .value_name("POLICY")
                .help("What to do when fullscreen is unavailable")
                .value_parser(["ask", "windowed", "abort"])
                .default_value("ask"),
        )
        .arg(
            Arg::new("orthographic")
                .long("orthographic")
                .help("Start with the orthographic projection; space switches to perspective")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .value_name("FILTER")
                .help("Log filter, overrides RUST_LOG"),
        )
}

fn app_config(matches: &ArgMatches) -> AppConfig {
    let fullscreen = matches.get_flag("fullscreen") && !matches.get_flag("windowed");

    let fallback = match matches.get_one::<String>("on-fallback").map(String::as_str) {
        Some("windowed") => FullscreenFallback::Windowed,
        Some("abort") => FullscreenFallback::Abort,
        _ => FullscreenFallback::Ask,
    };

    let window = WindowConfig {
        fullscreen,
        ..WindowConfig::new("tricube", 800, 600, 32, false)
    };

    AppConfig {
        projection: ProjectionMode::from_perspective_flag(!matches.get_flag("orthographic")),
        ..AppConfig::default().with_window(window).with_fallback(fallback)
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let config = app_config(matches);
    log::info!(
        "starting {}x{}x{} ({})",
        config.window.width,
        config.window.height,
        config.window.bits,
        if config.window.fullscreen { "fullscreen" } else { "windowed" }
    );

    Runtime::run(config)
}

fn main() -> ExitCode {
    let matches = cli().get_matches();

    init_logging(LoggingConfig {
        env_filter: matches.get_one::<String>("log").cloned(),
        ..LoggingConfig::default()
    });

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
