//! giflens - Terminal GIF Search
//!
//! Search Giphy from the terminal with debounced queries, pagination and search history.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgMatches, Command};
use giflens::config::{Config, ConfigOverrides};
use giflens::render::ui::{TerminalUI, ThemeName};
use giflens::Application;
use std::fs::File;
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    init_logging(matches.get_one::<PathBuf>("log-file").map(PathBuf::as_path))?;

    let config = Config::load(overrides_from(&matches)).context("failed to load configuration")?;
    log::info!(
        "starting giflens {} against {} (debounce {:?})",
        giflens::VERSION,
        config.endpoint,
        config.debounce_delay
    );

    let ui_renderer = Box::new(TerminalUI::with_theme(config.theme.theme())?);
    let mut app = Application::new(&config, ui_renderer)?;

    app.run().await?;

    Ok(())
}

fn cli() -> Command {
    Command::new("giflens")
        .version(giflens::VERSION)
        .about("Search Giphy from the terminal")
        .long_about(
            "giflens searches Giphy as you type. Queries are sent once typing pauses, results \
             are paged ten at a time, and searched terms are kept in a history dropdown.\n\n\
             The API key is read from --api-key, GIPHY_API_KEY (a .env file works too) or the \
             config file.",
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .value_name("KEY")
                .help("Giphy API key"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Config file (default: <config dir>/giflens/config.toml)"),
        )
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .value_name("URL")
                .help("Search endpoint URL"),
        )
        .arg(
            Arg::new("debounce-ms")
                .long("debounce-ms")
                .value_name("MILLIS")
                .value_parser(value_parser!(u64))
                .help("Quiet period before a typed term is searched"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("NAME")
                .value_parser(["default", "monochrome", "high-contrast"])
                .help("Color theme"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf))
                .help("Write logs to this file (filtered by RUST_LOG, default info)"),
        )
}

fn overrides_from(matches: &ArgMatches) -> ConfigOverrides {
    ConfigOverrides {
        config_path: matches.get_one::<PathBuf>("config").cloned(),
        api_key: matches.get_one::<String>("api-key").cloned(),
        endpoint: matches.get_one::<String>("endpoint").cloned(),
        debounce_ms: matches.get_one::<u64>("debounce-ms").copied(),
        theme: matches
            .get_one::<String>("theme")
            .and_then(|name| name.parse::<ThemeName>().ok()),
    }
}

/// The terminal belongs to the UI, so logs only go to a file unless RUST_LOG asks otherwise.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
