mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use skimap::config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = AppConfig::from_env();

    let headless = args.headless || !is_terminal();
    init_logging(&config, headless)?;
    for warning in &config.warnings {
        log::warn!("Ignoring configuration value: {warning}");
    }
    log::info!(
        "Starting skimap ({} layout, {})",
        config.layout.as_str(),
        if headless { "headless" } else { "interactive" }
    );

    if headless {
        return event::run_headless(&config, args.json).await;
    }

    let mut app = App::new(config);

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        terminal::cleanup_terminal_state(true, true);
        default_hook(info);
    }));

    let mut terminal = terminal::setup_terminal()?;

    let result = event::run(&mut terminal, &mut app).await;

    // Restore even when the loop failed.
    terminal::cleanup_terminal_state(true, true);

    result
}

/// Headless runs log to stderr; the interactive UI logs to a file so the
/// alternate screen stays clean.
fn init_logging(config: &AppConfig, headless: bool) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(config.log_level)
        .format_timestamp_millis();

    if !headless {
        let file = std::fs::File::create(&config.log_file)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
