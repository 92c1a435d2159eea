use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::{Backend, CrosstermBackend};

use abstractor_core::{AbstractCache, Catalog, DetailProvider, MeetingApi, config_file};

mod action;
mod app;
mod input;
mod logging;
mod settings;
mod theme;
mod view;

use app::App;
use settings::Settings;

/// Abstractor: search conference talk titles and read their abstracts in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Agenda JSON file listing the talks
    catalog: Option<PathBuf>,

    /// Directory for cached abstracts
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Base URL of the meeting API (paper lookups go to <BASE_URL>/Paper/<key>)
    #[arg(long)]
    base_url: Option<String>,

    /// HTTP timeout for abstract lookups, in seconds (default: none)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Color theme: hacker (default) or modern
    #[arg(long)]
    theme: Option<String>,

    /// Heading shown above the search box
    #[arg(long)]
    title: Option<String>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Resolve config from CLI flags > env vars > config file > defaults
    let file_config = config_file::load_config();
    let settings = Settings::resolve(&args, &file_config, |k| std::env::var(k).ok());
    let _log_guard = logging::init(settings.log_file.as_deref());
    tracing::debug!(?settings, "resolved settings");

    // The catalog must load before the terminal is taken over so errors stay readable.
    let (mut app, cache) = prepare(&settings)?;

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let result = run(&mut terminal, &mut app, &cache).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    tracing::info!("application closed");
    println!("\nApplication closed.");
    Ok(())
}

/// Load the catalog and build the lookup stack. Nothing here touches the
/// terminal.
fn prepare(settings: &Settings) -> anyhow::Result<(App, AbstractCache<MeetingApi>)> {
    let catalog = Catalog::load(&settings.catalog_path)
        .with_context(|| format!("could not start: {}", settings.catalog_path.display()))?;
    let api = MeetingApi::new(settings.base_url.clone(), settings.timeout)
        .context("failed to build HTTP client")?;
    let cache = AbstractCache::new(settings.cache_dir.clone(), api);
    let theme = theme::Theme::by_name(&settings.theme);
    Ok((App::new(catalog, theme, settings.title.clone()), cache))
}

/// Draw, read one event, apply it; repeat until the user exits.
async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    provider: &dyn DetailProvider,
) -> anyhow::Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| view::render(f, &*app))?;

        let evt = match event::read() {
            Ok(evt) => evt,
            Err(e) => {
                // Input stream closed: same as a normal exit.
                tracing::info!(error = %e, "input closed");
                break;
            }
        };
        let action = input::map_event(&evt, app.input_mode());
        app.dispatch(action, provider).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use abstractor_core::LoadError;

    use super::*;

    fn settings_for(dir: &tempfile::TempDir, catalog: &str) -> Settings {
        Settings {
            catalog_path: dir.path().join(catalog),
            cache_dir: dir.path().join("abstracts"),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: None,
            theme: "hacker".to_string(),
            title: "JMM Abstract Search".to_string(),
            log_file: None,
        }
    }

    #[test]
    fn missing_catalog_fails_before_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        let err = prepare(&settings_for(&dir, "absent.json")).err().unwrap();
        assert!(err.to_string().contains("could not start"));
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::Io { .. })
        ));
    }

    #[test]
    fn malformed_catalog_fails_before_the_loop() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("agenda.json"), "{\"title\": ").unwrap();
        let err = prepare(&settings_for(&dir, "agenda.json")).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::Parse { .. })
        ));
    }

    #[test]
    fn valid_catalog_starts_browsing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("agenda.json"),
            r#"[{"title": "Knot Theory", "presno": "1"}]"#,
        )
        .unwrap();
        let (app, cache) = prepare(&settings_for(&dir, "agenda.json")).unwrap();
        assert_eq!(app.filtered_titles(), vec!["Knot Theory"]);
        assert!(!app.should_quit());
        assert_eq!(cache.dir(), dir.path().join("abstracts"));
    }
}
