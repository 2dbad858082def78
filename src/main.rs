//! Keyweb: a keyboard-first minimal web browser shell.
//!
//! Opens one window per positional argument and then runs a line-driven
//! console shell over the first window: each stdin line is committed through
//! the command bar.
//!
//! - `?text` prints the inline completion and suggestions for `text`
//! - `!keys` presses a key sequence, e.g. `!Ctrl+G Ctrl+G`
//! - `:windows` lists windows, `:window N` switches to window `N`

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use keyweb::app::App;
use keyweb::managers::history_store::HistoryStore;
use keyweb::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use keyweb::types::keys::KeySequence;
use keyweb::types::settings::BrowserSettings;
use keyweb::ui::content_view::{ContentView, HeadlessView};

/// Keyboard-first minimal web browser
#[derive(Parser, Debug)]
#[command(name = "keyweb")]
#[command(version, about, long_about = None)]
struct Args {
    /// URLs or file paths to open, one window each
    #[arg(value_name = "URL|PATH")]
    targets: Vec<String>,

    /// Open windows in incognito mode (nothing is written to history)
    #[arg(short, long)]
    incognito: bool,

    /// Settings file (defaults to `settings.json` in the config directory)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// History database (defaults to `history` in the data directory)
    #[arg(long, value_name = "PATH")]
    history: Option<PathBuf>,
}

/// Logs to stderr, filtered by `RUST_LOG`.
fn setup_logging() {
    let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("keyweb={default_level}")));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn load_settings(path: Option<PathBuf>) -> BrowserSettings {
    let mut engine = SettingsEngine::new(path.map(|p| p.to_string_lossy().to_string()));
    match engine.load() {
        Ok(settings) => settings,
        Err(e) => {
            warn!(path = engine.get_config_path(), error = %e, "using default settings");
            BrowserSettings::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging();

    let settings = load_settings(args.settings);
    let history = match args.history {
        Some(path) => HistoryStore::open(path),
        None => HistoryStore::open_default(),
    }
    .context("history store is required")?;

    let mut app = App::new(history, settings, Box::new(|_incognito| HeadlessView::new()));
    app.startup(&args.targets, args.incognito);
    info!(windows = app.windows().len(), "started");

    run_console(&mut app)?;

    app.shutdown();
    Ok(())
}

fn run_console(app: &mut App<HeadlessView>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut current = 0;

    print_status(app, current);
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        if line == ":windows" {
            for (i, window) in app.windows().iter().enumerate() {
                println!("{} {} {}", if i == current { "*" } else { " " }, i, window.committed_url());
            }
            continue;
        }
        if let Some(index) = line.strip_prefix(":window ") {
            match index.trim().parse::<usize>() {
                Ok(i) if i < app.windows().len() => current = i,
                _ => println!("no such window: {}", index.trim()),
            }
            print_status(app, current);
            continue;
        }

        let Some(window) = app.window_mut(current) else {
            println!("no window open");
            break;
        };

        if let Some(text) = line.strip_prefix('?') {
            window.open_bar("", "");
            window.text_edited(text);
            let bar = window.bar();
            println!("{}", bar.text());
            for row in bar.suggestions().items().iter().take(bar.suggestions().visible_rows()) {
                println!("  {}", row);
            }
            window.close_bar();
        } else if let Some(keys) = line.strip_prefix('!') {
            match keys.parse::<KeySequence>() {
                Ok(KeySequence::Single(chord)) => {
                    window.handle_key(chord);
                }
                Ok(KeySequence::Double(first, second)) => {
                    window.handle_key(first);
                    window.handle_key(second);
                }
                Err(e) => println!("{}", e),
            }
        } else {
            window.open_bar("", line);
            window.commit(line);
        }

        app.pump();
        print_status(app, current);
        stdout.flush().context("flushing stdout")?;
    }
    Ok(())
}

fn print_status(app: &App<HeadlessView>, current: usize) {
    if let Some(window) = app.windows().get(current) {
        println!("[{}] {} <{}>", current, window.title(), window.view().url());
    }
}
