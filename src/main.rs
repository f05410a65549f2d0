mod app;
mod config;
mod dataset;
mod lifecycle;
mod partition;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Script};
use config::Config;
use dataset::Library;
use lifecycle::{AppState, LifecycleDispatcher, ReloadResult, ReloadSubscription};
use partition::Section;
use ui::layout::Direction;

#[derive(Parser, Debug)]
#[command(name = "kana")]
#[command(about = "Hiragana, Katakana and Kanji charts in the terminal")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long)]
    config: Option<String>,

    /// Chart to open (overrides appearance.start_script)
    #[arg(long, short, value_enum)]
    script: Option<Script>,

    /// Print the sections of the chart and exit
    #[arg(long)]
    sections: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kana_chart=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    // Load config
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_path)?;
    if let Some(script) = cli.script {
        config.appearance.start_script = script;
    }

    // Load datasets
    let library = Library::load(&config.datasets)?;
    tracing::info!(
        "Loaded {} hiragana, {} katakana, {} kanji",
        library.hiragana.len(),
        library.katakana.len(),
        library.kanji.len()
    );

    for (name, empty) in [
        ("hiragana", library.hiragana.is_empty()),
        ("katakana", library.katakana.is_empty()),
        ("kanji", library.kanji.is_empty()),
    ] {
        if empty {
            tracing::warn!("The {} chart has no entries", name);
        }
    }

    if cli.sections {
        for line in format_sections(&library, config.appearance.start_script) {
            println!("{line}");
        }
        return Ok(());
    }

    // Background reload only makes sense for datasets read from disk
    let mut reload = (config.reload.enabled && config.datasets.has_files()).then(|| {
        ReloadSubscription::new(config.datasets.clone(), config.reload.interval())
    });

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(library, config);

    // Run main loop
    let result = match reload.as_mut() {
        Some((subscription, rx)) => {
            subscription.start();
            let mut lifecycle = LifecycleDispatcher::new(AppState::Foreground);
            lifecycle.register(subscription);
            run_app(&mut terminal, &mut app, &mut lifecycle, Some(rx)).await
        }
        None => {
            let mut lifecycle = LifecycleDispatcher::new(AppState::Foreground);
            run_app(&mut terminal, &mut app, &mut lifecycle, None).await
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

fn format_sections(library: &Library, script: Script) -> Vec<String> {
    fn describe<A>(sections: &[Section<'_, A>]) -> Vec<String> {
        sections
            .iter()
            .enumerate()
            .map(|(i, section)| {
                if section.is_empty() {
                    return format!("section {}: (empty)", i + 1);
                }
                let first = section.entries.first().map(|e| e.label.as_str()).unwrap_or("-");
                let last = section.entries.last().map(|e| e.label.as_str()).unwrap_or("-");
                format!(
                    "section {}: {} entries at {} columns, {} rows ({}..{})",
                    i + 1,
                    section.len(),
                    section.columns,
                    section.rows(),
                    first,
                    last
                )
            })
            .collect()
    }

    match script {
        Script::Hiragana => describe(&library.hiragana.sections()),
        Script::Katakana => describe(&library.katakana.sections()),
        Script::Kanji => describe(&library.kanji.sections()),
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    lifecycle: &mut LifecycleDispatcher<'_>,
    mut reloads: Option<&mut UnboundedReceiver<ReloadResult>>,
) -> Result<()> {
    loop {
        // Apply finished reloads
        if let Some(rx) = reloads.as_deref_mut() {
            while let Ok(result) = rx.try_recv() {
                match result {
                    Ok(library) => {
                        app.replace_library(library);
                        app.set_notice(None);
                    }
                    Err(e) => {
                        // stderr would draw over the TUI; the notice reports it
                        tracing::debug!("Dataset reload failed: {}", e);
                        app.set_notice(Some(format!("Reload failed: {e}")));
                    }
                }
            }
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(std::time::Duration::from_millis(100))? {
            // Let the reload task make progress
            tokio::task::yield_now().await;
            continue;
        }

        match event::read()? {
            Event::FocusGained => lifecycle.dispatch(AppState::Foreground),
            Event::FocusLost => lifecycle.dispatch(AppState::Background),
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    KeyCode::Up | KeyCode::Char('k') => app.step(Direction::Up),
                    KeyCode::Down | KeyCode::Char('j') => app.step(Direction::Down),
                    KeyCode::Left | KeyCode::Char('h') => app.step(Direction::Left),
                    KeyCode::Right | KeyCode::Char('l') => app.step(Direction::Right),
                    KeyCode::Home | KeyCode::Char('g') => app.home(),
                    KeyCode::End | KeyCode::Char('G') => app.end(),
                    KeyCode::Tab => app.next_script(),
                    KeyCode::BackTab => app.previous_script(),
                    KeyCode::Char('1') => app.set_script(Script::Hiragana),
                    KeyCode::Char('2') => app.set_script(Script::Katakana),
                    KeyCode::Char('3') => app.set_script(Script::Kanji),
                    KeyCode::Char(' ') | KeyCode::Enter => app.toggle_reveal(),
                    KeyCode::Char('r') => app.hide_all(),
                    _ => {}
                }
            }
            _ => {}
        }
    }
}
