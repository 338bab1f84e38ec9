mod app;
mod capture;
mod config;
mod modules;
mod theme;
mod ui;
mod voice;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup, Section};

#[derive(Parser, Debug)]
#[command(name = "braintwo")]
#[command(version = "0.1.0")]
#[command(about = "A terminal quick-capture inbox that files brain dumps as tasks, events and notes")]
struct Args {
    /// Classify a piece of text and print the record as JSON
    #[arg(short, long, value_name = "TEXT")]
    classify: Option<String>,

    /// Run one voice capture session, classify the transcript, print JSON
    #[arg(long)]
    voice: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Handle CLI-only commands
    if let Some(text) = args.classify {
        return print_classification(&text);
    }

    if args.voice {
        return classify_voice().await;
    }

    // Run TUI
    run_tui().await
}

fn print_classification(text: &str) -> Result<()> {
    let record = capture::classify(text);
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

async fn classify_voice() -> Result<()> {
    let config = config::AppConfig::load().unwrap_or_default();
    let transcript = voice::capture(&config).await?;
    print_classification(&transcript)
}

async fn run_tui() -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new();

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        // 'q' quits outside the capture box (there it is text)
                        KeyCode::Char('q')
                            if app.popup == Popup::None && app.section != Section::Capture =>
                        {
                            return Ok(())
                        }
                        KeyCode::Char('c')
                            if key.modifiers.contains(event::KeyModifiers::CONTROL) =>
                        {
                            return Ok(())
                        }
                        _ => {
                            // Handle key and catch any errors to prevent crashes
                            if let Err(e) = app.handle_key(key) {
                                app.status_message = Some(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }

        // Periodic refresh (status timeout, voice session completion)
        let _ = app.tick().await;
    }
}

/// Desktop notification, best effort
pub(crate) fn notify(summary: &str, body: &str) -> Result<()> {
    notify_rust::Notification::new()
        .summary(summary)
        .body(body)
        .icon("document-new")
        .show()?;
    Ok(())
}
