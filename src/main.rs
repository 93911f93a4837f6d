//! stepform - stepped forms in the terminal
//!
//! A Ratatui-based wizard that walks through a multi-step form, gating each
//! step on its required fields and handing the finished form to a sink.

mod app;
mod config;
mod platform;
mod state;
mod submit;
mod ui;

use anyhow::{anyhow, Result};
use app::App;
use config::{SinkKind, WizardConfig};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use state::{forms::catalog, AppState, SteppedForm};
use std::fs::{self, File};
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use submit::{JsonFileSink, LogSink, SubmitSink};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = WizardConfig::load()?;
    let mut app = build_app(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

/// Log to `<data dir>/stepform.log`; the terminal belongs to the UI
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stepform=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    let log_file = WizardConfig::data_dir().and_then(|dir| {
        fs::create_dir_all(&dir).ok()?;
        File::create(dir.join("stepform.log")).ok()
    });
    match log_file {
        Some(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}

fn build_app(config: &WizardConfig) -> Result<App> {
    let definition = catalog::by_name(config.form_name()).ok_or_else(|| {
        anyhow!(
            "unknown form '{}' (available: {})",
            config.form_name(),
            catalog::FORM_NAMES.join(", ")
        )
    })?;
    let form = SteppedForm::new(definition, config.revalidation())?;

    let sink: Box<dyn SubmitSink> = match config.sink_kind() {
        SinkKind::File => Box::new(JsonFileSink::new(config.submissions_dir())),
        SinkKind::Log => Box::new(LogSink),
    };
    tracing::info!(
        "opening form '{}' ({}, {})",
        form.title(),
        form.revalidation().label(),
        sink.describe()
    );

    Ok(App::new(AppState::new(form), sink))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Handle crossterm events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Global quit: Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Ok(());
                }

                // Handle key event
                app.handle_key(key).await?;
            }
        }

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_app_from_config() {
        let config = WizardConfig {
            form: Some("Onboarding".to_string()),
            sink: Some(SinkKind::Log),
            ..Default::default()
        };
        let app = build_app(&config).unwrap();
        assert_eq!(app.state.form.title(), "Onboarding");
        assert_eq!(app.sink.describe(), "logging submissions");
    }

    #[test]
    fn test_build_app_rejects_unknown_form() {
        let config = WizardConfig {
            form: Some("survey".to_string()),
            ..Default::default()
        };
        let err = build_app(&config).err().unwrap();
        assert!(err.to_string().contains("checkout, onboarding"));
    }
}
