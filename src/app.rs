//! Application state and core logic

use crate::platform::STEP_MODIFIER;
use crate::state::{AppState, NavButton, View};
use crate::submit::SubmitSink;
use crate::ui::forms::ScreenRegistry;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Where finished forms go
    pub sink: Box<dyn SubmitSink>,
    /// Screens used to draw each step
    pub screens: ScreenRegistry,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    pub fn new(state: AppState, sink: Box<dyn SubmitSink>) -> Self {
        Self {
            state,
            sink,
            screens: ScreenRegistry::builtin(),
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle keyboard input
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        match self.state.current_view {
            View::Wizard => self.handle_wizard_key(key).await?,
            View::Submitted => self.handle_submitted_key(key)?,
        }
        Ok(())
    }

    async fn handle_wizard_key(&mut self, key: KeyEvent) -> Result<()> {
        // Clear any status messages on key press
        self.state.status_message = None;
        let on_action_panel = self.state.is_buttons_row_active();

        match key.code {
            // Step shortcuts (work from anywhere)
            KeyCode::Char('n') if key.modifiers.contains(STEP_MODIFIER) => {
                self.state.step_next();
            }
            KeyCode::Char('p') if key.modifiers.contains(STEP_MODIFIER) => {
                self.state.step_prev();
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit().await;
            }
            KeyCode::Char(d @ '1'..='9') if key.modifiers.contains(KeyModifiers::ALT) => {
                let target = d as usize - '1' as usize;
                self.state.step_to(target);
            }
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Down => self.state.next_form_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_form_field(),
            // Action panel
            KeyCode::Left if on_action_panel => self.state.cycle_button(false),
            KeyCode::Right if on_action_panel => self.state.cycle_button(true),
            KeyCode::Enter if on_action_panel => {
                let button = self.state.selected_button;
                self.press_button(button).await;
            }
            // Form field input (only when not on action panel)
            KeyCode::Left => self.state.cycle_active_choice(false),
            KeyCode::Right => self.state.cycle_active_choice(true),
            KeyCode::Enter => self.state.next_form_field(),
            KeyCode::Backspace => self.state.form_backspace(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
            {
                self.state.form_input_char(c)
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_submitted_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter => self.state.clear_form(),
            KeyCode::Char('y') => {
                let json = self.state.form.state().to_json_pretty()?;
                match self.copy_to_clipboard(&json) {
                    Ok(()) => self.state.status_message = Some("Copied to clipboard".to_string()),
                    Err(e) => self.state.push_error(format!("Failed to copy: {e}")),
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    async fn press_button(&mut self, button: NavButton) {
        if !self.state.is_button_enabled(button) {
            self.state.status_message = Some("Fill in all required fields first".to_string());
            return;
        }
        match button {
            NavButton::Prev => {
                self.state.step_prev();
            }
            NavButton::Next => {
                self.state.step_next();
            }
            NavButton::Submit => self.submit().await,
        }
    }

    /// Hand the form to the sink; failures keep the data for a retry
    async fn submit(&mut self) {
        let snapshot = match self.state.form.submit(|state| state.clone()) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.state.status_message = Some(e.to_string());
                return;
            }
        };

        let title = self.state.form.title().to_string();
        match self.sink.submit(&title, &snapshot).await {
            Ok(receipt) => self.state.finish(receipt),
            Err(e) => {
                tracing::warn!("submission of '{title}' failed: {e:#}");
                self.state.push_error(format!("Failed to submit: {e}"));
            }
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}
