//! Form rendering module
//!
//! - `field_renderer`: single field boxes
//! - `steps`: step screens and their registry
//! - the wizard layout: current step on the left, navigation on the right

mod field_renderer;
mod steps;

pub use steps::ScreenRegistry;
use steps::{StepContext, StepNav};

use crate::app::App;
use crate::state::NavButton;
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the wizard: current step plus the navigation panel
pub fn draw_wizard(frame: &mut Frame, area: Rect, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Step area
            Constraint::Length(20), // Navigation panel
        ])
        .split(area);

    draw_step(frame, main_chunks[0], app);
    draw_nav_panel(frame, main_chunks[1], app);
}

fn draw_step(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let view = state.form.view();
    let step = state.form.current_step();

    let border_color = if state.is_buttons_row_active() {
        Color::DarkGray
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .title(format!(" {} ", view.step_title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let ctx = StepContext {
        step,
        form: &state.form,
        nav: StepNav::from(&view),
        active_field: (!state.is_buttons_row_active()).then_some(state.active_form_field),
    };
    app.screens.screen(&step.id).draw(frame, inner, &ctx);
}

fn draw_nav_panel(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let is_focused = state.is_buttons_row_active();

    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let buttons = state.visible_buttons();
    let mut constraints = vec![Constraint::Length(BUTTON_HEIGHT); buttons.len()];
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (i, button) in buttons.iter().enumerate() {
        let accent = match button {
            NavButton::Submit => Some(Color::Green),
            _ => None,
        };
        render_button(
            frame,
            chunks[i],
            button.label(),
            is_focused && state.selected_button == *button,
            state.is_button_enabled(*button),
            accent,
        );
    }
}
