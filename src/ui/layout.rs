//! Layout components: header and status bar

use crate::app::App;
use crate::platform::{NEXT_STEP_SHORTCUT, PREV_STEP_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into header, main area and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

/// Form title and revalidation policy
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let header = Line::from(vec![
        Span::styled(
            format!(" {} ", form.title()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  submit checks: {}", form.revalidation().label()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {} ", get_view_hints(&app.state.current_view)),
        Style::default().fg(Color::White),
    )];

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    spans.push(Span::raw(" | "));
    spans.push(Span::styled(
        app.sink.describe(),
        Style::default().fg(Color::Blue),
    ));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: &View) -> String {
    match view {
        View::Wizard => format!(
            "Tab:field  Space:toggle  ←/→:choice  {NEXT_STEP_SHORTCUT}:next  {PREV_STEP_SHORTCUT}:prev  {SUBMIT_SHORTCUT}:submit  Esc:quit"
        ),
        View::Submitted => "Enter:new  y:copy  Esc:quit".to_string(),
    }
}
