//! Field rendering utilities for forms

use crate::state::{FieldSpec, FieldValue};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field box
pub const FIELD_HEIGHT: u16 = 3;

/// How a field should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldState {
    pub is_active: bool,
    /// Filled from another field and not editable
    pub is_locked: bool,
}

/// Draw a form field from its spec and current value
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    spec: &FieldSpec,
    value: &FieldValue,
    state: FieldState,
) {
    let accent = if state.is_locked {
        Color::Gray
    } else {
        Color::Cyan
    };
    let border_style = if state.is_active {
        Style::default().fg(accent)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = spec.display_value(value);
    let mut spans = Vec::with_capacity(2);
    match &spec.placeholder {
        Some(placeholder) if display_value.is_empty() && !state.is_active => {
            spans.push(Span::styled(
                placeholder.clone(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ));
        }
        None if display_value.is_empty() && !state.is_active => {
            spans.push(Span::styled("(empty)", Style::default().fg(Color::DarkGray)));
        }
        _ => {
            let style = if state.is_active {
                Style::default().fg(accent)
            } else {
                Style::default()
            };
            spans.push(Span::styled(display_value, style));
        }
    }
    if state.is_active && !state.is_locked && !spec.is_checkbox() {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }

    let block = Block::default()
        .title(field_title(spec, state.is_locked))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Box title: label, a required marker, and a lock note
fn field_title(spec: &FieldSpec, is_locked: bool) -> String {
    let required = if spec.required { " *" } else { "" };
    let locked = if is_locked { " (synced)" } else { "" };
    format!(" {}{required}{locked} ", spec.label)
}
