//! Step screens
//!
//! Each step of a form is drawn by a [`StepScreen`] picked from a
//! [`ScreenRegistry`] by step id. Screens get the navigation capability of
//! the step as plain data in [`StepNav`].

use super::field_renderer::{draw_field, FieldState, FIELD_HEIGHT};
use crate::state::{NavigationView, StepDefinition, SteppedForm};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use std::collections::HashMap;

/// Position and gates of the step being drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepNav {
    pub index: usize,
    pub count: usize,
    pub can_next: bool,
    pub can_prev: bool,
}

impl From<&NavigationView> for StepNav {
    fn from(view: &NavigationView) -> Self {
        Self {
            index: view.current_step_index,
            count: view.step_count,
            can_next: view.can_go_next,
            can_prev: view.can_go_prev,
        }
    }
}

/// Everything a screen needs to draw one step
pub struct StepContext<'a> {
    pub step: &'a StepDefinition,
    pub form: &'a SteppedForm,
    pub nav: StepNav,
    /// Index of the focused field, if focus is on a field
    pub active_field: Option<usize>,
}

/// Draws one step of a form from its [`StepContext`]
pub trait StepScreen {
    fn draw(&self, frame: &mut Frame, area: Rect, ctx: &StepContext);
}

fn progress_line(nav: &StepNav) -> Line<'static> {
    let gate = |open: bool, text: &'static str| {
        let color = if open { Color::Green } else { Color::DarkGray };
        Span::styled(text, Style::default().fg(color))
    };
    Line::from(vec![
        Span::styled(
            format!("Step {} of {}", nav.index + 1, nav.count),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw("  "),
        gate(nav.can_prev, "‹ back"),
        Span::raw(" "),
        gate(nav.can_next, "next ›"),
        Span::styled("   * required", Style::default().fg(Color::DarkGray)),
    ])
}

/// First field index to draw so the active field stays on screen
fn scroll_offset(active: Option<usize>, fits: usize) -> usize {
    match active {
        Some(i) if fits > 0 && i >= fits => i + 1 - fits,
        _ => 0,
    }
}

/// Stacks the step's fields under a progress line
#[derive(Debug, Default)]
pub struct FieldListScreen;

impl FieldListScreen {
    fn draw_fields(frame: &mut Frame, area: Rect, ctx: &StepContext) {
        let fits = (area.height / FIELD_HEIGHT) as usize;
        let offset = scroll_offset(ctx.active_field, fits);

        let fields = &ctx.step.fields;
        for (slot, (i, spec)) in fields.iter().enumerate().skip(offset).take(fits).enumerate() {
            let field_area = Rect {
                x: area.x,
                y: area.y + slot as u16 * FIELD_HEIGHT,
                width: area.width,
                height: FIELD_HEIGHT,
            };
            let state = FieldState {
                is_active: ctx.active_field == Some(i),
                is_locked: ctx.form.is_locked(&spec.name),
            };
            draw_field(frame, field_area, spec, &ctx.form.value(&spec.name), state);
        }
    }
}

impl StepScreen for FieldListScreen {
    fn draw(&self, frame: &mut Frame, area: Rect, ctx: &StepContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        frame.render_widget(Paragraph::new(progress_line(&ctx.nav)), chunks[0]);
        Self::draw_fields(frame, chunks[1], ctx);
    }
}

/// Fields followed by an explanatory note
#[derive(Debug)]
pub struct NoticeScreen {
    notice: String,
}

impl NoticeScreen {
    pub fn new(notice: &str) -> Self {
        Self {
            notice: notice.to_string(),
        }
    }
}

impl StepScreen for NoticeScreen {
    fn draw(&self, frame: &mut Frame, area: Rect, ctx: &StepContext) {
        let field_rows = ctx.step.fields.len() as u16 * FIELD_HEIGHT;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(field_rows),
                Constraint::Min(0),
            ])
            .split(area);

        frame.render_widget(Paragraph::new(progress_line(&ctx.nav)), chunks[0]);
        FieldListScreen::draw_fields(frame, chunks[1], ctx);

        let notice = Paragraph::new(Line::from(Span::styled(
            self.notice.as_str(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::ITALIC),
        )))
        .wrap(Wrap { trim: true });
        frame.render_widget(notice, chunks[2]);
    }
}

/// Maps step ids to screens; unknown steps use [`FieldListScreen`]
#[derive(Default)]
pub struct ScreenRegistry {
    screens: HashMap<String, Box<dyn StepScreen>>,
    fallback: FieldListScreen,
}

impl ScreenRegistry {
    /// Screens for the steps of the built-in forms
    pub fn builtin() -> Self {
        Self::default()
            .with(
                "updates",
                NoticeScreen::new("Save 10% now: subscribers get a discount on their next order."),
            )
            .with(
                "age_restriction",
                NoticeScreen::new(
                    "Accounts for users under 18 need approval from a parent or guardian.",
                ),
            )
    }

    pub fn with(mut self, step_id: &str, screen: impl StepScreen + 'static) -> Self {
        self.screens.insert(step_id.to_string(), Box::new(screen));
        self
    }

    pub fn screen(&self, step_id: &str) -> &dyn StepScreen {
        match self.screens.get(step_id) {
            Some(screen) => screen.as_ref(),
            None => &self.fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_keeps_active_visible() {
        assert_eq!(scroll_offset(None, 3), 0);
        assert_eq!(scroll_offset(Some(2), 3), 0);
        assert_eq!(scroll_offset(Some(3), 3), 1);
        assert_eq!(scroll_offset(Some(7), 3), 5);
        assert_eq!(scroll_offset(Some(7), 0), 0);
    }

    #[test]
    fn test_builtin_registry() {
        let registry = ScreenRegistry::builtin();
        assert!(registry.screens.contains_key("updates"));
        assert!(registry.screens.contains_key("age_restriction"));
        assert!(!registry.screens.contains_key("billing"));
    }

    #[test]
    fn test_step_nav_from_view() {
        let view = NavigationView {
            current_step_index: 1,
            step_count: 3,
            step_title: "Shipping".to_string(),
            can_go_next: false,
            can_go_prev: true,
            can_submit: false,
            is_first_step: false,
            is_final_step: false,
        };
        assert_eq!(
            StepNav::from(&view),
            StepNav {
                index: 1,
                count: 3,
                can_next: false,
                can_prev: true,
            }
        );
    }
}
