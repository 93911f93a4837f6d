//! Application state definitions

use super::forms::{FieldKind, FieldSpec, FieldValue, FormError, SteppedForm};
use crate::submit::SubmitReceipt;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Wizard,
    Submitted,
}

/// Buttons in the navigation row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavButton {
    Prev,
    #[default]
    Next,
    Submit,
}

impl NavButton {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Prev => "Prev",
            Self::Next => "Next",
            Self::Submit => "Submit",
        }
    }
}

/// Main application state
#[derive(Debug)]
pub struct AppState {
    pub current_view: View,
    pub form: SteppedForm,
    /// Index into the current step's fields; one past the end is the button row
    pub active_form_field: usize,
    pub selected_button: NavButton,
    pub last_receipt: Option<SubmitReceipt>,
    pub status_message: Option<String>,
    errors: VecDeque<String>,
}

impl AppState {
    pub fn new(form: SteppedForm) -> Self {
        let mut state = Self {
            current_view: View::default(),
            form,
            active_form_field: 0,
            selected_button: NavButton::default(),
            last_receipt: None,
            status_message: None,
            errors: VecDeque::new(),
        };
        state.select_default_button();
        state
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push_back(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    /// Fields plus the button row
    pub fn form_field_count(&self) -> usize {
        self.form.visible_fields().len() + 1
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.active_form_field >= self.form.visible_fields().len()
    }

    pub fn active_field(&self) -> Option<&FieldSpec> {
        self.form.visible_fields().get(self.active_form_field)
    }

    /// Move to next form field
    pub fn next_form_field(&mut self) {
        self.active_form_field = (self.active_form_field + 1) % self.form_field_count();
    }

    /// Move to previous form field
    pub fn prev_form_field(&mut self) {
        if self.active_form_field == 0 {
            self.active_form_field = self.form_field_count() - 1;
        } else {
            self.active_form_field -= 1;
        }
    }

    /// Buttons shown for the current step, in display order
    pub fn visible_buttons(&self) -> Vec<NavButton> {
        let view = self.form.view();
        let mut buttons = Vec::with_capacity(2);
        if !view.hide_prev() {
            buttons.push(NavButton::Prev);
        }
        if !view.hide_next() {
            buttons.push(NavButton::Next);
        }
        if !view.hide_submit() {
            buttons.push(NavButton::Submit);
        }
        buttons
    }

    pub fn is_button_enabled(&self, button: NavButton) -> bool {
        match button {
            NavButton::Prev => self.form.can_go_prev(),
            NavButton::Next => self.form.can_go_next(),
            NavButton::Submit => self.form.can_submit(),
        }
    }

    /// Move the button selection (wraps around)
    pub fn cycle_button(&mut self, forward: bool) {
        let buttons = self.visible_buttons();
        let len = buttons.len();
        let pos = buttons
            .iter()
            .position(|b| *b == self.selected_button)
            .unwrap_or(0);
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        self.selected_button = buttons[next];
    }

    /// Prefer the forward action of the current step
    fn select_default_button(&mut self) {
        self.selected_button = if self.form.view().is_final_step {
            NavButton::Submit
        } else {
            NavButton::Next
        };
    }

    /// Run a field change through the controller, keeping rejections visible
    fn change_active(&mut self, value: FieldValue) {
        let Some(name) = self.active_field().map(|f| f.name.clone()) else {
            return;
        };
        match self.form.on_field_change(&name, value) {
            Ok(()) => self.clamp_active_field(),
            Err(e @ FormError::FieldLocked(_)) => self.status_message = Some(e.to_string()),
            Err(e) => self.push_error(e.to_string()),
        }
    }

    /// Handle character input in the active field
    pub fn form_input_char(&mut self, c: char) {
        let Some(field) = self.active_field().cloned() else {
            return;
        };
        match field.kind {
            FieldKind::Text => {
                let mut text = self.form.value(&field.name).as_text().to_string();
                text.push(c);
                self.change_active(FieldValue::Text(text));
            }
            FieldKind::Checkbox if c == ' ' => self.toggle_active_checkbox(),
            FieldKind::Choice(_) if c == ' ' => self.cycle_active_choice(true),
            _ => {}
        }
    }

    /// Delete the last character, or clear a choice
    pub fn form_backspace(&mut self) {
        let Some(field) = self.active_field().cloned() else {
            return;
        };
        match field.kind {
            FieldKind::Text => {
                let mut text = self.form.value(&field.name).as_text().to_string();
                if text.pop().is_some() {
                    self.change_active(FieldValue::Text(text));
                }
            }
            FieldKind::Choice(_) => self.change_active(FieldValue::Text(String::new())),
            FieldKind::Checkbox => {}
        }
    }

    pub fn toggle_active_checkbox(&mut self) {
        let Some(field) = self.active_field().filter(|f| f.is_checkbox()).cloned() else {
            return;
        };
        let checked = self.form.value(&field.name).as_flag();
        self.change_active(FieldValue::Flag(!checked));
    }

    pub fn cycle_active_choice(&mut self, forward: bool) {
        let Some(field) = self.active_field().cloned() else {
            return;
        };
        let current = self.form.value(&field.name);
        if let Some(option) = field.cycle_choice(current.as_text(), forward) {
            self.change_active(FieldValue::Text(option));
        }
    }

    /// Go to the next step; returns false when the current step is incomplete
    pub fn step_next(&mut self) -> bool {
        let moved = self.form.next();
        if moved {
            self.enter_step();
        } else {
            self.status_message = Some("Fill in all required fields first".to_string());
        }
        moved
    }

    pub fn step_prev(&mut self) -> bool {
        let moved = self.form.prev();
        if moved {
            self.enter_step();
        }
        moved
    }

    /// Jump to a step by index; forward jumps need every step on the way complete
    pub fn step_to(&mut self, target: usize) -> bool {
        let from = self.form.current_step_index();
        let moved = self.form.go_to(target);
        if !moved {
            self.status_message = Some(format!("Step {} is not reachable yet", target + 1));
        } else if from != target {
            self.enter_step();
        }
        moved
    }

    fn enter_step(&mut self) {
        self.active_form_field = 0;
        self.select_default_button();
    }

    /// Conditional steps can change the field list under the cursor
    fn clamp_active_field(&mut self) {
        let max = self.form_field_count() - 1;
        if self.active_form_field > max {
            self.active_form_field = max;
        }
        if !self.visible_buttons().contains(&self.selected_button) {
            self.select_default_button();
        }
    }

    /// Record a completed submission
    pub fn finish(&mut self, receipt: SubmitReceipt) {
        self.last_receipt = Some(receipt);
        self.current_view = View::Submitted;
    }

    /// Start over with an empty form
    pub fn clear_form(&mut self) {
        self.form.reset();
        self.current_view = View::Wizard;
        self.status_message = None;
        self.enter_step();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{catalog, Revalidation};

    fn checkout_state() -> AppState {
        AppState::new(SteppedForm::new(catalog::checkout(), Revalidation::CurrentStep).unwrap())
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            state.form_input_char(c);
        }
    }

    fn fill_billing(state: &mut AppState) {
        for (name, value) in [
            ("billFirstName", "Jo"),
            ("billLastName", "Doe"),
            ("billAddress1", "Main St"),
            ("billCity", "Austin"),
            ("billState", "TX"),
            ("billZip", "78701"),
        ] {
            state.form.on_field_change(name, value).unwrap();
        }
    }

    #[test]
    fn test_initial_state() {
        let state = checkout_state();
        assert_eq!(state.current_view, View::Wizard);
        assert_eq!(state.active_form_field, 0);
        assert_eq!(state.selected_button, NavButton::Next);
        assert!(!state.has_errors());
        assert_eq!(state.form_field_count(), 8);
    }

    #[test]
    fn test_field_cycling_wraps_through_button_row() {
        let mut state = checkout_state();
        state.prev_form_field();
        assert!(state.is_buttons_row_active());
        state.next_form_field();
        assert_eq!(state.active_form_field, 0);
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut state = checkout_state();
        type_text(&mut state, "Jon");
        state.form_backspace();
        assert_eq!(state.form.state().text("billFirstName"), "Jo");
    }

    #[test]
    fn test_choice_cycles_and_clears() {
        let mut state = checkout_state();
        state.active_form_field = 5;
        assert_eq!(state.active_field().unwrap().name, "billState");
        state.cycle_active_choice(true);
        assert_eq!(state.form.state().text("billState"), "CA");
        state.form_input_char(' ');
        assert_eq!(state.form.state().text("billState"), "NY");
        state.form_backspace();
        assert_eq!(state.form.state().text("billState"), "");
    }

    #[test]
    fn test_buttons_follow_step_position() {
        let mut state = checkout_state();
        assert_eq!(state.visible_buttons(), vec![NavButton::Next]);
        assert!(!state.is_button_enabled(NavButton::Next));

        fill_billing(&mut state);
        assert!(state.step_next());
        assert_eq!(
            state.visible_buttons(),
            vec![NavButton::Prev, NavButton::Next]
        );
        assert_eq!(state.active_form_field, 0);
    }

    #[test]
    fn test_blocked_step_next_sets_status() {
        let mut state = checkout_state();
        assert!(!state.step_next());
        assert!(state.status_message.is_some());
        assert_eq!(state.form.current_step_index(), 0);
    }

    #[test]
    fn test_locked_field_reports_status_not_error() {
        let mut state = checkout_state();
        fill_billing(&mut state);
        state.step_next();
        state.toggle_active_checkbox();
        assert!(state.form.state().flag("sameAsBilling"));

        state.active_form_field = 1;
        state.form_input_char('x');
        assert!(!state.has_errors());
        assert!(state.status_message.unwrap().contains("shipFirstName"));
        assert_eq!(state.form.state().text("shipFirstName"), "Jo");
    }

    #[test]
    fn test_final_step_selects_submit() {
        let mut state = checkout_state();
        fill_billing(&mut state);
        state.step_next();
        state.toggle_active_checkbox();
        state.step_next();
        assert_eq!(state.selected_button, NavButton::Submit);
        assert_eq!(
            state.visible_buttons(),
            vec![NavButton::Prev, NavButton::Submit]
        );
        state.cycle_button(true);
        assert_eq!(state.selected_button, NavButton::Prev);
        state.cycle_button(false);
        assert_eq!(state.selected_button, NavButton::Submit);
    }

    #[test]
    fn test_step_to_respects_gates() {
        let mut state = checkout_state();
        assert!(!state.step_to(2));
        assert_eq!(state.form.current_step_index(), 0);
        assert_eq!(
            state.status_message.as_deref(),
            Some("Step 3 is not reachable yet")
        );

        fill_billing(&mut state);
        state.form.on_field_change("sameAsBilling", true).unwrap();
        assert!(state.step_to(2));
        assert_eq!(state.selected_button, NavButton::Submit);
        assert!(state.step_to(0));
        assert_eq!(state.form.current_step_index(), 0);
    }

    #[test]
    fn test_error_queue() {
        let mut state = checkout_state();
        state.push_error("first");
        state.push_error("second");
        assert_eq!(state.current_error(), Some("first"));
        state.dismiss_error();
        assert_eq!(state.current_error(), Some("second"));
        state.dismiss_error();
        assert!(!state.has_errors());
    }

    #[test]
    fn test_finish_and_clear() {
        let mut state = checkout_state();
        fill_billing(&mut state);
        state.finish(SubmitReceipt::new("Checkout"));
        assert_eq!(state.current_view, View::Submitted);
        assert!(state.last_receipt.is_some());

        state.clear_form();
        assert_eq!(state.current_view, View::Wizard);
        assert_eq!(state.form.state().text("billCity"), "");
    }
}
