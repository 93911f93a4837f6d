//! Stepped-form controller: navigation, change handling and the submit gate

use super::definition::{FormDefinition, StepDefinition};
use super::error::FormError;
use super::field::{FieldKind, FieldSpec, FieldValue};
use super::policy::{self, Revalidation};
use super::store::FormState;

/// Read-only snapshot consumed by presentation code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationView {
    pub current_step_index: usize,
    pub step_count: usize,
    pub step_title: String,
    pub can_go_next: bool,
    pub can_go_prev: bool,
    pub can_submit: bool,
    pub is_first_step: bool,
    pub is_final_step: bool,
}

impl NavigationView {
    pub fn hide_prev(&self) -> bool {
        self.is_first_step
    }

    pub fn hide_next(&self) -> bool {
        self.is_final_step
    }

    pub fn hide_submit(&self) -> bool {
        !self.is_final_step
    }
}

/// Owns the values and the position of one multi-step form
#[derive(Debug, Clone)]
pub struct SteppedForm {
    definition: FormDefinition,
    state: FormState,
    index: usize,
    revalidation: Revalidation,
}

impl SteppedForm {
    pub fn new(definition: FormDefinition, revalidation: Revalidation) -> Result<Self, FormError> {
        definition.validate()?;
        let state = FormState::from_fields(definition.fields());
        Ok(Self {
            definition,
            state,
            index: 0,
            revalidation,
        })
    }

    pub fn title(&self) -> &str {
        &self.definition.title
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn revalidation(&self) -> Revalidation {
        self.revalidation
    }

    pub fn current_step_index(&self) -> usize {
        self.index
    }

    /// Steps whose condition holds for the current values, in order
    pub fn active_steps(&self) -> Vec<&StepDefinition> {
        self.definition
            .steps
            .iter()
            .filter(|s| s.is_active(&self.state))
            .collect()
    }

    pub fn step_count(&self) -> usize {
        self.active_steps().len()
    }

    pub fn current_step(&self) -> &StepDefinition {
        let steps = self.active_steps();
        // validate() guarantees at least one unconditional step
        steps[self.index.min(steps.len() - 1)]
    }

    /// Fields shown on the current step
    pub fn visible_fields(&self) -> &[FieldSpec] {
        &self.current_step().fields
    }

    pub fn value(&self, name: &str) -> FieldValue {
        match self.state.get_field(name) {
            Some(v) => v.clone(),
            None => FieldValue::default(),
        }
    }

    /// Whether a field is currently filled by a sync rule
    pub fn is_locked(&self, name: &str) -> bool {
        self.definition
            .sync_rules
            .iter()
            .any(|r| r.locks(name, &self.state))
    }

    pub fn can_go_next(&self) -> bool {
        let steps = self.active_steps();
        !policy::is_final_step(self.index, steps.len())
            && policy::can_advance(steps[self.index], &self.state)
    }

    pub fn can_go_prev(&self) -> bool {
        policy::can_retreat(self.index)
    }

    pub fn can_submit(&self) -> bool {
        policy::can_submit(
            &self.active_steps(),
            self.index,
            &self.state,
            self.revalidation,
        )
    }

    pub fn view(&self) -> NavigationView {
        let steps = self.active_steps();
        let step_count = steps.len();
        NavigationView {
            current_step_index: self.index,
            step_count,
            step_title: steps[self.index].title.clone(),
            can_go_next: self.can_go_next(),
            can_go_prev: self.can_go_prev(),
            can_submit: self.can_submit(),
            is_first_step: policy::is_first_step(self.index),
            is_final_step: policy::is_final_step(self.index, step_count),
        }
    }

    /// Generic change handler for every input of the form
    ///
    /// Runs the matching sync rule when a trigger field actually changes, so
    /// targets are up to date before anything reads them.
    pub fn on_field_change(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), FormError> {
        let value = value.into();
        let spec = self
            .definition
            .field(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;

        if let (FieldKind::Choice(options), FieldValue::Text(text)) = (&spec.kind, &value) {
            if !text.is_empty() && !options.contains(text) {
                return Err(FormError::InvalidChoice {
                    field: name.to_string(),
                    value: text.clone(),
                });
            }
        }
        if self.is_locked(name) {
            tracing::warn!("rejected edit of synced field '{name}'");
            return Err(FormError::FieldLocked(name.to_string()));
        }

        let current_id = self.current_step().id.clone();
        let before: Vec<String> = self.active_steps().iter().map(|s| s.id.clone()).collect();
        let previous = self.state.set_field(name, value)?;
        tracing::debug!("field '{name}' changed");

        if self.state.get_field(name) != Some(&previous) {
            for rule in self.definition.sync_rules.iter().filter(|r| r.trigger == name) {
                rule.apply(&mut self.state);
            }
        }

        self.realign(&current_id, &before);
        Ok(())
    }

    /// Keep the user on the same step when conditional steps appear or vanish
    ///
    /// A step that appears before the user's position has never been visited,
    /// so the user is moved back onto it.
    fn realign(&mut self, current_id: &str, before: &[String]) {
        let steps = self.active_steps();
        let position = steps.iter().position(|s| s.id == current_id);
        let unvisited = steps
            .iter()
            .take(position.unwrap_or(self.index))
            .position(|s| !before.contains(&s.id));
        let index = match (unvisited, position) {
            (Some(i), _) | (None, Some(i)) => i,
            (None, None) => self.index.min(steps.len() - 1),
        };
        if index != self.index {
            tracing::debug!("step sequence changed, index {} -> {index}", self.index);
            self.index = index;
        }
    }

    /// Move forward exactly one step; no-op when the current step is incomplete
    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.index += 1;
        tracing::debug!("advanced to step {}", self.index);
        true
    }

    /// Move back exactly one step; no-op on the first step
    pub fn prev(&mut self) -> bool {
        if !self.can_go_prev() {
            return false;
        }
        self.index -= 1;
        tracing::debug!("went back to step {}", self.index);
        true
    }

    /// Jump to a step, walking forward through `next` so no gate is skipped
    ///
    /// Returns false (leaving the position untouched) when the target is out
    /// of range or an intermediate step is incomplete.
    pub fn go_to(&mut self, target: usize) -> bool {
        if target >= self.step_count() {
            return false;
        }
        if target <= self.index {
            self.index = target;
            return true;
        }
        let start = self.index;
        while self.index < target {
            if !self.next() {
                self.index = start;
                return false;
            }
        }
        true
    }

    /// Hand the full form state to a collaborator when the submit gate is open
    pub fn submit<R>(&self, on_submit: impl FnOnce(&FormState) -> R) -> Result<R, FormError> {
        if !self.can_submit() {
            return Err(FormError::SubmitBlocked);
        }
        tracing::info!("submitting form '{}'", self.definition.title);
        Ok(on_submit(&self.state))
    }

    /// Back to zero values on the first step
    pub fn reset(&mut self) {
        self.state = FormState::from_fields(self.definition.fields());
        self.index = 0;
    }
}
