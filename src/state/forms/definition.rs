//! Declarative form definitions: steps, their fields and sync rules

use super::error::FormError;
use super::field::{FieldKind, FieldSpec};
use super::store::FormState;
use super::sync::SyncRule;
use std::collections::HashSet;

/// Decides whether a conditional step is part of the active sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepCondition {
    /// Field holds a truthy value
    Truthy(String),
    /// Field holds a falsy value
    Falsy(String),
    /// Text field equals the given value
    Equals(String, String),
    /// Text field parses as an integer smaller than the bound
    LessThan(String, i64),
}

impl StepCondition {
    pub fn field(&self) -> &str {
        match self {
            StepCondition::Truthy(f)
            | StepCondition::Falsy(f)
            | StepCondition::Equals(f, _)
            | StepCondition::LessThan(f, _) => f,
        }
    }

    pub fn holds(&self, state: &FormState) -> bool {
        match self {
            StepCondition::Truthy(f) => state.is_truthy(f),
            StepCondition::Falsy(f) => !state.is_truthy(f),
            StepCondition::Equals(f, v) => state.text(f) == v,
            StepCondition::LessThan(f, bound) => state
                .text(f)
                .trim()
                .parse::<i64>()
                .is_ok_and(|n| n < *bound),
        }
    }
}

/// One page of a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDefinition {
    pub id: String,
    pub title: String,
    pub fields: Vec<FieldSpec>,
    pub condition: Option<StepCondition>,
}

impl StepDefinition {
    pub fn new(id: &str, title: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            fields,
            condition: None,
        }
    }

    /// Only include this step while `condition` holds
    pub fn when(mut self, condition: StepCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
    }

    pub fn is_active(&self, state: &FormState) -> bool {
        self.condition.as_ref().map_or(true, |c| c.holds(state))
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A complete multi-step form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefinition {
    pub title: String,
    pub steps: Vec<StepDefinition>,
    pub sync_rules: Vec<SyncRule>,
}

impl FormDefinition {
    pub fn new(title: &str, steps: Vec<StepDefinition>) -> Self {
        Self {
            title: title.to_string(),
            steps,
            sync_rules: Vec::new(),
        }
    }

    pub fn with_sync(mut self, rule: SyncRule) -> Self {
        self.sync_rules.push(rule);
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.steps.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields().find(|f| f.name == name)
    }

    /// Check the definition for wiring mistakes before it is used
    pub fn validate(&self) -> Result<(), FormError> {
        let invalid = |msg: String| Err(FormError::InvalidDefinition(msg));

        if self.steps.is_empty() {
            return invalid(format!("form '{}' has no steps", self.title));
        }
        if self.steps.iter().all(|s| s.condition.is_some()) {
            return invalid(format!(
                "form '{}' needs at least one unconditional step",
                self.title
            ));
        }

        let mut step_ids = HashSet::new();
        let mut names = HashSet::new();
        for step in &self.steps {
            if !step_ids.insert(step.id.as_str()) {
                return invalid(format!("duplicate step id '{}'", step.id));
            }
            for field in &step.fields {
                if !names.insert(field.name.as_str()) {
                    return invalid(format!("duplicate field '{}'", field.name));
                }
                if matches!(&field.kind, FieldKind::Choice(options) if options.is_empty()) {
                    return invalid(format!("choice field '{}' has no options", field.name));
                }
            }
        }

        // Conditions may only look back, so a step never appears behind the user
        for (i, step) in self.steps.iter().enumerate() {
            let Some(condition) = &step.condition else {
                continue;
            };
            let field = condition.field();
            match self.steps.iter().position(|s| s.field(field).is_some()) {
                None => {
                    return invalid(format!(
                        "step '{}' depends on unknown field '{field}'",
                        step.id
                    ))
                }
                Some(j) if j >= i => {
                    return invalid(format!(
                        "step '{}' depends on '{field}', which is not on an earlier step",
                        step.id
                    ))
                }
                Some(_) => {}
            }
        }

        for rule in &self.sync_rules {
            match self.field(&rule.trigger) {
                None => return invalid(format!("unknown sync trigger '{}'", rule.trigger)),
                Some(f) if !f.is_checkbox() => {
                    return invalid(format!("sync trigger '{}' is not a checkbox", rule.trigger))
                }
                Some(_) => {}
            }
            for (source, target) in &rule.pairs {
                let (Some(s), Some(t)) = (self.field(source), self.field(target)) else {
                    return invalid(format!("sync pair '{source}' -> '{target}' names an unknown field"));
                };
                if s.is_checkbox() != t.is_checkbox() {
                    return invalid(format!(
                        "sync pair '{source}' -> '{target}' mixes {} and {} fields",
                        s.kind.label(),
                        t.kind.label()
                    ));
                }
                if target == &rule.trigger {
                    return invalid(format!("sync rule '{}' targets its own trigger", rule.trigger));
                }
            }
        }

        Ok(())
    }
}
