//! Derived-field sync: one-way copy-or-clear rules driven by a checkbox

use super::field::FieldValue;
use super::store::FormState;

/// Copies sources onto targets while the trigger is on, clears targets when off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRule {
    pub trigger: String,
    /// (source, target) pairs
    pub pairs: Vec<(String, String)>,
}

impl SyncRule {
    pub fn new(trigger: &str, pairs: &[(&str, &str)]) -> Self {
        Self {
            trigger: trigger.to_string(),
            pairs: pairs
                .iter()
                .map(|(s, t)| (s.to_string(), t.to_string()))
                .collect(),
        }
    }

    pub fn is_target(&self, name: &str) -> bool {
        self.pairs.iter().any(|(_, t)| t == name)
    }

    /// Whether `name` is a target currently being filled from its source
    pub fn locks(&self, name: &str, state: &FormState) -> bool {
        state.flag(&self.trigger) && self.is_target(name)
    }

    /// Run the rule against the current trigger value
    ///
    /// Returns the number of target fields written.
    pub fn apply(&self, state: &mut FormState) -> usize {
        let on = state.flag(&self.trigger);
        let mut written = 0;
        for (source, target) in &self.pairs {
            let value = if on {
                state.get_field(source).cloned()
            } else {
                state.get_field(target).map(FieldValue::cleared)
            };
            if let Some(value) = value {
                if state.set_field(target, value).is_ok() {
                    written += 1;
                }
            }
        }
        tracing::debug!(
            "sync '{}' {} {written} field(s)",
            self.trigger,
            if on { "copied" } else { "cleared" }
        );
        written
    }
}
