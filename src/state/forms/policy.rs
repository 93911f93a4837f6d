//! Step policy: pure navigation gates derived from required-field completeness

use super::definition::StepDefinition;
use super::store::FormState;
use serde::{Deserialize, Serialize};

/// Which steps the submit gate rechecks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Revalidation {
    /// Only the final step's required fields; earlier steps are trusted once passed
    #[default]
    CurrentStep,
    /// Every active step's required fields
    Cumulative,
}

impl Revalidation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CurrentStep => "current step",
            Self::Cumulative => "cumulative",
        }
    }
}

impl std::str::FromStr for Revalidation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "current_step" | "current" => Ok(Self::CurrentStep),
            "cumulative" | "all" => Ok(Self::Cumulative),
            other => Err(format!("unknown revalidation policy '{other}'")),
        }
    }
}

/// True iff every required field of `step` is truthy
pub fn can_advance(step: &StepDefinition, state: &FormState) -> bool {
    step.required_fields().all(|name| state.is_truthy(name))
}

pub fn can_retreat(index: usize) -> bool {
    index > 0
}

pub fn is_first_step(index: usize) -> bool {
    index == 0
}

pub fn is_final_step(index: usize, step_count: usize) -> bool {
    step_count > 0 && index == step_count - 1
}

/// Submit gate over the active step sequence
pub fn can_submit(
    steps: &[&StepDefinition],
    index: usize,
    state: &FormState,
    revalidation: Revalidation,
) -> bool {
    if !is_final_step(index, steps.len()) {
        return false;
    }
    match revalidation {
        Revalidation::CurrentStep => can_advance(steps[index], state),
        Revalidation::Cumulative => steps.iter().all(|step| can_advance(step, state)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{FieldSpec, FieldValue};

    fn name_step() -> StepDefinition {
        StepDefinition::new(
            "name",
            "Name",
            vec![
                FieldSpec::text("firstName", "First Name"),
                FieldSpec::text("lastName", "Last Name"),
                FieldSpec::text("middleName", "Middle Name").optional(),
                FieldSpec::checkbox("newsletter", "Newsletter"),
            ],
        )
    }

    fn filled(step: &StepDefinition) -> FormState {
        let mut state = FormState::from_fields(step.fields.iter());
        state.set_field("firstName", "Jo").unwrap();
        state.set_field("lastName", "Doe").unwrap();
        state
    }

    #[test]
    fn test_scenario_a_empty_required_blocks() {
        let step = name_step();
        let mut state = FormState::from_fields(step.fields.iter());
        state.set_field("lastName", "Doe").unwrap();
        assert!(!can_advance(&step, &state));
    }

    #[test]
    fn test_scenario_b_all_required_allows() {
        let step = name_step();
        assert!(can_advance(&step, &filled(&step)));
    }

    #[test]
    fn test_flipping_any_required_field_blocks() {
        let step = name_step();
        for name in step.required_fields() {
            let mut state = filled(&step);
            let zero = step.field(name).unwrap().zero_value();
            state.set_field(name, zero).unwrap();
            assert!(!can_advance(&step, &state), "clearing {name} should block");
        }
    }

    #[test]
    fn test_non_required_fields_never_matter() {
        let step = name_step();
        let optional: Vec<&FieldSpec> = step.fields.iter().filter(|f| !f.required).collect();
        assert_eq!(optional.len(), 2);

        for base in [filled(&step), FormState::from_fields(step.fields.iter())] {
            let expected = can_advance(&step, &base);
            for field in &optional {
                let mut state = base.clone();
                let value = if field.is_checkbox() {
                    FieldValue::Flag(true)
                } else {
                    FieldValue::from("Q")
                };
                state.set_field(&field.name, value).unwrap();
                assert_eq!(can_advance(&step, &state), expected);
            }
        }
    }

    #[test]
    fn test_required_checkbox_must_be_checked() {
        let step = StepDefinition::new(
            "terms",
            "Terms",
            vec![FieldSpec::checkbox("accept", "Accept").required()],
        );
        let mut state = FormState::from_fields(step.fields.iter());
        assert!(!can_advance(&step, &state));
        state.set_field("accept", true).unwrap();
        assert!(can_advance(&step, &state));
    }

    #[test]
    fn test_step_without_required_fields_can_advance() {
        let step = StepDefinition::new("done", "Done", vec![FieldSpec::checkbox("x", "X")]);
        assert!(can_advance(&step, &FormState::from_fields(step.fields.iter())));
    }

    #[test]
    fn test_index_predicates() {
        assert!(!can_retreat(0));
        assert!(can_retreat(2));
        assert!(is_first_step(0));
        assert!(!is_first_step(1));
        assert!(is_final_step(2, 3));
        assert!(!is_final_step(1, 3));
        assert!(!is_final_step(0, 0));
    }

    #[test]
    fn test_submit_gate_modes() {
        let first = name_step();
        let last = StepDefinition::new("city", "City", vec![FieldSpec::text("city", "City")]);
        let mut state = FormState::from_fields(first.fields.iter().chain(last.fields.iter()));
        state.set_field("city", "Austin").unwrap();
        let steps = [&first, &last];

        assert!(!can_submit(&steps, 0, &state, Revalidation::CurrentStep));
        assert!(can_submit(&steps, 1, &state, Revalidation::CurrentStep));
        assert!(!can_submit(&steps, 1, &state, Revalidation::Cumulative));

        state.set_field("firstName", "Jo").unwrap();
        state.set_field("lastName", "Doe").unwrap();
        assert!(can_submit(&steps, 1, &state, Revalidation::Cumulative));
    }

    #[test]
    fn test_revalidation_parsing() {
        assert_eq!("current_step".parse(), Ok(Revalidation::CurrentStep));
        assert_eq!("Cumulative".parse(), Ok(Revalidation::Cumulative));
        assert_eq!("current-step".parse(), Ok(Revalidation::CurrentStep));
        assert!("sometimes".parse::<Revalidation>().is_err());
    }
}
