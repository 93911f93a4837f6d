//! Field store: the flat name -> value map behind a form

use super::error::FormError;
use super::field::{FieldSpec, FieldValue};
use serde::Serialize;
use std::collections::BTreeMap;

/// Current values of every field of a form
///
/// The key set is fixed when the store is built; writes to unknown names
/// are rejected instead of growing the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormState {
    values: BTreeMap<String, FieldValue>,
}

impl FormState {
    /// Build a store with every field at its zero value
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = &'a FieldSpec>) -> Self {
        let values = fields
            .into_iter()
            .map(|f| (f.name.clone(), f.zero_value()))
            .collect();
        Self { values }
    }

    /// Overwrite exactly one entry, returning the previous value
    pub fn set_field(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<FieldValue, FormError> {
        let value = value.into();
        let slot = self
            .values
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        if !slot.accepts(&value) {
            return Err(FormError::KindMismatch {
                field: name.to_string(),
                expected: match slot {
                    FieldValue::Text(_) => "text",
                    FieldValue::Flag(_) => "boolean",
                },
            });
        }
        Ok(std::mem::replace(slot, value))
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Text value of a field, or "" when missing
    pub fn text(&self, name: &str) -> &str {
        self.values.get(name).map(|v| v.as_text()).unwrap_or("")
    }

    /// Flag value of a field, or false when missing
    pub fn flag(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(|v| v.as_flag())
    }

    pub fn is_truthy(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(|v| v.is_truthy())
    }

    /// Pretty JSON of the whole store, as handed to submit collaborators
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
